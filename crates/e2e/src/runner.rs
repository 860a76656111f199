//! Smoke-spec runner: deployment check, step execution, visual regression

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use ccdesk_common::SuiteConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::deployment::{self, DeploymentConfig};
use crate::driver::{DriverConfig, PlaywrightDriver};
use crate::error::{E2eError, E2eResult};
use crate::page::Page;
use crate::spec::{TestSpec, TestStep};
use crate::visual::{VisualConfig, VisualTester};

/// Result of executing a single step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub success: bool,
    pub step_name: String,
    pub duration_ms: u64,
    pub error: Option<String>,
    pub screenshot_path: Option<PathBuf>,
}

/// Result of running a single smoke test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub success: bool,
    pub duration_ms: u64,
    pub steps: Vec<StepResult>,
    pub visual_diffs: Vec<VisualDiffResult>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualDiffResult {
    pub name: String,
    pub matches: bool,
    pub diff_percent: f64,
    pub diff_image_path: Option<String>,
}

/// Result of running all smoke tests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration_ms: u64,
    pub results: Vec<TestResult>,
}

/// Configuration for the test runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub suite: SuiteConfig,
    pub driver: DriverConfig,
    pub deployment: DeploymentConfig,
    pub visual: VisualConfig,
    pub specs_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        let suite = SuiteConfig::from_env();
        let deployment = DeploymentConfig {
            base_url: suite.base_url.clone(),
            ..Default::default()
        };
        Self {
            suite,
            driver: DriverConfig::default(),
            deployment,
            visual: VisualConfig::default(),
            specs_dir: PathBuf::from("specs"),
            output_dir: PathBuf::from("test-results"),
        }
    }
}

/// Main smoke-spec runner
pub struct TestRunner {
    suite_config: SuiteConfig,
    driver_config: DriverConfig,
    deployment_config: DeploymentConfig,
    visual_config: VisualConfig,
    specs_dir: PathBuf,
    output_dir: PathBuf,

    /// Lazily launched; one sidecar serves the whole run.
    driver: Option<Arc<PlaywrightDriver>>,
}

impl TestRunner {
    pub fn new() -> Self {
        Self::with_config(RunnerConfig::default())
    }

    pub fn with_config(config: RunnerConfig) -> Self {
        Self {
            suite_config: config.suite,
            driver_config: config.driver,
            deployment_config: config.deployment,
            visual_config: config.visual,
            specs_dir: config.specs_dir,
            output_dir: config.output_dir,
            driver: None,
        }
    }

    /// Check the deployment and launch the sidecar, once.
    async fn ensure_ready(&mut self) -> E2eResult<Arc<PlaywrightDriver>> {
        if let Some(driver) = &self.driver {
            return Ok(Arc::clone(driver));
        }

        deployment::wait_for_ready(&self.deployment_config).await?;

        let driver = Arc::new(PlaywrightDriver::launch(self.driver_config.clone()).await?);
        self.driver = Some(Arc::clone(&driver));
        Ok(driver)
    }

    /// Run all smoke tests in the specs directory
    pub async fn run_all(&mut self) -> E2eResult<TestSuiteResult> {
        let specs = TestSpec::load_all(&self.specs_dir)?;
        self.run_specs(&specs).await
    }

    /// Run tests matching a tag
    pub async fn run_tagged(&mut self, tag: &str) -> E2eResult<TestSuiteResult> {
        let specs = TestSpec::load_all(&self.specs_dir)?;
        let filtered: Vec<TestSpec> = specs
            .into_iter()
            .filter(|s| s.tags.iter().any(|t| t == tag))
            .collect();
        self.run_specs(&filtered).await
    }

    /// Run a specific test by name
    pub async fn run_test(&mut self, name: &str) -> E2eResult<TestResult> {
        let specs = TestSpec::load_all(&self.specs_dir)?;
        let spec = specs
            .into_iter()
            .find(|s| s.name == name)
            .ok_or_else(|| E2eError::SpecParse(format!("test not found: {name}")))?;

        self.run_spec(&spec).await
    }

    /// Run a list of smoke tests sequentially
    pub async fn run_specs(&mut self, specs: &[TestSpec]) -> E2eResult<TestSuiteResult> {
        let start = Instant::now();
        let mut results = Vec::new();
        let mut passed = 0;
        let mut failed = 0;
        let skipped = 0;

        self.ensure_ready().await?;

        info!("Running {} smoke test(s) against {}", specs.len(), self.suite_config.base_url);

        for spec in specs {
            match self.run_spec(spec).await {
                Ok(result) => {
                    if result.success {
                        passed += 1;
                        info!("PASS {} ({} ms)", result.name, result.duration_ms);
                    } else {
                        failed += 1;
                        error!(
                            "FAIL {} - {}",
                            result.name,
                            result.error.as_deref().unwrap_or("unknown error")
                        );
                    }
                    results.push(result);
                }
                Err(e) => {
                    failed += 1;
                    error!("FAIL {} - {}", spec.name, e);
                    results.push(TestResult {
                        name: spec.name.clone(),
                        success: false,
                        duration_ms: 0,
                        steps: vec![],
                        visual_diffs: vec![],
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        let duration_ms = start.elapsed().as_millis() as u64;

        info!("");
        info!(
            "Smoke results: {} passed, {} failed, {} skipped ({} ms)",
            passed, failed, skipped, duration_ms
        );

        Ok(TestSuiteResult {
            total: specs.len(),
            passed,
            failed,
            skipped,
            duration_ms,
            results,
        })
    }

    /// Run a single smoke test in a fresh browser context
    pub async fn run_spec(&mut self, spec: &TestSpec) -> E2eResult<TestResult> {
        let start = Instant::now();
        debug!("Running smoke test: {}", spec.name);

        let driver = self.ensure_ready().await?;

        let context = driver
            .new_context_sized(spec.viewport.width, spec.viewport.height)
            .await?;
        let page_id = driver.new_page(&context).await?;
        let page = Page::new(Arc::clone(&driver), context.clone(), page_id, spec.name.clone());

        let mut step_results = Vec::new();
        let mut test_error: Option<String> = None;
        let mut screenshots: Vec<String> = Vec::new();

        for step in &spec.steps {
            let result = self.execute_step(&page, step).await;

            if !result.success {
                test_error = result.error.clone();
                step_results.push(result);
                break;
            }

            if let Some(path) = &result.screenshot_path {
                if let Some(name) = path.file_stem() {
                    screenshots.push(name.to_string_lossy().to_string());
                }
            }

            step_results.push(result);
        }

        driver.close_context(&context).await?;

        // Visual regression on the screenshots this spec produced
        let mut visual_diffs = Vec::new();
        if spec.visual_regression && test_error.is_none() {
            let visual_tester = VisualTester::new(self.visual_config.clone())?;

            for screenshot_name in &screenshots {
                match visual_tester.compare(screenshot_name, Some(spec.visual_threshold)) {
                    Ok(diff) => {
                        if !diff.matches {
                            test_error = Some(format!(
                                "visual regression in '{}': {:.2}% pixels differ",
                                screenshot_name, diff.diff_percent
                            ));
                        }
                        visual_diffs.push(VisualDiffResult {
                            name: screenshot_name.clone(),
                            matches: diff.matches,
                            diff_percent: diff.diff_percent,
                            diff_image_path: diff
                                .diff_image_path
                                .map(|p| p.to_string_lossy().to_string()),
                        });
                    }
                    Err(E2eError::BaselineNotFound(_)) => {
                        info!(
                            "No baseline for '{}' - run with --update-baselines to create it",
                            screenshot_name
                        );
                    }
                    Err(e) => {
                        test_error = Some(format!("visual comparison error: {e}"));
                    }
                }
            }
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        let success = test_error.is_none();

        Ok(TestResult {
            name: spec.name.clone(),
            success,
            duration_ms,
            steps: step_results,
            visual_diffs,
            error: test_error,
        })
    }

    /// Execute one step against a page, capturing outcome and timing.
    async fn execute_step(&self, page: &Page, step: &TestStep) -> StepResult {
        let start = Instant::now();
        let step_name = step.display_name();
        debug!("Executing step: {}", step_name);

        let mut screenshot_path = None;
        let outcome = self.apply_step(page, step, &mut screenshot_path).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(()) => StepResult {
                success: true,
                step_name,
                duration_ms,
                error: None,
                screenshot_path,
            },
            Err(e) => StepResult {
                success: false,
                step_name,
                duration_ms,
                error: Some(e.to_string()),
                screenshot_path: None,
            },
        }
    }

    async fn apply_step(
        &self,
        page: &Page,
        step: &TestStep,
        screenshot_path: &mut Option<PathBuf>,
    ) -> E2eResult<()> {
        match step {
            TestStep::Navigate {
                url,
                wait_for_selector,
            } => {
                page.goto(&self.suite_config.url(url)).await?;
                if let Some(selector) = wait_for_selector {
                    page.wait_for(selector).await?;
                }
                Ok(())
            }
            TestStep::Click {
                selector,
                timeout_ms,
            } => match timeout_ms {
                Some(ms) => {
                    page.click_with_timeout(selector, Duration::from_millis(*ms))
                        .await
                }
                None => page.click(selector).await,
            },
            TestStep::Fill { selector, value } => page.fill(selector, value).await,
            TestStep::Type {
                selector,
                text,
                delay_ms,
            } => {
                let delay = Duration::from_millis(delay_ms.unwrap_or(50));
                page.type_text(selector, text, delay).await
            }
            TestStep::Press { selector, key } => page.press(selector.as_deref(), key).await,
            TestStep::Wait {
                selector,
                timeout_ms,
                state,
            } => {
                page.wait_for_state(selector, *state, Duration::from_millis(*timeout_ms))
                    .await
            }
            TestStep::Sleep { ms } => {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
                Ok(())
            }
            TestStep::Assert {
                selector,
                visible,
                text,
                text_contains,
                attribute,
                count,
                enabled,
            } => {
                if let Some(visible) = visible {
                    if *visible {
                        page.expect_visible(selector).await?;
                    } else {
                        page.expect_hidden(selector).await?;
                    }
                }
                if let Some(text) = text {
                    page.expect_text(selector, text).await?;
                }
                if let Some(needle) = text_contains {
                    page.expect_text_contains(selector, needle).await?;
                }
                if let Some(attr) = attribute {
                    if let Some(value) = &attr.value {
                        page.expect_attribute(selector, &attr.name, value).await?;
                    } else if let Some(needle) = &attr.contains {
                        let actual = page.get_attribute(selector, &attr.name).await?;
                        match actual {
                            Some(ref v) if v.contains(needle.as_str()) => {}
                            other => {
                                return Err(E2eError::AssertionFailed(format!(
                                    "{selector}: expected {} containing {needle:?}, got {other:?}",
                                    attr.name
                                )))
                            }
                        }
                    }
                }
                if let Some(count) = count {
                    page.expect_count(selector, *count).await?;
                }
                if let Some(enabled) = enabled {
                    if *enabled {
                        page.expect_enabled(selector).await?;
                    } else {
                        page.expect_disabled(selector).await?;
                    }
                }
                Ok(())
            }
            TestStep::Screenshot {
                name,
                selector,
                full_page,
            } => {
                std::fs::create_dir_all(&self.visual_config.actual_dir)?;
                let path = self.visual_config.actual_dir.join(format!("{name}.png"));
                page.screenshot(&path, selector.as_deref(), *full_page)
                    .await?;
                *screenshot_path = Some(path);
                Ok(())
            }
            TestStep::Hover { selector } => page.hover(selector).await,
            TestStep::Focus { selector } => page.focus(selector).await,
            TestStep::Select { selector, value } => page.select_option(selector, value).await,
            TestStep::Check { selector } => page.check(selector).await,
            TestStep::Uncheck { selector } => page.uncheck(selector).await,
            TestStep::Evaluate { script, expected } => {
                let value = page.evaluate(script).await?;
                if let Some(expected) = expected {
                    if &value != expected {
                        return Err(E2eError::AssertionFailed(format!(
                            "evaluate: expected {expected}, got {value}"
                        )));
                    }
                }
                Ok(())
            }
            TestStep::Log { message } => {
                info!("[TEST LOG] {}", message);
                Ok(())
            }
        }
    }

    /// Update all visual baselines from current screenshots
    pub fn update_baselines(&self) -> E2eResult<()> {
        let visual_tester = VisualTester::new(VisualConfig {
            auto_update: true,
            ..self.visual_config.clone()
        })?;

        for entry in std::fs::read_dir(&self.visual_config.actual_dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().map(|e| e == "png").unwrap_or(false) {
                if let Some(name) = path.file_stem() {
                    visual_tester.update_baseline(&name.to_string_lossy())?;
                }
            }
        }

        Ok(())
    }

    /// Write test results to JSON file
    pub fn write_results(&self, results: &TestSuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let path = self.output_dir.join("test-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }

    /// Stop the sidecar; contexts are already closed per spec.
    pub async fn shutdown(&mut self) -> E2eResult<()> {
        if let Some(driver) = self.driver.take() {
            driver.shutdown().await?;
        }
        Ok(())
    }
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}
