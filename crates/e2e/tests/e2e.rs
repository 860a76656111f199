//! Smoke-test harness entry point
//!
//! This test binary runs the YAML smoke specs against a live deployment.
//! Run with: cargo test --package ccdesk-e2e --test e2e -- --specs specs
//!
//! It needs `DEFAULT_URL` pointing at a reachable CCDesk environment and a
//! Playwright installation (`npx playwright install`).

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ccdesk_common::SuiteConfig;
use ccdesk_e2e::deployment::DeploymentConfig;
use ccdesk_e2e::driver::{Browser, DriverConfig};
use ccdesk_e2e::runner::RunnerConfig;
use ccdesk_e2e::visual::VisualConfig;
use ccdesk_e2e::{E2eResult, TestRunner};

#[derive(Parser, Debug)]
#[command(name = "ccdesk-e2e")]
#[command(about = "Smoke-test runner for the CCDesk UI")]
struct Args {
    /// Path to smoke spec directory
    #[arg(short, long, default_value = "specs")]
    specs: PathBuf,

    /// Run only tests matching this tag
    #[arg(short, long)]
    tag: Option<String>,

    /// Run only a specific test by name
    #[arg(short, long)]
    name: Option<String>,

    /// Base URL of the deployment under test
    #[arg(long, env = "DEFAULT_URL")]
    base_url: Option<String>,

    /// Update visual baselines instead of comparing
    #[arg(long)]
    update_baselines: bool,

    /// Browser to use (chromium, firefox, webkit)
    #[arg(long, default_value = "chromium")]
    browser: String,

    /// Run with a visible browser window
    #[arg(long)]
    headed: bool,

    /// Viewport width
    #[arg(long, default_value = "1280")]
    viewport_width: u32,

    /// Viewport height
    #[arg(long, default_value = "720")]
    viewport_height: u32,

    /// Visual diff threshold (percentage)
    #[arg(long, default_value = "0.5")]
    visual_threshold: f64,

    /// Output directory for results
    #[arg(short, long, default_value = "test-results")]
    output: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("info".parse().expect("directive")),
        )
        .init();

    let args = Args::parse();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let result = rt.block_on(async_main(args));

    match result {
        Ok(success) => {
            if success {
                std::process::exit(0);
            } else {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    }
}

async fn async_main(args: Args) -> E2eResult<bool> {
    let mut suite = SuiteConfig::from_env();
    if let Some(base_url) = args.base_url {
        suite.base_url = base_url.trim_end_matches('/').to_string();
    }
    suite.headless = !args.headed;
    suite.viewport_width = args.viewport_width;
    suite.viewport_height = args.viewport_height;

    let browser: Browser = args.browser.parse().unwrap_or_default();

    let config = RunnerConfig {
        deployment: DeploymentConfig {
            base_url: suite.base_url.clone(),
            ..Default::default()
        },
        driver: DriverConfig {
            browser,
            headless: suite.headless,
            viewport_width: suite.viewport_width,
            viewport_height: suite.viewport_height,
            action_timeout: suite.action_timeout,
        },
        visual: VisualConfig {
            threshold: args.visual_threshold,
            auto_update: args.update_baselines,
            ..Default::default()
        },
        specs_dir: args.specs,
        output_dir: args.output,
        suite,
    };

    let mut runner = TestRunner::with_config(config);

    let results = if let Some(name) = args.name {
        let result = runner.run_test(&name).await?;
        ccdesk_e2e::runner::TestSuiteResult {
            total: 1,
            passed: if result.success { 1 } else { 0 },
            failed: if result.success { 0 } else { 1 },
            skipped: 0,
            duration_ms: result.duration_ms,
            results: vec![result],
        }
    } else if let Some(tag) = args.tag {
        runner.run_tagged(&tag).await?
    } else {
        runner.run_all().await?
    };

    if args.update_baselines {
        runner.update_baselines()?;
    }

    runner.write_results(&results)?;
    runner.shutdown().await?;

    Ok(results.failed == 0)
}

#[cfg(test)]
mod tests {
    use ccdesk_e2e::spec::TestSpec;

    #[test]
    fn test_parse_sample_spec() {
        let yaml = r#"
name: sample-test
description: A sample smoke test
steps:
  - action: navigate
    url: /
  - action: wait
    selector: '[data-cy="consolidated-login-form"]'
  - action: screenshot
    name: login-page
"#;
        let spec = TestSpec::from_yaml(yaml).unwrap();
        assert_eq!(spec.name, "sample-test");
        assert_eq!(spec.steps.len(), 3);
    }
}
