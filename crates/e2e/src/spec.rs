//! Declarative YAML smoke-test specification
//!
//! Single-actor smoke flows (login renders, dashboard loads, logo matches
//! baseline) live in YAML under `specs/` so they can be added without
//! touching Rust. Multi-actor call scenarios stay in the scenario tests —
//! the step DSL is deliberately too small to express them.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{E2eError, E2eResult};

/// A complete smoke test parsed from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSpec {
    /// Unique name for this test
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Tags for filtering tests
    #[serde(default)]
    pub tags: Vec<String>,

    /// Viewport size for the browser context this spec runs in
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,

    /// Steps to execute in order
    pub steps: Vec<TestStep>,

    /// Whether screenshots taken by this spec are compared to baselines
    #[serde(default)]
    pub visual_regression: bool,

    /// Threshold for visual diff (0.0 - 100.0 percent)
    #[serde(default = "default_threshold")]
    pub visual_threshold: f64,
}

fn default_viewport() -> Viewport {
    Viewport {
        width: 1280,
        height: 720,
    }
}

fn default_threshold() -> f64 {
    0.5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// A single step in a smoke test
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TestStep {
    /// Navigate to a route (relative to the deployment base URL)
    Navigate {
        url: String,
        #[serde(default)]
        wait_for_selector: Option<String>,
    },

    /// Click an element
    Click {
        selector: String,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },

    /// Fill an input field
    Fill {
        selector: String,
        value: String,
    },

    /// Type text with keyboard simulation
    Type {
        selector: String,
        text: String,
        #[serde(default)]
        delay_ms: Option<u64>,
    },

    /// Press a key
    Press {
        selector: Option<String>,
        key: String,
    },

    /// Wait for an element to reach a state
    Wait {
        selector: String,
        #[serde(default = "default_wait_timeout")]
        timeout_ms: u64,
        #[serde(default)]
        state: WaitState,
    },

    /// Wait for a fixed amount of time. A known flakiness source in UI
    /// suites; prefer `wait` with a state.
    Sleep {
        ms: u64,
    },

    /// Assert something about an element
    Assert {
        selector: String,
        #[serde(default)]
        visible: Option<bool>,
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        text_contains: Option<String>,
        #[serde(default)]
        attribute: Option<AttributeAssertion>,
        #[serde(default)]
        count: Option<usize>,
        #[serde(default)]
        enabled: Option<bool>,
    },

    /// Take a screenshot
    Screenshot {
        name: String,
        #[serde(default)]
        selector: Option<String>,
        #[serde(default)]
        full_page: bool,
    },

    /// Hover over an element
    Hover {
        selector: String,
    },

    /// Focus an element
    Focus {
        selector: String,
    },

    /// Select an option from a dropdown
    Select {
        selector: String,
        value: String,
    },

    /// Check a checkbox
    Check {
        selector: String,
    },

    /// Uncheck a checkbox
    Uncheck {
        selector: String,
    },

    /// Evaluate a JavaScript expression in the page
    Evaluate {
        script: String,
        #[serde(default)]
        expected: Option<serde_json::Value>,
    },

    /// Log a message (for debugging)
    Log {
        message: String,
    },
}

fn default_wait_timeout() -> u64 {
    15_000
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitState {
    #[default]
    Visible,
    Hidden,
    Attached,
    Detached,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeAssertion {
    pub name: String,
    pub value: Option<String>,
    #[serde(default)]
    pub contains: Option<String>,
}

impl TestStep {
    /// Short display name used in step results and logs.
    pub fn display_name(&self) -> String {
        match self {
            TestStep::Navigate { url, .. } => format!("navigate:{url}"),
            TestStep::Click { selector, .. } => format!("click:{selector}"),
            TestStep::Fill { selector, .. } => format!("fill:{selector}"),
            TestStep::Type { selector, .. } => format!("type:{selector}"),
            TestStep::Press { key, .. } => format!("press:{key}"),
            TestStep::Wait { selector, .. } => format!("wait:{selector}"),
            TestStep::Sleep { ms } => format!("sleep:{ms}ms"),
            TestStep::Assert { selector, .. } => format!("assert:{selector}"),
            TestStep::Screenshot { name, .. } => format!("screenshot:{name}"),
            TestStep::Hover { selector } => format!("hover:{selector}"),
            TestStep::Focus { selector } => format!("focus:{selector}"),
            TestStep::Select { selector, .. } => format!("select:{selector}"),
            TestStep::Check { selector } => format!("check:{selector}"),
            TestStep::Uncheck { selector } => format!("uncheck:{selector}"),
            TestStep::Evaluate { .. } => "evaluate".to_string(),
            TestStep::Log { message } => {
                format!("log:{}", &message[..message.len().min(30)])
            }
        }
    }
}

impl TestSpec {
    /// Parse a test spec from YAML string
    pub fn from_yaml(yaml: &str) -> E2eResult<Self> {
        serde_yaml::from_str(yaml).map_err(E2eError::from)
    }

    /// Parse a test spec from a YAML file
    pub fn from_file(path: &Path) -> E2eResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load all test specs from a directory
    pub fn load_all(dir: &Path) -> E2eResult<Vec<Self>> {
        let mut specs = Vec::new();

        for entry in walkdir::WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
        {
            let spec = Self::from_file(entry.path())?;
            specs.push(spec);
        }

        // Stable order regardless of directory iteration
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(specs)
    }

    /// Filter specs by tag
    pub fn filter_by_tag<'a>(specs: &'a [Self], tag: &str) -> Vec<&'a Self> {
        specs
            .iter()
            .filter(|s| s.tags.iter().any(|t| t == tag))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login_smoke_spec() {
        let yaml = r#"
name: login-page-renders
description: The consolidated login form is reachable and complete
tags:
  - auth
  - smoke
steps:
  - action: navigate
    url: /
    wait_for_selector: '[data-cy="consolidated-login-form"]'
  - action: assert
    selector: '[data-cy="consolidated-login-login-button"]'
    enabled: false
  - action: fill
    selector: '[data-cy="consolidated-login-username-input"]'
    value: supervisor@qa.example.com
  - action: screenshot
    name: login-form
"#;
        let spec = TestSpec::from_yaml(yaml).unwrap();
        assert_eq!(spec.name, "login-page-renders");
        assert_eq!(spec.steps.len(), 4);
        assert!(!spec.visual_regression);
    }

    #[test]
    fn test_parse_visual_regression_spec() {
        let yaml = r#"
name: dashboard-logo-visual
description: Supervisor dashboard logo matches the checked-in baseline
visual_regression: true
visual_threshold: 1.0
viewport:
  width: 1920
  height: 1080
steps:
  - action: navigate
    url: /supervisor/dashboard
  - action: wait
    selector: '[data-cy="supervisor-dashboard-container"]'
  - action: screenshot
    name: dashboard-logo
    selector: '[data-cy="app-logo"]'
"#;
        let spec = TestSpec::from_yaml(yaml).unwrap();
        assert!(spec.visual_regression);
        assert_eq!(spec.visual_threshold, 1.0);
        assert_eq!(spec.viewport.width, 1920);
    }

    #[test]
    fn test_filter_by_tag() {
        let make = |name: &str, tags: &[&str]| TestSpec {
            name: name.to_string(),
            description: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            viewport: default_viewport(),
            steps: vec![],
            visual_regression: false,
            visual_threshold: default_threshold(),
        };
        let specs = vec![make("a", &["smoke"]), make("b", &["admin"])];
        let smoke = TestSpec::filter_by_tag(&specs, "smoke");
        assert_eq!(smoke.len(), 1);
        assert_eq!(smoke[0].name, "a");
    }

    #[test]
    fn test_step_display_names() {
        let step = TestStep::Click {
            selector: "[data-cy=\"loops-new-loop-button\"]".to_string(),
            timeout_ms: None,
        };
        assert!(step.display_name().starts_with("click:"));
    }
}
