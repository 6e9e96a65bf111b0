//! Declarative scenario model
//!
//! The built-in suite is constructed in `scenarios`, but the same model
//! parses from YAML so one-off scenarios can be dropped into a directory and
//! run without recompiling.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{E2eError, E2eResult};

/// One independent, self-contained test case: its own navigation, its own
/// browser instance, no state shared with any other scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Unique name for this scenario
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Tags for filtering
    #[serde(default)]
    pub tags: Vec<String>,

    /// Steps to execute in order
    pub steps: Vec<TestStep>,
}

/// A single step in a scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TestStep {
    /// Navigate to a URL (relative to the base URL)
    Navigate {
        url: String,
        #[serde(default)]
        wait_for_selector: Option<String>,
    },

    /// Fill an input field
    Fill { selector: String, value: String },

    /// Check a checkbox
    Check { selector: String },

    /// Uncheck a checkbox
    Uncheck { selector: String },

    /// Assert observable state of an element. Conditions are polled until
    /// they hold or the timeout elapses; on failure the expected and actual
    /// values are reported.
    Assert {
        selector: String,
        #[serde(default)]
        visible: Option<bool>,
        #[serde(default)]
        text_contains: Option<String>,
        /// Exact input value (value-level equality, no reformatting)
        #[serde(default)]
        value: Option<String>,
        #[serde(default)]
        checked: Option<bool>,
        #[serde(default = "default_assert_timeout")]
        timeout_ms: u64,
    },

    /// Wait for a fixed amount of time (use sparingly)
    Sleep { ms: u64 },

    /// Click a control and await the resulting file-download event. The
    /// suggested filename is reported back for contract checking; a missing
    /// event within the bound is a timeout failure, not a retry trigger.
    Download {
        selector: String,
        #[serde(default = "default_download_timeout")]
        timeout_ms: u64,
    },

    /// Log a message (for debugging and declared skips)
    Log { message: String },
}

fn default_assert_timeout() -> u64 {
    5000
}

fn default_download_timeout() -> u64 {
    20_000
}

impl TestStep {
    /// Short name for step-level reporting
    pub fn name(&self) -> String {
        match self {
            TestStep::Navigate { url, .. } => format!("navigate:{}", url),
            TestStep::Fill { selector, .. } => format!("fill:{}", selector),
            TestStep::Check { selector } => format!("check:{}", selector),
            TestStep::Uncheck { selector } => format!("uncheck:{}", selector),
            TestStep::Assert { selector, .. } => format!("assert:{}", selector),
            TestStep::Sleep { ms } => format!("sleep:{}ms", ms),
            TestStep::Download { selector, .. } => format!("download:{}", selector),
            TestStep::Log { message } => {
                format!("log:{}", message.chars().take(30).collect::<String>())
            }
        }
    }
}

impl Scenario {
    /// Parse a scenario from a YAML string
    pub fn from_yaml(yaml: &str) -> E2eResult<Self> {
        serde_yaml::from_str(yaml).map_err(E2eError::from)
    }

    /// Parse a scenario from a YAML file
    pub fn from_file(path: &Path) -> E2eResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load all scenarios from a directory
    pub fn load_all(dir: &Path) -> E2eResult<Vec<Self>> {
        let mut scenarios = Vec::new();

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
            let scenario = Self::from_file(entry.path())?;
            scenarios.push(scenario);
        }

        Ok(scenarios)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
