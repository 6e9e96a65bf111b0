//! Error types for the verification harness
//!
//! The taxonomy keeps assertion failures, download timeouts, and filename
//! mismatches as separate variants end to end: the scenario report carries a
//! kind string per failure, so a download that never fires is never confused
//! with one that fires under the wrong name.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Page server failed to start: {0}")]
    ServerStartup(String),

    #[error("Page not reachable at {url} after {attempts} attempts")]
    PageUnreachable { url: String, attempts: usize },

    #[error("Playwright not found. Install with: npm i playwright && npx playwright install")]
    PlaywrightNotFound,

    #[error("Playwright script failed: {0}")]
    Playwright(String),

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("Assertion failed on {selector}: expected {expected}, got {actual}")]
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
    },

    #[error("No download event within {timeout_ms} ms of triggering export")]
    DownloadTimeout { timeout_ms: u64 },

    #[error("Downloaded filename {actual:?} does not match production-report-*.pdf")]
    FilenameMismatch { actual: String },

    #[error("Contract model error: {0}")]
    Model(#[from] report_model::ModelError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl E2eError {
    /// Stable kind string for the JSON results file.
    pub fn kind(&self) -> &'static str {
        match self {
            E2eError::ServerStartup(_) => "server_startup",
            E2eError::PageUnreachable { .. } => "page_unreachable",
            E2eError::PlaywrightNotFound => "playwright_not_found",
            E2eError::Playwright(_) => "playwright",
            E2eError::ScenarioNotFound(_) => "scenario_not_found",
            E2eError::AssertionFailed { .. } => "assertion",
            E2eError::DownloadTimeout { .. } => "download_timeout",
            E2eError::FilenameMismatch { .. } => "filename_mismatch",
            E2eError::Model(_) => "model",
            E2eError::Io(_) => "io",
            E2eError::Json(_) => "json",
            E2eError::Yaml(_) => "yaml",
            E2eError::Http(_) => "http",
        }
    }
}

pub type E2eResult<T> = Result<T, E2eError>;
