//! Scenario runner
//!
//! Runs scenarios sequentially, each in its own browser process against a
//! freshly navigated page. A failure is recorded in that scenario's result
//! and never aborts siblings; there are no retries. Download filenames
//! reported by a scenario are checked here against the contract pattern,
//! keeping filename mismatches distinct from download timeouts.

use std::path::PathBuf;
use std::time::Instant;

use report_model::{is_report_filename, KnownDefects};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::error::{E2eError, E2eResult};
use crate::playwright::{PlaywrightConfig, PlaywrightHandle, StepResult};
use crate::scenarios;
use crate::server::{PageServer, ServerConfig};
use crate::spec::Scenario;

/// Result of running a single scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub success: bool,
    pub duration_ms: u64,
    pub steps: Vec<StepResult>,
    pub downloads: Vec<String>,
    /// Failure kind (`assertion`, `download_timeout`, `filename_mismatch`, ...)
    pub failure_kind: Option<String>,
    pub error: Option<String>,
}

/// Result of running the whole suite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub results: Vec<ScenarioResult>,
}

impl SuiteResult {
    /// Aggregate per-scenario results; a scenario is counted exactly once.
    pub fn summarize(results: Vec<ScenarioResult>, duration_ms: u64) -> Self {
        let passed = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            passed,
            failed: results.len() - passed,
            duration_ms,
            results,
        }
    }
}

/// Main harness runner
pub struct HarnessRunner {
    server_config: ServerConfig,
    playwright_config: PlaywrightConfig,

    /// Attached or spawned page (if ensured)
    server: Option<PageServer>,

    /// Extra drop-in YAML scenarios
    scenario_dir: Option<PathBuf>,

    /// Carve-outs applied to the built-in suite
    known_defects: KnownDefects,

    /// Include the unverified default-state scenario
    include_unverified: bool,

    /// Output directory for the results file
    output_dir: PathBuf,
}

impl HarnessRunner {
    pub fn with_config(config: RunnerConfig) -> Self {
        Self {
            server_config: config.server,
            playwright_config: config.playwright,
            server: None,
            scenario_dir: config.scenario_dir,
            known_defects: config.known_defects,
            include_unverified: config.include_unverified,
            output_dir: config.output_dir,
        }
    }

    /// Make sure the page answers before any scenario runs
    pub async fn ensure_page(&mut self) -> E2eResult<()> {
        if self.server.is_some() {
            return Ok(());
        }
        let server = PageServer::ensure(self.server_config.clone()).await?;
        self.playwright_config.base_url = server.base_url().to_string();
        self.server = Some(server);
        Ok(())
    }

    /// The suite: built-in scenarios plus any drop-ins from the scenario dir
    pub fn suite(&self) -> E2eResult<Vec<Scenario>> {
        let mut suite = scenarios::builtin(&self.known_defects, self.include_unverified);
        if let Some(dir) = &self.scenario_dir {
            suite.extend(Scenario::load_all(dir)?);
        }
        Ok(suite)
    }

    /// Run the full suite
    pub async fn run_all(&mut self) -> E2eResult<SuiteResult> {
        let suite = self.suite()?;
        self.run_scenarios(&suite).await
    }

    /// Run scenarios matching a tag
    pub async fn run_tagged(&mut self, tag: &str) -> E2eResult<SuiteResult> {
        let suite: Vec<Scenario> = self
            .suite()?
            .into_iter()
            .filter(|s| s.has_tag(tag))
            .collect();
        self.run_scenarios(&suite).await
    }

    /// Run one scenario by name
    pub async fn run_named(&mut self, name: &str) -> E2eResult<SuiteResult> {
        let scenario = self
            .suite()?
            .into_iter()
            .find(|s| s.name == name)
            .ok_or_else(|| E2eError::ScenarioNotFound(name.to_string()))?;
        self.run_scenarios(std::slice::from_ref(&scenario)).await
    }

    /// Run a list of scenarios, isolating failures to their scenario
    pub async fn run_scenarios(&mut self, suite: &[Scenario]) -> E2eResult<SuiteResult> {
        let start = Instant::now();

        self.ensure_page().await?;

        info!("Running {} scenario(s)...", suite.len());

        let mut results = Vec::new();
        for scenario in suite {
            let result = match self.run_scenario(scenario).await {
                Ok(result) => result,
                Err(e) => {
                    // Harness-level failure: still local to this scenario
                    ScenarioResult {
                        name: scenario.name.clone(),
                        success: false,
                        duration_ms: 0,
                        steps: vec![],
                        downloads: vec![],
                        failure_kind: Some(e.kind().to_string()),
                        error: Some(e.to_string()),
                    }
                }
            };
            if result.success {
                info!("✓ {} ({} ms)", result.name, result.duration_ms);
            } else {
                error!(
                    "✗ {} - {}",
                    result.name,
                    result.error.as_deref().unwrap_or("unknown error")
                );
            }
            results.push(result);
        }

        let summary = SuiteResult::summarize(results, start.elapsed().as_millis() as u64);

        info!("");
        info!(
            "Results: {} passed, {} failed ({} ms)",
            summary.passed, summary.failed, summary.duration_ms
        );

        Ok(summary)
    }

    /// Run a single scenario in a fresh browser instance
    pub async fn run_scenario(&self, scenario: &Scenario) -> E2eResult<ScenarioResult> {
        let start = Instant::now();
        debug!("Running scenario: {}", scenario.name);

        let playwright = PlaywrightHandle::new(self.playwright_config.clone())?;
        let run = playwright.run_scenario(scenario).await?;

        let mut failure = run.failure;

        // Every download this page produces must carry the contract name.
        if failure.is_none() {
            if let Some(bad) = run.downloads.iter().find(|name| !is_report_filename(name)) {
                failure = Some(E2eError::FilenameMismatch { actual: bad.clone() });
            }
        }

        Ok(ScenarioResult {
            name: scenario.name.clone(),
            success: failure.is_none(),
            duration_ms: start.elapsed().as_millis() as u64,
            steps: run.steps,
            downloads: run.downloads,
            failure_kind: failure.as_ref().map(|e| e.kind().to_string()),
            error: failure.map(|e| e.to_string()),
        })
    }

    /// Write suite results to a JSON file
    pub fn write_results(&self, results: &SuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let path = self.output_dir.join("report-e2e.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }

    /// Drop the page server handle (stopping a spawned child)
    pub fn stop_server(&mut self) {
        if let Some(mut server) = self.server.take() {
            server.stop();
        }
    }
}

impl Drop for HarnessRunner {
    fn drop(&mut self) {
        self.stop_server();
    }
}

/// Configuration for the harness runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub server: ServerConfig,
    pub playwright: PlaywrightConfig,
    pub scenario_dir: Option<PathBuf>,
    pub known_defects: KnownDefects,
    pub include_unverified: bool,
    pub output_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            playwright: PlaywrightConfig::default(),
            scenario_dir: None,
            known_defects: KnownDefects::current(),
            include_unverified: false,
            output_dir: PathBuf::from("test-results"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, success: bool, kind: Option<&str>) -> ScenarioResult {
        ScenarioResult {
            name: name.to_string(),
            success,
            duration_ms: 10,
            steps: vec![],
            downloads: vec![],
            failure_kind: kind.map(String::from),
            error: kind.map(|k| format!("{} failure", k)),
        }
    }

    #[test]
    fn summarize_counts_each_scenario_once() {
        let summary = SuiteResult::summarize(
            vec![
                result("date-filter-ui", true, None),
                result("device-toggle", false, Some("assertion")),
                result("pdf-export", false, Some("download_timeout")),
            ],
            1234,
        );
        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.duration_ms, 1234);
    }

    #[test]
    fn failure_kinds_survive_into_the_report() {
        let summary = SuiteResult::summarize(
            vec![
                result("pdf-export", false, Some("download_timeout")),
                result("pdf-export-2", false, Some("filename_mismatch")),
            ],
            1,
        );
        let kinds: Vec<&str> = summary
            .results
            .iter()
            .filter_map(|r| r.failure_kind.as_deref())
            .collect();
        assert_eq!(kinds, vec!["download_timeout", "filename_mismatch"]);
    }

    #[test]
    fn suite_includes_dropin_scenarios() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("extra.yaml"),
            r#"
name: extra-check
steps:
  - action: navigate
    url: /
"#,
        )
        .unwrap();

        let runner = HarnessRunner::with_config(RunnerConfig {
            scenario_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        });
        let suite = runner.suite().unwrap();
        assert_eq!(suite.len(), 6);
        assert!(suite.iter().any(|s| s.name == "extra-check"));
    }

    #[test]
    fn default_suite_is_the_builtin_five() {
        let runner = HarnessRunner::with_config(RunnerConfig::default());
        assert_eq!(runner.suite().unwrap().len(), 5);
    }
}
