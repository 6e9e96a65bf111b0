//! Playwright browser automation
//!
//! Each scenario compiles to one self-contained Playwright script executed
//! under `node` with a fresh browser and context, so page state persists
//! across the scenario's steps and nothing persists across scenarios. The
//! script reports back over stdout as JSON lines: one `step` event per
//! completed step, then a terminal `done` (with any collected download
//! filenames) or `error` event.

use std::process::{Command, Stdio};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::process::Command as TokioCommand;
use tracing::{debug, info};

use crate::error::{E2eError, E2eResult};
use crate::spec::{Scenario, TestStep};

/// Playwright browser handle
pub struct PlaywrightHandle {
    /// Base URL of the page under test
    base_url: String,

    /// Viewport dimensions
    viewport_width: u32,
    viewport_height: u32,

    /// Browser type
    browser: Browser,

    /// Headless mode
    headless: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

/// Result of executing a single step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub index: usize,
    pub name: String,
    pub ok: bool,
    pub duration_ms: u64,
}

/// Outcome of one scenario's script run. A failed assertion or download is a
/// recorded failure, not a harness error; only infrastructure problems
/// (spawn, parse) surface as `Err` from `run_scenario`.
#[derive(Debug)]
pub struct ScenarioRun {
    pub steps: Vec<StepResult>,
    pub downloads: Vec<String>,
    pub failure: Option<E2eError>,
}

/// Stdout lines that are JSON event objects
static EVENT_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\{.*\}$").expect("static pattern compiles"));

#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum WireEvent {
    Step {
        index: usize,
        name: String,
        ok: bool,
        duration_ms: u64,
    },
    Log {
        message: String,
    },
    Done {
        downloads: Vec<String>,
    },
    Error(WireError),
}

#[derive(Debug, Deserialize)]
struct WireError {
    kind: String,
    #[serde(default)]
    selector: Option<String>,
    #[serde(default)]
    expected: Option<String>,
    #[serde(default)]
    actual: Option<String>,
    #[serde(default)]
    timeout_ms: Option<u64>,
    #[serde(default)]
    message: Option<String>,
}

impl From<WireError> for E2eError {
    fn from(wire: WireError) -> Self {
        match wire.kind.as_str() {
            "assertion" => E2eError::AssertionFailed {
                selector: wire.selector.unwrap_or_default(),
                expected: wire.expected.unwrap_or_default(),
                actual: wire.actual.unwrap_or_default(),
            },
            "download_timeout" => E2eError::DownloadTimeout {
                timeout_ms: wire.timeout_ms.unwrap_or_default(),
            },
            _ => E2eError::Playwright(
                wire.message
                    .unwrap_or_else(|| format!("script error: {}", wire.kind)),
            ),
        }
    }
}

impl PlaywrightHandle {
    /// Create a new Playwright handle
    pub fn new(config: PlaywrightConfig) -> E2eResult<Self> {
        // Verify playwright is installed
        Self::check_playwright_installed()?;

        Ok(Self {
            base_url: config.base_url,
            viewport_width: config.viewport_width,
            viewport_height: config.viewport_height,
            browser: config.browser,
            headless: config.headless,
        })
    }

    /// Check if Playwright is installed
    fn check_playwright_installed() -> E2eResult<()> {
        let output = Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(E2eError::PlaywrightNotFound),
        }
    }

    /// Run a full scenario in one fresh browser instance
    pub async fn run_scenario(&self, scenario: &Scenario) -> E2eResult<ScenarioRun> {
        let script = self.build_script(scenario);

        // Stage the script in a tempdir
        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("scenario.js");
        std::fs::write(&script_path, &script)?;

        debug!(
            "Running scenario '{}' via {}",
            scenario.name,
            script_path.display()
        );

        let output = TokioCommand::new("node")
            .arg(&script_path)
            .current_dir(temp_dir.path())
            .output()
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let run = self.parse_events(&stdout)?;

        if run.failure.is_none() && !output.status.success() {
            // The script died without reporting a structured error
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(E2eError::Playwright(format!(
                "script exited with {} without a terminal event:\nstdout: {}\nstderr: {}",
                output.status, stdout, stderr
            )));
        }

        Ok(run)
    }

    /// Parse the JSON event lines a scenario script prints
    fn parse_events(&self, stdout: &str) -> E2eResult<ScenarioRun> {
        let mut steps = Vec::new();
        let mut downloads = Vec::new();
        let mut failure = None;
        let mut done = false;

        for line in EVENT_LINE.find_iter(stdout) {
            let event: WireEvent = match serde_json::from_str(line.as_str()) {
                Ok(event) => event,
                // Page console output can also reach stdout; skip lines that
                // happen to look like JSON but are not events.
                Err(_) => continue,
            };
            match event {
                WireEvent::Step {
                    index,
                    name,
                    ok,
                    duration_ms,
                } => steps.push(StepResult {
                    index,
                    name,
                    ok,
                    duration_ms,
                }),
                WireEvent::Log { message } => info!("[scenario] {}", message),
                WireEvent::Done { downloads: names } => {
                    downloads = names;
                    done = true;
                }
                WireEvent::Error(wire) => failure = Some(E2eError::from(wire)),
            }
        }

        if !done && failure.is_none() {
            return Err(E2eError::Playwright(format!(
                "script produced no terminal event:\n{}",
                stdout
            )));
        }

        Ok(ScenarioRun {
            steps,
            downloads,
            failure,
        })
    }

    /// Build the Playwright script for a scenario
    pub fn build_script(&self, scenario: &Scenario) -> String {
        let mut script = String::new();

        script.push_str(&format!(
            r#"const {{ chromium, firefox, webkit }} = require('playwright');

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }},
    acceptDownloads: true
  }});
  const page = await context.newPage();
  const baseUrl = {base_url};
  const downloads = [];

  const emit = (payload) => console.log(JSON.stringify(payload));
  let failure = null;
  const fail = (payload) => {{
    failure = payload;
    throw new Error('scenario-failure');
  }};
  const settle = async (probe, timeoutMs) => {{
    const deadline = Date.now() + timeoutMs;
    let last = await probe();
    while (!last.ok && Date.now() < deadline) {{
      await new Promise((resolve) => setTimeout(resolve, 100));
      last = await probe();
    }}
    return last;
  }};
  let stepIndex = 0;
  const step = async (name, fn) => {{
    const t0 = Date.now();
    await fn();
    emit({{ event: 'step', index: stepIndex++, name, ok: true, duration_ms: Date.now() - t0 }});
  }};

  try {{
"#,
            browser = self.browser.as_str(),
            headless = self.headless,
            width = self.viewport_width,
            height = self.viewport_height,
            base_url = js_str(&self.base_url),
        ));

        for (i, step) in scenario.steps.iter().enumerate() {
            script.push_str(&format!("\n    // Step {}: {}\n", i + 1, step.name()));
            script.push_str(&self.step_to_js(step));
        }

        script.push_str(
            r#"
  } catch (error) {
    if (!failure) {
      failure = { kind: 'script', message: error.message };
    }
  } finally {
    await browser.close();
  }

  if (failure) {
    emit({ event: 'error', ...failure });
    process.exit(1);
  }
  emit({ event: 'done', downloads });
})();
"#,
        );

        script
    }

    /// Convert a step to script code
    fn step_to_js(&self, step: &TestStep) -> String {
        let name = js_str(&step.name());
        match step {
            TestStep::Navigate {
                url,
                wait_for_selector,
            } => {
                let wait = wait_for_selector
                    .as_ref()
                    .map(|s| format!("\n      await page.waitForSelector({});", js_str(s)))
                    .unwrap_or_default();
                format!(
                    "    await step({name}, async () => {{\n      await page.goto(baseUrl + {url});{wait}\n    }});\n",
                    url = js_str(url),
                )
            }
            TestStep::Fill { selector, value } => format!(
                "    await step({name}, async () => {{\n      await page.fill({sel}, {val});\n    }});\n",
                sel = js_str(selector),
                val = js_str(value),
            ),
            TestStep::Check { selector } => format!(
                "    await step({name}, async () => {{\n      await page.check({sel});\n    }});\n",
                sel = js_str(selector),
            ),
            TestStep::Uncheck { selector } => format!(
                "    await step({name}, async () => {{\n      await page.uncheck({sel});\n    }});\n",
                sel = js_str(selector),
            ),
            TestStep::Sleep { ms } => format!(
                "    await step({name}, async () => {{\n      await page.waitForTimeout({ms});\n    }});\n",
            ),
            TestStep::Log { message } => {
                format!("    emit({{ event: 'log', message: {} }});\n", js_str(message))
            }
            TestStep::Assert {
                selector,
                visible,
                text_contains,
                value,
                checked,
                timeout_ms,
            } => {
                let mut checks = Vec::new();

                if let Some(expect_visible) = visible {
                    let expected = if *expect_visible { "visible" } else { "hidden" };
                    checks.push(format!(
                        r#"      {{
        const probe = async () => {{
          const visible = await page.isVisible({sel});
          return {{ ok: visible === {want}, actual: visible ? 'visible' : 'hidden' }};
        }};
        const last = await settle(probe, {timeout});
        if (!last.ok) fail({{ kind: 'assertion', selector: {sel}, expected: '{expected}', actual: last.actual }});
      }}"#,
                        sel = js_str(selector),
                        want = expect_visible,
                        timeout = timeout_ms,
                        expected = expected,
                    ));
                }

                if let Some(needle) = text_contains {
                    checks.push(format!(
                        r#"      {{
        const probe = async () => {{
          try {{
            const text = (await page.textContent({sel}, {{ timeout: 250 }})) ?? '';
            return {{ ok: text.includes({needle}), actual: text.trim() }};
          }} catch {{
            return {{ ok: false, actual: '<element not found>' }};
          }}
        }};
        const last = await settle(probe, {timeout});
        if (!last.ok) fail({{ kind: 'assertion', selector: {sel}, expected: 'text containing ' + {needle}, actual: last.actual }});
      }}"#,
                        sel = js_str(selector),
                        needle = js_str(needle),
                        timeout = timeout_ms,
                    ));
                }

                if let Some(expected_value) = value {
                    checks.push(format!(
                        r#"      {{
        const probe = async () => {{
          try {{
            const actual = await page.inputValue({sel}, {{ timeout: 250 }});
            return {{ ok: actual === {val}, actual }};
          }} catch {{
            return {{ ok: false, actual: '<element not found>' }};
          }}
        }};
        const last = await settle(probe, {timeout});
        if (!last.ok) fail({{ kind: 'assertion', selector: {sel}, expected: 'value ' + {val}, actual: last.actual }});
      }}"#,
                        sel = js_str(selector),
                        val = js_str(expected_value),
                        timeout = timeout_ms,
                    ));
                }

                if let Some(expect_checked) = checked {
                    let expected = if *expect_checked { "checked" } else { "unchecked" };
                    checks.push(format!(
                        r#"      {{
        const probe = async () => {{
          try {{
            const checked = await page.isChecked({sel}, {{ timeout: 250 }});
            return {{ ok: checked === {want}, actual: checked ? 'checked' : 'unchecked' }};
          }} catch {{
            return {{ ok: false, actual: '<element not found>' }};
          }}
        }};
        const last = await settle(probe, {timeout});
        if (!last.ok) fail({{ kind: 'assertion', selector: {sel}, expected: '{expected}', actual: last.actual }});
      }}"#,
                        sel = js_str(selector),
                        want = expect_checked,
                        timeout = timeout_ms,
                        expected = expected,
                    ));
                }

                format!(
                    "    await step({name}, async () => {{\n{}\n    }});\n",
                    checks.join("\n")
                )
            }
            TestStep::Download {
                selector,
                timeout_ms,
            } => format!(
                r#"    await step({name}, async () => {{
      let download;
      try {{
        [download] = await Promise.all([
          page.waitForEvent('download', {{ timeout: {timeout} }}),
          page.click({sel}),
        ]);
      }} catch (error) {{
        if (error.name === 'TimeoutError') {{
          fail({{ kind: 'download_timeout', timeout_ms: {timeout} }});
        }}
        throw error;
      }}
      downloads.push(download.suggestedFilename());
    }});
"#,
                sel = js_str(selector),
                timeout = timeout_ms,
            ),
        }
    }
}

/// Preflight check that Playwright is available, without building a handle
pub fn preflight() -> E2eResult<()> {
    PlaywrightHandle::check_playwright_installed()
}

/// Render a Rust string as a single-quoted JS string literal
fn js_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Configuration for Playwright
#[derive(Debug, Clone)]
pub struct PlaywrightConfig {
    pub base_url: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub browser: Browser,
    pub headless: bool,
}

impl Default for PlaywrightConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            viewport_width: 1280,
            viewport_height: 720,
            browser: Browser::Chromium,
            headless: true,
        }
    }
}
