//! Production Report E2E Harness
//!
//! A Rust-controlled verification harness for the Production Report page:
//! - optionally spawns the page server as a subprocess (or attaches to a
//!   running instance) and polls the base URL until it answers
//! - compiles each scenario into a self-contained Playwright script and runs
//!   it under `node`, one fresh browser per scenario
//! - parses structured JSON events from the script's stdout into per-step
//!   results and a distinct error taxonomy (assertion vs. download timeout
//!   vs. filename mismatch)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  HarnessRunner (Rust)                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  PageServer::ensure()      spawn or attach, reachability    │
//! │  scenarios::builtin()      five scenarios from report-model │
//! │  Scenario::load_all()      extra drop-in YAML scenarios     │
//! │  PlaywrightHandle          scenario -> JS -> node -> events │
//! │  SuiteResult               per-scenario pass/fail, JSON out │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Scenario (YAML-compatible)                                 │
//! │    └── steps: [TestStep]                                    │
//! │          ├── navigate { url }                               │
//! │          ├── fill { selector, value }                       │
//! │          ├── check / uncheck { selector }                   │
//! │          ├── assert { selector, visible?, value?, ... }     │
//! │          └── download { selector, timeout_ms }              │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod error;
pub mod playwright;
pub mod runner;
pub mod scenarios;
pub mod server;
pub mod spec;

pub use error::{E2eError, E2eResult};
pub use runner::HarnessRunner;
pub use spec::{Scenario, TestStep};
