//! Command-line arguments for the E2E harness binary

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "report-e2e")]
#[command(about = "E2E verification harness for the Production Report page")]
pub struct Args {
    /// Base URL the page is served at
    #[arg(long, default_value = "http://localhost:3000")]
    pub base_url: String,

    /// Command that serves the page (otherwise attach to a running instance)
    #[arg(long)]
    pub server_cmd: Option<String>,

    /// Seconds to wait for the page to answer
    #[arg(long, default_value = "30")]
    pub startup_timeout: u64,

    /// Directory of extra YAML scenarios to run alongside the built-in suite
    #[arg(short, long)]
    pub scenarios: Option<PathBuf>,

    /// Run only scenarios matching this tag
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Run only a specific scenario by name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Drop the known-defect carve-outs (assert everything)
    #[arg(long)]
    pub no_defect_carveouts: bool,

    /// Include the unverified default-state scenario
    #[arg(long)]
    pub include_unverified: bool,

    /// Browser to use (chromium, firefox, webkit)
    #[arg(long, default_value = "chromium")]
    pub browser: String,

    /// Run in headless mode (pass `--headless false` for a headed browser)
    #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
    pub headless: bool,

    /// Viewport width
    #[arg(long, default_value = "1280")]
    pub viewport_width: u32,

    /// Viewport height
    #[arg(long, default_value = "720")]
    pub viewport_height: u32,

    /// Output directory for results
    #[arg(short, long, default_value = "test-results")]
    pub output: PathBuf,
}
