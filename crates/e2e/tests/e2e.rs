//! E2E harness entry point
//!
//! This file is the test binary that runs the Production Report scenarios.
//! Run with: cargo test --package report-e2e --test e2e
//!
//! The page under test must be reachable at --base-url, or supply
//! --server-cmd to have the harness launch and tear it down. If Playwright
//! is not installed or the page does not answer, the run is skipped with
//! exit 0 unless REPORT_E2E_REQUIRED is set, so a plain `cargo test` in an
//! environment without the page stays green.

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use report_e2e::cli::Args;
use report_e2e::playwright::{Browser, PlaywrightConfig};
use report_e2e::runner::RunnerConfig;
use report_e2e::server::ServerConfig;
use report_e2e::{E2eError, E2eResult, HarnessRunner};
use report_model::KnownDefects;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().expect("valid directive")))
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
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

fn e2e_required() -> bool {
    std::env::var_os("REPORT_E2E_REQUIRED").is_some()
}

async fn async_main(args: Args) -> E2eResult<bool> {
    if let Err(e) = report_e2e::playwright::preflight() {
        if e2e_required() {
            return Err(e);
        }
        eprintln!("Skipping E2E suite: {}", e);
        return Ok(true);
    }

    let browser = match args.browser.as_str() {
        "firefox" => Browser::Firefox,
        "webkit" => Browser::Webkit,
        _ => Browser::Chromium,
    };

    let known_defects = if args.no_defect_carveouts {
        KnownDefects::none()
    } else {
        KnownDefects::current()
    };

    let config = RunnerConfig {
        server: ServerConfig {
            base_url: args.base_url.clone(),
            command: args.server_cmd,
            startup_timeout: Duration::from_secs(args.startup_timeout),
        },
        playwright: PlaywrightConfig {
            base_url: args.base_url,
            viewport_width: args.viewport_width,
            viewport_height: args.viewport_height,
            browser,
            headless: args.headless,
        },
        scenario_dir: args.scenarios,
        known_defects,
        include_unverified: args.include_unverified,
        output_dir: args.output,
    };

    let mut runner = HarnessRunner::with_config(config);

    let run = if let Some(name) = args.name {
        runner.run_named(&name).await
    } else if let Some(tag) = args.tag {
        runner.run_tagged(&tag).await
    } else {
        runner.run_all().await
    };

    let results = match run {
        Ok(results) => results,
        Err(e @ E2eError::PageUnreachable { .. }) if !e2e_required() => {
            eprintln!("Skipping E2E suite: {}", e);
            return Ok(true);
        }
        Err(e) => return Err(e),
    };

    runner.write_results(&results)?;

    Ok(results.failed == 0)
}
