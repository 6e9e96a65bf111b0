//! Export download filename contract

use once_cell::sync::Lazy;
use regex::Regex;

/// Anchored pattern for the exported PDF's suggested filename. The prefix
/// and extension are literal; only the middle segment (a timestamp in the
/// current page build) is free.
pub static DOWNLOAD_FILENAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^production-report-.*\.pdf$").expect("static pattern compiles"));

/// Whether a suggested filename satisfies the export naming contract.
pub fn is_report_filename(name: &str) -> bool {
    DOWNLOAD_FILENAME_PATTERN.is_match(name)
}
