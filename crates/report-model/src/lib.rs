//! Production Report URL-State Contract
//!
//! Typed model of the contract between the report page's query parameters
//! (`startDate`, `endDate`, `devices`) and its rendered UI state: date input
//! values, per-device checkboxes, per-device report sections, and the date
//! header each section displays.
//!
//! The page itself lives outside this repository; these types exist so the
//! harness in `report-e2e` derives every selector, URL, and expected value
//! from one place instead of scattering string literals through scenarios.

pub mod defects;
pub mod device;
pub mod download;
pub mod error;
pub mod query;
pub mod range;
pub mod selectors;

// Re-export commonly used types
pub use defects::KnownDefects;
pub use device::{Device, DeviceFilter};
pub use download::is_report_filename;
pub use error::{ModelError, Result};
pub use query::ReportQuery;
pub use range::DateRange;

/// Contract model version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
