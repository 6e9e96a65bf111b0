//! Stable selectors for the page's addressable elements
//!
//! The page keys every per-device element by the literal device identifier:
//! `#checkbox-MakerBot`, `#report-MakerBot`, `#date-header-MakerBot`.

use crate::device::Device;

/// The start-date input field.
pub const START_DATE_INPUT: &str = "#startDateInput";

/// The end-date input field.
pub const END_DATE_INPUT: &str = "#endDateInput";

/// The PDF export trigger. The button carries no id; its visible label is
/// the stable handle.
pub const EXPORT_BUTTON: &str = r#"button:has-text("Download PDF")"#;

impl Device {
    /// The device's filter checkbox.
    pub fn checkbox_selector(&self) -> String {
        format!("#checkbox-{}", self.id())
    }

    /// The device's report section.
    pub fn report_selector(&self) -> String {
        format!("#report-{}", self.id())
    }

    /// The date-range header inside the device's report section.
    pub fn date_header_selector(&self) -> String {
        format!("#date-header-{}", self.id())
    }
}
