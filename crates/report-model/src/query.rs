//! Relative-URL construction from filter state

use crate::device::DeviceFilter;
use crate::range::DateRange;

/// The filter state to encode into the page URL.
///
/// Absent fields are omitted from the query string entirely; the page's
/// defaults for omitted parameters are its own business (and partly
/// unspecified, see DESIGN.md), so the model never fills them in.
#[derive(Debug, Clone, Default)]
pub struct ReportQuery {
    pub range: Option<DateRange>,
    pub devices: Option<DeviceFilter>,
}

impl ReportQuery {
    /// The bare page, no parameters.
    pub fn base() -> Self {
        Self::default()
    }

    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn with_devices(mut self, devices: DeviceFilter) -> Self {
        self.devices = Some(devices);
        self
    }

    /// Render the relative URL: `/` or `/?startDate=..&endDate=..&devices=..`.
    ///
    /// Parameter order is fixed (startDate, endDate, devices). Values are
    /// ISO dates and device identifiers, none of which need percent-escaping.
    pub fn relative_url(&self) -> String {
        let mut params: Vec<String> = Vec::new();
        if let Some(range) = &self.range {
            params.push(format!("startDate={}", range.start_param()));
            params.push(format!("endDate={}", range.end_param()));
        }
        if let Some(devices) = &self.devices {
            params.push(format!("devices={}", devices.devices_param()));
        }
        if params.is_empty() {
            "/".to_string()
        } else {
            format!("/?{}", params.join("&"))
        }
    }
}
