//! Date ranges and the page's header rendering of them

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// An inclusive calendar date range, as entered in the page's date inputs or
/// passed via `startDate`/`endDate` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range; an inverted range is rejected since the page's
    /// behavior for one is undefined.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(ModelError::InvertedRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parse a range from two ISO `YYYY-MM-DD` strings, the exact form the
    /// query parameters and input fields carry.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start = start
            .parse::<NaiveDate>()
            .map_err(|_| ModelError::InvalidDate(start.to_string()))?;
        let end = end
            .parse::<NaiveDate>()
            .map_err(|_| ModelError::InvalidDate(end.to_string()))?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// The `startDate` parameter / input value, `YYYY-MM-DD`.
    pub fn start_param(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// The `endDate` parameter / input value, `YYYY-MM-DD`.
    pub fn end_param(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }

    /// The text every device's date header shows for this range:
    /// `"Oct 28, 2024 - Oct 30, 2024"`. Day-of-month is unpadded.
    pub fn header_text(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%b %-d, %Y"),
            self.end.format("%b %-d, %Y")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_text_matches_page_format() {
        let range = DateRange::parse("2024-10-28", "2024-10-30").unwrap();
        assert_eq!(range.header_text(), "Oct 28, 2024 - Oct 30, 2024");
    }

    #[test]
    fn header_day_is_unpadded() {
        let range = DateRange::parse("2024-03-05", "2024-03-07").unwrap();
        assert_eq!(range.header_text(), "Mar 5, 2024 - Mar 7, 2024");
    }

    #[test]
    fn params_are_iso() {
        let range = DateRange::parse("2024-10-28", "2024-10-30").unwrap();
        assert_eq!(range.start_param(), "2024-10-28");
        assert_eq!(range.end_param(), "2024-10-30");
    }

    #[test]
    fn single_day_range_allowed() {
        assert!(DateRange::parse("2024-10-28", "2024-10-28").is_ok());
    }

    #[test]
    fn inverted_range_rejected() {
        let err = DateRange::parse("2024-10-30", "2024-10-28").unwrap_err();
        assert!(matches!(err, ModelError::InvertedRange { .. }));
    }

    #[test]
    fn malformed_date_rejected() {
        let err = DateRange::parse("10/28/2024", "2024-10-30").unwrap_err();
        assert_eq!(err, ModelError::InvalidDate("10/28/2024".to_string()));
    }
}
