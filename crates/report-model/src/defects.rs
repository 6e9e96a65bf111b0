//! Declared known-defect carve-outs
//!
//! A carve-out exempts one (device, scenario) pair from an assertion the
//! page is known to fail, without removing the action that provokes it. The
//! list is data so a fix on the page side is a one-line removal here.

use crate::device::Device;

/// Assertion exemptions keyed by device and scenario name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownDefects {
    entries: Vec<(Device, &'static str)>,
}

impl KnownDefects {
    /// No carve-outs.
    pub fn none() -> Self {
        Self::default()
    }

    /// The carve-outs currently in force.
    ///
    /// MakerBot's report section does not reliably render after a checkbox
    /// toggle (it renders fine when the selection arrives via URL
    /// parameters). The toggle scenario still checks and unchecks the
    /// MakerBot box; only the visibility assertion is skipped.
    pub fn current() -> Self {
        Self {
            entries: vec![(Device::MakerBot, "device-toggle")],
        }
    }

    /// Whether an assertion for this device in this scenario is exempt.
    pub fn exempts(&self, device: Device, scenario: &str) -> bool {
        self.entries
            .iter()
            .any(|(d, s)| *d == device && *s == scenario)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The declared entries, for reporting.
    pub fn iter(&self) -> impl Iterator<Item = (Device, &'static str)> + '_ {
        self.entries.iter().copied()
    }
}
