//! Device identifiers and filter subsets

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// A printer device the report page can filter by.
///
/// The set is closed: the page renders exactly one checkbox, one report
/// section, and one date header per identifier, keyed by the literal name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Device {
    MakerBot,
    Ender,
    Prusa,
}

impl Device {
    /// The full device universe, in the page's rendering order.
    pub const ALL: [Device; 3] = [Device::MakerBot, Device::Ender, Device::Prusa];

    /// The identifier as it appears in element ids and the `devices` parameter.
    pub fn id(&self) -> &'static str {
        match self {
            Device::MakerBot => "MakerBot",
            Device::Ender => "Ender",
            Device::Prusa => "Prusa",
        }
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for Device {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "MakerBot" => Ok(Device::MakerBot),
            "Ender" => Ok(Device::Ender),
            "Prusa" => Ok(Device::Prusa),
            other => Err(ModelError::UnknownDevice(other.to_string())),
        }
    }
}

/// A subset of the device universe, as selected by checkboxes or the
/// `devices` query parameter.
///
/// Internally ordered by the universe order so `devices_param` is stable
/// regardless of construction order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceFilter {
    selected: Vec<Device>,
}

impl DeviceFilter {
    /// Build a filter from any iterator of devices; duplicates collapse.
    pub fn new(devices: impl IntoIterator<Item = Device>) -> Self {
        let mut selected: Vec<Device> = Vec::new();
        for d in devices {
            if !selected.contains(&d) {
                selected.push(d);
            }
        }
        selected.sort_by_key(|d| Device::ALL.iter().position(|u| u == d));
        Self { selected }
    }

    /// All devices selected.
    pub fn all() -> Self {
        Self::new(Device::ALL)
    }

    /// Parse a comma-separated `devices` parameter value.
    ///
    /// Rejects unknown identifiers and empty segments; the page contract has
    /// no lenient mode, so neither does the model.
    pub fn from_param(param: &str) -> Result<Self> {
        if param.is_empty() {
            return Ok(Self::default());
        }
        let mut devices = Vec::new();
        for segment in param.split(',') {
            if segment.is_empty() {
                return Err(ModelError::EmptyDevice(param.to_string()));
            }
            devices.push(segment.parse::<Device>()?);
        }
        Ok(Self::new(devices))
    }

    /// Render the comma-separated `devices` parameter value.
    pub fn devices_param(&self) -> String {
        self.selected
            .iter()
            .map(|d| d.id())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn contains(&self, device: Device) -> bool {
        self.selected.contains(&device)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Selected devices in universe order.
    pub fn iter(&self) -> impl Iterator<Item = Device> + '_ {
        self.selected.iter().copied()
    }

    /// Devices in the universe but not in this filter, in universe order.
    pub fn complement(&self) -> impl Iterator<Item = Device> + '_ {
        Device::ALL.into_iter().filter(|d| !self.contains(*d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Device::MakerBot, "MakerBot")]
    #[test_case(Device::Ender, "Ender")]
    #[test_case(Device::Prusa, "Prusa")]
    fn device_id_round_trips(device: Device, id: &str) {
        assert_eq!(device.id(), id);
        assert_eq!(id.parse::<Device>().unwrap(), device);
    }

    #[test]
    fn device_serializes_to_the_literal_identifier() {
        assert_eq!(
            serde_json::to_string(&Device::MakerBot).unwrap(),
            "\"MakerBot\""
        );
        assert_eq!(
            serde_json::from_str::<Device>("\"Prusa\"").unwrap(),
            Device::Prusa
        );
    }

    #[test]
    fn unknown_device_rejected() {
        let err = "Ultimaker".parse::<Device>().unwrap_err();
        assert_eq!(err, ModelError::UnknownDevice("Ultimaker".to_string()));
    }

    #[test]
    fn filter_param_is_universe_ordered() {
        let filter = DeviceFilter::new([Device::Prusa, Device::MakerBot]);
        assert_eq!(filter.devices_param(), "MakerBot,Prusa");
    }

    #[test]
    fn filter_collapses_duplicates() {
        let filter = DeviceFilter::new([Device::Ender, Device::Ender]);
        assert_eq!(filter.len(), 1);
    }

    #[test]
    fn from_param_round_trips_every_subset() {
        // All 8 subsets of the universe.
        for mask in 0u8..8 {
            let devices: Vec<Device> = Device::ALL
                .into_iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, d)| d)
                .collect();
            let filter = DeviceFilter::new(devices);
            let parsed = DeviceFilter::from_param(&filter.devices_param());
            if filter.is_empty() {
                assert_eq!(parsed.unwrap(), DeviceFilter::default());
            } else {
                assert_eq!(parsed.unwrap(), filter);
            }
        }
    }

    #[test]
    fn from_param_rejects_unknown_and_empty_segments() {
        assert!(DeviceFilter::from_param("MakerBot,Ultimaker").is_err());
        assert!(DeviceFilter::from_param("MakerBot,,Prusa").is_err());
    }

    #[test]
    fn complement_covers_the_rest_of_the_universe() {
        let filter = DeviceFilter::new([Device::MakerBot, Device::Prusa]);
        let rest: Vec<Device> = filter.complement().collect();
        assert_eq!(rest, vec![Device::Ender]);
    }
}
