use crate::telemetry::aggregator::DeviceTelemetry;
use crate::telemetry::events::TelemetryMessage;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Every device seen this session, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceRegistry {
    devices: Vec<DeviceTelemetry>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted snapshots. Devices last reset on another day are
    /// rolled over before anyone can read them; a repeated identity keeps its
    /// first snapshot.
    pub fn from_snapshots(snapshots: Vec<DeviceTelemetry>, today: NaiveDate) -> Self {
        let mut registry = Self::new();
        for mut device in snapshots {
            if registry.find(device.device_id()).is_some() {
                continue;
            }
            device.tidy();
            if device.roll_over(today) {
                info!("Resetting data for device {} (new day)", device.device_id());
            }
            registry.devices.push(device);
        }
        registry
    }

    /// Append the devices of `other` that are not known yet. Known devices
    /// keep their live state. Returns how many were added.
    pub fn merge(&mut self, other: DeviceRegistry) -> usize {
        let before = self.devices.len();
        for device in other.devices {
            if self.find(device.device_id()).is_none() {
                self.devices.push(device);
            }
        }
        self.devices.len() - before
    }

    pub fn snapshots(&self) -> &[DeviceTelemetry] {
        &self.devices
    }

    pub fn find(&self, device_id: &str) -> Option<&DeviceTelemetry> {
        self.devices.iter().find(|d| d.device_id() == device_id)
    }

    pub fn find_or_create(&mut self, device_id: &str) -> &mut DeviceTelemetry {
        let idx = match self.devices.iter().position(|d| d.device_id() == device_id) {
            Some(idx) => idx,
            None => {
                info!("Tracking new device {}", device_id);
                self.devices.push(DeviceTelemetry::new(device_id));
                self.devices.len() - 1
            }
        };
        &mut self.devices[idx]
    }

    /// Route a decoded message to its device. Returns true when the device
    /// was not tracked before.
    pub fn ingest(&mut self, message: &TelemetryMessage) -> bool {
        let before = self.count();
        self.find_or_create(&message.device_id)
            .ingest(message.timestamp, &message.event);
        self.count() != before
    }

    pub fn count(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeviceTelemetry> {
        self.devices.iter()
    }

    pub fn device_ids(&self) -> impl Iterator<Item = &str> {
        self.devices.iter().map(|d| d.device_id())
    }

    /// Day rollover for every device, for sessions left open past midnight.
    pub fn roll_over(&mut self, today: NaiveDate) -> usize {
        self.devices
            .iter_mut()
            .map(|d| d.roll_over(today))
            .filter(|reset| *reset)
            .count()
    }
}
