use crate::telemetry::aggregator::DeviceTelemetry;
use crate::telemetry::events::TelemetryMessage;
use crate::telemetry::registry::DeviceRegistry;
use crate::telemetry::storage::{Persistence, SnapshotStore};
use chrono::NaiveDate;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Daily,
    Weekly,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    Select(String),
    SwitchTab(Tab),
}

/// Everything that can change dashboard state.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Raw text of one telemetry stream message.
    Transport(String),
    User(UserAction),
}

/// What needs redrawing after an input was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    Nothing,
    /// Charts and status panel of the selected device.
    Selected,
    /// The device list, and the selected device with it.
    Devices,
    Tab,
}

/// Owns all dashboard state and applies inputs one at a time, in the order
/// they arrive.
pub struct Dashboard<S> {
    registry: DeviceRegistry,
    persistence: Persistence<S>,
    selected: Option<String>,
    tab: Tab,
    /// Saving waits for the stored devices, so an early message cannot
    /// overwrite them.
    loaded: bool,
}

impl<S: SnapshotStore> Dashboard<S> {
    /// An empty dashboard that has not looked at the store yet.
    pub fn new(store: S) -> Self {
        Self {
            registry: DeviceRegistry::new(),
            persistence: Persistence::new(store),
            selected: None,
            tab: Tab::default(),
            loaded: false,
        }
    }

    /// Start from whatever the store holds. Stale devices are rolled over
    /// and written back, and the first device is selected.
    pub fn restore(store: S, today: NaiveDate) -> Self {
        let mut dashboard = Self::new(store);
        dashboard.load_stored(today);
        dashboard
    }

    /// Merge the stored devices into the live registry. Devices that already
    /// reported in this session keep their live state.
    pub fn load_stored(&mut self, today: NaiveDate) -> Refresh {
        self.loaded = true;
        let Some(stored) = self.persistence.load(today) else {
            return Refresh::Nothing;
        };

        let added = self.registry.merge(stored);
        if !self.registry.is_empty() {
            self.persist();
            info!("Dashboard restored with {} device(s)", self.registry.count());
        }

        if self.selected.is_none() {
            let first = self.registry.device_ids().next().map(str::to_string);
            self.selected = first;
        }

        if added > 0 {
            Refresh::Devices
        } else {
            Refresh::Nothing
        }
    }

    pub fn handle(&mut self, input: Input) -> Refresh {
        match input {
            Input::Transport(raw) => self.on_message(&raw),
            Input::User(action) => self.on_action(action),
        }
    }

    /// Roll every device over once the local day has changed while the page
    /// stayed open.
    pub fn tick(&mut self, today: NaiveDate) -> Refresh {
        if self.registry.roll_over(today) == 0 {
            return Refresh::Nothing;
        }
        self.persist();
        Refresh::Selected
    }

    fn on_message(&mut self, raw: &str) -> Refresh {
        let Some(message) = TelemetryMessage::parse(raw) else {
            debug!("Discarding malformed telemetry message: {}", raw);
            return Refresh::Nothing;
        };

        let is_new = self.registry.ingest(&message);
        self.persist();

        if self.selected.is_none() {
            self.selected = Some(message.device_id.clone());
        }

        if is_new {
            Refresh::Devices
        } else if self.selected.as_deref() == Some(message.device_id.as_str()) {
            Refresh::Selected
        } else {
            Refresh::Nothing
        }
    }

    fn persist(&mut self) {
        if self.loaded {
            self.persistence.save(&self.registry);
        }
    }

    fn on_action(&mut self, action: UserAction) -> Refresh {
        match action {
            UserAction::Select(device_id) => {
                if self.registry.find(&device_id).is_none()
                    || self.selected.as_deref() == Some(device_id.as_str())
                {
                    return Refresh::Nothing;
                }
                self.selected = Some(device_id);
                Refresh::Selected
            }
            UserAction::SwitchTab(tab) => {
                if self.tab == tab {
                    return Refresh::Nothing;
                }
                self.tab = tab;
                Refresh::Tab
            }
        }
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_device(&self) -> Option<&DeviceTelemetry> {
        self.registry.find(self.selected.as_deref()?)
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn storage_available(&self) -> bool {
        self.persistence.is_available()
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }
}
