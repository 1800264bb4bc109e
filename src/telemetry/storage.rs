use crate::telemetry::aggregator::DeviceTelemetry;
use crate::telemetry::registry::DeviceRegistry;
use chrono::NaiveDate;
use std::cell::RefCell;
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("failed to read stored data: {0}")]
    Read(String),
    #[error("failed to write stored data: {0}")]
    Write(String),
    #[error("stored data is not valid: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Durable place for the serialized registry.
pub trait SnapshotStore {
    fn read(&self) -> Result<Option<String>, StorageError>;
    fn write(&self, data: &str) -> Result<(), StorageError>;
}

/// Keeps the snapshot in memory. Used where there is no browser storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: impl Into<String>) -> Self {
        Self {
            data: RefCell::new(Some(data.into())),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.data.borrow().clone()
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.data.borrow().clone())
    }

    fn write(&self, data: &str) -> Result<(), StorageError> {
        *self.data.borrow_mut() = Some(data.to_string());
        Ok(())
    }
}

/// Browser `localStorage`, one key for the whole registry.
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub struct LocalStorageStore {
    key: String,
}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage(&self) -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(|e| StorageError::Read(format!("{:?}", e)))?
            .ok_or(StorageError::Unavailable)
    }
}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
impl SnapshotStore for LocalStorageStore {
    fn read(&self) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(&self.key)
            .map_err(|e| StorageError::Read(format!("{:?}", e)))
    }

    fn write(&self, data: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(&self.key, data)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

/// Store used by the dashboard on the current target.
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub type PlatformStore = LocalStorageStore;

#[cfg(not(all(feature = "web", target_arch = "wasm32")))]
pub type PlatformStore = MemoryStore;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub fn platform_store() -> PlatformStore {
    LocalStorageStore::new(crate::config::STORAGE_KEY)
}

#[cfg(not(all(feature = "web", target_arch = "wasm32")))]
pub fn platform_store() -> PlatformStore {
    MemoryStore::new()
}

/// Best-effort persistence of the registry.
///
/// Failures are logged and swallowed. After the first I/O failure, storage
/// is treated as unavailable for the rest of the session and the in-memory
/// registry stays the only copy.
pub struct Persistence<S> {
    store: S,
    available: bool,
}

impl<S: SnapshotStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            available: true,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// `None` when nothing was stored or storage failed.
    pub fn load(&mut self, today: NaiveDate) -> Option<DeviceRegistry> {
        if !self.available {
            return None;
        }

        let result = self.store.read().and_then(|stored| match stored {
            Some(raw) => Ok(Some(serde_json::from_str::<Vec<serde_json::Value>>(&raw)?)),
            None => Ok(None),
        });

        match result {
            Ok(Some(records)) => {
                let snapshots = decode_snapshots(records);
                let registry = DeviceRegistry::from_snapshots(snapshots, today);
                info!("Loaded {} device(s) from storage", registry.count());
                Some(registry)
            }
            Ok(None) => None,
            // Unreadable data gets replaced by the next save
            Err(StorageError::Decode(e)) => {
                warn!("Ignoring stored device data: {}", e);
                None
            }
            Err(e) => {
                self.fail("load", &e);
                None
            }
        }
    }

    pub fn save(&mut self, registry: &DeviceRegistry) {
        if !self.available {
            debug!("Storage unavailable, skipping save");
            return;
        }

        let result = serde_json::to_string(registry)
            .map_err(StorageError::from)
            .and_then(|data| self.store.write(&data));

        match result {
            Ok(()) => debug!("Saved {} device(s) to storage", registry.count()),
            Err(e) => self.fail("save", &e),
        }
    }

    fn fail(&mut self, op: &str, e: &StorageError) {
        error!("Failed to {} device data: {}", op, e);
        warn!("Storage disabled for this session, data is kept in memory only");
        self.available = false;
    }
}

/// Decode each stored record on its own so one bad record does not take the
/// rest down with it.
fn decode_snapshots(records: Vec<serde_json::Value>) -> Vec<DeviceTelemetry> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(idx, record)| match serde_json::from_value(record) {
            Ok(device) => Some(device),
            Err(e) => {
                warn!("Skipping stored device record {}: {}", idx, e);
                None
            }
        })
        .collect()
}
