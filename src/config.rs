// Dashboard limits
pub const STORAGE_KEY: &str = "autoglow_device_data";
pub const MAX_EVENTS: usize = 20;
pub const HISTORY_DAYS: usize = 7;
pub const MAX_MINUTES_PER_HOUR: f64 = 60.0;

// Stream reconnect delay after the relay drops us
pub const RECONNECT_DELAY_MS: u32 = 1000;

// Relay defaults, overridable through the environment
#[cfg(feature = "server")]
pub const DEFAULT_INGEST_ADDR: &str = "0.0.0.0:7878";
#[cfg(feature = "server")]
pub const DEFAULT_MAX_LINE_LENGTH: usize = 8 * 1024;
#[cfg(feature = "server")]
pub const DEFAULT_CHANNEL_CAPACITY: usize = 100;

#[cfg(feature = "server")]
#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    pub ingest_addr: String,
    pub max_line_length: usize,
    pub channel_capacity: usize,
}

#[cfg(feature = "server")]
impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            ingest_addr: DEFAULT_INGEST_ADDR.to_string(),
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

#[cfg(feature = "server")]
impl RelayConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unparseable numbers fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let number = |key: &str, default: usize| {
            lookup(key)
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(default)
        };

        Self {
            ingest_addr: lookup("AUTOGLOW_INGEST_ADDR")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.ingest_addr),
            max_line_length: number("AUTOGLOW_MAX_LINE_LENGTH", defaults.max_line_length),
            channel_capacity: number("AUTOGLOW_CHANNEL_CAPACITY", defaults.channel_capacity),
        }
    }
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn relay_config_defaults_and_overrides() {
        let config = RelayConfig::from_lookup(|_| None);
        assert_eq!(config, RelayConfig::default());

        let env = HashMap::from([
            ("AUTOGLOW_INGEST_ADDR", " 127.0.0.1:9000 "),
            ("AUTOGLOW_MAX_LINE_LENGTH", "not-a-number"),
            ("AUTOGLOW_CHANNEL_CAPACITY", "0"),
        ]);
        let config = RelayConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.ingest_addr, "127.0.0.1:9000");
        assert_eq!(config.max_line_length, DEFAULT_MAX_LINE_LENGTH);
        assert_eq!(config.channel_capacity, DEFAULT_CHANNEL_CAPACITY);

        let env = HashMap::from([("AUTOGLOW_CHANNEL_CAPACITY", "16")]);
        let config = RelayConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.channel_capacity, 16);
    }
}
