use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightStatus {
    #[serde(rename = "ON")]
    On,
    #[serde(rename = "OFF")]
    Off,
}

impl LightStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }
}

impl fmt::Display for LightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single light transition reported by a sensor. Readings a device left
/// out (or sent with the wrong type) are `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum LightEvent {
    On {
        motion_detected: Option<bool>,
        light_level_percent: Option<f64>,
    },
    Off {
        total_on_time_s: Option<f64>,
        total_energy_consumed_j: Option<f64>,
    },
}

impl LightEvent {
    pub fn from_json(payload: &Value) -> Option<Self> {
        let number = |key: &str| payload.get(key).and_then(Value::as_f64);

        match payload.get("status").and_then(Value::as_str)? {
            "ON" => Some(Self::On {
                motion_detected: payload.get("motionDetected").and_then(Value::as_bool),
                light_level_percent: number("lightLevelPercent"),
            }),
            "OFF" => Some(Self::Off {
                total_on_time_s: number("totalOnTime_s"),
                total_energy_consumed_j: number("totalEnergyConsumed_J"),
            }),
            _ => None,
        }
    }

    pub fn status(&self) -> LightStatus {
        match self {
            Self::On { .. } => LightStatus::On,
            Self::Off { .. } => LightStatus::Off,
        }
    }

    /// Event log text. Missing readings print as `0`.
    pub fn summary(&self) -> String {
        match self {
            Self::On {
                motion_detected,
                light_level_percent,
            } => {
                let motion = if motion_detected.unwrap_or(false) { "Yes" } else { "No" };
                let light = light_level_percent
                    .map(|l| l.to_string())
                    .unwrap_or_else(|| "0".to_string());
                format!("Motion: {}, Light: {}%", motion, light)
            }
            Self::Off {
                total_on_time_s,
                total_energy_consumed_j,
            } => {
                let duration = total_on_time_s
                    .map(|s| format!("{:.2}", s))
                    .unwrap_or_else(|| "0".to_string());
                let energy = total_energy_consumed_j
                    .map(|j| format!("{:.6}", j))
                    .unwrap_or_else(|| "0".to_string());
                format!("Duration: {}s, Energy: {}J", duration, energy)
            }
        }
    }
}

/// One message off the telemetry stream.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryMessage {
    pub device_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: LightEvent,
}

impl TelemetryMessage {
    pub fn parse(raw: &str) -> Option<Self> {
        let v: Value = serde_json::from_str(raw).ok()?;
        Self::from_json(&v)
    }

    pub fn from_json(v: &Value) -> Option<Self> {
        let device_id = match v.get("DeviceId")? {
            Value::String(s) if !s.is_empty() => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        let timestamp = parse_message_date(v.get("MessageDate")?)?;
        let event = LightEvent::from_json(v.get("IotData")?)?;

        Some(Self {
            device_id,
            timestamp,
            event,
        })
    }
}

/// Accepts RFC 3339, ISO date-times without an offset (read as local time),
/// bare dates (UTC midnight) and epoch milliseconds.
pub fn parse_message_date(v: &Value) -> Option<DateTime<Utc>> {
    match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .and_then(DateTime::from_timestamp_millis),
        Value::String(s) => parse_date_str(s.trim()),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok());
    if let Some(naive) = naive {
        return naive
            .and_local_timezone(Local)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use serde_json::json;

    #[test]
    fn on_message() {
        let msg = TelemetryMessage::parse(
            r#"{"DeviceId":"sensor-1","MessageDate":"2026-10-19T08:15:00Z",
                "IotData":{"status":"ON","motionDetected":true,"lightLevelPercent":80}}"#,
        )
        .unwrap();

        assert_eq!(msg.device_id, "sensor-1");
        assert_eq!(msg.timestamp, Utc.with_ymd_and_hms(2026, 10, 19, 8, 15, 0).unwrap());
        assert_eq!(
            msg.event,
            LightEvent::On {
                motion_detected: Some(true),
                light_level_percent: Some(80.0),
            }
        );
        assert_eq!(msg.event.summary(), "Motion: Yes, Light: 80%");
    }

    #[test]
    fn off_message_with_missing_and_mistyped_fields() {
        let v = json!({
            "DeviceId": "sensor-2",
            "MessageDate": 1_790_000_000_000i64,
            "IotData": { "status": "OFF", "totalOnTime_s": "lots" }
        });
        let msg = TelemetryMessage::from_json(&v).unwrap();

        assert_eq!(msg.timestamp.timestamp_millis(), 1_790_000_000_000);
        assert_eq!(
            msg.event,
            LightEvent::Off {
                total_on_time_s: None,
                total_energy_consumed_j: None,
            }
        );
        assert_eq!(msg.event.summary(), "Duration: 0s, Energy: 0J");
    }

    #[test]
    fn off_summary_precision() {
        let event = LightEvent::Off {
            total_on_time_s: Some(120.0),
            total_energy_consumed_j: Some(5.5),
        };
        assert_eq!(event.summary(), "Duration: 120.00s, Energy: 5.500000J");
        assert_eq!(event.status(), LightStatus::Off);
    }

    #[test]
    fn incomplete_messages_are_rejected() {
        let cases = [
            json!({ "DeviceId": "a", "IotData": { "status": "ON" } }),
            json!({ "DeviceId": "a", "MessageDate": "2026-10-19T08:00:00Z" }),
            json!({ "DeviceId": "a", "MessageDate": "2026-10-19T08:00:00Z", "IotData": {} }),
            json!({ "DeviceId": "a", "MessageDate": "2026-10-19T08:00:00Z", "IotData": { "status": "DIM" } }),
            json!({ "DeviceId": "a", "MessageDate": "yesterday", "IotData": { "status": "ON" } }),
            json!({ "MessageDate": "2026-10-19T08:00:00Z", "IotData": { "status": "ON" } }),
            json!("not an object"),
        ];
        for case in cases {
            assert!(TelemetryMessage::from_json(&case).is_none(), "{case}");
        }
        assert!(TelemetryMessage::parse("{ nope").is_none());
    }

    #[test]
    fn naive_dates_are_local() {
        let at = parse_message_date(&json!("2026-03-10T08:15:00")).unwrap();
        assert_eq!(at.with_timezone(&Local).hour(), 8);

        let at = parse_message_date(&json!("2026-03-10 08:15:00.250")).unwrap();
        assert_eq!(at.with_timezone(&Local).minute(), 15);

        let at = parse_message_date(&json!("2026-03-10")).unwrap();
        assert_eq!(at, Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap());
    }
}
