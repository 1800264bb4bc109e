use crate::config::{HISTORY_DAYS, MAX_EVENTS, MAX_MINUTES_PER_HOUR};
use crate::telemetry::clock::{self, HOURS_PER_DAY};
use crate::telemetry::events::{LightEvent, LightStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub time: String,
    pub status: LightStatus,
    pub details: String,
}

/// Totals of a finished day, kept for the weekly view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTotals {
    pub date: NaiveDate,
    pub on_time_minutes: f64,
    pub energy_j: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeeklyAverage {
    pub days: usize,
    pub on_time_minutes: f64,
    pub energy_j: f64,
}

/// Running statistics for one light sensor over the current local day.
///
/// The serialized form is the persisted snapshot: every field except
/// `deviceId` may be missing or `null` and loads as its empty value. Hour
/// arrays of the wrong length are padded or cut to 24 slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceTelemetry {
    device_id: String,
    /// Minutes the light was on, per local hour. Each slot stays within 0..=60.
    #[serde(default, deserialize_with = "hourly")]
    on_time_by_hour: [f64; HOURS_PER_DAY],
    /// Cumulative energy snapshot per local hour, `None` until the hour has data.
    #[serde(default, deserialize_with = "hourly")]
    energy_by_hour: [Option<f64>; HOURS_PER_DAY],
    #[serde(default)]
    status: Option<LightStatus>,
    #[serde(default)]
    motion_detected: Option<bool>,
    /// Minutes
    #[serde(default, deserialize_with = "nullable")]
    daily_total_on_time: f64,
    /// Joules
    #[serde(default, deserialize_with = "nullable")]
    daily_total_energy: f64,
    #[serde(default, deserialize_with = "nullable")]
    cumulative_energy: f64,
    #[serde(default = "clock::today", deserialize_with = "reset_date")]
    last_reset_date: NaiveDate,
    /// Newest first.
    #[serde(default, deserialize_with = "nullable")]
    events: VecDeque<EventRecord>,
    /// Newest first.
    #[serde(default, deserialize_with = "nullable")]
    history: VecDeque<DayTotals>,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Hour arrays from older or hand-edited snapshots: null slots load as empty,
/// missing slots are padded and extra ones dropped.
fn hourly<'de, D, T>(deserializer: D) -> Result<[T; HOURS_PER_DAY], D::Error>
where
    D: Deserializer<'de>,
    T: Default + Copy + Deserialize<'de>,
{
    let mut hours = [T::default(); HOURS_PER_DAY];
    let stored = Option::<Vec<Option<T>>>::deserialize(deserializer)?.unwrap_or_default();
    for (slot, value) in hours.iter_mut().zip(stored) {
        *slot = value.unwrap_or_default();
    }
    Ok(hours)
}

/// ISO dates, plus the `Tue Mar 10 2026` form older dashboards stored.
fn reset_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(clock::today());
    };
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%a %b %d %Y"))
        .map_err(|_| serde::de::Error::custom(format!("unrecognized reset date `{}`", raw)))
}

/// Only finite, positive readings count towards the totals.
fn contribution(reading: Option<f64>) -> Option<f64> {
    reading.filter(|v| v.is_finite() && *v > 0.0)
}

impl DeviceTelemetry {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self::new_on(device_id, clock::today())
    }

    pub fn new_on(device_id: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            device_id: device_id.into(),
            on_time_by_hour: [0.0; HOURS_PER_DAY],
            energy_by_hour: [None; HOURS_PER_DAY],
            status: None,
            motion_detected: None,
            daily_total_on_time: 0.0,
            daily_total_energy: 0.0,
            cumulative_energy: 0.0,
            last_reset_date: today,
            events: VecDeque::with_capacity(MAX_EVENTS),
            history: VecDeque::with_capacity(HISTORY_DAYS),
        }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn on_time_by_hour(&self) -> &[f64; HOURS_PER_DAY] {
        &self.on_time_by_hour
    }

    pub fn energy_by_hour(&self) -> &[Option<f64>; HOURS_PER_DAY] {
        &self.energy_by_hour
    }

    pub fn status(&self) -> Option<LightStatus> {
        self.status
    }

    pub fn motion_detected(&self) -> Option<bool> {
        self.motion_detected
    }

    pub fn daily_total_on_time(&self) -> f64 {
        self.daily_total_on_time
    }

    pub fn daily_total_energy(&self) -> f64 {
        self.daily_total_energy
    }

    pub fn cumulative_energy(&self) -> f64 {
        self.cumulative_energy
    }

    pub fn last_reset_date(&self) -> NaiveDate {
        self.last_reset_date
    }

    pub fn events(&self) -> &VecDeque<EventRecord> {
        &self.events
    }

    pub fn history(&self) -> &VecDeque<DayTotals> {
        &self.history
    }

    /// Apply one event against the current local day.
    pub fn ingest(&mut self, at: DateTime<Utc>, event: &LightEvent) {
        self.ingest_on(clock::today(), at, event);
    }

    pub fn ingest_on(&mut self, today: NaiveDate, at: DateTime<Utc>, event: &LightEvent) {
        // The event must land in the fresh day
        self.roll_over(today);

        let hour = clock::bucket(at).hour;

        match event {
            LightEvent::On {
                motion_detected, ..
            } => {
                self.motion_detected = *motion_detected;
            }
            LightEvent::Off {
                total_on_time_s,
                total_energy_consumed_j,
            } => {
                if let Some(seconds) = contribution(*total_on_time_s) {
                    let minutes = seconds / 60.0;
                    self.daily_total_on_time += minutes;
                    self.on_time_by_hour[hour] =
                        (self.on_time_by_hour[hour] + minutes).min(MAX_MINUTES_PER_HOUR);
                }
                if let Some(joules) = contribution(*total_energy_consumed_j) {
                    self.daily_total_energy += joules;
                    self.cumulative_energy += joules;
                }
            }
        }
        self.add_event(at, event.status(), event.summary());

        self.status = Some(event.status());

        self.energy_by_hour[hour] = Some(self.cumulative_energy);
        for slot in self.energy_by_hour[..hour].iter_mut() {
            if slot.is_none() {
                *slot = Some(0.0);
            }
        }
    }

    /// Reset the daily state if `today` is not the day it was last reset on.
    /// The closed day's totals move into the weekly history. Returns whether
    /// a reset happened.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if self.last_reset_date == today {
            return false;
        }

        self.history.push_front(DayTotals {
            date: self.last_reset_date,
            on_time_minutes: self.daily_total_on_time,
            energy_j: self.daily_total_energy,
        });
        self.history.truncate(HISTORY_DAYS);

        self.daily_total_on_time = 0.0;
        self.daily_total_energy = 0.0;
        self.cumulative_energy = 0.0;
        self.on_time_by_hour = [0.0; HOURS_PER_DAY];
        self.energy_by_hour = [None; HOURS_PER_DAY];
        self.last_reset_date = today;
        true
    }

    pub fn add_event(&mut self, at: DateTime<Utc>, status: LightStatus, details: impl Into<String>) {
        self.events.push_front(EventRecord {
            time: clock::wall_time(at),
            status,
            details: details.into(),
        });
        self.events.truncate(MAX_EVENTS);
    }

    /// Bring a loaded snapshot back within the live limits.
    pub(crate) fn tidy(&mut self) {
        self.events.truncate(MAX_EVENTS);
        self.history.truncate(HISTORY_DAYS);
        for slot in self.on_time_by_hour.iter_mut() {
            *slot = if slot.is_finite() {
                slot.clamp(0.0, MAX_MINUTES_PER_HOUR)
            } else {
                0.0
            };
        }
    }

    pub fn weekly_average(&self) -> Option<WeeklyAverage> {
        let days = self.history.len();
        if days == 0 {
            return None;
        }
        let on_time: f64 = self.history.iter().map(|d| d.on_time_minutes).sum();
        let energy: f64 = self.history.iter().map(|d| d.energy_j).sum();
        Some(WeeklyAverage {
            days,
            on_time_minutes: on_time / days as f64,
            energy_j: energy / days as f64,
        })
    }
}
