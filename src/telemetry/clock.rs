use chrono::{DateTime, Duration, Local, NaiveDate, Timelike, Utc};

pub const HOURS_PER_DAY: usize = 24;

/// Where an instant lands on the local dashboard day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourBucket {
    pub hour: usize,
    pub day: NaiveDate,
}

pub fn bucket(at: DateTime<Utc>) -> HourBucket {
    let local = at.with_timezone(&Local);
    HourBucket {
        hour: local.hour() as usize,
        day: local.date_naive(),
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `HH:MM:SS` in local time, as shown in the event log.
pub fn wall_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M:%S").to_string()
}

pub fn hour_label(hour: usize) -> String {
    format!("{:02}:00", hour)
}

/// Time left before the local day rolls over, `None` if the next midnight
/// does not exist in the local zone.
pub fn until_rollover(now: DateTime<Local>) -> Option<Duration> {
    let midnight = now
        .date_naive()
        .succ_opt()?
        .and_hms_opt(0, 0, 0)?
        .and_local_timezone(Local)
        .earliest()?;
    Some(midnight - now)
}
