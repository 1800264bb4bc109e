/// Seconds as `12.34 s`, `3m 5s` or `2h 14m`.
pub fn format_time(seconds: f64) -> String {
    if seconds < 60.0 {
        format!("{:.2} s", seconds)
    } else if seconds < 3600.0 {
        let mins = (seconds / 60.0).floor();
        let secs = (seconds % 60.0).round();
        format!("{}m {}s", mins, secs)
    } else {
        let hours = (seconds / 3600.0).floor();
        let mins = ((seconds % 3600.0) / 60.0).floor();
        format!("{}h {}m", hours, mins)
    }
}

/// Axis flavour of [`format_time`]: `2h 14m` or `14m`.
pub fn format_hm(seconds: f64) -> String {
    let hours = (seconds / 3600.0).floor();
    let mins = ((seconds % 3600.0) / 60.0).floor();
    if hours > 0.0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

pub fn format_joules(joules: f64) -> String {
    format!("{:.6} J", joules)
}

pub fn device_count(count: usize) -> String {
    if count == 1 {
        "1 device".to_string()
    } else {
        format!("{} devices", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_formats() {
        assert_eq!(format_time(0.0), "0.00 s");
        assert_eq!(format_time(42.5), "42.50 s");
        assert_eq!(format_time(185.0), "3m 5s");
        assert_eq!(format_time(8040.0), "2h 14m");

        assert_eq!(format_hm(840.0), "14m");
        assert_eq!(format_hm(8040.0), "2h 14m");
    }

    #[test]
    fn labels() {
        assert_eq!(format_joules(5.5), "5.500000 J");
        assert_eq!(device_count(1), "1 device");
        assert_eq!(device_count(3), "3 devices");
    }
}
