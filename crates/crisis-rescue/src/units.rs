/// Rounds half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn meters_to_km(meters: f64) -> f64 {
    round2(meters / 1000.0)
}

pub fn seconds_to_minutes(seconds: f64) -> f64 {
    round2(seconds / 60.0)
}

pub fn minutes_to_hours(minutes: f64) -> f64 {
    round2(minutes / 60.0)
}

/// Trimmed text with at least one visible character.
pub fn is_non_empty(value: &str) -> bool {
    !value.trim().is_empty()
}
