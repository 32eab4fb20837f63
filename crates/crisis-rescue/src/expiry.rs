use chrono::{Local, NaiveDate};

/// True when `expiry_date` (YYYY-MM-DD) is strictly before the server's local date.
///
/// Unparseable input is treated as not expired.
pub fn is_expired(expiry_date: &str) -> bool {
    is_expired_on(expiry_date, Local::now().date_naive())
}

pub fn is_expired_on(expiry_date: &str, today: NaiveDate) -> bool {
    match NaiveDate::parse_from_str(expiry_date, "%Y-%m-%d") {
        Ok(expiry) => expiry < today,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn past_dates_are_expired() {
        assert!(is_expired("2000-01-01"));
    }

    #[test]
    fn today_and_tomorrow_are_not_expired() {
        let today = Local::now().date_naive();
        let tomorrow = today + Duration::days(1);
        assert!(!is_expired(&tomorrow.format("%Y-%m-%d").to_string()));
        assert!(!is_expired_on(&today.format("%Y-%m-%d").to_string(), today));
    }

    #[test]
    fn unparseable_dates_are_not_expired() {
        assert!(!is_expired("not-a-date"));
        assert!(!is_expired(""));
        assert!(!is_expired("2000-13-40"));
    }

    #[test]
    fn comparison_uses_the_supplied_day() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 7).expect("valid date");
        assert!(is_expired_on("2026-02-06", today));
        assert!(!is_expired_on("2026-02-07", today));
    }
}
