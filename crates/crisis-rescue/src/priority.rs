//! Urgency labels for rescue requests and donated inventory.
//!
//! Two policies exist and they are deliberately kept apart:
//!
//! * [`priority_for_resource`] classifies by resource type and is the policy applied to
//!   rescue requests when the caller does not choose a priority.
//! * [`priority_for_expiry`] classifies by time remaining before an item spoils and is only
//!   used for inventory assessments.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority '{0}'; expected low, medium, high or critical")]
pub struct UnknownPriority(pub String);

impl FromStr for Priority {
    type Err = UnknownPriority;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            _ => Err(UnknownPriority(value.to_string())),
        }
    }
}

/// Type-based policy: medicine is high, food is medium, everything else is low.
pub fn priority_for_resource(resource_type: &str) -> Priority {
    match resource_type.trim().to_lowercase().as_str() {
        "medicine" => Priority::High,
        "food" => Priority::Medium,
        _ => Priority::Low,
    }
}

/// Time-based policy over the time left until `expiry`.
pub fn priority_for_expiry(expiry: DateTime<Utc>, now: DateTime<Utc>) -> Priority {
    let remaining = expiry - now;
    if remaining <= Duration::zero() {
        Priority::Critical
    } else if remaining <= Duration::hours(6) {
        Priority::High
    } else if remaining <= Duration::hours(24) {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Accepts RFC3339, a naive `YYYY-MM-DDTHH:MM:SS` (read as UTC) or a bare date (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 7, 12, 0, 0).unwrap()
    }

    #[test]
    fn resource_policy_ignores_case() {
        assert_eq!(priority_for_resource("Medicine"), Priority::High);
        assert_eq!(priority_for_resource("FOOD"), Priority::Medium);
        assert_eq!(priority_for_resource("blankets"), Priority::Low);
        assert_eq!(priority_for_resource(""), Priority::Low);
    }

    #[test]
    fn expiry_policy_buckets_remaining_time() {
        let now = now();
        assert_eq!(
            priority_for_expiry(now - Duration::seconds(1), now),
            Priority::Critical
        );
        assert_eq!(priority_for_expiry(now, now), Priority::Critical);
        assert_eq!(
            priority_for_expiry(now + Duration::hours(3), now),
            Priority::High
        );
        assert_eq!(
            priority_for_expiry(now + Duration::hours(12), now),
            Priority::Medium
        );
        assert_eq!(
            priority_for_expiry(now + Duration::hours(48), now),
            Priority::Low
        );
    }

    #[test]
    fn expiry_policy_boundaries_are_inclusive() {
        let now = now();
        assert_eq!(
            priority_for_expiry(now + Duration::hours(6), now),
            Priority::High
        );
        assert_eq!(
            priority_for_expiry(now + Duration::hours(24), now),
            Priority::Medium
        );
        assert_eq!(
            priority_for_expiry(now + Duration::hours(24) + Duration::seconds(1), now),
            Priority::Low
        );
    }

    #[test]
    fn timestamps_parse_in_supported_shapes() {
        let expected = Utc.with_ymd_and_hms(2026, 2, 7, 16, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2026-02-07T16:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2026-02-07T16:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2026-02-07T21:30:00+05:30"), Some(expected));
        assert_eq!(
            parse_timestamp("2026-03-15"),
            Some(Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("tomorrow"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn labels_parse_back() {
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert_eq!(Priority::Critical.to_string(), "critical");
        assert!("urgent".parse::<Priority>().is_err());
    }
}
