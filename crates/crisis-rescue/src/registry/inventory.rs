use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::expiry::is_expired_on;
use crate::priority::{parse_timestamp, priority_for_expiry, priority_for_resource, Priority};

/// Donated stock item. `expiry_date` is a date (`YYYY-MM-DD`) or a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    /// Resource category such as `food` or `medicine`.
    pub category: String,
    pub quantity: u32,
    #[serde(default)]
    pub expiry_date: Option<String>,
}

/// Category and shelf-life signals for one item, reported side by side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemAssessment {
    pub item: Item,
    pub expired: bool,
    pub category_priority: Priority,
    /// Absent when the item has no expiry or it cannot be parsed.
    pub expiry_urgency: Option<Priority>,
}

/// `today` is the server's local calendar day, the same day [`crate::expiry::is_expired`]
/// compares against; `now` drives the time-based urgency.
pub fn assess_item(item: Item, now: DateTime<Utc>, today: NaiveDate) -> ItemAssessment {
    // Timestamped expiries are compared on their calendar date.
    let expired = item
        .expiry_date
        .as_deref()
        .map(|raw| {
            let date_part = raw.trim().get(..10).unwrap_or(raw);
            is_expired_on(date_part, today)
        })
        .unwrap_or(false);
    let expiry_urgency = item
        .expiry_date
        .as_deref()
        .and_then(parse_timestamp)
        .map(|expiry| priority_for_expiry(expiry, now));
    let category_priority = priority_for_resource(&item.category);

    ItemAssessment {
        item,
        expired,
        category_priority,
        expiry_urgency,
    }
}
