//! Booking calendar defaults.

use bento_core::CalendarContent;

/// Weekday markers, Sunday first.
pub const WEEKDAY_MARKERS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

/// Slots offered when the content lists none.
pub const DEFAULT_TIME_SLOTS: [&str; 7] = [
    "9:00 AM", "10:00 AM", "11:00 AM", "1:00 PM", "2:00 PM", "3:00 PM", "4:00 PM",
];

/// Bookable flag per weekday, Sunday first. Defaults to Monday through
/// Friday.
///
/// Markers are single letters, so listing `"T"` enables both Tuesday and
/// Thursday and `"S"` both weekend days.
#[must_use]
pub fn available_weekdays(content: &CalendarContent) -> [bool; 7] {
    match &content.available_days {
        Some(days) => WEEKDAY_MARKERS.map(|marker| days.iter().any(|d| d == marker)),
        None => [false, true, true, true, true, true, false],
    }
}

/// Slots to offer.
#[must_use]
pub fn time_slots(content: &CalendarContent) -> Vec<&str> {
    match &content.time_slots {
        Some(slots) => slots.iter().map(String::as_str).collect(),
        None => DEFAULT_TIME_SLOTS.to_vec(),
    }
}
