//! Raw event fixtures

use calembed_domain::{EventTime, RawEvent};
use chrono::{NaiveDate, TimeZone, Utc};

/// Timed one-hour event on 2026-10-`day` at `hour` UTC.
pub fn timed_event(id: &str, day: u32, hour: u32, description: &str) -> RawEvent {
    RawEvent {
        id: id.to_string(),
        title: Some(format!("Event {id}")),
        raw_description: Some(description.to_string()),
        location: None,
        start: EventTime::Timed(Utc.with_ymd_and_hms(2026, 10, day, hour, 0, 0).unwrap()),
        end: EventTime::Timed(Utc.with_ymd_and_hms(2026, 10, day, hour + 1, 0, 0).unwrap()),
        html_link: Some(format!("https://calendar.example.org/event?eid={id}")),
    }
}

/// All-day event on 2026-10-`day`.
pub fn all_day_event(id: &str, day: u32, description: &str) -> RawEvent {
    let date = NaiveDate::from_ymd_opt(2026, 10, day).unwrap();
    RawEvent {
        start: EventTime::AllDay(date),
        end: EventTime::AllDay(date.succ_opt().unwrap()),
        ..timed_event(id, day, 0, description)
    }
}

/// One COMMUNITY-tagged, one untagged and one unknown-only event.
pub fn mixed_events() -> Vec<RawEvent> {
    vec![
        timed_event("community", 20, 18, "Monthly meetup\n[[[TAG:community]]]"),
        timed_event("untagged", 21, 9, "No markers here"),
        all_day_event("unknown", 22, "Planning day [[[TAG:FOOBAR]]]"),
    ]
}
