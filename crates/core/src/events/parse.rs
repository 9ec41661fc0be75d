//! Parse stage: raw upstream events to annotated events

use calembed_domain::constants::{MAP_SEARCH_URL, UNTITLED_EVENT};
use calembed_domain::{strip_tags, EventTime, ProcessedEvent, ProcessedEventParts, RawEvent};
use tracing::debug_span;

use crate::categories::TagValidator;

/// Annotate every event and order the result by start (stable)
pub fn process_events(raw_events: &[RawEvent], validator: &TagValidator) -> Vec<ProcessedEvent> {
    let mut events: Vec<ProcessedEvent> = raw_events
        .iter()
        .map(|raw| {
            let _span = debug_span!("parse_event", event_id = %raw.id).entered();
            process_event(raw, validator)
        })
        .collect();

    events.sort_by_key(|event| event.start().sort_instant());
    events
}

/// Annotate one event
pub fn process_event(raw: &RawEvent, validator: &TagValidator) -> ProcessedEvent {
    let description = raw.raw_description.as_deref().unwrap_or_default();
    let location = raw.location.as_deref().map(str::trim).unwrap_or_default();
    let title = match raw.title.as_deref().map(str::trim) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => UNTITLED_EVENT.to_string(),
    };
    let (start, end) = resolve_times(raw);

    ProcessedEvent::new(ProcessedEventParts {
        id: raw.id.clone(),
        title,
        clean_description: strip_tags(description),
        location: location.to_string(),
        start,
        end,
        is_all_day: raw.is_all_day(),
        tags: validator.extract_tags(description),
        html_link: raw.html_link.clone().unwrap_or_default(),
        map_link: map_search_link(location),
    })
}

/// All-day events keep only dates on both ends
pub fn resolve_times(raw: &RawEvent) -> (EventTime, EventTime) {
    if raw.is_all_day() {
        (EventTime::AllDay(raw.start.date()), EventTime::AllDay(raw.end.date()))
    } else {
        (raw.start, raw.end)
    }
}

/// Map search URL for a location, empty when there is none
pub fn map_search_link(location: &str) -> String {
    let location = location.trim();
    if location.is_empty() {
        return String::new();
    }
    let query: String = url::form_urlencoded::byte_serialize(location.as_bytes()).collect();
    format!("{MAP_SEARCH_URL}{query}")
}
