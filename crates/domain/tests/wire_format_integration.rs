//! Integration tests for the serialized shapes
//!
//! Cached feeds and the category list are persisted as JSON, and renderers
//! read the same documents, so their field names are part of the contract.

use calembed_domain::{
    CategoryEntry, CategoryId, EventFeed, EventTime, FeedSource, ProcessedEvent,
    ProcessedEventParts, TagExtraction,
};
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;

// ============================================================================
// Fixtures
// ============================================================================

fn category(id: &str) -> CategoryId {
    CategoryId::parse(id).unwrap()
}

fn tagged_event() -> ProcessedEvent {
    ProcessedEvent::new(ProcessedEventParts {
        id: "evt-1".into(),
        title: "Repair Cafe".into(),
        clean_description: "Bring your broken toasters".into(),
        location: "Town Hall".into(),
        start: EventTime::Timed(Utc.with_ymd_and_hms(2026, 10, 20, 17, 0, 0).unwrap()),
        end: EventTime::Timed(Utc.with_ymd_and_hms(2026, 10, 20, 19, 0, 0).unwrap()),
        is_all_day: false,
        tags: TagExtraction {
            valid: [category("community")].into_iter().collect(),
            invalid: [category("foobar")].into_iter().collect(),
        },
        html_link: "https://calendar.example.org/event?eid=evt-1".into(),
        map_link: "https://www.google.com/maps/search/?api=1&query=Town+Hall".into(),
    })
}

// ============================================================================
// ProcessedEvent
// ============================================================================

#[test]
fn test_processed_event_json_shape() {
    let value = serde_json::to_value(tagged_event()).unwrap();

    assert_eq!(value["validTags"], json!(["COMMUNITY"]));
    assert_eq!(value["invalidTags"], json!(["FOOBAR"]));
    assert_eq!(value["isUntagged"], json!(false));
    assert_eq!(value["hasUnknownTagsOnly"], json!(false));
    assert_eq!(value["start"], json!({ "kind": "timed", "value": "2026-10-20T17:00:00Z" }));
}

#[test]
fn test_cached_feed_survives_json_round_trip() {
    let feed = EventFeed {
        events: vec![tagged_event()],
        source: FeedSource::Upstream,
        cache_key: "calembed_events_abc".into(),
    };

    let restored: EventFeed =
        serde_json::from_str(&serde_json::to_string(&feed).unwrap()).unwrap();
    assert_eq!(restored, feed);
    assert!(!restored.is_from_cache());
}

#[test]
fn test_stored_tags_are_revalidated_on_load() {
    let mut value = serde_json::to_value(tagged_event()).unwrap();
    value["validTags"] = json!(["not valid"]);

    assert!(serde_json::from_value::<ProcessedEvent>(value).is_err());
}

#[test]
fn test_stored_flags_are_derived_from_tag_sets() {
    let mut value = serde_json::to_value(tagged_event()).unwrap();
    value["validTags"] = json!([]);
    value["invalidTags"] = json!([]);
    value["isUntagged"] = json!(false);
    value["hasUnknownTagsOnly"] = json!(true);

    let event: ProcessedEvent = serde_json::from_value(value).unwrap();
    assert!(event.is_untagged());
    assert!(!event.has_unknown_tags_only());

    // Flags may also be missing entirely
    let mut value = serde_json::to_value(tagged_event()).unwrap();
    let fields = value.as_object_mut().unwrap();
    fields.remove("isUntagged");
    fields.remove("hasUnknownTagsOnly");
    let event: ProcessedEvent = serde_json::from_value(value).unwrap();
    assert_eq!(event, tagged_event());
}

#[test]
fn test_all_day_event_shape() {
    let day = NaiveDate::from_ymd_opt(2026, 12, 24).unwrap();
    let value = serde_json::to_value(EventTime::AllDay(day)).unwrap();
    assert_eq!(value, json!({ "kind": "allDay", "value": "2026-12-24" }));
}

// ============================================================================
// Category list
// ============================================================================

#[test]
fn test_category_list_document() {
    let stored = json!([
        { "id": "community", "displayName": "Community", "color": "#34a853" },
        { "id": "WORKSHOP", "displayName": "Workshop", "color": "#fbbc05" }
    ]);

    let entries: Vec<CategoryEntry> = serde_json::from_value(stored).unwrap();
    assert_eq!(entries[0].id, category("COMMUNITY"));
    assert_eq!(serde_json::to_value(&entries[0]).unwrap()["id"], json!("COMMUNITY"));
}
