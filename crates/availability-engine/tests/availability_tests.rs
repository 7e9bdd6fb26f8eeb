//! Tests for the end-to-end availability queries.

use availability_engine::{
    busy_report, find_meeting_slots, AvailabilityError, EventSource, EventTime, SlotQuery,
    SlotRequest, SourceError, SourceEvent, StaticSource, TimeInterval,
};
use chrono::{DateTime, FixedOffset};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn at(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
}

fn event(start: &str, end: &str, summary: &str, location: &str) -> SourceEvent {
    SourceEvent {
        start: EventTime::at(at(start)),
        end: EventTime::at(at(end)),
        summary: summary.to_string(),
        organizer: None,
        location: location.to_string(),
    }
}

fn monday(duration_minutes: i64) -> SlotRequest {
    SlotRequest::new(
        at("2026-03-16T00:00:00Z"),
        at("2026-03-17T00:00:00Z"),
        duration_minutes,
    )
}

fn clock(slots: &[TimeInterval]) -> Vec<String> {
    slots
        .iter()
        .map(|s| format!("{}-{}", s.start().format("%H:%M"), s.end().format("%H:%M")))
        .collect()
}

/// A source that must never be consulted.
struct UnreachableSource;

impl EventSource for UnreachableSource {
    fn fetch_busy_events(
        &self,
        calendar_id: &str,
        _range_start: DateTime<FixedOffset>,
        _range_end: DateTime<FixedOffset>,
    ) -> Result<Vec<SourceEvent>, SourceError> {
        panic!("calendar {calendar_id} fetched for an invalid request");
    }
}

fn team_source() -> StaticSource {
    StaticSource::new()
        .with_calendar(
            "primary",
            vec![event("2026-03-16T09:00:00Z", "2026-03-16T10:00:00Z", "Standup", "Atlas")],
        )
        .with_calendar(
            "alice@example.com",
            vec![event("2026-03-16T10:00:00Z", "2026-03-16T11:00:00Z", "Design review", "Zephyr")],
        )
        .with_failure(
            "bob@example.com",
            SourceError::Unavailable("404 not found".to_string()),
        )
}

// ── find_meeting_slots ──────────────────────────────────────────────────────

#[test]
fn slots_reflect_only_readable_calendars() {
    let query = SlotQuery::new(monday(60).with_max_results(3))
        .with_guests(["alice@example.com", "bob@example.com"]);

    let search = find_meeting_slots(&team_source(), &query).unwrap();

    // Standup and design review touch, so 09:00-11:00 is one busy block.
    assert_eq!(clock(&search.slots), vec!["11:00-12:00", "11:30-12:30", "12:00-13:00"]);
    assert_eq!(search.busy.len(), 2);
    assert_eq!(search.failures.len(), 1);
    assert_eq!(search.failures[0].calendar_id, "bob@example.com");
    assert_eq!(search.duration_minutes, 60);
}

#[test]
fn room_filter_limits_blocking_events() {
    let query = SlotQuery::new(monday(60).with_max_results(2))
        .with_guests(["alice@example.com"])
        .with_room("atlas");

    let search = find_meeting_slots(&team_source(), &query).unwrap();

    // Only the standup in Atlas blocks time.
    assert_eq!(clock(&search.slots), vec!["10:00-11:00", "10:30-11:30"]);
    assert_eq!(search.busy.len(), 1);
    assert_eq!(search.busy[0].summary, "Standup");
}

#[test]
fn primary_calendar_checked_first() {
    let query = SlotQuery::new(monday(30)).with_guests(["a@example.com", "b@example.com"]);
    assert_eq!(query.calendars(), vec!["primary", "a@example.com", "b@example.com"]);
}

#[test]
fn no_slots_is_not_an_error() {
    let source = StaticSource::new().with_calendar(
        "primary",
        vec![event("2026-03-16T08:00:00Z", "2026-03-16T18:00:00Z", "Offsite", "")],
    );

    let search = find_meeting_slots(&source, &SlotQuery::new(monday(30))).unwrap();

    assert!(search.slots.is_empty());
    assert_eq!(search.busy.len(), 1);
}

#[test]
fn invalid_request_rejected_before_fetching() {
    let err = find_meeting_slots(&UnreachableSource, &SlotQuery::new(monday(0))).unwrap_err();
    assert_eq!(err, AvailabilityError::NonPositiveDuration { minutes: 0 });

    let inverted = SlotRequest::new(at("2026-03-17T00:00:00Z"), at("2026-03-16T00:00:00Z"), 30);
    let err = find_meeting_slots(&UnreachableSource, &SlotQuery::new(inverted)).unwrap_err();
    assert!(matches!(err, AvailabilityError::InvalidRange { .. }));
}

#[test]
fn works_through_trait_object() {
    let source = team_source();
    let dyn_source: &dyn EventSource = &source;

    let search = find_meeting_slots(dyn_source, &SlotQuery::new(monday(60).with_max_results(1)))
        .unwrap();

    assert_eq!(clock(&search.slots), vec!["10:00-11:00"]);
}

#[test]
fn slot_search_serializes_to_json() {
    let query = SlotQuery::new(monday(60).with_max_results(1));
    let search = find_meeting_slots(&team_source(), &query).unwrap();

    let json = serde_json::to_value(&search).unwrap();

    assert_eq!(json["duration_minutes"], 60);
    let start = json["slots"][0]["start"].as_str().unwrap();
    assert_eq!(at(start), at("2026-03-16T10:00:00Z"));
    assert_eq!(json["busy"][0]["calendar_id"], "primary");
}

// ── busy_report ─────────────────────────────────────────────────────────────

#[test]
fn busy_report_lists_every_event_sorted() {
    let calendars = vec![
        "alice@example.com".to_string(),
        "primary".to_string(),
        "bob@example.com".to_string(),
    ];

    let report = busy_report(
        &team_source(),
        &calendars,
        at("2026-03-16T00:00:00Z"),
        at("2026-03-17T00:00:00Z"),
    )
    .unwrap();

    let summaries: Vec<&str> = report.busy.iter().map(|r| r.summary.as_str()).collect();
    assert_eq!(summaries, vec!["Standup", "Design review"]);
    assert_eq!(report.merged.len(), 1);
    assert_eq!(report.calendars_checked, calendars);
    assert_eq!(report.failures.len(), 1);
}

#[test]
fn busy_report_rejects_inverted_range() {
    let err = busy_report(
        &team_source(),
        &["primary".to_string()],
        at("2026-03-17T00:00:00Z"),
        at("2026-03-16T00:00:00Z"),
    )
    .unwrap_err();

    assert!(matches!(err, AvailabilityError::InvalidRange { .. }));
}
