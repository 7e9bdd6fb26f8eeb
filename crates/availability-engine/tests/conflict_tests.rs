//! Tests for slot/busy conflict detection.

use availability_engine::conflict::{first_conflict, overlap_minutes};
use availability_engine::TimeInterval;
use chrono::{DateTime, FixedOffset};

fn iv(start: &str, end: &str) -> TimeInterval {
    let at = |hm: &str| -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(&format!("2026-03-16T{hm}:00Z")).unwrap()
    };
    TimeInterval::new(at(start), at(end)).unwrap()
}

#[test]
fn overlapping_busy_interval_detected() {
    // Candidate 09:00-10:00, busy 09:30-10:30 → 30-min overlap
    let candidate = iv("09:00", "10:00");
    let busy = vec![iv("09:30", "10:30")];

    let blocker = first_conflict(&candidate, &busy);

    assert_eq!(blocker, Some(&busy[0]));
    assert_eq!(overlap_minutes(&candidate, &busy[0]), 30);
}

#[test]
fn adjacent_busy_interval_not_a_conflict() {
    // Candidate 09:00-10:00 ends exactly when the meeting starts.
    let candidate = iv("09:00", "10:00");
    let busy = vec![iv("10:00", "11:00"), iv("08:00", "09:00")];

    assert!(first_conflict(&candidate, &busy).is_none());
    assert_eq!(overlap_minutes(&candidate, &busy[0]), 0);
}

#[test]
fn first_conflict_follows_slice_order() {
    let candidate = iv("09:00", "12:00");
    let busy = vec![iv("08:00", "08:30"), iv("09:30", "10:00"), iv("11:00", "11:30")];

    assert_eq!(first_conflict(&candidate, &busy), Some(&busy[1]));
}

#[test]
fn fully_contained_busy_interval_overlap() {
    let candidate = iv("09:00", "12:00");
    let busy = iv("10:00", "11:00");

    assert_eq!(overlap_minutes(&candidate, &busy), 60);
}

#[test]
fn zero_length_busy_inside_candidate_conflicts() {
    let candidate = iv("09:00", "10:00");
    let busy = vec![iv("09:30", "09:30")];

    assert!(first_conflict(&candidate, &busy).is_some());
}

#[test]
fn empty_busy_list_no_conflict() {
    assert!(first_conflict(&iv("09:00", "10:00"), &[]).is_none());
}
