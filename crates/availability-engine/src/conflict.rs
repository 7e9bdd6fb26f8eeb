//! Detect which busy interval blocks a candidate slot.
//!
//! A candidate conflicts with a busy interval when they share a nonzero
//! stretch of time. A slot ending exactly when a meeting starts (or starting
//! exactly when one ends) is NOT a conflict.

use crate::interval::TimeInterval;

/// The first busy interval (in slice order) that overlaps `candidate`.
///
/// Overlap means `candidate.start < busy.end && candidate.end > busy.start`.
pub fn first_conflict<'a>(
    candidate: &TimeInterval,
    busy: &'a [TimeInterval],
) -> Option<&'a TimeInterval> {
    busy.iter().find(|b| candidate.overlaps(b))
}

/// Minutes of overlap between two intervals (0 when they do not overlap).
pub fn overlap_minutes(a: &TimeInterval, b: &TimeInterval) -> i64 {
    if !a.overlaps(b) {
        return 0;
    }
    let overlap_start = a.start().max(b.start());
    let overlap_end = a.end().min(b.end());
    (overlap_end - overlap_start).num_minutes()
}
