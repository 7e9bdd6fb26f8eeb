//! Coalesce busy intervals into a minimal disjoint set.
//!
//! Intervals are sorted by start time, then swept once left to right.
//! Overlapping and exactly-adjacent intervals collapse into one.

use crate::interval::TimeInterval;

/// Merge overlapping or adjacent intervals.
///
/// Returns a sorted, pairwise-disjoint list covering exactly the union of the
/// inputs. Input order does not matter; ties on start are ordered by end so
/// the output is deterministic. Merging an already merged list returns it
/// unchanged.
pub fn merge_intervals<I>(intervals: I) -> Vec<TimeInterval>
where
    I: IntoIterator<Item = TimeInterval>,
{
    let mut intervals: Vec<TimeInterval> = intervals.into_iter().collect();

    if intervals.len() <= 1 {
        return intervals;
    }

    // Stable sort by start time (then by end time).
    intervals.sort_by_key(|interval| (interval.start(), interval.end()));

    let mut merged: Vec<TimeInterval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        if let Some(last) = merged.last_mut() {
            if last.touches_or_overlaps(&interval) {
                // Overlapping or adjacent: extend the current interval.
                last.extend_to(interval.end());
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}

/// Total busy minutes covered by a merged set.
pub fn covered_minutes(merged: &[TimeInterval]) -> i64 {
    merged.iter().map(TimeInterval::duration_minutes).sum()
}
