//! Time-window arithmetic for the rules evaluator.
//!
//! Converts the raw case timestamps into the elapsed-hour figures and
//! projections the cascades branch on.

use crate::{CaseInputs, StrokeOnset, TimeCourse};
use chrono::{DateTime, Duration, Utc};

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Elapsed hours between two instants, at millisecond precision
pub fn hours_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    (later - earlier).num_milliseconds() as f64 / MS_PER_HOUR
}

/// The clock-start for a wake-up case: symptom recognition, falling back
/// to wake time, falling back to the evaluation time itself
pub fn recognition_time(case: &CaseInputs) -> DateTime<Utc> {
    case.recognition
        .or(case.wake)
        .unwrap_or(case.evaluated_at)
}

/// Midpoint of sleep, when both bedtime and wake are recorded
pub fn sleep_midpoint(case: &CaseInputs) -> Option<DateTime<Utc>> {
    match (case.bedtime, case.wake) {
        (Some(bedtime), Some(wake)) => Some(bedtime + (wake - bedtime) / 2),
        _ => None,
    }
}

/// Compute the full time course for a case
///
/// For known-onset cases `hours_from_recognition` equals
/// `hours_from_lkw`. Midpoint figures are only present for wake-up cases
/// with both bedtime and wake recorded; absent fields mean the
/// midpoint-dependent branches are skipped, not treated as zero.
pub fn compute_time_course(case: &CaseInputs) -> TimeCourse {
    let hours_from_lkw = hours_between(case.last_known_well, case.evaluated_at);

    let mut hours_from_recognition = hours_from_lkw;
    let mut hours_from_midpoint = None;
    let mut midpoint = None;

    if case.onset == StrokeOnset::WakeUp {
        hours_from_recognition = hours_between(recognition_time(case), case.evaluated_at);

        if let Some(mid) = sleep_midpoint(case) {
            midpoint = Some(mid);
            hours_from_midpoint = Some(hours_between(mid, case.evaluated_at));
        }
    }

    let travel_minutes = case.transport.dido_minutes
        + case.transport.transport_minutes
        + case.transport.receiving_dtn_minutes;
    let projected_needle_time = case.evaluated_at + Duration::minutes(travel_minutes as i64);

    tracing::debug!(
        "Time course: LKW {:.2}h, recognition {:.2}h, midpoint {:?}",
        hours_from_lkw,
        hours_from_recognition,
        hours_from_midpoint
    );

    TimeCourse {
        hours_from_lkw,
        hours_from_recognition,
        hours_from_midpoint,
        sleep_midpoint: midpoint,
        projected_needle_time,
    }
}
