//! Thrombolysis (IVT) eligibility cascade.
//!
//! The standard-window pathways are an ordered rule table evaluated
//! first-match-wins; a perfusion rescue stage then re-examines cases the
//! standard pathways left unresolved. Each rule is a named function so
//! it can be unit-tested on its own.

use crate::{
    timing, CaseInputs, Finding, IvtAssessment, IvtStatus, Recommendation, StrokeOnset, TimeCourse,
};
use chrono::{DateTime, Duration, Utc};

/// Standard IVT window after onset or recognition
const STANDARD_WINDOW_HOURS: f64 = 4.5;
/// Outer limit of the perfusion-selected extended window
const EXTENDED_WINDOW_HOURS: f64 = 9.0;

fn standard_window() -> Duration {
    Duration::minutes(270)
}

fn extended_window() -> Duration {
    Duration::hours(9)
}

/// Everything the IVT rules read
#[derive(Clone, Copy)]
pub struct IvtContext<'a> {
    pub case: &'a CaseInputs,
    pub times: &'a TimeCourse,
}

/// Intermediate outcome of one cascade stage, consumed read-only by the
/// next stage
#[derive(Clone, Debug, PartialEq, Eq)]
struct IvtOutcome {
    status: IvtStatus,
    rationale: &'static str,
    cor: Option<Recommendation>,
    latest_needle_time: Option<DateTime<Utc>>,
}

impl IvtOutcome {
    fn unresolved(&self) -> bool {
        matches!(self.status, IvtStatus::NotEligible | IvtStatus::NeedsImaging)
    }
}

fn no_pathway() -> IvtOutcome {
    IvtOutcome {
        status: IvtStatus::NotEligible,
        rationale: "Outside actionable windows.",
        cor: None,
        latest_needle_time: None,
    }
}

type IvtRule = fn(&IvtContext) -> Option<IvtOutcome>;

/// Standard-window pathways, in evaluation order
const STANDARD_PATHWAYS: &[(&str, IvtRule)] = &[
    ("known_standard_window", known_standard_window),
    ("wakeup_mri_mismatch", wakeup_mri_mismatch),
];

/// Known onset within 4.5h: treat without waiting for multimodal imaging
fn known_standard_window(ctx: &IvtContext) -> Option<IvtOutcome> {
    if ctx.case.onset != StrokeOnset::Known || ctx.times.hours_from_lkw > STANDARD_WINDOW_HOURS {
        return None;
    }

    Some(IvtOutcome {
        status: IvtStatus::Eligible,
        rationale: "Standard window. Avoid delaying treatment for additional multimodal imaging.",
        cor: Some(Recommendation::Class1),
        latest_needle_time: Some(ctx.case.last_known_well + standard_window()),
    })
}

/// Wake-up within 4.5h of recognition, selected by MRI DWI/FLAIR mismatch
///
/// An explicit negative mismatch falls through unresolved; the perfusion
/// rescue stage may still pick the case up.
fn wakeup_mri_mismatch(ctx: &IvtContext) -> Option<IvtOutcome> {
    if ctx.case.onset != StrokeOnset::WakeUp
        || ctx.times.hours_from_recognition > STANDARD_WINDOW_HOURS
    {
        return None;
    }

    let actionable_until = Some(timing::recognition_time(ctx.case) + standard_window());

    match ctx.case.mri_mismatch {
        Finding::Yes => Some(IvtOutcome {
            status: IvtStatus::EligibleMriMismatch,
            rationale: "DWI lesion < 1/3 MCA and no marked FLAIR change.",
            cor: Some(Recommendation::Class2a),
            latest_needle_time: actionable_until,
        }),
        Finding::Unknown => Some(IvtOutcome {
            status: IvtStatus::NeedsImaging,
            rationale: "MRI mismatch evaluation required for unknown onset.",
            cor: None,
            latest_needle_time: actionable_until,
        }),
        Finding::No => None,
    }
}

/// True when the case sits in the 4.5-9h extended window
fn in_extended_window(ctx: &IvtContext) -> bool {
    match ctx.case.onset {
        StrokeOnset::Known => {
            ctx.times.hours_from_lkw > STANDARD_WINDOW_HOURS
                && ctx.times.hours_from_lkw <= EXTENDED_WINDOW_HOURS
        }
        StrokeOnset::WakeUp => matches!(
            ctx.times.hours_from_midpoint,
            Some(h) if h <= EXTENDED_WINDOW_HOURS
        ),
    }
}

/// Perfusion rescue for cases the standard pathways left unresolved
fn extended_window_rescue(ctx: &IvtContext, current: IvtOutcome) -> IvtOutcome {
    if !current.unresolved() || !in_extended_window(ctx) {
        return current;
    }

    // The window anchor is the sleep midpoint for wake-up cases (known to
    // exist when in_extended_window passed) and LKW otherwise.
    let anchor = match ctx.case.onset {
        StrokeOnset::WakeUp => ctx.times.sleep_midpoint,
        StrokeOnset::Known => Some(ctx.case.last_known_well),
    };
    let actionable_until = anchor.map(|t| t + extended_window());

    match ctx.case.perfusion_penumbra {
        Finding::Yes => IvtOutcome {
            status: IvtStatus::EligiblePerfusionSelected,
            rationale: "Salvageable penumbra identified on automated perfusion.",
            cor: Some(Recommendation::Class2a),
            latest_needle_time: actionable_until,
        },
        Finding::Unknown => IvtOutcome {
            status: IvtStatus::NeedsImaging,
            rationale: "Automated CT Perfusion required for extended window.",
            cor: None,
            latest_needle_time: actionable_until,
        },
        Finding::No => current,
    }
}

/// Elapsed-hour figures the cascade used, for audit display
fn math_trace(times: &TimeCourse) -> String {
    let mut trace = format!(
        "LKW > {:.2}h | Recog > {:.2}h",
        times.hours_from_lkw, times.hours_from_recognition
    );
    if let Some(midpoint_hours) = times.hours_from_midpoint {
        trace.push_str(&format!(" | Midpoint > {:.2}h", midpoint_hours));
    }
    trace
}

/// Run the full IVT cascade for a case
pub fn assess_ivt(case: &CaseInputs, times: &TimeCourse) -> IvtAssessment {
    let ctx = IvtContext { case, times };

    let mut outcome = no_pathway();
    for (name, rule) in STANDARD_PATHWAYS {
        if let Some(matched) = rule(&ctx) {
            tracing::debug!("IVT standard pathway matched: {}", name);
            outcome = matched;
            break;
        }
    }

    let outcome = extended_window_rescue(&ctx, outcome);

    tracing::info!("IVT: {} ({})", outcome.status, outcome.rationale);

    IvtAssessment {
        status: outcome.status,
        rationale: outcome.rationale.to_string(),
        cor: outcome.cor,
        latest_needle_time: outcome.latest_needle_time,
        math_trace: math_trace(times),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{base_case, ts, wakeup_case};
    use crate::timing::compute_time_course;

    fn assess(case: &CaseInputs) -> IvtAssessment {
        let times = compute_time_course(case);
        assess_ivt(case, &times)
    }

    #[test]
    fn test_known_onset_standard_window_boundary_inclusive() {
        let mut case = base_case();
        case.last_known_well = ts("2024-03-01T08:00:00Z");
        case.evaluated_at = ts("2024-03-01T12:30:00Z"); // exactly 4.5h

        let ivt = assess(&case);
        assert_eq!(ivt.status, IvtStatus::Eligible);
        assert_eq!(ivt.cor, Some(Recommendation::Class1));
        assert_eq!(ivt.latest_needle_time, Some(ts("2024-03-01T12:30:00Z")));
    }

    #[test]
    fn test_just_past_standard_window_is_not_standard_eligible() {
        let mut case = base_case();
        case.last_known_well = ts("2024-03-01T08:00:00Z");
        case.evaluated_at = ts("2024-03-01T12:30:01Z"); // 4.5h + 1s
        case.perfusion_penumbra = Finding::No;

        let ivt = assess(&case);
        assert_eq!(ivt.status, IvtStatus::NotEligible);
    }

    #[test]
    fn test_known_onset_extended_window_with_penumbra() {
        let mut case = base_case();
        case.last_known_well = ts("2024-03-01T06:00:00Z");
        case.evaluated_at = ts("2024-03-01T12:00:00Z"); // 6h
        case.perfusion_penumbra = Finding::Yes;

        let ivt = assess(&case);
        assert_eq!(ivt.status, IvtStatus::EligiblePerfusionSelected);
        assert_eq!(ivt.cor, Some(Recommendation::Class2a));
        // Anchored at LKW + 9h
        assert_eq!(ivt.latest_needle_time, Some(ts("2024-03-01T15:00:00Z")));
    }

    #[test]
    fn test_known_onset_extended_window_unknown_penumbra_needs_imaging() {
        let mut case = base_case();
        case.last_known_well = ts("2024-03-01T06:00:00Z");
        case.evaluated_at = ts("2024-03-01T12:00:00Z");

        let ivt = assess(&case);
        assert_eq!(ivt.status, IvtStatus::NeedsImaging);
        assert!(ivt.latest_needle_time.is_some());
    }

    #[test]
    fn test_beyond_nine_hours_not_eligible() {
        let mut case = base_case();
        case.last_known_well = ts("2024-03-01T00:00:00Z");
        case.evaluated_at = ts("2024-03-01T10:00:00Z"); // 10h
        case.perfusion_penumbra = Finding::Yes;

        let ivt = assess(&case);
        assert_eq!(ivt.status, IvtStatus::NotEligible);
        assert_eq!(ivt.rationale, "Outside actionable windows.");
        assert!(ivt.latest_needle_time.is_none());
    }

    #[test]
    fn test_wakeup_mri_mismatch_yes() {
        let mut case = wakeup_case();
        case.mri_mismatch = Finding::Yes;

        let ivt = assess(&case);
        assert_eq!(ivt.status, IvtStatus::EligibleMriMismatch);
        assert_eq!(ivt.cor, Some(Recommendation::Class2a));
        // Anchored at recognition (= wake here) + 4.5h
        assert_eq!(ivt.latest_needle_time, Some(ts("2024-03-02T10:30:00Z")));
    }

    #[test]
    fn test_wakeup_mri_mismatch_unknown_needs_imaging() {
        let case = wakeup_case();

        let ivt = assess(&case);
        assert_eq!(ivt.status, IvtStatus::NeedsImaging);
        assert_eq!(ivt.cor, None);
    }

    #[test]
    fn test_wakeup_negative_mismatch_can_still_rescue_on_perfusion() {
        // The source allows an explicit negative mismatch to fall through
        // to the perfusion check; preserved pending clinical review.
        let mut case = wakeup_case();
        case.mri_mismatch = Finding::No;
        case.perfusion_penumbra = Finding::Yes;

        let ivt = assess(&case);
        assert_eq!(ivt.status, IvtStatus::EligiblePerfusionSelected);
        // Anchored at sleep midpoint (02:00) + 9h
        assert_eq!(ivt.latest_needle_time, Some(ts("2024-03-02T11:00:00Z")));
    }

    #[test]
    fn test_wakeup_without_midpoint_skips_rescue() {
        let mut case = wakeup_case();
        case.bedtime = None;
        case.mri_mismatch = Finding::No;
        case.perfusion_penumbra = Finding::Yes;

        let ivt = assess(&case);
        assert_eq!(ivt.status, IvtStatus::NotEligible);
    }

    #[test]
    fn test_math_trace_lists_figures_used() {
        let mut case = wakeup_case();
        case.mri_mismatch = Finding::Yes;

        let ivt = assess(&case);
        assert!(ivt.math_trace.starts_with("LKW > "));
        assert!(ivt.math_trace.contains("Recog > "));
        assert!(ivt.math_trace.contains("Midpoint > "));

        let known = assess(&base_case());
        assert!(!known.math_trace.contains("Midpoint"));
    }
}
