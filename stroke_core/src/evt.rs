//! Thrombectomy (EVT) eligibility cascade.
//!
//! The pathway criteria are an ordered rule table over an immutable
//! [`EvtContext`]; the first rule that matches determines the result.
//! Each rule is a named function so it can be unit-tested on its own.

use crate::{
    defaults::ResolvedClinical, CaseInputs, EvtAssessment, EvtStatus, Finding, OcclusionSite,
    Recommendation, StrokeOnset, TimeCourse,
};

const EARLY_WINDOW_HOURS: f64 = 6.0;
const LATE_WINDOW_HOURS: f64 = 24.0;

/// Everything the EVT rules read
#[derive(Clone, Copy, Debug)]
pub struct EvtContext {
    pub site: OcclusionSite,
    /// Hours on the EVT clock (sleep midpoint for wake-up cases when
    /// known, otherwise LKW)
    pub clock_hours: f64,
    pub nihss: u8,
    pub prestroke_mrs: u8,
    pub age: u16,
    pub aspects: u8,
    pub pc_aspects: u8,
    pub mass_effect: Finding,
}

impl EvtContext {
    pub fn new(case: &CaseInputs, clinical: &ResolvedClinical, times: &TimeCourse) -> Self {
        Self {
            site: case.occlusion_site,
            clock_hours: effective_clock_hours(case, times),
            nihss: clinical.nihss,
            prestroke_mrs: clinical.prestroke_mrs,
            age: clinical.age,
            aspects: clinical.aspects,
            pc_aspects: clinical.pc_aspects,
            mass_effect: case.mass_effect,
        }
    }

    fn lvo(&self) -> bool {
        self.site.is_large_vessel()
    }
}

/// The EVT clock starts at the sleep midpoint for wake-up cases when the
/// midpoint is known, otherwise at LKW
pub fn effective_clock_hours(case: &CaseInputs, times: &TimeCourse) -> f64 {
    match (case.onset, times.hours_from_midpoint) {
        (StrokeOnset::WakeUp, Some(midpoint_hours)) => midpoint_hours,
        _ => times.hours_from_lkw,
    }
}

fn outcome(
    status: EvtStatus,
    rationale: &'static str,
    cor: Option<Recommendation>,
) -> Option<EvtAssessment> {
    Some(EvtAssessment {
        status,
        rationale: rationale.to_string(),
        cor,
    })
}

type EvtRule = fn(&EvtContext) -> Option<EvtAssessment>;

/// Pathway rules, in evaluation order; first match wins
const PATHWAY_RULES: &[(&str, EvtRule)] = &[
    ("vascular_imaging_pending", vascular_imaging_pending),
    ("lvo_early_window", lvo_early_window),
    ("lvo_expanded_window", lvo_expanded_window),
    ("lvo_low_aspects_selected", lvo_low_aspects_selected),
    ("lvo_mrs2_selected", lvo_mrs2_selected),
    ("basilar_window", basilar_window),
    ("no_benefit_location", no_benefit_location),
    ("dominant_m2_consider", dominant_m2_consider),
];

/// No vascular imaging yet: eligibility cannot be assessed
fn vascular_imaging_pending(ctx: &EvtContext) -> Option<EvtAssessment> {
    if ctx.site != OcclusionSite::Unknown {
        return None;
    }
    outcome(
        EvtStatus::NeedsVascularImaging,
        "Vascular imaging required.",
        None,
    )
}

/// ICA/M1 within 6h with favorable baseline and ASPECTS
fn lvo_early_window(ctx: &EvtContext) -> Option<EvtAssessment> {
    if !(ctx.lvo()
        && ctx.clock_hours <= EARLY_WINDOW_HOURS
        && ctx.nihss >= 6
        && ctx.prestroke_mrs <= 1
        && ctx.aspects >= 3)
    {
        return None;
    }
    outcome(
        EvtStatus::Eligible,
        "ICA/M1 <=6h, NIHSS>=6, mRS 0-1, ASPECTS 3-10",
        Some(Recommendation::Class1),
    )
}

/// ICA/M1 in the 6-24h window, intermediate ASPECTS, no mass effect
fn lvo_expanded_window(ctx: &EvtContext) -> Option<EvtAssessment> {
    if !(ctx.lvo()
        && ctx.clock_hours > EARLY_WINDOW_HOURS
        && ctx.clock_hours <= LATE_WINDOW_HOURS
        && ctx.age < 80
        && ctx.nihss >= 6
        && ctx.prestroke_mrs <= 1
        && (3..=5).contains(&ctx.aspects)
        && ctx.mass_effect != Finding::Yes)
    {
        return None;
    }
    outcome(
        EvtStatus::Eligible,
        "Expanded: ICA/M1 6-24h, Age <80, ASPECTS 3-5, no mass effect",
        Some(Recommendation::Class1),
    )
}

/// ICA/M1 within 6h with a large established core but no mass effect
fn lvo_low_aspects_selected(ctx: &EvtContext) -> Option<EvtAssessment> {
    if !(ctx.lvo()
        && ctx.clock_hours <= EARLY_WINDOW_HOURS
        && ctx.age < 80
        && ctx.nihss >= 6
        && ctx.prestroke_mrs <= 1
        && ctx.aspects <= 2
        && ctx.mass_effect != Finding::Yes)
    {
        return None;
    }
    outcome(
        EvtStatus::Eligible,
        "Selected: ICA/M1 <=6h, Age <80, ASPECTS 0-2, no mass effect",
        Some(Recommendation::Class2a),
    )
}

/// ICA/M1 within 6h for patients with baseline mRS 2
fn lvo_mrs2_selected(ctx: &EvtContext) -> Option<EvtAssessment> {
    if !(ctx.lvo()
        && ctx.clock_hours <= EARLY_WINDOW_HOURS
        && ctx.nihss >= 6
        && ctx.aspects >= 6
        && ctx.prestroke_mrs == 2)
    {
        return None;
    }
    outcome(
        EvtStatus::Eligible,
        "Selected: ICA/M1 <=6h, mRS 2",
        Some(Recommendation::Class2a),
    )
}

/// Basilar occlusion within 24h with limited posterior infarct extent
fn basilar_window(ctx: &EvtContext) -> Option<EvtAssessment> {
    if !(ctx.site == OcclusionSite::Basilar
        && ctx.clock_hours <= LATE_WINDOW_HOURS
        && ctx.prestroke_mrs <= 1
        && ctx.nihss >= 10
        && ctx.pc_aspects >= 6)
    {
        return None;
    }
    outcome(
        EvtStatus::Eligible,
        "Basilar <=24h, PC-ASPECTS >=6",
        Some(Recommendation::Class1),
    )
}

/// Locations where routine thrombectomy has shown no benefit
fn no_benefit_location(ctx: &EvtContext) -> Option<EvtAssessment> {
    if !ctx.site.is_no_benefit() {
        return None;
    }
    outcome(
        EvtStatus::NotEligible,
        "Routine EVT not recommended for this location.",
        Some(Recommendation::Class3NoBenefit),
    )
}

/// Dominant proximal M2: benefit uncertain, specialist discussion
fn dominant_m2_consider(ctx: &EvtContext) -> Option<EvtAssessment> {
    if ctx.site != OcclusionSite::ProximalM2Dominant {
        return None;
    }
    outcome(
        EvtStatus::Consider,
        "Dominant proximal M2 requires specialist discussion.",
        None,
    )
}

/// Run the full EVT cascade for a case
pub fn assess_evt(
    case: &CaseInputs,
    clinical: &ResolvedClinical,
    times: &TimeCourse,
) -> EvtAssessment {
    let ctx = EvtContext::new(case, clinical, times);

    for (name, rule) in PATHWAY_RULES {
        if let Some(matched) = rule(&ctx) {
            tracing::debug!("EVT pathway matched: {}", name);
            tracing::info!("EVT: {} ({})", matched.status, matched.rationale);
            return matched;
        }
    }

    tracing::info!("EVT: no pathway matched at {:.2}h for {}", ctx.clock_hours, ctx.site);
    EvtAssessment {
        status: EvtStatus::NotEligible,
        rationale: "Does not meet EVT pathway criteria.".to_string(),
        cor: Some(Recommendation::Class3),
    }
}
