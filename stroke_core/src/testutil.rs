//! Shared fixtures for the unit tests.

use crate::{CaseInputs, ImagingAvailability, StrokeOnset, TransportPlan};
use chrono::{DateTime, Utc};

pub fn ts(s: &str) -> DateTime<Utc> {
    s.parse().expect("test timestamp")
}

/// A known-onset case 2h from LKW with UI-style defaults: NCCT and CTA
/// available locally, spoke mode, no clinical scores recorded
pub fn base_case() -> CaseInputs {
    let mut imaging = ImagingAvailability::default();
    imaging.ncct.available_now = true;
    imaging.cta.available_now = true;

    CaseInputs {
        onset: StrokeOnset::Known,
        last_known_well: ts("2024-03-01T10:00:00Z"),
        bedtime: None,
        wake: None,
        recognition: None,
        evaluated_at: ts("2024-03-01T12:00:00Z"),
        nihss: None,
        disabling_deficit: false,
        imaging,
        transport: TransportPlan::default(),
        occlusion_site: Default::default(),
        aspects: None,
        pc_aspects: None,
        age: None,
        prestroke_mrs: None,
        mass_effect: Default::default(),
        mri_mismatch: Default::default(),
        perfusion_penumbra: Default::default(),
        high_risk_flags: vec![],
    }
}

/// A wake-up case: asleep 22:00-06:00 (midpoint 02:00), evaluated 07:00,
/// so 1h from recognition and 5h on the midpoint clock
pub fn wakeup_case() -> CaseInputs {
    let mut case = base_case();
    case.onset = StrokeOnset::WakeUp;
    case.last_known_well = ts("2024-03-01T22:00:00Z");
    case.bedtime = Some(ts("2024-03-01T22:00:00Z"));
    case.wake = Some(ts("2024-03-02T06:00:00Z"));
    case.evaluated_at = ts("2024-03-02T07:00:00Z");
    case
}
