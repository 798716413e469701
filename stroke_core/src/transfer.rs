//! Inter-facility transfer recommendation cascade.
//!
//! Runs after the IVT and EVT cascades and consumes their assessments
//! read-only. An EVT-positive result always wins; otherwise the cascade
//! weighs local vascular-imaging access and the IVT time budget.

use crate::{
    defaults::ResolvedClinical, CaseInputs, EvtAssessment, EvtStatus, IvtAssessment, IvtStatus,
    TimeCourse, TransferAssessment, TransferStatus,
};

/// CTA obtainable within this many minutes is treated as "get it here
/// first" rather than a reason to move the patient
const CTA_ETA_CUTOFF_MINUTES: u32 = 30;

fn assessment(status: TransferStatus, rationale: &str) -> TransferAssessment {
    TransferAssessment {
        status,
        rationale: rationale.to_string(),
    }
}

fn default_consult() -> TransferAssessment {
    assessment(
        TransferStatus::BorderlineConsult,
        "Review clinically with local protocols and specialist.",
    )
}

/// Run the transfer cascade for a case
pub fn assess_transfer(
    case: &CaseInputs,
    clinical: &ResolvedClinical,
    times: &TimeCourse,
    ivt: &IvtAssessment,
    evt: &EvtAssessment,
) -> TransferAssessment {
    // EVT need overrides any IVT transport-time limit.
    if matches!(evt.status, EvtStatus::Eligible | EvtStatus::Consider) {
        return assessment(
            TransferStatus::TransferNowForEvt,
            "EVT eligibility overrides IVT transport limitations.",
        );
    }

    if case.transport.spoke_mode && evt.status == EvtStatus::NeedsVascularImaging {
        let cta = case.imaging.cta;
        if !cta.available_now && cta.eta_minutes <= CTA_ETA_CUTOFF_MINUTES {
            return assessment(
                TransferStatus::CtaAsap,
                "CTA ASAP for LVO triage; transfer decisions depend on LVO.",
            );
        }
        if !cta.available_now && (case.disabling_deficit || clinical.nihss >= 6) {
            return assessment(
                TransferStatus::BorderlineConsult,
                "Consider transfer for vascular imaging/EVT evaluation given deficits/suspicion.",
            );
        }
        return default_consult();
    }

    if ivt.status == IvtStatus::NeedsImaging {
        if let Some(actionable_until) = ivt.latest_needle_time {
            return if times.projected_needle_time <= actionable_until {
                assessment(
                    TransferStatus::TransferForImagingSelectedIvt,
                    "Projected arrival and needle time falls within extended advanced imaging window.",
                )
            } else {
                assessment(
                    TransferStatus::DoNotTransferForIvtOnly,
                    "Not actionable given time budget: projected needle time exceeds actionable IVT window.",
                )
            };
        }
    }

    default_consult()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{base_case, ts, wakeup_case};
    use crate::timing::compute_time_course;
    use crate::{evt, ivt, OcclusionSite};

    fn assess(case: &CaseInputs) -> TransferAssessment {
        let clinical = ResolvedClinical::from_case(case);
        let times = compute_time_course(case);
        let ivt = ivt::assess_ivt(case, &times);
        let evt = evt::assess_evt(case, &clinical, &times);
        assess_transfer(case, &clinical, &times, &ivt, &evt)
    }

    #[test]
    fn test_evt_eligible_forces_transfer_now() {
        let mut case = base_case();
        case.last_known_well = ts("2024-03-01T07:00:00Z");
        case.evaluated_at = ts("2024-03-01T12:00:00Z");
        case.occlusion_site = OcclusionSite::M1;
        case.nihss = Some(10);
        case.aspects = Some(8);
        // Hopeless time budget must not matter
        case.transport.dido_minutes = 10_000;

        let transfer = assess(&case);
        assert_eq!(transfer.status, TransferStatus::TransferNowForEvt);
    }

    #[test]
    fn test_evt_consider_also_forces_transfer_now() {
        let mut case = base_case();
        case.occlusion_site = OcclusionSite::ProximalM2Dominant;

        let transfer = assess(&case);
        assert_eq!(transfer.status, TransferStatus::TransferNowForEvt);
    }

    #[test]
    fn test_spoke_with_quick_cta_gets_cta_asap() {
        // Known onset 6h, no vascular imaging, spoke mode, CTA 20min out.
        let mut case = base_case();
        case.last_known_well = ts("2024-03-01T06:00:00Z");
        case.evaluated_at = ts("2024-03-01T12:00:00Z");
        case.transport.spoke_mode = true;
        case.imaging.cta.available_now = false;
        case.imaging.cta.eta_minutes = 20;

        let transfer = assess(&case);
        assert_eq!(transfer.status, TransferStatus::CtaAsap);
    }

    #[test]
    fn test_spoke_with_slow_cta_and_deficit_gets_consult() {
        let mut case = base_case();
        case.transport.spoke_mode = true;
        case.imaging.cta.available_now = false;
        case.imaging.cta.eta_minutes = 90;
        case.disabling_deficit = true;

        let transfer = assess(&case);
        assert_eq!(transfer.status, TransferStatus::BorderlineConsult);
        assert!(transfer.rationale.contains("vascular imaging"));
    }

    #[test]
    fn test_spoke_with_local_cta_falls_to_default() {
        let mut case = base_case();
        case.transport.spoke_mode = true;
        case.imaging.cta.available_now = true;
        case.nihss = Some(12);

        let transfer = assess(&case);
        assert_eq!(transfer.status, TransferStatus::BorderlineConsult);
        assert!(transfer.rationale.contains("local protocols"));
    }

    #[test]
    fn test_ivt_needs_imaging_within_budget_transfers() {
        // Wake-up needing MRI mismatch work-up at a hub (occlusion known,
        // not spoke), needle window still open after DIDO+transport+DTN.
        let mut case = wakeup_case();
        case.transport.spoke_mode = false;
        case.occlusion_site = OcclusionSite::DistalMca;
        case.transport.dido_minutes = 60;
        case.transport.transport_minutes = 20;
        case.transport.receiving_dtn_minutes = 45;

        let transfer = assess(&case);
        assert_eq!(transfer.status, TransferStatus::TransferForImagingSelectedIvt);
    }

    #[test]
    fn test_ivt_needs_imaging_over_budget_does_not_transfer() {
        let mut case = wakeup_case();
        case.transport.spoke_mode = false;
        case.occlusion_site = OcclusionSite::DistalMca;
        case.transport.dido_minutes = 400;

        let transfer = assess(&case);
        assert_eq!(transfer.status, TransferStatus::DoNotTransferForIvtOnly);
    }

    #[test]
    fn test_default_is_borderline_consult() {
        // Eligible IVT at a hub with a known occlusion that EVT rejects:
        // nothing in the cascade fires.
        let mut case = base_case();
        case.last_known_well = ts("2024-03-01T10:00:00Z");
        case.evaluated_at = ts("2024-03-01T12:00:00Z");
        case.transport.spoke_mode = false;
        case.occlusion_site = OcclusionSite::DistalMca;

        let transfer = assess(&case);
        assert_eq!(transfer.status, TransferStatus::BorderlineConsult);
        assert!(transfer.rationale.contains("local protocols"));
    }
}
