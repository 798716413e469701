//! Documentation text assembly.
//!
//! Fills two fixed templates from the computed assessments. The only
//! conditional content is the high-risk-flag note on the transfer
//! summary.

use crate::{
    CaseInputs, DecisionDocs, EvtAssessment, IvtAssessment, Recommendation, TimeCourse,
    TransferAssessment,
};
use chrono::{DateTime, Utc};

fn clock(t: DateTime<Utc>) -> String {
    t.format("%H:%M").to_string()
}

fn cor_suffix(cor: Option<Recommendation>) -> String {
    match cor {
        Some(cor) => format!(" {}", cor),
        None => String::new(),
    }
}

/// Compose the ED and transfer summaries for a completed evaluation
pub fn compose(
    case: &CaseInputs,
    times: &TimeCourse,
    ivt: &IvtAssessment,
    evt: &EvtAssessment,
    transfer: &TransferAssessment,
) -> DecisionDocs {
    let ed_summary = format!(
        "ED Decision Support Summary\n\
         LKW: {} | Time from LKW: {:.1}h\n\
         IVT: {} - {}{}\n\
         EVT: {} - {}{}\n\
         *If neuro status worsens or LVO suspected, escalate/transfer per protocol.",
        clock(case.last_known_well),
        times.hours_from_lkw,
        ivt.status,
        ivt.rationale,
        cor_suffix(ivt.cor),
        evt.status,
        evt.rationale,
        cor_suffix(evt.cor),
    );

    let mut transfer_summary = format!(
        "Transfer Rationale Summary\n\
         Rec: {}\n\
         Rationale: {}\n\
         Projected Needle Time: {}",
        transfer.status,
        transfer.rationale,
        clock(times.projected_needle_time),
    );

    if !case.high_risk_flags.is_empty() {
        transfer_summary.push_str(&format!(
            "\nHigh-risk flags present: {} (specialist review recommended)",
            case.high_risk_flags.join(", ")
        ));
    }

    DecisionDocs {
        ed_summary,
        transfer_summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::ResolvedClinical;
    use crate::testutil::{base_case, ts};
    use crate::timing::compute_time_course;
    use crate::{evt, ivt, transfer};

    fn docs_for(case: &CaseInputs) -> DecisionDocs {
        let clinical = ResolvedClinical::from_case(case);
        let times = compute_time_course(case);
        let ivt = ivt::assess_ivt(case, &times);
        let evt = evt::assess_evt(case, &clinical, &times);
        let transfer = transfer::assess_transfer(case, &clinical, &times, &ivt, &evt);
        compose(case, &times, &ivt, &evt, &transfer)
    }

    #[test]
    fn test_ed_summary_carries_both_verdicts() {
        let mut case = base_case();
        case.last_known_well = ts("2024-03-01T10:00:00Z");
        case.evaluated_at = ts("2024-03-01T12:00:00Z");

        let docs = docs_for(&case);
        assert!(docs.ed_summary.starts_with("ED Decision Support Summary"));
        assert!(docs.ed_summary.contains("LKW: 10:00 | Time from LKW: 2.0h"));
        assert!(docs.ed_summary.contains("IVT: ELIGIBLE -"));
        assert!(docs.ed_summary.contains("COR 1"));
        assert!(docs.ed_summary.contains("EVT: NEEDS CTA/ASPECTS -"));
    }

    #[test]
    fn test_transfer_summary_without_flags_has_no_flag_note() {
        let docs = docs_for(&base_case());
        assert!(docs.transfer_summary.starts_with("Transfer Rationale Summary"));
        assert!(docs.transfer_summary.contains("Projected Needle Time:"));
        assert!(!docs.transfer_summary.contains("High-risk flags"));
    }

    #[test]
    fn test_transfer_summary_appends_flag_note() {
        let mut case = base_case();
        case.high_risk_flags = vec!["Anticoagulant".to_string(), "Recent surgery".to_string()];

        let docs = docs_for(&case);
        assert!(docs
            .transfer_summary
            .contains("High-risk flags present: Anticoagulant, Recent surgery"));
        assert!(docs.transfer_summary.contains("specialist review recommended"));
    }
}
