//! The rules evaluator.
//!
//! [`evaluate`] is the single entry point of the crate: a pure,
//! synchronous computation from a case snapshot to a verdict. Each
//! cascade returns an immutable assessment consumed read-only by the
//! next stage; nothing is mutated in place and nothing is retained
//! between calls.

use crate::{
    defaults::ResolvedClinical, docs, error::Error, evt, ivt, timing, transfer, CaseInputs, Result,
    Verdict,
};

/// Maximum NIHSS score the instrument can produce
const NIHSS_MAX: u8 = 42;
/// Maximum modified Rankin Scale grade
const MRS_MAX: u8 = 5;
/// Maximum ASPECTS / PC-ASPECTS score
const ASPECTS_MAX: u8 = 10;

/// Reject case records that indicate a caller bug rather than a
/// clinical scenario
fn validate(case: &CaseInputs) -> Result<()> {
    if case.evaluated_at < case.last_known_well {
        return Err(Error::InvalidInput(
            "evaluation time precedes last known well".to_string(),
        ));
    }

    if let (Some(bedtime), Some(wake)) = (case.bedtime, case.wake) {
        if wake < bedtime {
            return Err(Error::InvalidInput(
                "wake time precedes bedtime".to_string(),
            ));
        }
    }

    if case.nihss.is_some_and(|n| n > NIHSS_MAX) {
        return Err(Error::InvalidInput(format!(
            "NIHSS above instrument maximum of {}",
            NIHSS_MAX
        )));
    }
    if case.prestroke_mrs.is_some_and(|m| m > MRS_MAX) {
        return Err(Error::InvalidInput(format!(
            "prestroke mRS above scale maximum of {}",
            MRS_MAX
        )));
    }
    if case.aspects.is_some_and(|a| a > ASPECTS_MAX)
        || case.pc_aspects.is_some_and(|a| a > ASPECTS_MAX)
    {
        return Err(Error::InvalidInput(format!(
            "ASPECTS above scale maximum of {}",
            ASPECTS_MAX
        )));
    }

    Ok(())
}

/// Evaluate a case and return the complete verdict record
///
/// The three cascades are logically independent: IVT and EVT never read
/// each other's results, and the transfer cascade consumes both
/// read-only. Every call on well-formed input produces a verdict; the
/// cascades all end in explicit default branches.
pub fn evaluate(case: &CaseInputs) -> Result<Verdict> {
    validate(case)?;

    let clinical = ResolvedClinical::from_case(case);
    let times = timing::compute_time_course(case);

    let ivt = ivt::assess_ivt(case, &times);
    let evt = evt::assess_evt(case, &clinical, &times);
    let transfer = transfer::assess_transfer(case, &clinical, &times, &ivt, &evt);
    let docs = docs::compose(case, &times, &ivt, &evt, &transfer);

    tracing::info!(
        "Verdict: IVT {}, EVT {}, transfer {}",
        ivt.status,
        evt.status,
        transfer.status
    );

    Ok(Verdict {
        times,
        ivt,
        evt,
        transfer,
        docs,
    })
}
