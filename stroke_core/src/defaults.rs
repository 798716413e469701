//! Default application for missing optional clinical values.
//!
//! Every cascade reads scores through [`ResolvedClinical`], so the
//! default policy lives in exactly one place instead of being scattered
//! through the rules as fallback expressions.

use crate::CaseInputs;

/// NIHSS when not recorded: no measured deficit
pub const DEFAULT_NIHSS: u8 = 0;
/// Prestroke mRS when not recorded: no baseline disability
pub const DEFAULT_PRESTROKE_MRS: u8 = 0;
/// Age when not recorded: satisfies every age gate
pub const DEFAULT_AGE: u16 = 0;
/// ASPECTS when not scored: no early infarct change
pub const DEFAULT_ASPECTS: u8 = 10;
/// PC-ASPECTS when not scored: no early infarct change
pub const DEFAULT_PC_ASPECTS: u8 = 10;

/// Clinical scores with defaults applied, consumed read-only by the
/// cascades
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedClinical {
    pub nihss: u8,
    pub prestroke_mrs: u8,
    pub age: u16,
    pub aspects: u8,
    pub pc_aspects: u8,
}

impl ResolvedClinical {
    /// Resolve the optional scores of a case to their documented defaults
    pub fn from_case(case: &CaseInputs) -> Self {
        let resolved = Self {
            nihss: case.nihss.unwrap_or(DEFAULT_NIHSS),
            prestroke_mrs: case.prestroke_mrs.unwrap_or(DEFAULT_PRESTROKE_MRS),
            age: case.age.unwrap_or(DEFAULT_AGE),
            aspects: case.aspects.unwrap_or(DEFAULT_ASPECTS),
            pc_aspects: case.pc_aspects.unwrap_or(DEFAULT_PC_ASPECTS),
        };

        tracing::debug!(
            "Resolved clinical scores: NIHSS {}, mRS {}, age {}, ASPECTS {}, PC-ASPECTS {}",
            resolved.nihss,
            resolved.prestroke_mrs,
            resolved.age,
            resolved.aspects,
            resolved.pc_aspects
        );

        resolved
    }
}
