//! Core domain types for the StrokeTriage system.
//!
//! This module defines the fundamental types used throughout the system:
//! - The case input record supplied by the presentation layer
//! - Closed enumerations for onset, occlusion site, and imaging findings
//! - The verdict record returned by the rules evaluator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Input Types
// ============================================================================

/// How the stroke onset time is known
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StrokeOnset {
    /// Witnessed onset or reliable last-known-well time
    Known,
    /// Wake-up or otherwise unwitnessed onset
    WakeUp,
}

/// Tri-state imaging or exam finding
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Finding {
    Yes,
    No,
    #[default]
    Unknown,
}

impl Finding {
    pub fn is_yes(self) -> bool {
        self == Finding::Yes
    }
}

/// Occlusion location on vascular imaging
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OcclusionSite {
    /// Vascular imaging not done or not yet read
    #[default]
    Unknown,
    Ica,
    M1,
    ProximalM2Dominant,
    ProximalM2Nondominant,
    DistalMca,
    Aca,
    Pca,
    Basilar,
}

impl OcclusionSite {
    /// Large-vessel occlusion sites treated by the anterior EVT rules
    pub fn is_large_vessel(self) -> bool {
        matches!(self, OcclusionSite::Ica | OcclusionSite::M1)
    }

    /// Sites where routine thrombectomy has shown no benefit
    pub fn is_no_benefit(self) -> bool {
        matches!(
            self,
            OcclusionSite::ProximalM2Nondominant
                | OcclusionSite::DistalMca
                | OcclusionSite::Aca
                | OcclusionSite::Pca
        )
    }
}

impl std::fmt::Display for OcclusionSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OcclusionSite::Unknown => "Unknown/Not done",
            OcclusionSite::Ica => "ICA",
            OcclusionSite::M1 => "M1",
            OcclusionSite::ProximalM2Dominant => "Proximal M2 (dominant)",
            OcclusionSite::ProximalM2Nondominant => "Proximal M2 (nondominant/codominant)",
            OcclusionSite::DistalMca => "distal MCA",
            OcclusionSite::Aca => "ACA",
            OcclusionSite::Pca => "PCA",
            OcclusionSite::Basilar => "Basilar",
        };
        f.write_str(s)
    }
}

/// Local availability of one imaging modality
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct ImagingAccess {
    pub available_now: bool,
    /// Minutes until the modality could be obtained; meaningful only
    /// when `available_now` is false
    #[serde(default)]
    pub eta_minutes: u32,
}

/// Availability of the four modalities the pathways care about
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct ImagingAvailability {
    #[serde(default)]
    pub ncct: ImagingAccess,
    #[serde(default)]
    pub cta: ImagingAccess,
    #[serde(default)]
    pub ctp: ImagingAccess,
    #[serde(default)]
    pub mri: ImagingAccess,
}

/// Transport logistics for the referring site
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TransportPlan {
    /// Door-in-door-out time at the referring facility
    #[serde(default = "default_dido_minutes")]
    pub dido_minutes: u32,
    #[serde(default = "default_transport_minutes")]
    pub transport_minutes: u32,
    /// Door-to-needle time at the receiving facility
    #[serde(default = "default_receiving_dtn_minutes")]
    pub receiving_dtn_minutes: u32,
    /// Evaluating at a referring, non-thrombectomy-capable site
    #[serde(default = "default_spoke_mode")]
    pub spoke_mode: bool,
}

impl Default for TransportPlan {
    fn default() -> Self {
        Self {
            dido_minutes: default_dido_minutes(),
            transport_minutes: default_transport_minutes(),
            receiving_dtn_minutes: default_receiving_dtn_minutes(),
            spoke_mode: default_spoke_mode(),
        }
    }
}

fn default_dido_minutes() -> u32 {
    120
}

fn default_transport_minutes() -> u32 {
    20
}

fn default_receiving_dtn_minutes() -> u32 {
    45
}

fn default_spoke_mode() -> bool {
    true
}

/// A complete case snapshot supplied by the presentation layer
///
/// The record is immutable once constructed; the evaluator never writes
/// back into it. Optional clinical scores are resolved to conservative
/// defaults in a single explicit step before any cascade runs
/// (see [`crate::defaults::ResolvedClinical`]).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaseInputs {
    pub onset: StrokeOnset,
    pub last_known_well: DateTime<Utc>,
    #[serde(default)]
    pub bedtime: Option<DateTime<Utc>>,
    #[serde(default)]
    pub wake: Option<DateTime<Utc>>,
    #[serde(default)]
    pub recognition: Option<DateTime<Utc>>,
    pub evaluated_at: DateTime<Utc>,

    #[serde(default)]
    pub nihss: Option<u8>,
    #[serde(default)]
    pub disabling_deficit: bool,
    #[serde(default)]
    pub imaging: ImagingAvailability,
    #[serde(default)]
    pub transport: TransportPlan,

    #[serde(default)]
    pub occlusion_site: OcclusionSite,
    #[serde(default)]
    pub aspects: Option<u8>,
    #[serde(default)]
    pub pc_aspects: Option<u8>,
    #[serde(default)]
    pub age: Option<u16>,
    #[serde(default)]
    pub prestroke_mrs: Option<u8>,
    #[serde(default)]
    pub mass_effect: Finding,
    #[serde(default)]
    pub mri_mismatch: Finding,
    #[serde(default)]
    pub perfusion_penumbra: Finding,
    #[serde(default)]
    pub high_risk_flags: Vec<String>,
}

// ============================================================================
// Verdict Types
// ============================================================================

/// Guideline class of recommendation attached to a verdict
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Class1,
    Class2a,
    Class3,
    Class3NoBenefit,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Recommendation::Class1 => "COR 1",
            Recommendation::Class2a => "COR 2a",
            Recommendation::Class3 => "COR 3",
            Recommendation::Class3NoBenefit => "COR 3: No Benefit",
        };
        f.write_str(s)
    }
}

/// Thrombolysis eligibility status
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IvtStatus {
    Eligible,
    EligibleMriMismatch,
    EligiblePerfusionSelected,
    NeedsImaging,
    NotEligible,
}

impl IvtStatus {
    pub fn is_eligible(self) -> bool {
        matches!(
            self,
            IvtStatus::Eligible
                | IvtStatus::EligibleMriMismatch
                | IvtStatus::EligiblePerfusionSelected
        )
    }
}

impl std::fmt::Display for IvtStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            IvtStatus::Eligible => "ELIGIBLE",
            IvtStatus::EligibleMriMismatch => "ELIGIBLE (MRI mismatch)",
            IvtStatus::EligiblePerfusionSelected => "ELIGIBLE (Perfusion-selected)",
            IvtStatus::NeedsImaging => "NEEDS IMAGING",
            IvtStatus::NotEligible => "NOT ELIGIBLE",
        };
        f.write_str(s)
    }
}

/// Thrombolysis assessment returned by the IVT cascade
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IvtAssessment {
    pub status: IvtStatus,
    pub rationale: String,
    pub cor: Option<Recommendation>,
    /// Latest time a needle at the receiving center is still actionable;
    /// None when no pathway opened a window
    pub latest_needle_time: Option<DateTime<Utc>>,
    /// Elapsed-hour figures used by the cascade, for audit display
    pub math_trace: String,
}

/// Thrombectomy eligibility status
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EvtStatus {
    Eligible,
    NeedsVascularImaging,
    Consider,
    NotEligible,
}

impl std::fmt::Display for EvtStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EvtStatus::Eligible => "ELIGIBLE",
            EvtStatus::NeedsVascularImaging => "NEEDS CTA/ASPECTS",
            EvtStatus::Consider => "CONSIDER - BENEFIT UNCERTAIN",
            EvtStatus::NotEligible => "NOT ELIGIBLE",
        };
        f.write_str(s)
    }
}

/// Thrombectomy assessment returned by the EVT cascade
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvtAssessment {
    pub status: EvtStatus,
    pub rationale: String,
    pub cor: Option<Recommendation>,
}

/// Inter-facility transfer recommendation
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransferStatus {
    TransferNowForEvt,
    CtaAsap,
    TransferForImagingSelectedIvt,
    DoNotTransferForIvtOnly,
    BorderlineConsult,
}

impl std::fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TransferStatus::TransferNowForEvt => "TRANSFER NOW FOR EVT-CAPABLE CENTER",
            TransferStatus::CtaAsap => "CTA ASAP",
            TransferStatus::TransferForImagingSelectedIvt => {
                "TRANSFER (IMAGING-SELECTED IVT MAY BE ACTIONABLE)"
            }
            TransferStatus::DoNotTransferForIvtOnly => "DO NOT TRANSFER FOR IVT-ONLY",
            TransferStatus::BorderlineConsult => "BORDERLINE-CONSULT",
        };
        f.write_str(s)
    }
}

/// Transfer assessment returned by the transfer cascade
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferAssessment {
    pub status: TransferStatus,
    pub rationale: String,
}

/// Elapsed times and projections derived from the case timestamps
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TimeCourse {
    pub hours_from_lkw: f64,
    pub hours_from_recognition: f64,
    /// Only present for wake-up cases with both bedtime and wake recorded
    pub hours_from_midpoint: Option<f64>,
    pub sleep_midpoint: Option<DateTime<Utc>>,
    pub projected_needle_time: DateTime<Utc>,
}

/// Formatted documentation blocks derived from the assessments
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DecisionDocs {
    pub ed_summary: String,
    pub transfer_summary: String,
}

/// The complete verdict record returned by [`crate::engine::evaluate`]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Verdict {
    pub times: TimeCourse,
    pub ivt: IvtAssessment,
    pub evt: EvtAssessment,
    pub transfer: TransferAssessment,
    pub docs: DecisionDocs,
}
