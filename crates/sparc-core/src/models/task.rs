use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Activity category a time entry is logged against.
///
/// The set is closed: stewardship staffing calculations compare minutes
/// across exactly these categories, so free-form work goes under [`TaskCode::Other`]
/// with a label on the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum TaskCode {
    /// Prospective audit and feedback.
    Paf,
    AuthRestrictedAntimicrobials,
    ClinicalRounds,
    GuidelinesEhr,
    /// Antimicrobial use tracking.
    Amu,
    /// Antimicrobial resistance tracking.
    Amr,
    AntibioticAppropriateness,
    InterventionAcceptance,
    SharingData,
    ProvidingEducation,
    ReceivingEducation,
    CommitteeWork,
    QiProjectsResearch,
    Emails,
    Other,
}

impl TaskCode {
    pub const ALL: [TaskCode; 15] = [
        TaskCode::Paf,
        TaskCode::AuthRestrictedAntimicrobials,
        TaskCode::ClinicalRounds,
        TaskCode::GuidelinesEhr,
        TaskCode::Amu,
        TaskCode::Amr,
        TaskCode::AntibioticAppropriateness,
        TaskCode::InterventionAcceptance,
        TaskCode::SharingData,
        TaskCode::ProvidingEducation,
        TaskCode::ReceivingEducation,
        TaskCode::CommitteeWork,
        TaskCode::QiProjectsResearch,
        TaskCode::Emails,
        TaskCode::Other,
    ];

    /// The wire code, as stored by the backend and written to exports.
    pub fn code(&self) -> &'static str {
        match self {
            TaskCode::Paf => "PAF",
            TaskCode::AuthRestrictedAntimicrobials => "AUTH_RESTRICTED_ANTIMICROBIALS",
            TaskCode::ClinicalRounds => "CLINICAL_ROUNDS",
            TaskCode::GuidelinesEhr => "GUIDELINES_EHR",
            TaskCode::Amu => "AMU",
            TaskCode::Amr => "AMR",
            TaskCode::AntibioticAppropriateness => "ANTIBIOTIC_APPROPRIATENESS",
            TaskCode::InterventionAcceptance => "INTERVENTION_ACCEPTANCE",
            TaskCode::SharingData => "SHARING_DATA",
            TaskCode::ProvidingEducation => "PROVIDING_EDUCATION",
            TaskCode::ReceivingEducation => "RECEIVING_EDUCATION",
            TaskCode::CommitteeWork => "COMMITTEE_WORK",
            TaskCode::QiProjectsResearch => "QI_PROJECTS_RESEARCH",
            TaskCode::Emails => "EMAILS",
            TaskCode::Other => "OTHER",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            TaskCode::Paf => "Prospective Audit & Feedback",
            TaskCode::AuthRestrictedAntimicrobials => "Authorization of Restricted Antimicrobials",
            TaskCode::ClinicalRounds => "Clinical Rounds",
            TaskCode::GuidelinesEhr => "Guidelines / EHR",
            TaskCode::Amu => "Antimicrobial Use",
            TaskCode::Amr => "Antimicrobial Resistance",
            TaskCode::AntibioticAppropriateness => "Antibiotic Appropriateness",
            TaskCode::InterventionAcceptance => "Intervention Acceptance",
            TaskCode::SharingData => "Sharing Data",
            TaskCode::ProvidingEducation => "Providing Education",
            TaskCode::ReceivingEducation => "Receiving Education",
            TaskCode::CommitteeWork => "Committee Work",
            TaskCode::QiProjectsResearch => "QI Projects / Research",
            TaskCode::Emails => "Emails",
            TaskCode::Other => "Other",
        }
    }
}

impl fmt::Display for TaskCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TaskCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskCode::ALL
            .into_iter()
            .find(|t| t.code() == s)
            .ok_or_else(|| CoreError::UnknownTaskCode(s.to_string()))
    }
}
