use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Two-valued answer collected on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YesNo {
    #[serde(rename = "Yes", alias = "yes", alias = "YES")]
    Yes,
    #[serde(rename = "No", alias = "no", alias = "NO")]
    No,
}

/// Answer to a question that may not apply to the participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YesNoNa {
    #[serde(rename = "Yes", alias = "yes", alias = "YES")]
    Yes,
    #[serde(rename = "No", alias = "no", alias = "NO")]
    No,
    #[serde(
        rename = "N/A",
        alias = "n/a",
        alias = "not_applicable",
        alias = "NOT_APPLICABLE"
    )]
    NotApplicable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M", alias = "male", alias = "MALE")]
    Male,
    #[serde(rename = "F", alias = "female", alias = "FEMALE")]
    Female,
}

/// Conditions that can qualify a participant for the study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "HIV")]
    Hiv,
    #[serde(rename = "DM")]
    Dm,
    #[serde(rename = "HTN")]
    Htn,
}

impl Condition {
    pub const ALL: [Condition; 3] = [Condition::Hiv, Condition::Dm, Condition::Htn];

    pub const fn label(self) -> &'static str {
        match self {
            Condition::Hiv => "HIV",
            Condition::Dm => "DM",
            Condition::Htn => "HTN",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Diagnosis answers for one condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosisAnswers {
    pub diagnosed: Option<YesNo>,
    pub diagnosed_6m: Option<YesNo>,
}

/// Cleaned answers from the screening form.
///
/// Every field is optional; an absent answer is an eligibility concern, not a construction
/// failure. Values of the wrong shape (unknown fields, unexpected spellings, non-integer ages,
/// non-positive readings) are rejected when the record is deserialized. An out of range age
/// is well formed and left for the required field check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScreeningAnswers {
    pub age_in_years: Option<i64>,
    pub gender: Option<Gender>,
    pub consent_ability: Option<YesNo>,

    pub in_care_6m: Option<YesNo>,
    pub lives_nearby: Option<YesNo>,
    pub staying_nearby_6: Option<YesNo>,
    pub requires_acute_care: Option<YesNo>,

    pub excluded_by_bp_history: Option<YesNoNa>,
    pub excluded_by_gluc_history: Option<YesNoNa>,
    pub unsuitable_for_study: Option<YesNoNa>,
    pub unsuitable_agreed: Option<YesNoNa>,

    pub pregnant: Option<YesNoNa>,

    pub hiv_dx: Option<YesNo>,
    pub hiv_dx_6m: Option<YesNo>,
    pub dm_dx: Option<YesNo>,
    pub dm_dx_6m: Option<YesNo>,
    pub htn_dx: Option<YesNo>,
    pub htn_dx_6m: Option<YesNo>,

    pub art_adherent: Option<YesNo>,
    pub art_stable: Option<YesNo>,
    pub art_unchanged_3m: Option<YesNo>,
    pub dm_complications: Option<YesNo>,
    pub htn_complications: Option<YesNo>,

    #[serde(deserialize_with = "positive_reading")]
    pub sys_blood_pressure_one: Option<u16>,
    #[serde(deserialize_with = "positive_reading")]
    pub sys_blood_pressure_two: Option<u16>,
    #[serde(deserialize_with = "positive_reading")]
    pub dia_blood_pressure_one: Option<u16>,
    #[serde(deserialize_with = "positive_reading")]
    pub dia_blood_pressure_two: Option<u16>,

    /// Averages as reported by the form. The rules always recompute from the readings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys_blood_pressure_avg: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dia_blood_pressure_avg: Option<f32>,
}

impl ScreeningAnswers {
    pub fn diagnosis(&self, condition: Condition) -> DiagnosisAnswers {
        let (diagnosed, diagnosed_6m) = match condition {
            Condition::Hiv => (self.hiv_dx, self.hiv_dx_6m),
            Condition::Dm => (self.dm_dx, self.dm_dx_6m),
            Condition::Htn => (self.htn_dx, self.htn_dx_6m),
        };
        DiagnosisAnswers {
            diagnosed,
            diagnosed_6m,
        }
    }

    /// True when no question on the form has been answered.
    pub fn is_unanswered(&self) -> bool {
        *self == Self::default()
    }
}

fn positive_reading<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<u16>::deserialize(deserializer)? {
        Some(0) => Err(de::Error::custom("blood pressure readings must be positive")),
        reading => Ok(reading),
    }
}
