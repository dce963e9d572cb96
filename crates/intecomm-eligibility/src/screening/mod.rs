//! Screening eligibility engine.
//!
//! A [`ScreeningAnswers`] record is run through every stage in a fixed order: required
//! fields, qualifying condition detection, diagnosis duration, the per-condition assessors,
//! pregnancy consistency and the blood pressure check. Each stage returns its own
//! [`ReasonsIneligible`] and the evaluator merges them, so one failing stage never hides
//! another.

mod config;
mod domain;
mod intake;
mod reasons;
mod rules;
mod schema;

#[cfg(test)]
mod tests;

pub use config::EligibilityConfig;
pub use domain::{Condition, DiagnosisAnswers, Gender, ScreeningAnswers, YesNo, YesNoNa};
pub use intake::InputError;
pub use reasons::{ReasonCode, ReasonsIneligible};
pub use rules::BloodPressureAverage;
pub use schema::{
    FieldConstraint, FieldValue, RequiredField, RequiredFieldSchema, RequiredFieldView,
};

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// Verdict of a screening assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Eligibility {
    Yes,
    No,
    /// Nothing on the form has been answered yet.
    Pending,
}

impl Eligibility {
    pub const fn label(self) -> &'static str {
        match self {
            Eligibility::Yes => "eligible",
            Eligibility::No => "ineligible",
            Eligibility::Pending => "pending",
        }
    }
}

/// Outcome of one evaluation. Built once by [`EligibilityEvaluator::assess`] and read-only after.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityAssessment {
    is_eligible: bool,
    eligible: Eligibility,
    reasons_ineligible: ReasonsIneligible,
    qualifying_conditions: BTreeSet<Condition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    blood_pressure: Option<BloodPressureAverage>,
}

impl EligibilityAssessment {
    pub fn is_eligible(&self) -> bool {
        self.is_eligible
    }

    pub fn eligible(&self) -> Eligibility {
        self.eligible
    }

    pub fn reasons_ineligible(&self) -> &ReasonsIneligible {
        &self.reasons_ineligible
    }

    pub fn qualifying_conditions(&self) -> &BTreeSet<Condition> {
        &self.qualifying_conditions
    }

    pub fn blood_pressure(&self) -> Option<BloodPressureAverage> {
        self.blood_pressure
    }

    pub fn summary(&self) -> String {
        let messages: Vec<&str> = self
            .reasons_ineligible
            .iter()
            .map(|(_, message)| message)
            .collect();

        match self.eligible {
            Eligibility::Yes => "eligible".to_string(),
            Eligibility::Pending => "pending: no answers provided".to_string(),
            Eligibility::No => format!("ineligible: {}", messages.join("; ")),
        }
    }
}

/// Stateless evaluator applying the screening rules to one answers record at a time.
#[derive(Debug, Clone)]
pub struct EligibilityEvaluator {
    config: EligibilityConfig,
    schema: RequiredFieldSchema,
}

impl Default for EligibilityEvaluator {
    fn default() -> Self {
        Self::new(EligibilityConfig::default())
    }
}

impl EligibilityEvaluator {
    pub fn new(config: EligibilityConfig) -> Self {
        let schema = RequiredFieldSchema::from_config(&config);
        Self { config, schema }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    pub fn schema(&self) -> &RequiredFieldSchema {
        &self.schema
    }

    /// Validate a raw field mapping and assess it. Malformed input never reaches the rules.
    pub fn assess_value(&self, value: Value) -> Result<EligibilityAssessment, InputError> {
        let answers = ScreeningAnswers::from_value(value)?;
        Ok(self.assess(&answers))
    }

    pub fn assess(&self, answers: &ScreeningAnswers) -> EligibilityAssessment {
        let mut reasons = ReasonsIneligible::new();

        merge_stage(&mut reasons, "required_fields", self.schema.check(answers));

        let qualifying_conditions = rules::qualifying_conditions(answers);
        merge_stage(
            &mut reasons,
            "no_conditions",
            rules::no_conditions(&qualifying_conditions),
        );
        merge_stage(
            &mut reasons,
            "diagnosis_duration",
            rules::diagnosis_duration(answers),
        );

        for condition in &qualifying_conditions {
            let (stage, partial) = match condition {
                Condition::Hiv => ("hiv_art", rules::hiv_art(answers)),
                Condition::Dm => ("dm_complications", rules::dm_complications(answers)),
                Condition::Htn => ("htn_complications", rules::htn_complications(answers)),
            };
            merge_stage(&mut reasons, stage, partial);
        }

        merge_stage(&mut reasons, "pregnancy", rules::pregnancy(answers));

        let (partial, blood_pressure) = rules::blood_pressure(answers, &self.config);
        merge_stage(&mut reasons, "blood_pressure", partial);

        let eligible = if answers.is_unanswered() {
            Eligibility::Pending
        } else if reasons.is_empty() {
            Eligibility::Yes
        } else {
            Eligibility::No
        };

        info!(
            verdict = eligible.label(),
            reasons = reasons.len(),
            conditions = qualifying_conditions.len(),
            "screening assessment complete"
        );

        EligibilityAssessment {
            is_eligible: eligible == Eligibility::Yes,
            eligible,
            reasons_ineligible: reasons,
            qualifying_conditions,
            blood_pressure,
        }
    }
}

fn merge_stage(reasons: &mut ReasonsIneligible, stage: &'static str, partial: ReasonsIneligible) {
    debug!(stage, findings = partial.len(), "screening stage evaluated");
    reasons.merge(partial);
}
