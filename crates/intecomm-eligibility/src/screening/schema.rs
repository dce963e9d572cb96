use std::fmt;

use serde::Serialize;

use super::config::EligibilityConfig;
use super::domain::{Gender, ScreeningAnswers, YesNo, YesNoNa};
use super::reasons::{ReasonCode, ReasonsIneligible};

/// A single answer lifted out of [`ScreeningAnswers`] so constraints can be checked uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    Integer(i64),
    YesNo(YesNo),
    YesNoNa(YesNoNa),
    Gender(Gender),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(value) => write!(f, "{value}"),
            FieldValue::YesNo(YesNo::Yes) | FieldValue::YesNoNa(YesNoNa::Yes) => {
                f.write_str("Yes")
            }
            FieldValue::YesNo(YesNo::No) | FieldValue::YesNoNa(YesNoNa::No) => f.write_str("No"),
            FieldValue::YesNoNa(YesNoNa::NotApplicable) => f.write_str("N/A"),
            FieldValue::Gender(Gender::Male) => f.write_str("M"),
            FieldValue::Gender(Gender::Female) => f.write_str("F"),
        }
    }
}

/// Constraint a required field must satisfy. An absent answer never satisfies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldConstraint {
    /// Integer within `min..max`.
    InRange { min: u16, max: u16 },
    Equals(FieldValue),
    OneOf(Vec<FieldValue>),
}

impl FieldConstraint {
    pub fn is_satisfied_by(&self, value: Option<FieldValue>) -> bool {
        let Some(value) = value else {
            return false;
        };

        match self {
            FieldConstraint::InRange { min, max } => match value {
                FieldValue::Integer(n) => (i64::from(*min)..i64::from(*max)).contains(&n),
                _ => false,
            },
            FieldConstraint::Equals(expected) => value == *expected,
            FieldConstraint::OneOf(allowed) => allowed.contains(&value),
        }
    }
}

impl fmt::Display for FieldConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldConstraint::InRange { min, max } => write!(f, "in [{min}, {max})"),
            FieldConstraint::Equals(expected) => write!(f, "== {expected}"),
            FieldConstraint::OneOf(allowed) => {
                let labels: Vec<String> = allowed.iter().map(ToString::to_string).collect();
                write!(f, "one of {{{}}}", labels.join(", "))
            }
        }
    }
}

/// One entry of the required field schema. The field name doubles as its reason code.
#[derive(Debug, Clone)]
pub struct RequiredField {
    pub code: ReasonCode,
    pub constraint: FieldConstraint,
    pub message: String,
    read: fn(&ScreeningAnswers) -> Option<FieldValue>,
}

impl RequiredField {
    fn new(
        code: ReasonCode,
        constraint: FieldConstraint,
        message: impl Into<String>,
        read: fn(&ScreeningAnswers) -> Option<FieldValue>,
    ) -> Self {
        Self {
            code,
            constraint,
            message: message.into(),
            read,
        }
    }

    pub fn field_name(&self) -> &'static str {
        self.code.as_str()
    }

    pub fn value_in(&self, answers: &ScreeningAnswers) -> Option<FieldValue> {
        (self.read)(answers)
    }
}

/// Serializable view of a schema entry for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequiredFieldView {
    pub field: &'static str,
    pub constraint: String,
    pub message: String,
}

/// Field name to constraint mapping checked before any condition-specific rule runs.
#[derive(Debug, Clone)]
pub struct RequiredFieldSchema {
    fields: Vec<RequiredField>,
}

impl RequiredFieldSchema {
    pub fn from_config(config: &EligibilityConfig) -> Self {
        use FieldConstraint::{Equals, InRange, OneOf};

        let yes = Equals(FieldValue::YesNo(YesNo::Yes));
        let no = Equals(FieldValue::YesNo(YesNo::No));
        let na_no = Equals(FieldValue::YesNoNa(YesNoNa::No));
        let no_or_na = OneOf(vec![
            FieldValue::YesNoNa(YesNoNa::No),
            FieldValue::YesNoNa(YesNoNa::NotApplicable),
        ]);

        let fields = vec![
            RequiredField::new(
                ReasonCode::AgeInYears,
                InRange {
                    min: config.minimum_age,
                    max: config.maximum_age,
                },
                format!("age<{}", config.minimum_age),
                |a| a.age_in_years.map(FieldValue::Integer),
            ),
            RequiredField::new(
                ReasonCode::ConsentAbility,
                yes.clone(),
                "Unwilling to consent",
                |a| a.consent_ability.map(FieldValue::YesNo),
            ),
            RequiredField::new(
                ReasonCode::Gender,
                OneOf(vec![
                    FieldValue::Gender(Gender::Male),
                    FieldValue::Gender(Gender::Female),
                ]),
                "gender invalid",
                |a| a.gender.map(FieldValue::Gender),
            ),
            RequiredField::new(
                ReasonCode::InCare6m,
                yes.clone(),
                "Not in care for 6m",
                |a| a.in_care_6m.map(FieldValue::YesNo),
            ),
            RequiredField::new(
                ReasonCode::LivesNearby,
                yes.clone(),
                "Does not live in catchment area",
                |a| a.lives_nearby.map(FieldValue::YesNo),
            ),
            RequiredField::new(
                ReasonCode::StayingNearby6,
                yes,
                "Unable/Unwilling to stay in catchment area",
                |a| a.staying_nearby_6.map(FieldValue::YesNo),
            ),
            RequiredField::new(
                ReasonCode::RequiresAcuteCare,
                no,
                "Requires acute care",
                |a| a.requires_acute_care.map(FieldValue::YesNo),
            ),
            RequiredField::new(
                ReasonCode::ExcludedByBpHistory,
                na_no.clone(),
                "BP history",
                |a| a.excluded_by_bp_history.map(FieldValue::YesNoNa),
            ),
            RequiredField::new(
                ReasonCode::ExcludedByGlucHistory,
                na_no.clone(),
                "Glucose history",
                |a| a.excluded_by_gluc_history.map(FieldValue::YesNoNa),
            ),
            RequiredField::new(
                ReasonCode::UnsuitableForStudy,
                na_no,
                "Unsuitable for study",
                |a| a.unsuitable_for_study.map(FieldValue::YesNoNa),
            ),
            RequiredField::new(
                ReasonCode::Pregnant,
                no_or_na.clone(),
                "Pregnant",
                |a| a.pregnant.map(FieldValue::YesNoNa),
            ),
            RequiredField::new(
                ReasonCode::UnsuitableAgreed,
                no_or_na,
                "Unsuitable agreed by study coordinator",
                |a| a.unsuitable_agreed.map(FieldValue::YesNoNa),
            ),
        ];

        Self { fields }
    }

    pub fn fields(&self) -> &[RequiredField] {
        &self.fields
    }

    pub fn views(&self) -> Vec<RequiredFieldView> {
        self.fields
            .iter()
            .map(|field| RequiredFieldView {
                field: field.field_name(),
                constraint: field.constraint.to_string(),
                message: field.message.clone(),
            })
            .collect()
    }

    /// Check every field independently, recording one reason per violation.
    pub fn check(&self, answers: &ScreeningAnswers) -> ReasonsIneligible {
        let mut reasons = ReasonsIneligible::new();
        for field in &self.fields {
            if !field.constraint.is_satisfied_by(field.value_in(answers)) {
                reasons.record(field.code, field.message.as_str());
            }
        }
        reasons
    }
}

impl Default for RequiredFieldSchema {
    fn default() -> Self {
        Self::from_config(&EligibilityConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_constraint_is_half_open() {
        let constraint = FieldConstraint::InRange { min: 18, max: 120 };
        assert!(!constraint.is_satisfied_by(Some(FieldValue::Integer(17))));
        assert!(constraint.is_satisfied_by(Some(FieldValue::Integer(18))));
        assert!(constraint.is_satisfied_by(Some(FieldValue::Integer(119))));
        assert!(!constraint.is_satisfied_by(Some(FieldValue::Integer(120))));
        assert!(!constraint.is_satisfied_by(Some(FieldValue::Integer(-5))));
        assert!(!constraint.is_satisfied_by(Some(FieldValue::Integer(70_000))));
        assert!(!constraint.is_satisfied_by(None));
    }

    #[test]
    fn absent_answers_fail_every_constraint() {
        let schema = RequiredFieldSchema::default();
        let reasons = schema.check(&ScreeningAnswers::default());
        assert_eq!(reasons.len(), schema.fields().len());
        assert_eq!(reasons.message(ReasonCode::AgeInYears), Some("age<18"));
        assert_eq!(reasons.message(ReasonCode::Gender), Some("gender invalid"));
    }

    #[test]
    fn views_describe_constraints() {
        let views = RequiredFieldSchema::default().views();
        let pregnant = views
            .iter()
            .find(|view| view.field == "pregnant")
            .expect("pregnant listed");
        assert_eq!(pregnant.constraint, "one of {No, N/A}");

        let age = views
            .iter()
            .find(|view| view.field == "age_in_years")
            .expect("age listed");
        assert_eq!(age.constraint, "in [18, 120)");
    }
}
