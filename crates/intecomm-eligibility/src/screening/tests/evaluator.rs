use serde_json::json;

use super::common::*;
use crate::screening::{
    BloodPressureAverage, Eligibility, EligibilityConfig, EligibilityEvaluator, InputError,
    ReasonCode, ScreeningAnswers, YesNo, YesNoNa,
};

#[test]
fn unanswered_form_is_pending_with_reasons() {
    let assessment = evaluator().assess(&ScreeningAnswers::default());

    assert_eq!(assessment.eligible(), Eligibility::Pending);
    assert!(!assessment.is_eligible());
    assert!(!assessment.reasons_ineligible().is_empty());
    assert_eq!(assessment.summary(), "pending: no answers provided");
}

#[test]
fn eligible_hiv_participant() {
    let mut answers = with_readings(basic_answers(), 120, 80);
    answers.art_unchanged_3m = Some(YesNo::Yes);
    answers.art_stable = Some(YesNo::Yes);
    answers.art_adherent = Some(YesNo::Yes);

    let assessment = evaluator().assess(&answers);

    assert!(assessment.is_eligible());
    assert_eq!(assessment.eligible(), Eligibility::Yes);
    assert!(assessment.reasons_ineligible().is_empty());
    assert_eq!(assessment.summary(), "eligible");
    assert_eq!(
        assessment.blood_pressure(),
        Some(BloodPressureAverage {
            systolic: 120.0,
            diastolic: 80.0,
        })
    );
}

#[test]
fn blood_pressure_must_be_fully_measured() {
    let mut answers = eligible_htn_answers();
    answers.sys_blood_pressure_one = None;
    answers.sys_blood_pressure_two = None;
    answers.dia_blood_pressure_one = None;
    answers.dia_blood_pressure_two = None;
    assert!(evaluator()
        .assess(&answers)
        .reasons_ineligible()
        .contains(ReasonCode::BpNotDone));

    answers.sys_blood_pressure_one = Some(120);
    answers.sys_blood_pressure_two = Some(120);
    answers.dia_blood_pressure_one = Some(80);
    let assessment = evaluator().assess(&answers);
    assert_eq!(
        assessment.reasons_ineligible().message(ReasonCode::BpNotDone),
        Some("BP not measured")
    );
    assert!(assessment.blood_pressure().is_none());

    answers.dia_blood_pressure_two = Some(80);
    assert!(evaluator().assess(&answers).is_eligible());
}

#[test]
fn high_average_blood_pressure_disqualifies() {
    let answers = with_readings(eligible_htn_answers(), 161, 101);
    let assessment = evaluator().assess(&answers);
    assert_eq!(
        assessment.reasons_ineligible().codes().collect::<Vec<_>>(),
        vec![ReasonCode::BpHigh]
    );

    let answers = with_readings(eligible_htn_answers(), 140, 90);
    assert!(!evaluator()
        .assess(&answers)
        .reasons_ineligible()
        .contains(ReasonCode::BpHigh));
}

#[test]
fn configured_thresholds_are_applied() {
    let evaluator = EligibilityEvaluator::new(EligibilityConfig {
        minimum_age: 21,
        max_systolic_average: 139,
        ..EligibilityConfig::default()
    });
    let mut answers = eligible_htn_answers();
    answers.age_in_years = Some(20);

    let reasons = evaluator.assess(&answers).reasons_ineligible().clone();

    assert_eq!(
        reasons.codes().collect::<Vec<_>>(),
        vec![ReasonCode::AgeInYears, ReasonCode::BpHigh]
    );
}

#[test]
fn reasons_follow_stage_order() {
    let mut answers = ScreeningAnswers {
        dm_dx: Some(YesNo::Yes),
        ..basic_answers()
    };
    answers.age_in_years = Some(17);
    answers.pregnant = Some(YesNoNa::Yes);

    let assessment = evaluator().assess(&answers);

    assert_eq!(
        assessment.reasons_ineligible().codes().collect::<Vec<_>>(),
        vec![
            ReasonCode::AgeInYears,
            ReasonCode::Pregnant,
            ReasonCode::DmDxDurationUnknown,
            ReasonCode::HivArtUnknown,
            ReasonCode::BpNotDone,
        ]
    );
    assert_eq!(
        assessment.reasons_ineligible().message(ReasonCode::Pregnant),
        Some("invalid for gender")
    );
}

#[test]
fn assess_value_rejects_malformed_input_before_rules_run() {
    let err = evaluator()
        .assess_value(json!({ "age_in_years": "twenty", "gender": "M" }))
        .expect_err("malformed age rejected");
    assert!(matches!(err, InputError::InvalidField { ref field, .. } if field == "age_in_years"));
}

#[test]
fn serialized_assessment_exposes_verdict_and_ordered_reasons() {
    let mut answers = eligible_htn_answers();
    answers.age_in_years = Some(15);
    answers.lives_nearby = None;

    let encoded = serde_json::to_value(evaluator().assess(&answers)).expect("serializes");

    assert_eq!(
        encoded,
        json!({
            "is_eligible": false,
            "eligible": "no",
            "reasons_ineligible": {
                "age_in_years": "age<18",
                "lives_nearby": "Does not live in catchment area",
            },
            "qualifying_conditions": ["HTN"],
            "blood_pressure": { "systolic": 140.0, "diastolic": 90.0 },
        })
    );
}

#[test]
fn out_of_range_ages_are_recorded_as_reasons() {
    for age in [-5, 70_000] {
        let mut record = serde_json::to_value(eligible_htn_answers()).expect("serializes");
        record["age_in_years"] = json!(age);

        let assessment = evaluator()
            .assess_value(record)
            .expect("integer age is well formed");

        assert_eq!(
            assessment.reasons_ineligible().codes().collect::<Vec<_>>(),
            vec![ReasonCode::AgeInYears]
        );
        assert_eq!(
            assessment.reasons_ineligible().message(ReasonCode::AgeInYears),
            Some("age<18")
        );
        assert_eq!(assessment.eligible(), Eligibility::No);
    }
}

#[test]
fn repeated_assessment_is_identical() {
    let evaluator = evaluator();
    let answers = with_readings(basic_answers(), 150, 95);
    assert_eq!(evaluator.assess(&answers), evaluator.assess(&answers));
}
