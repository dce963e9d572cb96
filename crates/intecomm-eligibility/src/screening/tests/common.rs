use crate::screening::{
    EligibilityConfig, EligibilityEvaluator, Gender, ScreeningAnswers, YesNo, YesNoNa,
};

pub(super) fn evaluator() -> EligibilityEvaluator {
    EligibilityEvaluator::new(EligibilityConfig::default())
}

/// Every required field at a passing value, HIV diagnosed over six months ago, no readings.
pub(super) fn basic_answers() -> ScreeningAnswers {
    ScreeningAnswers {
        age_in_years: Some(25),
        consent_ability: Some(YesNo::Yes),
        excluded_by_bp_history: Some(YesNoNa::No),
        excluded_by_gluc_history: Some(YesNoNa::No),
        gender: Some(Gender::Male),
        hiv_dx: Some(YesNo::Yes),
        hiv_dx_6m: Some(YesNo::Yes),
        in_care_6m: Some(YesNo::Yes),
        lives_nearby: Some(YesNo::Yes),
        pregnant: Some(YesNoNa::NotApplicable),
        requires_acute_care: Some(YesNo::No),
        staying_nearby_6: Some(YesNo::Yes),
        unsuitable_for_study: Some(YesNoNa::No),
        unsuitable_agreed: Some(YesNoNa::NotApplicable),
        ..ScreeningAnswers::default()
    }
}

pub(super) fn with_readings(
    mut answers: ScreeningAnswers,
    sys: u16,
    dia: u16,
) -> ScreeningAnswers {
    answers.sys_blood_pressure_one = Some(sys);
    answers.sys_blood_pressure_two = Some(sys);
    answers.dia_blood_pressure_one = Some(dia);
    answers.dia_blood_pressure_two = Some(dia);
    answers
}

/// Basic answers with normal readings, assessed only for hypertension.
pub(super) fn eligible_htn_answers() -> ScreeningAnswers {
    let mut answers = with_readings(basic_answers(), 140, 90);
    answers.hiv_dx = Some(YesNo::No);
    answers.hiv_dx_6m = None;
    answers.dm_dx = Some(YesNo::No);
    answers.htn_dx = Some(YesNo::Yes);
    answers.htn_dx_6m = Some(YesNo::Yes);
    answers.htn_complications = Some(YesNo::No);
    answers
}
