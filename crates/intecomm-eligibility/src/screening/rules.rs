use std::collections::BTreeSet;

use serde::Serialize;

use super::config::EligibilityConfig;
use super::domain::{Condition, Gender, ScreeningAnswers, YesNo, YesNoNa};
use super::reasons::{ReasonCode, ReasonsIneligible};

/// Mean of the two systolic and two diastolic readings taken at screening.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BloodPressureAverage {
    pub systolic: f32,
    pub diastolic: f32,
}

impl BloodPressureAverage {
    pub fn from_readings(systolic: [u16; 2], diastolic: [u16; 2]) -> Self {
        Self {
            systolic: mean(systolic),
            diastolic: mean(diastolic),
        }
    }
}

fn mean(readings: [u16; 2]) -> f32 {
    (f32::from(readings[0]) + f32::from(readings[1])) / 2.0
}

/// A condition qualifies when it is diagnosed and the diagnosis is at least six months old.
pub(crate) fn qualifying_conditions(answers: &ScreeningAnswers) -> BTreeSet<Condition> {
    Condition::ALL
        .into_iter()
        .filter(|condition| {
            let dx = answers.diagnosis(*condition);
            dx.diagnosed == Some(YesNo::Yes) && dx.diagnosed_6m == Some(YesNo::Yes)
        })
        .collect()
}

pub(crate) fn no_conditions(conditions: &BTreeSet<Condition>) -> ReasonsIneligible {
    let mut reasons = ReasonsIneligible::new();
    if conditions.is_empty() {
        reasons.record(ReasonCode::NoConditions, "No conditions (HIV, DM, HTN)");
    }
    reasons
}

/// Flags any diagnosis whose six month duration was answered "No" or left blank.
pub(crate) fn diagnosis_duration(answers: &ScreeningAnswers) -> ReasonsIneligible {
    let mut reasons = ReasonsIneligible::new();
    for condition in Condition::ALL {
        let dx = answers.diagnosis(condition);
        if dx.diagnosed == Some(YesNo::Yes) && dx.diagnosed_6m != Some(YesNo::Yes) {
            let (code, message) = match condition {
                Condition::Hiv => (ReasonCode::HivDxDurationUnknown, "HIV duration unknown"),
                Condition::Dm => (ReasonCode::DmDxDurationUnknown, "DM duration unknown"),
                Condition::Htn => (ReasonCode::HtnDxDurationUnknown, "HTN duration unknown"),
            };
            reasons.record(code, message);
        }
    }
    reasons
}

pub(crate) fn hiv_art(answers: &ScreeningAnswers) -> ReasonsIneligible {
    let mut reasons = ReasonsIneligible::new();

    let (Some(unchanged_3m), Some(stable), Some(adherent)) = (
        answers.art_unchanged_3m,
        answers.art_stable,
        answers.art_adherent,
    ) else {
        reasons.record(ReasonCode::HivArtUnknown, "HIV ART status unknown");
        return reasons;
    };

    if unchanged_3m == YesNo::No {
        reasons.record(ReasonCode::ArtUnchanged3m, "ART changed within 3m");
    }
    if stable == YesNo::No {
        reasons.record(ReasonCode::ArtStable, "ART unstable");
    }
    if adherent == YesNo::No {
        reasons.record(ReasonCode::ArtAdherent, "ART not adherent");
    }
    reasons
}

pub(crate) fn dm_complications(answers: &ScreeningAnswers) -> ReasonsIneligible {
    complications(
        answers.dm_complications,
        (ReasonCode::DmComplicationsUnknown, "DM status unknown"),
        (ReasonCode::DmComplications, "DM complication"),
    )
}

pub(crate) fn htn_complications(answers: &ScreeningAnswers) -> ReasonsIneligible {
    complications(
        answers.htn_complications,
        (ReasonCode::HtnComplicationsUnknown, "HTN status unknown"),
        (ReasonCode::HtnComplications, "HTN complication"),
    )
}

fn complications(
    status: Option<YesNo>,
    unknown: (ReasonCode, &'static str),
    present: (ReasonCode, &'static str),
) -> ReasonsIneligible {
    let mut reasons = ReasonsIneligible::new();
    match status {
        None => reasons.record(unknown.0, unknown.1),
        Some(YesNo::Yes) => reasons.record(present.0, present.1),
        Some(YesNo::No) => {}
    }
    reasons
}

/// A male participant must have the pregnancy question marked not applicable.
pub(crate) fn pregnancy(answers: &ScreeningAnswers) -> ReasonsIneligible {
    let mut reasons = ReasonsIneligible::new();
    if answers.gender == Some(Gender::Male) && answers.pregnant != Some(YesNoNa::NotApplicable) {
        reasons.record(ReasonCode::Pregnant, "invalid for gender");
    }
    reasons
}

pub(crate) fn blood_pressure(
    answers: &ScreeningAnswers,
    config: &EligibilityConfig,
) -> (ReasonsIneligible, Option<BloodPressureAverage>) {
    let mut reasons = ReasonsIneligible::new();

    let (Some(sys_one), Some(sys_two), Some(dia_one), Some(dia_two)) = (
        answers.sys_blood_pressure_one,
        answers.sys_blood_pressure_two,
        answers.dia_blood_pressure_one,
        answers.dia_blood_pressure_two,
    ) else {
        reasons.record(ReasonCode::BpNotDone, "BP not measured");
        return (reasons, None);
    };

    let average = BloodPressureAverage::from_readings([sys_one, sys_two], [dia_one, dia_two]);
    if average.systolic > f32::from(config.max_systolic_average)
        || average.diastolic > f32::from(config.max_diastolic_average)
    {
        reasons.record(ReasonCode::BpHigh, "BP high");
    }

    (reasons, Some(average))
}
