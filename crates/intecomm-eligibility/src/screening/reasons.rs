use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Stable key identifying one disqualifying finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReasonCode {
    AgeInYears,
    ConsentAbility,
    Gender,
    InCare6m,
    LivesNearby,
    StayingNearby6,
    RequiresAcuteCare,
    ExcludedByBpHistory,
    ExcludedByGlucHistory,
    UnsuitableForStudy,
    UnsuitableAgreed,
    Pregnant,
    NoConditions,
    HivDxDurationUnknown,
    DmDxDurationUnknown,
    HtnDxDurationUnknown,
    HivArtUnknown,
    ArtUnchanged3m,
    ArtStable,
    ArtAdherent,
    DmComplicationsUnknown,
    DmComplications,
    HtnComplicationsUnknown,
    HtnComplications,
    BpNotDone,
    BpHigh,
}

impl ReasonCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ReasonCode::AgeInYears => "age_in_years",
            ReasonCode::ConsentAbility => "consent_ability",
            ReasonCode::Gender => "gender",
            ReasonCode::InCare6m => "in_care_6m",
            ReasonCode::LivesNearby => "lives_nearby",
            ReasonCode::StayingNearby6 => "staying_nearby_6",
            ReasonCode::RequiresAcuteCare => "requires_acute_care",
            ReasonCode::ExcludedByBpHistory => "excluded_by_bp_history",
            ReasonCode::ExcludedByGlucHistory => "excluded_by_gluc_history",
            ReasonCode::UnsuitableForStudy => "unsuitable_for_study",
            ReasonCode::UnsuitableAgreed => "unsuitable_agreed",
            ReasonCode::Pregnant => "pregnant",
            ReasonCode::NoConditions => "no_conditions",
            ReasonCode::HivDxDurationUnknown => "hiv_dx_duration_unknown",
            ReasonCode::DmDxDurationUnknown => "dm_dx_duration_unknown",
            ReasonCode::HtnDxDurationUnknown => "htn_dx_duration_unknown",
            ReasonCode::HivArtUnknown => "hiv_art_unknown",
            ReasonCode::ArtUnchanged3m => "art_unchanged_3m",
            ReasonCode::ArtStable => "art_stable",
            ReasonCode::ArtAdherent => "art_adherent",
            ReasonCode::DmComplicationsUnknown => "dm_complications_unknown",
            ReasonCode::DmComplications => "dm_complications",
            ReasonCode::HtnComplicationsUnknown => "htn_complications_unknown",
            ReasonCode::HtnComplications => "htn_complications",
            ReasonCode::BpNotDone => "bp_not_done",
            ReasonCode::BpHigh => "bp_high",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ReasonCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Insertion-ordered set of disqualifying reasons, keyed by [`ReasonCode`].
///
/// Recording a code twice keeps its first position and takes the latest message. Each
/// screening stage returns one of these and the evaluator merges them in stage order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReasonsIneligible {
    entries: Vec<(ReasonCode, String)>,
}

impl ReasonsIneligible {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, code: ReasonCode, message: impl Into<String>) {
        let message = message.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == code) {
            Some((_, current)) => *current = message,
            None => self.entries.push((code, message)),
        }
    }

    pub fn merge(&mut self, other: ReasonsIneligible) {
        for (code, message) in other.entries {
            self.record(code, message);
        }
    }

    pub fn contains(&self, code: ReasonCode) -> bool {
        self.entries.iter().any(|(existing, _)| *existing == code)
    }

    pub fn message(&self, code: ReasonCode) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == code)
            .map(|(_, message)| message.as_str())
    }

    pub fn codes(&self) -> impl Iterator<Item = ReasonCode> + '_ {
        self.entries.iter().map(|(code, _)| *code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ReasonCode, &str)> {
        self.entries
            .iter()
            .map(|(code, message)| (*code, message.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ReasonsIneligible {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (code, message) in &self.entries {
            map.serialize_entry(code.as_str(), message)?;
        }
        map.end()
    }
}
