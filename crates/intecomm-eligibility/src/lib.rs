//! Screening eligibility for the HIV/Diabetes/Hypertension comorbidity management study.
//!
//! The [`screening`] module holds the decision engine: a typed answers record goes in, an
//! [`screening::EligibilityAssessment`] with an itemized set of disqualifying reasons comes
//! out. Configuration, error and telemetry plumbing live alongside it.

pub mod config;
pub mod error;
pub mod screening;
pub mod telemetry;
