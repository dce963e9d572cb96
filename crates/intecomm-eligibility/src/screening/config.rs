use serde::{Deserialize, Serialize};

/// Thresholds applied by the screening rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    /// Youngest eligible age, inclusive.
    pub minimum_age: u16,
    /// Age ceiling, exclusive.
    pub maximum_age: u16,
    pub max_systolic_average: u16,
    pub max_diastolic_average: u16,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            minimum_age: 18,
            maximum_age: 120,
            max_systolic_average: 160,
            max_diastolic_average: 100,
        }
    }
}
