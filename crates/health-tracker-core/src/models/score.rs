//! Health score models.

use serde::{Deserialize, Serialize};

use super::metrics::Metric;

/// Average steps, sleep duration, and glucose for a set of users.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MetricAverages {
    pub steps: f64,
    pub sleep: f64,
    pub glucose: f64,
}

impl MetricAverages {
    /// Averages of a user with no samples at all.
    pub const NO_DATA: MetricAverages = MetricAverages {
        steps: 0.0,
        sleep: 0.0,
        glucose: 100.0,
    };

    /// Build from raw query results, substituting each metric's default
    /// where there were no rows.
    pub fn from_raw(steps: Option<f64>, sleep: Option<f64>, glucose: Option<f64>) -> Self {
        Self {
            steps: steps.unwrap_or(Metric::Steps.default_average()),
            sleep: sleep.unwrap_or(Metric::SleepDuration.default_average()),
            glucose: glucose.unwrap_or(Metric::GlucoseLevel.default_average()),
        }
    }

    /// Whether these are exactly the no-data defaults.
    pub fn is_no_data(&self) -> bool {
        *self == Self::NO_DATA
    }

    /// Copy with every value rounded to 2 decimal places.
    pub fn rounded(&self) -> Self {
        Self {
            steps: round2(self.steps),
            sleep: round2(self.sleep),
            glucose: round2(self.glucose),
        }
    }
}

/// The three capped sub-scores that sum to the composite score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoreBreakdown {
    /// Steps relative to the cohort, out of 30
    pub activity: f64,
    /// Sleep relative to the cohort, out of 40
    pub sleep: f64,
    /// Inverted glucose, out of 30
    pub glucose: f64,
}

impl ScoreBreakdown {
    /// Unrounded sum of the sub-scores.
    pub fn total(&self) -> f64 {
        self.activity + self.sleep + self.glucose
    }
}

/// Cohort description embedded in a report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserGroup {
    /// Distinct users in the cohort, including the target
    pub group_size: u64,
    pub age_group: String,
    pub fitness_level: String,
    pub climate_zone: String,
    pub chronic_conditions: String,
}

/// Result of a health score request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthScoreReport {
    pub user_id: i64,
    /// Composite score in `[0, 99.7]`, 2 decimal places
    pub health_score: f64,
    /// The user's own averages
    pub user_data: MetricAverages,
    /// The cohort's averages
    pub group_averages: MetricAverages,
    pub user_group: UserGroup,
    /// Time spent computing the report
    pub elapsed_micros: u64,
}

impl HealthScoreReport {
    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Round half away from zero to 2 decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
