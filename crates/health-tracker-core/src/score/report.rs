//! Health score report assembly.

use std::time::Duration;

use crate::models::{HealthScoreReport, MetricAverages, User, UserGroup};

/// Assemble the report returned to callers.
///
/// Averages are rounded to 2 decimal places; cohort attributes come from the
/// target user.
pub fn build_report(
    user: &User,
    user_values: &MetricAverages,
    cohort_values: &MetricAverages,
    cohort_size: usize,
    health_score: f64,
    elapsed: Duration,
) -> HealthScoreReport {
    HealthScoreReport {
        user_id: user.id,
        health_score,
        user_data: user_values.rounded(),
        group_averages: cohort_values.rounded(),
        user_group: UserGroup {
            group_size: cohort_size as u64,
            age_group: user.age_group.clone(),
            fitness_level: user.fitness_level.clone(),
            climate_zone: user.climate_zone.clone(),
            chronic_conditions: user.chronic_conditions.clone(),
        },
        elapsed_micros: u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
    }
}
