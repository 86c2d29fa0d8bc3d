//! Health score normalization.
//!
//! Weights (out of 100):
//! - Steps relative to cohort: 30 (capped at 29.9)
//! - Sleep relative to cohort: 40 (capped at 39.9)
//! - Inverted glucose: 30 (capped at 29.9)
//!
//! The caps keep the composite strictly below 100.

use crate::models::{round2, MetricAverages, ScoreBreakdown};

pub const ACTIVITY_WEIGHT: f64 = 30.0;
pub const SLEEP_WEIGHT: f64 = 40.0;
pub const GLUCOSE_WEIGHT: f64 = 30.0;

pub const ACTIVITY_CAP: f64 = 29.9;
pub const SLEEP_CAP: f64 = 39.9;
pub const GLUCOSE_CAP: f64 = 29.9;

/// Glucose level the inverted ratio is measured against (mg/dL).
pub const GLUCOSE_REFERENCE: f64 = 100.0;

/// Highest possible composite score.
pub const MAX_SCORE: f64 = ACTIVITY_CAP + SLEEP_CAP + GLUCOSE_CAP;

/// Per-metric sub-scores, or `None` for a user without any data.
pub fn score_breakdown(user: &MetricAverages, cohort: &MetricAverages) -> Option<ScoreBreakdown> {
    if user.is_no_data() {
        return None;
    }

    // +1 keeps the ratios finite when the cohort average is 0
    Some(ScoreBreakdown {
        activity: (user.steps / (cohort.steps + 1.0) * ACTIVITY_WEIGHT).min(ACTIVITY_CAP),
        sleep: (user.sleep / (cohort.sleep + 1.0) * SLEEP_WEIGHT).min(SLEEP_CAP),
        glucose: (GLUCOSE_REFERENCE / (user.glucose + 1.0) * GLUCOSE_WEIGHT).min(GLUCOSE_CAP),
    })
}

/// Composite health score of `user` against `cohort`, rounded to 2 places.
///
/// A user whose values are exactly the no-data defaults
/// (steps 0, sleep 0, glucose 100) scores exactly 0.
pub fn compute_score(user: &MetricAverages, cohort: &MetricAverages) -> f64 {
    match score_breakdown(user, cohort) {
        Some(breakdown) => round2(breakdown.total()),
        None => 0.0,
    }
}
