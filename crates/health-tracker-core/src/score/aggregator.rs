//! Metric aggregation over a set of users.
//!
//! Each metric is averaged by its own query. A user with activity samples
//! but no blood tests still counts toward the steps average.

use tracing::debug;

use super::{RecordStore, ScoreResult};
use crate::models::{Metric, MetricAverages};

/// Average steps, sleep duration, and glucose across the given users.
///
/// Metrics without samples fall back to their defaults
/// (steps 0, sleep 0, glucose 100).
pub fn aggregate_metrics<S: RecordStore + ?Sized>(
    store: &S,
    user_ids: &[i64],
) -> ScoreResult<MetricAverages> {
    let steps = store.average(Metric::Steps, user_ids)?;
    let sleep = store.average(Metric::SleepDuration, user_ids)?;
    let glucose = store.average(Metric::GlucoseLevel, user_ids)?;

    debug!(
        users = user_ids.len(),
        ?steps,
        ?sleep,
        ?glucose,
        "aggregated metrics"
    );

    Ok(MetricAverages::from_raw(steps, sleep, glucose))
}

/// [`aggregate_metrics`] for a single user.
pub fn aggregate_user_metrics<S: RecordStore + ?Sized>(
    store: &S,
    user_id: i64,
) -> ScoreResult<MetricAverages> {
    aggregate_metrics(store, &[user_id])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{NewBloodTest, NewPhysicalActivity, NewSleepActivity, NewUser};

    #[test]
    fn test_no_rows_gives_defaults() {
        let db = Database::open_in_memory().unwrap();
        let user = db.insert_user(&NewUser::default()).unwrap();

        let averages = aggregate_user_metrics(&db, user.id).unwrap();
        assert_eq!(
            averages,
            MetricAverages {
                steps: 0.0,
                sleep: 0.0,
                glucose: 100.0
            }
        );

        let empty = aggregate_metrics(&db, &[]).unwrap();
        assert_eq!(empty, MetricAverages::NO_DATA);
    }

    #[test]
    fn test_partial_data_defaults_only_missing_metric() {
        let db = Database::open_in_memory().unwrap();
        let user = db.insert_user(&NewUser::default()).unwrap();

        db.insert_physical_activity(
            user.id,
            &NewPhysicalActivity {
                steps: 6000,
                calories_burned: 250.0,
                active_minutes: 40,
                recorded_at: None,
            },
        )
        .unwrap();
        db.insert_sleep_activity(
            user.id,
            &NewSleepActivity {
                sleep_duration: 6.0,
                sleep_quality: 2,
                recorded_at: None,
            },
        )
        .unwrap();
        db.insert_sleep_activity(
            user.id,
            &NewSleepActivity {
                sleep_duration: 7.0,
                sleep_quality: 3,
                recorded_at: None,
            },
        )
        .unwrap();

        let averages = aggregate_user_metrics(&db, user.id).unwrap();
        assert_eq!(averages.steps, 6000.0);
        assert_eq!(averages.sleep, 6.5);
        assert_eq!(averages.glucose, 100.0);
    }

    #[test]
    fn test_cohort_average_skips_members_without_rows() {
        let db = Database::open_in_memory().unwrap();
        let with_data = db.insert_user(&NewUser::default()).unwrap();
        let without = db.insert_user(&NewUser::default()).unwrap();

        db.insert_blood_test(
            with_data.id,
            &NewBloodTest {
                glucose_level: 80.0,
                cholesterol_level: 150.0,
                recorded_at: None,
            },
        )
        .unwrap();

        // Not zero-padded for the member without blood tests
        let averages = aggregate_metrics(&db, &[with_data.id, without.id]).unwrap();
        assert_eq!(averages.glucose, 80.0);
    }
}
