//! Filtered lookups and aggregate queries used by health scoring.

use std::collections::BTreeSet;

use rusqlite::params_from_iter;

use super::{Database, DbResult};
use crate::models::{CohortFilter, Metric};

/// Maximum user IDs bound into a single `IN (...)` clause.
///
/// Well below SQLite's bound-parameter limit.
pub const MAX_IDS_PER_QUERY: usize = 500;

impl Database {
    /// IDs of all users matching every attribute of the filter, ascending.
    pub fn find_user_ids(&self, filter: &CohortFilter) -> DbResult<Vec<i64>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id FROM users
            WHERE climate_zone = ?1
              AND chronic_conditions = ?2
              AND age_group = ?3
              AND fitness_level = ?4
            ORDER BY id
            "#,
        )?;

        let rows = stmt.query_map(
            [
                &filter.climate_zone,
                &filter.chronic_conditions,
                &filter.age_group,
                &filter.fitness_level,
            ],
            |row| row.get(0),
        )?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Mean of a metric over every sample owned by any of the given users.
    ///
    /// Returns `None` when there are no samples. Duplicate IDs are ignored.
    pub fn average_metric(&self, metric: Metric, user_ids: &[i64]) -> DbResult<Option<f64>> {
        let ids: Vec<i64> = user_ids
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut total = 0.0;
        let mut count: i64 = 0;
        for chunk in ids.chunks(MAX_IDS_PER_QUERY) {
            let (chunk_total, chunk_count) = self.sum_metric(metric, chunk)?;
            total += chunk_total;
            count += chunk_count;
        }

        if count == 0 {
            return Ok(None);
        }
        Ok(Some(total / count as f64))
    }

    /// Sum and row count of a metric for one chunk of user IDs.
    fn sum_metric(&self, metric: Metric, user_ids: &[i64]) -> DbResult<(f64, i64)> {
        let placeholders = vec!["?"; user_ids.len()].join(", ");
        let sql = format!(
            "SELECT TOTAL({column}), COUNT({column}) FROM {table} WHERE user_id IN ({placeholders})",
            column = metric.column(),
            table = metric.table(),
            placeholders = placeholders,
        );

        let mut stmt = self.conn.prepare_cached(&sql)?;
        let sums = stmt.query_row(params_from_iter(user_ids.iter()), |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?;
        Ok(sums)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewBloodTest, NewPhysicalActivity, NewSleepActivity, NewUser};

    fn new_user(climate_zone: &str, fitness_level: &str) -> NewUser {
        NewUser {
            gender: "female".into(),
            age_group: "30-40".into(),
            climate_zone: climate_zone.into(),
            chronic_conditions: "no".into(),
            fitness_level: fitness_level.into(),
            language: "de".into(),
            registration_status: "completed".into(),
            registration_source: "App".into(),
            uuid: None,
        }
    }

    fn add_steps(db: &Database, user_id: i64, steps: i64) {
        db.insert_physical_activity(
            user_id,
            &NewPhysicalActivity {
                steps,
                calories_burned: 0.0,
                active_minutes: 0,
                recorded_at: None,
            },
        )
        .unwrap();
    }

    #[test]
    fn test_find_user_ids_requires_all_attributes() {
        let db = Database::open_in_memory().unwrap();
        let a = db.insert_user(&new_user("Tropical", "intermediate")).unwrap();
        let b = db.insert_user(&new_user("Tropical", "intermediate")).unwrap();
        // Same climate, different fitness
        db.insert_user(&new_user("Tropical", "beginner")).unwrap();
        // Same fitness, different climate
        db.insert_user(&new_user("Arctic", "intermediate")).unwrap();

        let ids = db.find_user_ids(&a.cohort_filter()).unwrap();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[test]
    fn test_find_user_ids_is_case_sensitive() {
        let db = Database::open_in_memory().unwrap();
        let a = db.insert_user(&new_user("Tropical", "intermediate")).unwrap();
        db.insert_user(&new_user("tropical", "intermediate")).unwrap();

        let ids = db.find_user_ids(&a.cohort_filter()).unwrap();
        assert_eq!(ids, vec![a.id]);
    }

    #[test]
    fn test_average_over_rows_not_users() {
        let db = Database::open_in_memory().unwrap();
        let a = db.insert_user(&new_user("Tropical", "intermediate")).unwrap();
        let b = db.insert_user(&new_user("Tropical", "intermediate")).unwrap();

        add_steps(&db, a.id, 1000);
        add_steps(&db, a.id, 2000);
        add_steps(&db, b.id, 6000);

        let avg = db.average_metric(Metric::Steps, &[a.id, b.id]).unwrap();
        assert_eq!(avg, Some(3000.0));
    }

    #[test]
    fn test_average_without_rows_is_none() {
        let db = Database::open_in_memory().unwrap();
        let a = db.insert_user(&new_user("Tropical", "intermediate")).unwrap();

        for metric in Metric::ALL {
            assert_eq!(db.average_metric(metric, &[a.id]).unwrap(), None);
        }
        assert_eq!(db.average_metric(Metric::Steps, &[]).unwrap(), None);
    }

    #[test]
    fn test_average_metrics_are_independent() {
        let db = Database::open_in_memory().unwrap();
        let a = db.insert_user(&new_user("Tropical", "intermediate")).unwrap();
        let b = db.insert_user(&new_user("Tropical", "intermediate")).unwrap();

        add_steps(&db, a.id, 4000);
        db.insert_sleep_activity(
            b.id,
            &NewSleepActivity {
                sleep_duration: 8.0,
                sleep_quality: 5,
                recorded_at: None,
            },
        )
        .unwrap();
        db.insert_blood_test(
            b.id,
            &NewBloodTest {
                glucose_level: 85.0,
                cholesterol_level: 160.0,
                recorded_at: None,
            },
        )
        .unwrap();

        let ids = [a.id, b.id];
        assert_eq!(db.average_metric(Metric::Steps, &ids).unwrap(), Some(4000.0));
        assert_eq!(db.average_metric(Metric::SleepDuration, &ids).unwrap(), Some(8.0));
        assert_eq!(db.average_metric(Metric::GlucoseLevel, &ids).unwrap(), Some(85.0));
    }

    #[test]
    fn test_average_ignores_duplicate_ids() {
        let db = Database::open_in_memory().unwrap();
        let a = db.insert_user(&new_user("Tropical", "intermediate")).unwrap();
        let b = db.insert_user(&new_user("Tropical", "intermediate")).unwrap();
        add_steps(&db, a.id, 1000);
        add_steps(&db, b.id, 3000);

        let avg = db
            .average_metric(Metric::Steps, &[a.id, a.id, b.id, a.id])
            .unwrap();
        assert_eq!(avg, Some(2000.0));
    }

    #[test]
    fn test_average_spans_multiple_chunks() {
        let db = Database::open_in_memory().unwrap();

        let mut ids = Vec::new();
        for i in 0..(MAX_IDS_PER_QUERY as i64 * 2 + 7) {
            let user = db.insert_user(&new_user("Desert", "low")).unwrap();
            add_steps(&db, user.id, i);
            ids.push(user.id);
        }

        let n = ids.len() as f64;
        let expected = (n - 1.0) / 2.0;
        let avg = db.average_metric(Metric::Steps, &ids).unwrap().unwrap();
        assert!((avg - expected).abs() < 1e-9, "avg {} != {}", avg, expected);
    }
}
