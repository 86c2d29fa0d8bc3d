//! Physical activity database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::validation::{ensure_non_negative, normalize_timestamp, recorded_at_or_now};
use super::{Database, DbError, DbResult};
use crate::models::{NewPhysicalActivity, PhysicalActivity, PhysicalActivityUpdate};

impl Database {
    /// Record a physical activity sample for an existing user.
    pub fn insert_physical_activity(
        &self,
        user_id: i64,
        sample: &NewPhysicalActivity,
    ) -> DbResult<PhysicalActivity> {
        self.ensure_user_exists(user_id)?;

        ensure_non_negative("steps", sample.steps as f64)?;
        ensure_non_negative("calories_burned", sample.calories_burned)?;
        ensure_non_negative("active_minutes", sample.active_minutes as f64)?;
        let recorded_at = recorded_at_or_now(sample.recorded_at.as_deref())?;

        self.conn.execute(
            r#"
            INSERT INTO physical_activity (
                user_id, steps, calories_burned, active_minutes, recorded_at
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                user_id,
                sample.steps,
                sample.calories_burned,
                sample.active_minutes,
                recorded_at,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        self.get_physical_activity(user_id, id)?
            .ok_or_else(|| DbError::NotFound(format!("physical activity {}", id)))
    }

    /// Get a sample by ID, scoped to its owner.
    pub fn get_physical_activity(&self, user_id: i64, id: i64) -> DbResult<Option<PhysicalActivity>> {
        self.conn
            .query_row(
                r#"
                SELECT id, user_id, steps, calories_burned, active_minutes, recorded_at
                FROM physical_activity
                WHERE id = ?1 AND user_id = ?2
                "#,
                [id, user_id],
                activity_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List a user's samples, oldest first.
    pub fn list_physical_activities(&self, user_id: i64) -> DbResult<Vec<PhysicalActivity>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, user_id, steps, calories_burned, active_minutes, recorded_at
            FROM physical_activity
            WHERE user_id = ?
            ORDER BY recorded_at, id
            "#,
        )?;

        let rows = stmt.query_map([user_id], activity_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Apply a partial update to a sample.
    pub fn update_physical_activity(
        &self,
        user_id: i64,
        id: i64,
        update: &PhysicalActivityUpdate,
    ) -> DbResult<Option<PhysicalActivity>> {
        let Some(mut activity) = self.get_physical_activity(user_id, id)? else {
            return Ok(None);
        };

        let mut update = update.clone();
        if let Some(steps) = update.steps {
            ensure_non_negative("steps", steps as f64)?;
        }
        if let Some(calories) = update.calories_burned {
            ensure_non_negative("calories_burned", calories)?;
        }
        if let Some(minutes) = update.active_minutes {
            ensure_non_negative("active_minutes", minutes as f64)?;
        }
        if let Some(recorded_at) = &update.recorded_at {
            update.recorded_at = Some(normalize_timestamp(recorded_at)?);
        }

        activity.apply(&update);
        self.conn.execute(
            r#"
            UPDATE physical_activity SET
                steps = ?3,
                calories_burned = ?4,
                active_minutes = ?5,
                recorded_at = ?6
            WHERE id = ?1 AND user_id = ?2
            "#,
            params![
                activity.id,
                activity.user_id,
                activity.steps,
                activity.calories_burned,
                activity.active_minutes,
                activity.recorded_at,
            ],
        )?;
        Ok(Some(activity))
    }

    /// Delete a sample.
    pub fn delete_physical_activity(&self, user_id: i64, id: i64) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "DELETE FROM physical_activity WHERE id = ?1 AND user_id = ?2",
            [id, user_id],
        )?;
        Ok(rows_affected > 0)
    }
}

fn activity_from_row(row: &Row<'_>) -> rusqlite::Result<PhysicalActivity> {
    Ok(PhysicalActivity {
        id: row.get(0)?,
        user_id: row.get(1)?,
        steps: row.get(2)?,
        calories_burned: row.get(3)?,
        active_minutes: row.get(4)?,
        recorded_at: row.get(5)?,
    })
}
