//! Sleep activity database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::validation::{ensure_non_negative, normalize_timestamp, recorded_at_or_now};
use super::{Database, DbError, DbResult};
use crate::models::{NewSleepActivity, SleepActivity, SleepActivityUpdate};

impl Database {
    /// Record a sleep sample for an existing user.
    pub fn insert_sleep_activity(
        &self,
        user_id: i64,
        sample: &NewSleepActivity,
    ) -> DbResult<SleepActivity> {
        self.ensure_user_exists(user_id)?;

        ensure_non_negative("sleep_duration", sample.sleep_duration)?;
        ensure_non_negative("sleep_quality", sample.sleep_quality as f64)?;
        let recorded_at = recorded_at_or_now(sample.recorded_at.as_deref())?;

        self.conn.execute(
            r#"
            INSERT INTO sleep_activity (user_id, sleep_duration, sleep_quality, recorded_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![user_id, sample.sleep_duration, sample.sleep_quality, recorded_at],
        )?;

        let id = self.conn.last_insert_rowid();
        self.get_sleep_activity(user_id, id)?
            .ok_or_else(|| DbError::NotFound(format!("sleep activity {}", id)))
    }

    /// Get a sleep sample by ID, scoped to its owner.
    pub fn get_sleep_activity(&self, user_id: i64, id: i64) -> DbResult<Option<SleepActivity>> {
        self.conn
            .query_row(
                r#"
                SELECT id, user_id, sleep_duration, sleep_quality, recorded_at
                FROM sleep_activity
                WHERE id = ?1 AND user_id = ?2
                "#,
                [id, user_id],
                sleep_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List a user's sleep samples, oldest first.
    pub fn list_sleep_activities(&self, user_id: i64) -> DbResult<Vec<SleepActivity>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, user_id, sleep_duration, sleep_quality, recorded_at
            FROM sleep_activity
            WHERE user_id = ?
            ORDER BY recorded_at, id
            "#,
        )?;

        let rows = stmt.query_map([user_id], sleep_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Apply a partial update to a sleep sample.
    pub fn update_sleep_activity(
        &self,
        user_id: i64,
        id: i64,
        update: &SleepActivityUpdate,
    ) -> DbResult<Option<SleepActivity>> {
        let Some(mut sleep) = self.get_sleep_activity(user_id, id)? else {
            return Ok(None);
        };

        let mut update = update.clone();
        if let Some(duration) = update.sleep_duration {
            ensure_non_negative("sleep_duration", duration)?;
        }
        if let Some(quality) = update.sleep_quality {
            ensure_non_negative("sleep_quality", quality as f64)?;
        }
        if let Some(recorded_at) = &update.recorded_at {
            update.recorded_at = Some(normalize_timestamp(recorded_at)?);
        }

        sleep.apply(&update);
        self.conn.execute(
            r#"
            UPDATE sleep_activity SET
                sleep_duration = ?3,
                sleep_quality = ?4,
                recorded_at = ?5
            WHERE id = ?1 AND user_id = ?2
            "#,
            params![
                sleep.id,
                sleep.user_id,
                sleep.sleep_duration,
                sleep.sleep_quality,
                sleep.recorded_at,
            ],
        )?;
        Ok(Some(sleep))
    }

    /// Delete a sleep sample.
    pub fn delete_sleep_activity(&self, user_id: i64, id: i64) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "DELETE FROM sleep_activity WHERE id = ?1 AND user_id = ?2",
            [id, user_id],
        )?;
        Ok(rows_affected > 0)
    }
}

fn sleep_from_row(row: &Row<'_>) -> rusqlite::Result<SleepActivity> {
    Ok(SleepActivity {
        id: row.get(0)?,
        user_id: row.get(1)?,
        sleep_duration: row.get(2)?,
        sleep_quality: row.get(3)?,
        recorded_at: row.get(4)?,
    })
}
