//! User database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{now_timestamp, NewUser, User, UserUpdate};

const USER_COLUMNS: &str = r#"
    id, uuid, gender, age_group, climate_zone, chronic_conditions,
    fitness_level, language, registration_status, registration_source,
    created_at, updated_at
"#;

impl Database {
    /// Register a new user.
    ///
    /// Fails with [`DbError::Constraint`] if the UUID is already taken.
    pub fn insert_user(&self, new_user: &NewUser) -> DbResult<User> {
        let uuid = new_user
            .uuid
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        if self.get_user_by_uuid(&uuid)?.is_some() {
            return Err(DbError::Constraint(format!(
                "User with this UUID already exists: {}",
                uuid
            )));
        }

        let now = now_timestamp();
        self.conn.execute(
            r#"
            INSERT INTO users (
                uuid, gender, age_group, climate_zone, chronic_conditions,
                fitness_level, language, registration_status, registration_source,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                uuid,
                new_user.gender,
                new_user.age_group,
                new_user.climate_zone,
                new_user.chronic_conditions,
                new_user.fitness_level,
                new_user.language,
                new_user.registration_status,
                new_user.registration_source,
                now,
                now,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        tracing::debug!(user_id = id, %uuid, "registered user");

        self.get_user(id)?
            .ok_or_else(|| DbError::NotFound(format!("user {}", id)))
    }

    /// Get a user by ID.
    pub fn get_user(&self, id: i64) -> DbResult<Option<User>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS),
                [id],
                user_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Get a user by UUID.
    pub fn get_user_by_uuid(&self, uuid: &str) -> DbResult<Option<User>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM users WHERE uuid = ?", USER_COLUMNS),
                [uuid],
                user_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all users.
    pub fn list_users(&self) -> DbResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS))?;

        let rows = stmt.query_map([], user_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Apply a partial update to a user.
    ///
    /// Returns the updated user, or `None` if no such user exists. An empty
    /// update writes nothing and leaves `updated_at` as it was.
    pub fn update_user(&self, id: i64, update: &UserUpdate) -> DbResult<Option<User>> {
        let Some(mut user) = self.get_user(id)? else {
            return Ok(None);
        };

        if !user.apply(update) {
            return Ok(Some(user));
        }
        user.updated_at = now_timestamp();

        self.conn.execute(
            r#"
            UPDATE users SET
                gender = ?2,
                age_group = ?3,
                climate_zone = ?4,
                chronic_conditions = ?5,
                fitness_level = ?6,
                language = ?7,
                registration_status = ?8,
                registration_source = ?9,
                updated_at = ?10
            WHERE id = ?1
            "#,
            params![
                user.id,
                user.gender,
                user.age_group,
                user.climate_zone,
                user.chronic_conditions,
                user.fitness_level,
                user.language,
                user.registration_status,
                user.registration_source,
                user.updated_at,
            ],
        )?;

        Ok(Some(user))
    }

    /// Delete a user together with all of their metric samples.
    ///
    /// Runs in a single transaction.
    pub fn delete_user(&mut self, id: i64) -> DbResult<bool> {
        let tx = self.transaction()?;

        let exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)",
            [id],
            |row| row.get(0),
        )?;
        if !exists {
            return Ok(false);
        }

        let blood = tx.execute("DELETE FROM blood_tests WHERE user_id = ?", [id])?;
        let sleep = tx.execute("DELETE FROM sleep_activity WHERE user_id = ?", [id])?;
        let activity = tx.execute("DELETE FROM physical_activity WHERE user_id = ?", [id])?;
        tx.execute("DELETE FROM users WHERE id = ?", [id])?;
        tx.commit()?;

        tracing::debug!(
            user_id = id,
            blood_tests = blood,
            sleep_samples = sleep,
            activity_samples = activity,
            "deleted user"
        );
        Ok(true)
    }

    /// Fail with [`DbError::Constraint`] unless the user exists.
    pub(crate) fn ensure_user_exists(&self, id: i64) -> DbResult<()> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)",
            [id],
            |row| row.get(0),
        )?;
        if exists {
            Ok(())
        } else {
            Err(DbError::Constraint(format!("User does not exist: {}", id)))
        }
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        uuid: row.get(1)?,
        gender: row.get(2)?,
        age_group: row.get(3)?,
        climate_zone: row.get(4)?,
        chronic_conditions: row.get(5)?,
        fitness_level: row.get(6)?,
        language: row.get(7)?,
        registration_status: row.get(8)?,
        registration_source: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}
