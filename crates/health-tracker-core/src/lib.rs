//! Health Tracker Core Library
//!
//! Per-user health metrics with a peer-group health score.
//!
//! # Architecture
//!
//! ```text
//!        get_health_score(user_id)
//!                    │
//!            ┌───────▼────────┐
//!            │   find user    │──── not found ──▶ NotFound
//!            └───────┬────────┘
//!                    │
//!   ┌────────────────▼─────────────────┐
//!   │          Cohort Selection        │
//!   │  climate_zone ∧ chronic_cond. ∧  │
//!   │    age_group ∧ fitness_level     │
//!   └────────────────┬─────────────────┘
//!                    │
//!        ┌───────────┴───────────┐
//!        ▼                       ▼
//!   Cohort averages         User averages
//!  (steps, sleep, glucose: one query each)
//!        └───────────┬───────────┘
//!                    ▼
//!           Score normalization
//!      30 activity + 40 sleep + 30 glucose
//!                    │
//!                    ▼
//!           HealthScoreReport
//! ```
//!
//! # Core Principle
//!
//! **Scores are snapshots.** Every request recomputes the cohort and its
//! averages from current data; nothing is cached.
//!
//! # Modules
//!
//! - [`db`]: SQLite record store (users, activity, sleep, blood tests)
//! - [`models`]: Domain types (User, metric samples, HealthScoreReport)
//! - [`score`]: Cohort selection, aggregation, and score normalization
//! - [`config`]: Environment-driven configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod db;
pub mod models;
pub mod score;
pub mod telemetry;

// Re-export commonly used types
pub use config::TrackerConfig;
pub use db::Database;
pub use models::{
    BloodTest, CohortFilter, HealthScoreReport, Metric, MetricAverages, NewBloodTest,
    NewPhysicalActivity, NewSleepActivity, NewUser, PhysicalActivity, SleepActivity, User,
    UserGroup, UserUpdate,
};
pub use score::{HealthScorer, RecordStore, ScoreError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use models::{BloodTestUpdate, PhysicalActivityUpdate, SleepActivityUpdate};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum HealthTrackerError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),
}

impl From<db::DbError> for HealthTrackerError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::NotFound(what) => HealthTrackerError::NotFound(what),
            db::DbError::Constraint(msg) => HealthTrackerError::InvalidInput(msg),
            other => HealthTrackerError::DatabaseError(other.to_string()),
        }
    }
}

impl From<score::ScoreError> for HealthTrackerError {
    fn from(e: score::ScoreError) -> Self {
        match e {
            score::ScoreError::UserNotFound(id) => {
                HealthTrackerError::NotFound(format!("user {}", id))
            }
            score::ScoreError::Storage(db_error) => {
                tracing::error!(error = %db_error, "health score computation failed");
                HealthTrackerError::DatabaseError(db_error.to_string())
            }
        }
    }
}

impl From<serde_json::Error> for HealthTrackerError {
    fn from(e: serde_json::Error) -> Self {
        HealthTrackerError::SerializationError(e.to_string())
    }
}

impl From<telemetry::TelemetryError> for HealthTrackerError {
    fn from(e: telemetry::TelemetryError) -> Self {
        HealthTrackerError::LoggingError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for HealthTrackerError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        HealthTrackerError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<HealthTrackerCore>, HealthTrackerError> {
    let db = Database::open(&path)?;
    Ok(Arc::new(HealthTrackerCore {
        db: Arc::new(Mutex::new(db)),
    }))
}

/// Open or create the database named by `HEALTH_TRACKER_DB_PATH`.
#[uniffi::export]
pub fn open_database_from_env() -> Result<Arc<HealthTrackerCore>, HealthTrackerError> {
    let config = TrackerConfig::from_env();
    let db = Database::open(&config.database_path)?;
    Ok(Arc::new(HealthTrackerCore {
        db: Arc::new(Mutex::new(db)),
    }))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<HealthTrackerCore>, HealthTrackerError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(HealthTrackerCore {
        db: Arc::new(Mutex::new(db)),
    }))
}

/// Install console (and optional file) logging from environment configuration.
///
/// Returns `false` if logging was already initialized.
#[uniffi::export]
pub fn init_logging() -> Result<bool, HealthTrackerError> {
    Ok(telemetry::init_tracing(&TrackerConfig::from_env())?)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe database wrapper for FFI.
#[derive(uniffi::Object)]
pub struct HealthTrackerCore {
    db: Arc<Mutex<Database>>,
}

#[uniffi::export]
impl HealthTrackerCore {
    // =========================================================================
    // User Operations
    // =========================================================================

    /// Register a new user.
    pub fn create_user(&self, user: FfiNewUser) -> Result<FfiUser, HealthTrackerError> {
        let db = self.db.lock()?;
        let created = db.insert_user(&user.into())?;
        Ok(created.into())
    }

    /// Get a user by ID.
    pub fn get_user(&self, user_id: i64) -> Result<Option<FfiUser>, HealthTrackerError> {
        let db = self.db.lock()?;
        Ok(db.get_user(user_id)?.map(Into::into))
    }

    /// Get a user by UUID.
    pub fn get_user_by_uuid(&self, uuid: String) -> Result<Option<FfiUser>, HealthTrackerError> {
        let db = self.db.lock()?;
        Ok(db.get_user_by_uuid(&uuid)?.map(Into::into))
    }

    /// List all users.
    pub fn list_users(&self) -> Result<Vec<FfiUser>, HealthTrackerError> {
        let db = self.db.lock()?;
        Ok(db.list_users()?.into_iter().map(Into::into).collect())
    }

    /// Update a user's attributes. Unset fields are left unchanged.
    pub fn update_user(
        &self,
        user_id: i64,
        update: FfiUserUpdate,
    ) -> Result<Option<FfiUser>, HealthTrackerError> {
        let db = self.db.lock()?;
        Ok(db.update_user(user_id, &update.into())?.map(Into::into))
    }

    /// Delete a user and all of their samples.
    pub fn delete_user(&self, user_id: i64) -> Result<bool, HealthTrackerError> {
        let mut db = self.db.lock()?;
        Ok(db.delete_user(user_id)?)
    }

    // =========================================================================
    // Physical Activity Operations
    // =========================================================================

    /// Record a physical activity sample.
    pub fn record_physical_activity(
        &self,
        user_id: i64,
        sample: FfiNewPhysicalActivity,
    ) -> Result<FfiPhysicalActivity, HealthTrackerError> {
        let db = self.db.lock()?;
        Ok(db.insert_physical_activity(user_id, &sample.into())?.into())
    }

    pub fn get_physical_activity(
        &self,
        user_id: i64,
        activity_id: i64,
    ) -> Result<Option<FfiPhysicalActivity>, HealthTrackerError> {
        let db = self.db.lock()?;
        Ok(db.get_physical_activity(user_id, activity_id)?.map(Into::into))
    }

    pub fn list_physical_activities(
        &self,
        user_id: i64,
    ) -> Result<Vec<FfiPhysicalActivity>, HealthTrackerError> {
        let db = self.db.lock()?;
        Ok(db
            .list_physical_activities(user_id)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    pub fn update_physical_activity(
        &self,
        user_id: i64,
        activity_id: i64,
        update: FfiPhysicalActivityUpdate,
    ) -> Result<Option<FfiPhysicalActivity>, HealthTrackerError> {
        let db = self.db.lock()?;
        Ok(db
            .update_physical_activity(user_id, activity_id, &update.into())?
            .map(Into::into))
    }

    pub fn delete_physical_activity(
        &self,
        user_id: i64,
        activity_id: i64,
    ) -> Result<bool, HealthTrackerError> {
        let db = self.db.lock()?;
        Ok(db.delete_physical_activity(user_id, activity_id)?)
    }

    // =========================================================================
    // Sleep Operations
    // =========================================================================

    /// Record a sleep sample.
    pub fn record_sleep_activity(
        &self,
        user_id: i64,
        sample: FfiNewSleepActivity,
    ) -> Result<FfiSleepActivity, HealthTrackerError> {
        let db = self.db.lock()?;
        Ok(db.insert_sleep_activity(user_id, &sample.into())?.into())
    }

    pub fn get_sleep_activity(
        &self,
        user_id: i64,
        sleep_id: i64,
    ) -> Result<Option<FfiSleepActivity>, HealthTrackerError> {
        let db = self.db.lock()?;
        Ok(db.get_sleep_activity(user_id, sleep_id)?.map(Into::into))
    }

    pub fn list_sleep_activities(
        &self,
        user_id: i64,
    ) -> Result<Vec<FfiSleepActivity>, HealthTrackerError> {
        let db = self.db.lock()?;
        Ok(db
            .list_sleep_activities(user_id)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    pub fn update_sleep_activity(
        &self,
        user_id: i64,
        sleep_id: i64,
        update: FfiSleepActivityUpdate,
    ) -> Result<Option<FfiSleepActivity>, HealthTrackerError> {
        let db = self.db.lock()?;
        Ok(db
            .update_sleep_activity(user_id, sleep_id, &update.into())?
            .map(Into::into))
    }

    pub fn delete_sleep_activity(
        &self,
        user_id: i64,
        sleep_id: i64,
    ) -> Result<bool, HealthTrackerError> {
        let db = self.db.lock()?;
        Ok(db.delete_sleep_activity(user_id, sleep_id)?)
    }

    // =========================================================================
    // Blood Test Operations
    // =========================================================================

    /// Record a blood test result.
    pub fn record_blood_test(
        &self,
        user_id: i64,
        sample: FfiNewBloodTest,
    ) -> Result<FfiBloodTest, HealthTrackerError> {
        let db = self.db.lock()?;
        Ok(db.insert_blood_test(user_id, &sample.into())?.into())
    }

    pub fn get_blood_test(
        &self,
        user_id: i64,
        blood_test_id: i64,
    ) -> Result<Option<FfiBloodTest>, HealthTrackerError> {
        let db = self.db.lock()?;
        Ok(db.get_blood_test(user_id, blood_test_id)?.map(Into::into))
    }

    pub fn list_blood_tests(&self, user_id: i64) -> Result<Vec<FfiBloodTest>, HealthTrackerError> {
        let db = self.db.lock()?;
        Ok(db
            .list_blood_tests(user_id)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    pub fn update_blood_test(
        &self,
        user_id: i64,
        blood_test_id: i64,
        update: FfiBloodTestUpdate,
    ) -> Result<Option<FfiBloodTest>, HealthTrackerError> {
        let db = self.db.lock()?;
        Ok(db
            .update_blood_test(user_id, blood_test_id, &update.into())?
            .map(Into::into))
    }

    pub fn delete_blood_test(
        &self,
        user_id: i64,
        blood_test_id: i64,
    ) -> Result<bool, HealthTrackerError> {
        let db = self.db.lock()?;
        Ok(db.delete_blood_test(user_id, blood_test_id)?)
    }

    // =========================================================================
    // Health Score Operations
    // =========================================================================

    /// Compute the user's health score against their peer cohort.
    pub fn get_health_score(
        &self,
        user_id: i64,
    ) -> Result<FfiHealthScoreReport, HealthTrackerError> {
        let db = self.db.lock()?;
        let report = HealthScorer::new(&*db).get_health_score(user_id)?;
        Ok(report.into())
    }

    /// Compute the user's health score as a JSON document.
    pub fn get_health_score_json(&self, user_id: i64) -> Result<String, HealthTrackerError> {
        let db = self.db.lock()?;
        let report = HealthScorer::new(&*db).get_health_score(user_id)?;
        Ok(report.to_json()?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe user.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiUser {
    pub id: i64,
    pub uuid: String,
    pub gender: String,
    pub age_group: String,
    pub climate_zone: String,
    pub chronic_conditions: String,
    pub fitness_level: String,
    pub language: String,
    pub registration_status: String,
    pub registration_source: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for FfiUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            uuid: user.uuid,
            gender: user.gender,
            age_group: user.age_group,
            climate_zone: user.climate_zone,
            chronic_conditions: user.chronic_conditions,
            fitness_level: user.fitness_level,
            language: user.language,
            registration_status: user.registration_status,
            registration_source: user.registration_source,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// FFI-safe registration request.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewUser {
    pub gender: String,
    pub age_group: String,
    pub climate_zone: String,
    pub chronic_conditions: String,
    pub fitness_level: String,
    pub language: String,
    pub registration_status: String,
    pub registration_source: String,
    pub uuid: Option<String>,
}

impl From<FfiNewUser> for NewUser {
    fn from(user: FfiNewUser) -> Self {
        NewUser {
            gender: user.gender,
            age_group: user.age_group,
            climate_zone: user.climate_zone,
            chronic_conditions: user.chronic_conditions,
            fitness_level: user.fitness_level,
            language: user.language,
            registration_status: user.registration_status,
            registration_source: user.registration_source,
            uuid: user.uuid,
        }
    }
}

/// FFI-safe partial user update.
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiUserUpdate {
    pub gender: Option<String>,
    pub age_group: Option<String>,
    pub climate_zone: Option<String>,
    pub chronic_conditions: Option<String>,
    pub fitness_level: Option<String>,
    pub language: Option<String>,
    pub registration_status: Option<String>,
    pub registration_source: Option<String>,
}

impl From<FfiUserUpdate> for UserUpdate {
    fn from(update: FfiUserUpdate) -> Self {
        UserUpdate {
            gender: update.gender,
            age_group: update.age_group,
            climate_zone: update.climate_zone,
            chronic_conditions: update.chronic_conditions,
            fitness_level: update.fitness_level,
            language: update.language,
            registration_status: update.registration_status,
            registration_source: update.registration_source,
        }
    }
}

/// FFI-safe physical activity sample.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPhysicalActivity {
    pub id: i64,
    pub user_id: i64,
    pub steps: i64,
    pub calories_burned: f64,
    pub active_minutes: i64,
    pub recorded_at: String,
}

impl From<PhysicalActivity> for FfiPhysicalActivity {
    fn from(activity: PhysicalActivity) -> Self {
        Self {
            id: activity.id,
            user_id: activity.user_id,
            steps: activity.steps,
            calories_burned: activity.calories_burned,
            active_minutes: activity.active_minutes,
            recorded_at: activity.recorded_at,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewPhysicalActivity {
    pub steps: i64,
    pub calories_burned: f64,
    pub active_minutes: i64,
    pub recorded_at: Option<String>,
}

impl From<FfiNewPhysicalActivity> for NewPhysicalActivity {
    fn from(sample: FfiNewPhysicalActivity) -> Self {
        NewPhysicalActivity {
            steps: sample.steps,
            calories_burned: sample.calories_burned,
            active_minutes: sample.active_minutes,
            recorded_at: sample.recorded_at,
        }
    }
}

#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiPhysicalActivityUpdate {
    pub steps: Option<i64>,
    pub calories_burned: Option<f64>,
    pub active_minutes: Option<i64>,
    pub recorded_at: Option<String>,
}

impl From<FfiPhysicalActivityUpdate> for PhysicalActivityUpdate {
    fn from(update: FfiPhysicalActivityUpdate) -> Self {
        PhysicalActivityUpdate {
            steps: update.steps,
            calories_burned: update.calories_burned,
            active_minutes: update.active_minutes,
            recorded_at: update.recorded_at,
        }
    }
}

/// FFI-safe sleep sample.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSleepActivity {
    pub id: i64,
    pub user_id: i64,
    pub sleep_duration: f64,
    pub sleep_quality: i64,
    pub recorded_at: String,
}

impl From<SleepActivity> for FfiSleepActivity {
    fn from(sleep: SleepActivity) -> Self {
        Self {
            id: sleep.id,
            user_id: sleep.user_id,
            sleep_duration: sleep.sleep_duration,
            sleep_quality: sleep.sleep_quality,
            recorded_at: sleep.recorded_at,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewSleepActivity {
    pub sleep_duration: f64,
    pub sleep_quality: i64,
    pub recorded_at: Option<String>,
}

impl From<FfiNewSleepActivity> for NewSleepActivity {
    fn from(sample: FfiNewSleepActivity) -> Self {
        NewSleepActivity {
            sleep_duration: sample.sleep_duration,
            sleep_quality: sample.sleep_quality,
            recorded_at: sample.recorded_at,
        }
    }
}

#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiSleepActivityUpdate {
    pub sleep_duration: Option<f64>,
    pub sleep_quality: Option<i64>,
    pub recorded_at: Option<String>,
}

impl From<FfiSleepActivityUpdate> for SleepActivityUpdate {
    fn from(update: FfiSleepActivityUpdate) -> Self {
        SleepActivityUpdate {
            sleep_duration: update.sleep_duration,
            sleep_quality: update.sleep_quality,
            recorded_at: update.recorded_at,
        }
    }
}

/// FFI-safe blood test.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBloodTest {
    pub id: i64,
    pub user_id: i64,
    pub glucose_level: f64,
    pub cholesterol_level: f64,
    pub recorded_at: String,
}

impl From<BloodTest> for FfiBloodTest {
    fn from(test: BloodTest) -> Self {
        Self {
            id: test.id,
            user_id: test.user_id,
            glucose_level: test.glucose_level,
            cholesterol_level: test.cholesterol_level,
            recorded_at: test.recorded_at,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewBloodTest {
    pub glucose_level: f64,
    pub cholesterol_level: f64,
    pub recorded_at: Option<String>,
}

impl From<FfiNewBloodTest> for NewBloodTest {
    fn from(sample: FfiNewBloodTest) -> Self {
        NewBloodTest {
            glucose_level: sample.glucose_level,
            cholesterol_level: sample.cholesterol_level,
            recorded_at: sample.recorded_at,
        }
    }
}

#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiBloodTestUpdate {
    pub glucose_level: Option<f64>,
    pub cholesterol_level: Option<f64>,
    pub recorded_at: Option<String>,
}

impl From<FfiBloodTestUpdate> for BloodTestUpdate {
    fn from(update: FfiBloodTestUpdate) -> Self {
        BloodTestUpdate {
            glucose_level: update.glucose_level,
            cholesterol_level: update.cholesterol_level,
            recorded_at: update.recorded_at,
        }
    }
}

/// FFI-safe metric averages.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMetricAverages {
    pub steps: f64,
    pub sleep: f64,
    pub glucose: f64,
}

impl From<MetricAverages> for FfiMetricAverages {
    fn from(averages: MetricAverages) -> Self {
        Self {
            steps: averages.steps,
            sleep: averages.sleep,
            glucose: averages.glucose,
        }
    }
}

/// FFI-safe cohort description.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiUserGroup {
    pub group_size: u64,
    pub age_group: String,
    pub fitness_level: String,
    pub climate_zone: String,
    pub chronic_conditions: String,
}

impl From<UserGroup> for FfiUserGroup {
    fn from(group: UserGroup) -> Self {
        Self {
            group_size: group.group_size,
            age_group: group.age_group,
            fitness_level: group.fitness_level,
            climate_zone: group.climate_zone,
            chronic_conditions: group.chronic_conditions,
        }
    }
}

/// FFI-safe health score report.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiHealthScoreReport {
    pub user_id: i64,
    pub health_score: f64,
    pub user_data: FfiMetricAverages,
    pub group_averages: FfiMetricAverages,
    pub user_group: FfiUserGroup,
    pub elapsed_micros: u64,
}

impl From<HealthScoreReport> for FfiHealthScoreReport {
    fn from(report: HealthScoreReport) -> Self {
        Self {
            user_id: report.user_id,
            health_score: report.health_score,
            user_data: report.user_data.into(),
            group_averages: report.group_averages.into(),
            user_group: report.user_group.into(),
            elapsed_micros: report.elapsed_micros,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(fitness_level: &str) -> FfiNewUser {
        FfiNewUser {
            gender: "female".into(),
            age_group: "40-50".into(),
            climate_zone: "Arctic".into(),
            chronic_conditions: "yes".into(),
            fitness_level: fitness_level.into(),
            language: "ru".into(),
            registration_status: "pending".into(),
            registration_source: "App".into(),
            uuid: None,
        }
    }

    #[test]
    fn test_core_round_trip() {
        let core = open_database_in_memory().unwrap();
        let user = core.create_user(new_user("beginner")).unwrap();

        core.record_physical_activity(
            user.id,
            FfiNewPhysicalActivity {
                steps: 4000,
                calories_burned: 180.0,
                active_minutes: 25,
                recorded_at: None,
            },
        )
        .unwrap();

        let report = core.get_health_score(user.id).unwrap();
        assert_eq!(report.user_id, user.id);
        assert_eq!(report.user_group.group_size, 1);
        assert_eq!(report.user_data.steps, 4000.0);
        assert!(report.health_score > 0.0);

        let json = core.get_health_score_json(user.id).unwrap();
        assert!(json.contains("\"health_score\""));
    }

    #[test]
    fn test_not_found_errors() {
        let core = open_database_in_memory().unwrap();

        let result = core.get_health_score(77);
        assert!(matches!(result, Err(HealthTrackerError::NotFound(_))));

        let result = core.record_blood_test(
            77,
            FfiNewBloodTest {
                glucose_level: 90.0,
                cholesterol_level: 170.0,
                recorded_at: None,
            },
        );
        assert!(matches!(result, Err(HealthTrackerError::InvalidInput(_))));
    }

    #[test]
    fn test_duplicate_uuid_is_invalid_input() {
        let core = open_database_in_memory().unwrap();
        let mut request = new_user("beginner");
        request.uuid = Some("5f0c2a8e-1b9d-4c3f-8e7a-6d5b4c3a2f10".into());

        core.create_user(request.clone()).unwrap();
        let result = core.create_user(request);
        assert!(matches!(result, Err(HealthTrackerError::InvalidInput(_))));
    }

    #[test]
    fn test_update_and_delete_user() {
        let core = open_database_in_memory().unwrap();
        let user = core.create_user(new_user("beginner")).unwrap();

        let updated = core
            .update_user(
                user.id,
                FfiUserUpdate {
                    fitness_level: Some("intermediate".into()),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.fitness_level, "intermediate");

        assert!(core.delete_user(user.id).unwrap());
        assert!(core.get_user(user.id).unwrap().is_none());
        assert!(core.list_users().unwrap().is_empty());
    }
}
