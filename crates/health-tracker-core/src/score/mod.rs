//! Peer-group health scoring.
//!
//! Pipeline: Cohort Selection → Aggregation (cohort, then self) → Score → Report
//!
//! Every request recomputes from current data. Nothing is cached and the
//! store is only read.

mod aggregator;
mod calculator;
mod cohort;
mod report;

pub use aggregator::*;
pub use calculator::*;
pub use cohort::*;
pub use report::*;

use std::time::Instant;

use thiserror::Error;
use tracing::info;

use crate::db::{Database, DbError, DbResult};
use crate::models::{CohortFilter, HealthScoreReport, Metric, User};

/// Health scoring errors.
#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Storage error: {0}")]
    Storage(#[from] DbError),
}

pub type ScoreResult<T> = Result<T, ScoreError>;

/// Read-only queries the scoring pipeline needs from storage.
pub trait RecordStore {
    /// Look up a user by ID.
    fn find_user(&self, id: i64) -> DbResult<Option<User>>;

    /// IDs of all users matching the filter exactly.
    fn find_user_ids(&self, filter: &CohortFilter) -> DbResult<Vec<i64>>;

    /// Mean of `metric` over the users' samples, `None` if there are none.
    fn average(&self, metric: Metric, user_ids: &[i64]) -> DbResult<Option<f64>>;
}

impl RecordStore for Database {
    fn find_user(&self, id: i64) -> DbResult<Option<User>> {
        self.get_user(id)
    }

    fn find_user_ids(&self, filter: &CohortFilter) -> DbResult<Vec<i64>> {
        Database::find_user_ids(self, filter)
    }

    fn average(&self, metric: Metric, user_ids: &[i64]) -> DbResult<Option<f64>> {
        self.average_metric(metric, user_ids)
    }
}

/// Coordinates the full scoring pipeline for one user.
pub struct HealthScorer<'a, S: ?Sized = Database> {
    store: &'a S,
}

impl<'a, S: RecordStore + ?Sized> HealthScorer<'a, S> {
    /// Create a new scorer over a record store.
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Compute the health score report for a user.
    pub fn get_health_score(&self, user_id: i64) -> ScoreResult<HealthScoreReport> {
        let started = Instant::now();

        let user = self
            .store
            .find_user(user_id)?
            .ok_or(ScoreError::UserNotFound(user_id))?;

        // Step 1: Find peers sharing all four grouping attributes
        let cohort = select_cohort(self.store, &user)?;

        // Step 2: Cohort averages, then the user's own
        let group_values = aggregate_metrics(self.store, cohort.member_ids())?;
        let user_values = aggregate_user_metrics(self.store, user.id)?;

        // Step 3: Normalize against the cohort
        let health_score = compute_score(&user_values, &group_values);

        info!(
            user_id,
            health_score,
            group_size = cohort.len(),
            "calculated health score"
        );

        Ok(build_report(
            &user,
            &user_values,
            &group_values,
            cohort.len(),
            health_score,
            started.elapsed(),
        ))
    }
}
