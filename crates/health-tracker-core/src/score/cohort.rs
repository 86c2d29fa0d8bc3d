//! Peer cohort selection.

use std::collections::BTreeSet;

use tracing::debug;

use super::{RecordStore, ScoreResult};
use crate::models::User;

/// Distinct IDs of the users sharing a target user's grouping attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cohort {
    members: Vec<i64>,
}

impl Cohort {
    /// Member IDs, ascending.
    pub fn member_ids(&self) -> &[i64] {
        &self.members
    }

    /// Number of distinct members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, user_id: i64) -> bool {
        self.members.binary_search(&user_id).is_ok()
    }
}

/// Select every user matching `user` on climate zone, chronic conditions,
/// age group, and fitness level.
///
/// The target user is always a member, so a lone user forms a cohort of one.
pub fn select_cohort<S: RecordStore + ?Sized>(store: &S, user: &User) -> ScoreResult<Cohort> {
    let mut members: BTreeSet<i64> = store
        .find_user_ids(&user.cohort_filter())?
        .into_iter()
        .collect();
    members.insert(user.id);

    debug!(user_id = user.id, group_size = members.len(), "selected cohort");

    Ok(Cohort {
        members: members.into_iter().collect(),
    })
}
