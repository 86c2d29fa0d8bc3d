//! User models.

use serde::{Deserialize, Serialize};

/// A registered user with the demographic attributes used for peer grouping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Store-assigned integer ID
    pub id: i64,
    /// Globally unique identifier, unique across all users
    pub uuid: String,
    /// Gender
    pub gender: String,
    /// Age bracket (e.g., "20-30")
    pub age_group: String,
    /// Climate zone of residence (e.g., "Temperate", "Tropical")
    pub climate_zone: String,
    /// Chronic conditions marker (e.g., "yes", "no")
    pub chronic_conditions: String,
    /// Self-reported fitness level (e.g., "advanced", "beginner")
    pub fitness_level: String,
    /// Preferred language code
    pub language: String,
    /// Registration status (e.g., "completed", "pending")
    pub registration_status: String,
    /// Where the user registered from (e.g., "Web", "App")
    pub registration_source: String,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl User {
    /// The four attributes that define this user's peer cohort.
    pub fn cohort_filter(&self) -> CohortFilter {
        CohortFilter {
            climate_zone: self.climate_zone.clone(),
            chronic_conditions: self.chronic_conditions.clone(),
            age_group: self.age_group.clone(),
            fitness_level: self.fitness_level.clone(),
        }
    }

    /// Apply a partial update, leaving unset fields untouched.
    ///
    /// Returns `true` if any field was provided.
    pub fn apply(&mut self, update: &UserUpdate) -> bool {
        let fields = [
            (&mut self.gender, &update.gender),
            (&mut self.age_group, &update.age_group),
            (&mut self.climate_zone, &update.climate_zone),
            (&mut self.chronic_conditions, &update.chronic_conditions),
            (&mut self.fitness_level, &update.fitness_level),
            (&mut self.language, &update.language),
            (&mut self.registration_status, &update.registration_status),
            (&mut self.registration_source, &update.registration_source),
        ];

        let mut changed = false;
        for (field, value) in fields {
            if let Some(value) = value {
                field.clone_from(value);
                changed = true;
            }
        }
        changed
    }
}

/// Fields supplied when registering a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewUser {
    pub gender: String,
    pub age_group: String,
    pub climate_zone: String,
    pub chronic_conditions: String,
    pub fitness_level: String,
    pub language: String,
    pub registration_status: String,
    pub registration_source: String,
    /// Caller-supplied UUID; a v4 UUID is generated when absent
    pub uuid: Option<String>,
}

/// Partial user update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserUpdate {
    pub gender: Option<String>,
    pub age_group: Option<String>,
    pub climate_zone: Option<String>,
    pub chronic_conditions: Option<String>,
    pub fitness_level: Option<String>,
    pub language: Option<String>,
    pub registration_status: Option<String>,
    pub registration_source: Option<String>,
}

/// Exact-match filter selecting a peer cohort.
///
/// All four attributes must match (AND semantics, string equality).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CohortFilter {
    pub climate_zone: String,
    pub chronic_conditions: String,
    pub age_group: String,
    pub fitness_level: String,
}
