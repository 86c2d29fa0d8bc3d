//! Timestamped metric samples owned by a user.

use serde::{Deserialize, Serialize};

/// A physical activity sample.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhysicalActivity {
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Step count
    pub steps: i64,
    /// Calories burned (kcal)
    pub calories_burned: f64,
    /// Minutes of activity
    pub active_minutes: i64,
    /// When the sample was taken
    pub recorded_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewPhysicalActivity {
    pub steps: i64,
    pub calories_burned: f64,
    pub active_minutes: i64,
    /// Defaults to the insertion time
    pub recorded_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PhysicalActivityUpdate {
    pub steps: Option<i64>,
    pub calories_burned: Option<f64>,
    pub active_minutes: Option<i64>,
    pub recorded_at: Option<String>,
}

impl PhysicalActivity {
    /// Apply a partial update, leaving unset fields untouched.
    pub fn apply(&mut self, update: &PhysicalActivityUpdate) {
        if let Some(steps) = update.steps {
            self.steps = steps;
        }
        if let Some(calories) = update.calories_burned {
            self.calories_burned = calories;
        }
        if let Some(minutes) = update.active_minutes {
            self.active_minutes = minutes;
        }
        if let Some(recorded_at) = &update.recorded_at {
            self.recorded_at.clone_from(recorded_at);
        }
    }
}

/// A sleep sample.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SleepActivity {
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Sleep duration in hours
    pub sleep_duration: f64,
    /// Subjective sleep quality score
    pub sleep_quality: i64,
    /// When the sample was taken
    pub recorded_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewSleepActivity {
    pub sleep_duration: f64,
    pub sleep_quality: i64,
    /// Defaults to the insertion time
    pub recorded_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SleepActivityUpdate {
    pub sleep_duration: Option<f64>,
    pub sleep_quality: Option<i64>,
    pub recorded_at: Option<String>,
}

impl SleepActivity {
    /// Apply a partial update, leaving unset fields untouched.
    pub fn apply(&mut self, update: &SleepActivityUpdate) {
        if let Some(duration) = update.sleep_duration {
            self.sleep_duration = duration;
        }
        if let Some(quality) = update.sleep_quality {
            self.sleep_quality = quality;
        }
        if let Some(recorded_at) = &update.recorded_at {
            self.recorded_at.clone_from(recorded_at);
        }
    }
}

/// A blood test result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BloodTest {
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Blood glucose (mg/dL)
    pub glucose_level: f64,
    /// Total cholesterol (mg/dL)
    pub cholesterol_level: f64,
    /// When the sample was taken
    pub recorded_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewBloodTest {
    pub glucose_level: f64,
    pub cholesterol_level: f64,
    /// Defaults to the insertion time
    pub recorded_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BloodTestUpdate {
    pub glucose_level: Option<f64>,
    pub cholesterol_level: Option<f64>,
    pub recorded_at: Option<String>,
}

impl BloodTest {
    /// Apply a partial update, leaving unset fields untouched.
    pub fn apply(&mut self, update: &BloodTestUpdate) {
        if let Some(glucose) = update.glucose_level {
            self.glucose_level = glucose;
        }
        if let Some(cholesterol) = update.cholesterol_level {
            self.cholesterol_level = cholesterol;
        }
        if let Some(recorded_at) = &update.recorded_at {
            self.recorded_at.clone_from(recorded_at);
        }
    }
}

/// A numeric metric that can be averaged across users.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// `physical_activity.steps`
    Steps,
    /// `sleep_activity.sleep_duration`
    SleepDuration,
    /// `blood_tests.glucose_level`
    GlucoseLevel,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Steps, Metric::SleepDuration, Metric::GlucoseLevel];

    /// Table holding the samples for this metric.
    pub fn table(self) -> &'static str {
        match self {
            Metric::Steps => "physical_activity",
            Metric::SleepDuration => "sleep_activity",
            Metric::GlucoseLevel => "blood_tests",
        }
    }

    /// Column averaged for this metric.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Steps => "steps",
            Metric::SleepDuration => "sleep_duration",
            Metric::GlucoseLevel => "glucose_level",
        }
    }

    /// Average reported when there are no samples.
    ///
    /// Glucose falls back to a neutral 100 mg/dL so the inverted glucose
    /// ratio stays well-defined.
    pub fn default_average(self) -> f64 {
        match self {
            Metric::Steps => 0.0,
            Metric::SleepDuration => 0.0,
            Metric::GlucoseLevel => 100.0,
        }
    }
}
