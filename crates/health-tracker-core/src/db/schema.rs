//! SQLite schema definition.

/// Complete database schema for the health tracker.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Users
-- ============================================================================

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    uuid TEXT NOT NULL UNIQUE,
    gender TEXT NOT NULL DEFAULT '',
    age_group TEXT NOT NULL DEFAULT '',
    climate_zone TEXT NOT NULL DEFAULT '',
    chronic_conditions TEXT NOT NULL DEFAULT '',
    fitness_level TEXT NOT NULL DEFAULT '',
    language TEXT NOT NULL DEFAULT '',
    registration_status TEXT NOT NULL DEFAULT '',
    registration_source TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

-- Cohort lookups match all four grouping attributes
CREATE INDEX IF NOT EXISTS idx_users_cohort
    ON users(climate_zone, age_group, fitness_level, chronic_conditions);

-- ============================================================================
-- Metric Samples (many per user)
-- ============================================================================

CREATE TABLE IF NOT EXISTS physical_activity (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    steps INTEGER NOT NULL,
    calories_burned REAL NOT NULL,
    active_minutes INTEGER NOT NULL,
    recorded_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_physical_activity_user_time
    ON physical_activity(user_id, recorded_at);

CREATE TABLE IF NOT EXISTS sleep_activity (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    sleep_duration REAL NOT NULL,
    sleep_quality INTEGER NOT NULL,
    recorded_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_sleep_activity_user_time
    ON sleep_activity(user_id, recorded_at);

CREATE TABLE IF NOT EXISTS blood_tests (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    glucose_level REAL NOT NULL,
    cholesterol_level REAL NOT NULL,
    recorded_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_blood_tests_user_time
    ON blood_tests(user_id, recorded_at);
"#;
