//! End-to-end health score tests against a real SQLite store.

use health_tracker_core::db::Database;
use health_tracker_core::models::{
    HealthScoreReport, NewBloodTest, NewPhysicalActivity, NewSleepActivity, NewUser, User,
    UserUpdate,
};
use health_tracker_core::{HealthScorer, ScoreError};

fn new_user(climate_zone: &str, chronic: &str, age_group: &str, fitness: &str) -> NewUser {
    NewUser {
        gender: "female".to_string(),
        age_group: age_group.to_string(),
        climate_zone: climate_zone.to_string(),
        chronic_conditions: chronic.to_string(),
        fitness_level: fitness.to_string(),
        language: "en".to_string(),
        registration_status: "completed".to_string(),
        registration_source: "App".to_string(),
        uuid: None,
    }
}

fn temperate_runner(db: &Database) -> User {
    db.insert_user(&new_user("Temperate", "no", "30-40", "intermediate"))
        .unwrap()
}

fn add_steps(db: &Database, user_id: i64, steps: i64) {
    db.insert_physical_activity(
        user_id,
        &NewPhysicalActivity {
            steps,
            calories_burned: steps as f64 * 0.04,
            active_minutes: steps / 100,
            recorded_at: None,
        },
    )
    .unwrap();
}

fn add_sleep(db: &Database, user_id: i64, hours: f64) {
    db.insert_sleep_activity(
        user_id,
        &NewSleepActivity {
            sleep_duration: hours,
            sleep_quality: 3,
            recorded_at: None,
        },
    )
    .unwrap();
}

fn add_glucose(db: &Database, user_id: i64, glucose: f64) {
    db.insert_blood_test(
        user_id,
        &NewBloodTest {
            glucose_level: glucose,
            cholesterol_level: 190.0,
            recorded_at: None,
        },
    )
    .unwrap();
}

fn score(db: &Database, user_id: i64) -> HealthScoreReport {
    HealthScorer::new(db).get_health_score(user_id).unwrap()
}

#[test]
fn test_default_values_score_zero() {
    let db = Database::open_in_memory().unwrap();
    let user = temperate_runner(&db);
    add_steps(&db, user.id, 0);
    add_sleep(&db, user.id, 0.0);

    let report = score(&db, user.id);
    assert_eq!(report.user_data.steps, 0.0);
    assert_eq!(report.user_data.sleep, 0.0);
    assert_eq!(report.user_data.glucose, 100.0);
    assert_eq!(report.health_score, 0.0);
}

#[test]
fn test_matching_peers() {
    let db = Database::open_in_memory().unwrap();
    let user = temperate_runner(&db);
    let peer = temperate_runner(&db);

    for id in [user.id, peer.id] {
        add_steps(&db, id, 5000);
        add_sleep(&db, id, 7.0);
        add_glucose(&db, id, 90.0);
    }

    let report = score(&db, user.id);
    assert_eq!(report.user_group.group_size, 2);
    assert_eq!(report.group_averages.steps, 5000.0);
    assert_eq!(report.group_averages.sleep, 7.0);
    assert_eq!(report.group_averages.glucose, 90.0);

    // 29.9 (capped) + 7/8*40 + 29.9 (capped)
    assert_eq!(report.health_score, 94.8);
}

#[test]
fn test_lone_user_compares_against_self() {
    let db = Database::open_in_memory().unwrap();
    let user = temperate_runner(&db);
    db.insert_user(&new_user("Arid", "no", "30-40", "intermediate"))
        .unwrap();

    add_steps(&db, user.id, 6000);
    add_sleep(&db, user.id, 6.0);
    add_glucose(&db, user.id, 110.0);

    let report = score(&db, user.id);
    assert_eq!(report.user_group.group_size, 1);
    assert_eq!(report.group_averages, report.user_data);

    // 29.9 (capped) + 6/7*40 + 100/111*30
    assert_eq!(report.health_score, 91.21);
}

#[test]
fn test_unknown_user() {
    let db = Database::open_in_memory().unwrap();
    temperate_runner(&db);

    let result = HealthScorer::new(&db).get_health_score(9999);
    assert!(matches!(result, Err(ScoreError::UserNotFound(9999))));
}

#[test]
fn test_other_cohorts_do_not_affect_score() {
    let db = Database::open_in_memory().unwrap();
    let user = temperate_runner(&db);
    add_steps(&db, user.id, 4000);
    add_sleep(&db, user.id, 6.5);
    add_glucose(&db, user.id, 98.0);

    let before = score(&db, user.id);

    // Differ on exactly one attribute each
    let outsiders = [
        new_user("Tropical", "no", "30-40", "intermediate"),
        new_user("Temperate", "yes", "30-40", "intermediate"),
        new_user("Temperate", "no", "40-50", "intermediate"),
        new_user("Temperate", "no", "30-40", "advanced"),
    ];
    for outsider in &outsiders {
        let other = db.insert_user(outsider).unwrap();
        add_steps(&db, other.id, 25000);
        add_sleep(&db, other.id, 10.0);
        add_glucose(&db, other.id, 70.0);
    }

    let after = score(&db, user.id);
    assert_eq!(after.user_group.group_size, 1);
    assert_eq!(after.group_averages, before.group_averages);
    assert_eq!(after.health_score, before.health_score);
}

#[test]
fn test_repeated_requests_match() {
    let db = Database::open_in_memory().unwrap();
    let user = temperate_runner(&db);
    let peer = temperate_runner(&db);
    add_steps(&db, user.id, 7300);
    add_steps(&db, peer.id, 9100);
    add_sleep(&db, peer.id, 7.5);
    add_glucose(&db, user.id, 104.0);

    let first = score(&db, user.id);
    let second = score(&db, user.id);

    assert_eq!(first.health_score, second.health_score);
    assert_eq!(first.user_data, second.user_data);
    assert_eq!(first.group_averages, second.group_averages);
    assert_eq!(first.user_group, second.user_group);
}

#[test]
fn test_cohort_average_only_counts_members_with_samples() {
    let db = Database::open_in_memory().unwrap();
    let user = temperate_runner(&db);
    let peer = temperate_runner(&db);

    add_steps(&db, peer.id, 4000);
    add_sleep(&db, user.id, 8.0);

    let report = score(&db, user.id);
    assert_eq!(report.user_group.group_size, 2);
    // The user has no activity rows: own default 0, cohort mean from the peer only
    assert_eq!(report.user_data.steps, 0.0);
    assert_eq!(report.group_averages.steps, 4000.0);
    assert_eq!(report.group_averages.sleep, 8.0);
    // Nobody has blood tests
    assert_eq!(report.group_averages.glucose, 100.0);
}

#[test]
fn test_cohort_average_is_weighted_by_samples() {
    let db = Database::open_in_memory().unwrap();
    let user = temperate_runner(&db);
    let peer = temperate_runner(&db);

    for steps in [1000, 2000, 6000] {
        add_steps(&db, user.id, steps);
    }
    add_steps(&db, peer.id, 7000);

    let report = score(&db, user.id);
    assert_eq!(report.user_data.steps, 3000.0);
    // (1000 + 2000 + 6000 + 7000) / 4 rows
    assert_eq!(report.group_averages.steps, 4000.0);
}

#[test]
fn test_attribute_change_moves_user_between_cohorts() {
    let db = Database::open_in_memory().unwrap();
    let user = temperate_runner(&db);
    let peer = temperate_runner(&db);
    add_steps(&db, peer.id, 12000);

    assert_eq!(score(&db, user.id).user_group.group_size, 2);

    db.update_user(
        user.id,
        &UserUpdate {
            fitness_level: Some("advanced".to_string()),
            ..Default::default()
        },
    )
    .unwrap()
    .unwrap();

    let report = score(&db, user.id);
    assert_eq!(report.user_group.group_size, 1);
    assert_eq!(report.user_group.fitness_level, "advanced");
    assert_eq!(report.group_averages.steps, 0.0);
}

#[test]
fn test_deleted_peer_leaves_cohort() {
    let mut db = Database::open_in_memory().unwrap();
    let user = temperate_runner(&db);
    let peer = temperate_runner(&db);
    add_steps(&db, user.id, 3000);
    add_steps(&db, peer.id, 9000);

    assert_eq!(score(&db, user.id).group_averages.steps, 6000.0);

    assert!(db.delete_user(peer.id).unwrap());

    let report = score(&db, user.id);
    assert_eq!(report.user_group.group_size, 1);
    assert_eq!(report.group_averages.steps, 3000.0);
}

#[test]
fn test_seeded_population() {
    let db = Database::open_in_memory().unwrap();
    let climates = ["Arctic", "Temperate", "Tropical", "Arid"];
    let fitness = ["very low", "beginner", "intermediate", "advanced"];

    let mut users = Vec::new();
    for i in 0..64i64 {
        let user = db
            .insert_user(&new_user(
                climates[(i % 4) as usize],
                if i % 3 == 0 { "yes" } else { "no" },
                "20-30",
                fitness[((i / 4) % 4) as usize],
            ))
            .unwrap();

        for day in 0..5i64 {
            add_steps(&db, user.id, 2000 + (i * 137 + day * 911) % 12000);
            add_sleep(&db, user.id, 4.0 + ((i + day) % 9) as f64 * 0.5);
        }
        if i % 5 != 0 {
            add_glucose(&db, user.id, 70.0 + ((i * 13) % 90) as f64);
        }
        users.push(user);
    }

    for user in &users {
        let report = score(&db, user.id);
        let expected_size = users
            .iter()
            .filter(|other| other.cohort_filter() == user.cohort_filter())
            .count() as u64;

        assert_eq!(report.user_group.group_size, expected_size);
        assert!(report.user_group.group_size >= 1);
        assert!(report.health_score > 0.0);
        assert!(report.health_score <= 99.7);
    }
}

#[test]
fn test_score_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracker.db");

    let (user_id, original) = {
        let db = Database::open(&path).unwrap();
        let user = temperate_runner(&db);
        add_steps(&db, user.id, 8800);
        add_sleep(&db, user.id, 7.25);
        add_glucose(&db, user.id, 92.0);
        (user.id, score(&db, user.id))
    };

    let db = Database::open(&path).unwrap();
    let reopened = score(&db, user_id);
    assert_eq!(reopened.health_score, original.health_score);
    assert_eq!(reopened.user_data, original.user_data);
}
