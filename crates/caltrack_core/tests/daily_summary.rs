use caltrack_core::db::{open_db_in_memory, open_db_in_memory_with};
use caltrack_core::{
    summarize_day, DailyLogRepository, DefaultUser, EntryDate, FoodLibraryRepository, NewFood,
    Nutrients, SqliteDailyLogRepository, SqliteFoodLibraryRepository, SummaryError,
};

fn date(value: &str) -> EntryDate {
    value.parse().unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn empty_day_returns_zero_totals_and_zero_progress() {
    let conn = open_db_in_memory().unwrap();

    let summary = summarize_day(&conn, 1, &date("2024-01-01")).unwrap();
    assert_eq!(summary.total_calories, 0.0);
    assert_eq!(summary.total_protein_g, 0.0);
    assert_eq!(summary.total_carbs_g, 0.0);
    assert_eq!(summary.total_fat_g, 0.0);
    assert_eq!(summary.calorie_goal, 2000);
    assert_eq!(summary.progress_fraction, 0.0);
}

#[test]
fn rice_scenario_matches_expected_totals() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let library = SqliteFoodLibraryRepository::try_new(&conn).unwrap();
        library
            .define(&NewFood::new(1, "Rice", 200, 4.0, 45.0, 0.5))
            .unwrap();
    }
    {
        let repo = SqliteDailyLogRepository::try_new(&mut conn).unwrap();
        repo.log_from_library(1, "Rice", 2.0, &date("2024-01-01"))
            .unwrap();
    }

    let summary = summarize_day(&conn, 1, &date("2024-01-01")).unwrap();
    assert_close(summary.total_calories, 400.0);
    assert_close(summary.total_protein_g, 8.0);
    assert_close(summary.total_carbs_g, 90.0);
    assert_close(summary.total_fat_g, 1.0);
    assert_eq!(summary.calorie_goal, 2000);
    assert_close(summary.progress_fraction, 0.2);
}

#[test]
fn summary_equals_sum_of_listed_entries() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let library = SqliteFoodLibraryRepository::try_new(&conn).unwrap();
        library
            .define(&NewFood::new(1, "Rice", 200, 4.0, 45.0, 0.5))
            .unwrap();
    }

    let totals;
    {
        let mut repo = SqliteDailyLogRepository::try_new(&mut conn).unwrap();
        repo.log_from_library(1, "Rice", 1.5, &date("2024-01-01"))
            .unwrap();
        repo.log_new_food(
            &NewFood::new(1, "Apple", 95, 0.5, 25.0, 0.3),
            &date("2024-01-01"),
        )
        .unwrap();
        repo.log_from_library(1, "Rice", 0.25, &date("2024-01-01"))
            .unwrap();

        totals = repo
            .list_for_day(1, &date("2024-01-01"))
            .unwrap()
            .iter()
            .fold(Nutrients::default(), |acc, entry| acc.add(&entry.nutrients));
    }

    let summary = summarize_day(&conn, 1, &date("2024-01-01")).unwrap();
    assert_close(summary.total_calories, totals.calories);
    assert_close(summary.total_protein_g, totals.protein_g);
    assert_close(summary.total_carbs_g, totals.carbs_g);
    assert_close(summary.total_fat_g, totals.fat_g);
}

#[test]
fn summarize_is_read_only_and_repeatable() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let mut repo = SqliteDailyLogRepository::try_new(&mut conn).unwrap();
        repo.log_new_food(
            &NewFood::new(1, "Apple", 95, 0.5, 25.0, 0.3),
            &date("2024-01-01"),
        )
        .unwrap();
    }

    let first = summarize_day(&conn, 1, &date("2024-01-01")).unwrap();
    let second = summarize_day(&conn, 1, &date("2024-01-01")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn progress_fraction_is_unclamped_when_over_goal() {
    let seed = DefaultUser {
        user_id: 1,
        username: "default_user".to_string(),
        daily_calorie_goal: 1000,
    };
    let mut conn = open_db_in_memory_with(&seed).unwrap();
    {
        let mut repo = SqliteDailyLogRepository::try_new(&mut conn).unwrap();
        repo.log_new_food(
            &NewFood::new(1, "Feast", 1500, 40.0, 120.0, 80.0),
            &date("2024-01-01"),
        )
        .unwrap();
    }

    let summary = summarize_day(&conn, 1, &date("2024-01-01")).unwrap();
    assert_close(summary.progress_fraction, 1.5);
}

#[test]
fn missing_user_row_falls_back_to_default_goal() {
    let conn = open_db_in_memory().unwrap();

    let summary = summarize_day(&conn, 42, &date("2024-01-01")).unwrap();
    assert_eq!(summary.calorie_goal, 2000);
    assert_eq!(summary.progress_fraction, 0.0);
}

#[test]
fn zero_goal_reports_integrity_error_instead_of_dividing() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "UPDATE users SET daily_calorie_goal = 0 WHERE user_id = 1;",
        [],
    )
    .unwrap();

    let err = summarize_day(&conn, 1, &date("2024-01-01")).unwrap_err();
    assert!(matches!(
        err,
        SummaryError::InvalidGoal { user_id: 1, goal: 0 }
    ));
}

#[test]
fn summary_serializes_with_contract_field_names() {
    let conn = open_db_in_memory().unwrap();

    let summary = summarize_day(&conn, 1, &date("2024-01-01")).unwrap();
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["total_calories"], 0.0);
    assert_eq!(json["calorie_goal"], 2000);
    assert_eq!(json["progress_fraction"], 0.0);
}
