use caltrack_core::db::open_db_in_memory;
use caltrack_core::{
    import_foods, DailyLogRepository, EntryDate, FoodLibraryRepository, ImportedFood, NewFood,
    RepoError, SqliteDailyLogRepository, SqliteFoodLibraryRepository,
};
use rusqlite::Connection;

fn row(name: &str, calories: i64) -> ImportedFood {
    ImportedFood {
        food_name: name.to_string(),
        calories,
        protein_g: Some(5.0),
        carbs_g: Some(20.0),
        fat_g: Some(2.0),
    }
}

#[test]
fn import_inserts_rows_and_reports_counts() {
    let mut conn = open_db_in_memory().unwrap();

    let rows = vec![row("Dal", 180), row("Naan", 260), row("Paneer", 320)];
    let outcome = import_foods(&mut conn, 1, &rows).unwrap();
    assert_eq!(outcome.inserted, 3);
    assert_eq!(outcome.skipped, 0);

    let library = SqliteFoodLibraryRepository::try_new(&conn).unwrap();
    for expected in &rows {
        let item = library
            .get(1, &expected.food_name)
            .unwrap()
            .expect("imported food should exist");
        assert_eq!(item.calories, expected.calories);
    }
}

#[test]
fn import_skips_already_defined_names() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let library = SqliteFoodLibraryRepository::try_new(&conn).unwrap();
        library
            .define(&NewFood::new(1, "Dal", 180, 9.0, 28.0, 4.0))
            .unwrap();
    }

    let outcome = import_foods(&mut conn, 1, &[row("Dal", 999), row("Naan", 260)]).unwrap();
    assert_eq!(outcome.inserted, 1);
    assert_eq!(outcome.skipped, 1);

    // First definition stays authoritative.
    let library = SqliteFoodLibraryRepository::try_new(&conn).unwrap();
    assert_eq!(library.get(1, "Dal").unwrap().unwrap().calories, 180);
}

#[test]
fn import_skips_duplicates_within_one_batch() {
    let mut conn = open_db_in_memory().unwrap();

    let outcome = import_foods(&mut conn, 1, &[row("Dal", 180), row("Dal", 200)]).unwrap();
    assert_eq!(outcome.inserted, 1);
    assert_eq!(outcome.skipped, 1);
}

#[test]
fn import_with_absent_macros_reads_back_as_zero() {
    let mut conn = open_db_in_memory().unwrap();

    let sparse = ImportedFood {
        food_name: "Black Coffee".to_string(),
        calories: 2,
        protein_g: None,
        carbs_g: None,
        fat_g: None,
    };
    import_foods(&mut conn, 1, &[sparse]).unwrap();

    let library = SqliteFoodLibraryRepository::try_new(&conn).unwrap();
    let item = library.get(1, "Black Coffee").unwrap().unwrap();
    assert_eq!(item.protein_g, 0.0);
    assert_eq!(item.fat_g, 0.0);
}

#[test]
fn imported_foods_are_usable_by_logging_workflows() {
    let mut conn = open_db_in_memory().unwrap();
    import_foods(&mut conn, 1, &[row("Dal", 180)]).unwrap();

    let repo = SqliteDailyLogRepository::try_new(&mut conn).unwrap();
    let day: EntryDate = "2024-01-01".parse().unwrap();
    let entry = repo.log_from_library(1, "Dal", 2.0, &day).unwrap();
    assert_eq!(entry.nutrients.calories, 360.0);
    assert_eq!(entry.nutrients.protein_g, 10.0);
}

#[test]
fn import_rejects_uninitialized_connection() {
    let mut conn = Connection::open_in_memory().unwrap();

    let result = import_foods(&mut conn, 1, &[row("Dal", 180)]);
    assert!(matches!(
        result,
        Err(RepoError::UninitializedConnection { .. })
    ));
}
