//! Integration tests for the query crate.
//!
//! These tests compile request filters and evaluate the resulting query
//! against a small table, the way a store without server-side filtering
//! would be queried.

use data_loader::{RestaurantRecord, RestaurantTable};
use query::{compile, matches_all, FilterPipeline, RequestFilters, TimeOfDay, ValidationError};

fn create_test_table() -> RestaurantTable {
    vec![
        RestaurantRecord::new("italian", "Trattoria Roma", false, "09:00", "22:00"),
        RestaurantRecord::new("italian", "Verde", true, "11:00", "15:00"),
        RestaurantRecord::new("italian", "Late Night Slice", false, "22:00", "02:00"),
        RestaurantRecord::new("sushi", "Kaiten", false, "11:00", "23:00"),
    ]
    .into_iter()
    .collect()
}

fn run(table: &RestaurantTable, style: &str, vegetarian: Option<&str>, now: &str) -> Vec<String> {
    let filters = RequestFilters::new(
        Some(style.to_string()),
        vegetarian.map(String::from),
        now.parse::<TimeOfDay>().unwrap(),
    );
    let query = compile(&filters).unwrap();
    let candidates = table.get_partition(&query.key.value).to_vec();

    FilterPipeline::from_terms(&query.filters)
        .apply(candidates)
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect()
}

#[test]
fn test_open_window_is_lexical() {
    let table = create_test_table();

    assert_eq!(run(&table, "italian", Some("false"), "10:00"), vec!["Trattoria Roma"]);
    assert!(run(&table, "italian", Some("false"), "23:00").is_empty());
}

#[test]
fn test_overnight_window_never_matches() {
    let table = create_test_table();

    // 22:00-02:00 wraps midnight, which lexical comparison cannot express
    assert!(!run(&table, "italian", None, "23:30").contains(&"Late Night Slice".to_string()));
    assert!(!run(&table, "italian", None, "01:00").contains(&"Late Night Slice".to_string()));
}

#[test]
fn test_vegetarian_filter_and_order() {
    let table = create_test_table();

    assert_eq!(run(&table, "italian", None, "12:00"), vec!["Trattoria Roma", "Verde"]);
    assert_eq!(run(&table, "italian", Some("TRUE"), "12:00"), vec!["Verde"]);
}

#[test]
fn test_partition_isolation() {
    let table = create_test_table();

    assert_eq!(run(&table, "sushi", None, "12:00"), vec!["Kaiten"]);
    assert!(run(&table, "thai", None, "12:00").is_empty());
}

#[test]
fn test_matches_all_agrees_with_pipeline() {
    let table = create_test_table();
    let filters = RequestFilters::new(Some("italian".into()), Some("true".into()), "12:00".parse().unwrap());
    let query = compile(&filters).unwrap();

    let direct: Vec<&RestaurantRecord> = table
        .get_partition("italian")
        .iter()
        .filter(|r| matches_all(&query.filters, r))
        .collect();
    let piped = FilterPipeline::from_terms(&query.filters)
        .apply(table.get_partition("italian").to_vec())
        .unwrap();

    assert_eq!(direct.len(), piped.len());
    assert_eq!(direct[0], &piped[0]);
}

#[test]
fn test_validation_errors_name_parameter() {
    let now: TimeOfDay = "12:00".parse().unwrap();

    let err = compile(&RequestFilters::new(Some(String::new()), None, now.clone())).unwrap_err();
    assert!(matches!(err, ValidationError::MissingParameter(ref p) if p == "style"));
    assert!(err.to_string().contains("style"));

    let err = compile(&RequestFilters::new(Some("sushi".into()), Some("maybe".into()), now)).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidParameter(ref p) if p == "vegetarian"));
    assert!(err.to_string().contains("vegetarian"));
}
