use pretty_assertions::assert_eq;
use serde_json::json;
use speculoos::prelude::*;

use detroit_anomaly::constants::LEADERBOARD_LIMIT;
use detroit_anomaly::leaderboard::{
    coerce_time, format_time, sanitize_tag, top_scores, RawScoreRow, ScoreRow,
};

fn raw(tag: &str, time: serde_json::Value) -> RawScoreRow {
    serde_json::from_value(json!({
        "Tag": tag,
        "Name": "Operative",
        "USN": "1MS22AI000",
        "Time": time,
    }))
    .unwrap()
}

#[test]
fn test_coerce_time_accepts_numbers_and_numeric_strings() {
    assert_eq!(coerce_time(&json!(12.5)), Some(12.5));
    assert_eq!(coerce_time(&json!(7)), Some(7.0));
    assert_eq!(coerce_time(&json!("19.25")), Some(19.25));
    assert_eq!(coerce_time(&json!("  3.5 ")), Some(3.5));
}

#[test]
fn test_coerce_time_rejects_non_numeric_values() {
    assert_eq!(coerce_time(&json!("DNF")), None);
    assert_eq!(coerce_time(&json!("")), None);
    assert_eq!(coerce_time(&json!(null)), None);
    assert_eq!(coerce_time(&json!({"nested": 1})), None);
}

#[test]
fn test_top_scores_sorts_ascending_and_truncates() {
    let rows: Vec<RawScoreRow> = (0..15)
        .map(|i| raw("AAA", json!(100.0 - i as f64)))
        .collect();
    let board = top_scores(rows);

    assert_that!(board).has_length(LEADERBOARD_LIMIT);
    assert_that!(board[0].time).is_equal_to(86.0);
    for pair in board.windows(2) {
        assert!(pair[0].time <= pair[1].time);
    }
}

#[test]
fn test_top_scores_drops_rows_with_unusable_times() {
    let rows = vec![
        raw("AAA", json!(20.0)),
        raw("BAD", json!("not a number")),
        raw("BBB", json!("10.5")),
        raw("NEG", json!(-3.0)),
        raw("NUL", json!(null)),
    ];
    let board = top_scores(rows);

    let tags: Vec<&str> = board.iter().map(|row| row.tag.as_str()).collect();
    assert_eq!(tags, vec!["BBB", "AAA"]);
    assert_eq!(board[0].time, 10.5);
}

#[test]
fn test_format_time_uses_two_decimals() {
    assert_eq!(format_time(12.0), "12.00");
    assert_eq!(format_time(7.125), "7.13");
    assert_eq!(format_time(0.0), "0.00");
}

#[test]
fn test_sanitize_tag_uppercases_and_truncates() {
    assert_eq!(sanitize_tag("abc"), "ABC");
    assert_eq!(sanitize_tag("abcdef"), "ABC");
    assert_eq!(sanitize_tag("a-1!"), "A1");
    assert_eq!(sanitize_tag(""), "");
}

#[test]
fn test_score_row_serializes_with_sheet_column_names() {
    let row = ScoreRow {
        tag: "ZED".to_string(),
        name: "Test Name".to_string(),
        usn: "1MS22AI042".to_string(),
        time: 44.5,
    };
    let value = serde_json::to_value(&row).unwrap();
    assert_eq!(
        value,
        json!({"Tag": "ZED", "Name": "Test Name", "USN": "1MS22AI042", "Time": 44.5})
    );
}
