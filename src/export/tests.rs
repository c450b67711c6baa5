//! Tests for export module

use super::*;
use crate::config::{ExportConfig, SqlConfig, StructuredConfig};
use crate::dataset::{GeneratedDataset, Record, Value};
use crate::output::MemorySink;
use crate::schema::MAX_SAFE_INTEGER;
use crate::types::{ExportFormat, IdentifierCase};
use crate::Error;
use pretty_assertions::assert_eq;
use serde_json::json;

fn users() -> GeneratedDataset {
    GeneratedDataset::new(
        "users",
        vec![
            Record::new()
                .with("id", 1)
                .with("active", true)
                .with("bio", Value::Null),
            Record::new()
                .with("id", 2)
                .with("active", false)
                .with("bio", "hi"),
        ],
    )
}

fn no_header() -> SqlConfig {
    SqlConfig {
        header_comment: false,
        ..SqlConfig::default()
    }
}

// ============================================================================
// SQL Export Tests
// ============================================================================

#[test]
fn test_sql_users_example() {
    let export = export_sql(&users(), &SqlConfig::default()).unwrap();

    assert_eq!(
        export.file.text(),
        "-- Dataset: users\n\
         -- Rows: 2\n\
         -- Columns: id integer, active boolean, bio text\n\
         INSERT INTO users (id, active, bio) VALUES\n\
         (1, TRUE, NULL),\n\
         (2, FALSE, 'hi');\n"
    );
    assert_eq!(export.file.filename, "users.sql");
    assert_eq!(export.file.mime_type, "application/sql");
    assert_eq!(export.report.rows, 2);
    assert!(!export.report.is_degraded());
}

#[test]
fn test_sql_without_header() {
    let export = export_sql(&users(), &no_header()).unwrap();
    assert_eq!(
        export.file.text(),
        "INSERT INTO users (id, active, bio) VALUES\n(1, TRUE, NULL),\n(2, FALSE, 'hi');\n"
    );
}

#[test]
fn test_sql_empty_dataset_has_no_insert() {
    let dataset = GeneratedDataset::new("empty", vec![]);

    let export = export_sql(&dataset, &SqlConfig::default()).unwrap();
    let text = export.file.text();
    assert!(!text.contains("INSERT"));
    assert!(text.lines().all(|line| line.starts_with("--")));
    assert_eq!(export.report.rows, 0);

    let export = export_sql(&dataset, &no_header()).unwrap();
    assert_eq!(export.file.text(), "-- No rows to insert\n");
}

#[test]
fn test_sql_extra_key_is_dropped_and_counted() {
    let dataset = GeneratedDataset::new(
        "people",
        vec![
            Record::new().with("id", 1).with("name", "Ann"),
            Record::new()
                .with("id", 2)
                .with("name", "Bob")
                .with("nickname", "bobby"),
        ],
    );

    let export = export_sql(&dataset, &no_header()).unwrap();
    let text = export.file.text();

    assert!(text.contains("INSERT INTO people (id, name) VALUES"));
    assert!(text.contains("(2, 'Bob')"));
    assert!(!text.contains("bobby"));
    assert!(!text.contains("nickname"));
    assert_eq!(export.report.degraded_rows, 1);
    assert!(export.report.dropped_columns.contains("nickname"));
}

#[test]
fn test_sql_missing_key_becomes_null() {
    let dataset = GeneratedDataset::new(
        "people",
        vec![
            Record::new().with("id", 1).with("name", "Ann").with("age", 30),
            Record::new().with("age", 41).with("id", 2),
        ],
    );

    let export = export_sql(&dataset, &no_header()).unwrap();

    // Reference column order is kept even when a record lists keys differently
    assert!(export.file.text().contains("(2, NULL, 41)"));
    assert_eq!(export.report.degraded_rows, 1);
    assert_eq!(export.report.missing_values, 1);
    assert!(export.report.dropped_columns.is_empty());
}

#[test]
fn test_sql_case_duplicate_columns_is_schema_error() {
    let dataset = GeneratedDataset::new(
        "dupes",
        vec![Record::new().with("id", 1).with("ID", 2)],
    );

    let err = export_sql(&dataset, &SqlConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Schema { .. }));
    assert!(err.to_string().contains("'id' and 'ID'"));
}

#[test]
fn test_sql_case_sensitive_keeps_both_columns() {
    let dataset = GeneratedDataset::new(
        "dupes",
        vec![Record::new().with("id", 1).with("ID", 2)],
    );
    let config = SqlConfig {
        identifier_case: IdentifierCase::Sensitive,
        ..no_header()
    };

    let export = export_sql(&dataset, &config).unwrap();
    assert!(export.file.text().contains("(id, ID) VALUES\n(1, 2);"));
}

#[test]
fn test_sql_quotes_unsafe_identifiers() {
    let dataset = GeneratedDataset::new(
        "order items",
        vec![Record::new().with("1st", "a").with("unit price", 2.5)],
    );

    let export = export_sql(&dataset, &no_header()).unwrap();
    assert_eq!(
        export.file.text(),
        "INSERT INTO \"order items\" (\"1st\", \"unit price\") VALUES\n('a', 2.5);\n"
    );
    assert_eq!(export.file.filename, "order items.sql");
}

#[test]
fn test_sql_quotes_reserved_words() {
    let dataset = GeneratedDataset::new(
        "order",
        vec![Record::new().with("select", 1).with("from", "x").with("total", 2)],
    );

    let export = export_sql(&dataset, &no_header()).unwrap();
    assert_eq!(
        export.file.text(),
        "INSERT INTO \"order\" (\"select\", \"from\", total) VALUES\n(1, 'x', 2);\n"
    );
}

#[test]
fn test_sql_value_kind_dispatch_per_value() {
    let dataset = GeneratedDataset::new(
        "codes",
        vec![
            Record::new().with("code", 7),
            Record::new().with("code", "007"),
            Record::new().with("code", Value::Null),
        ],
    );

    let export = export_sql(&dataset, &no_header()).unwrap();
    let text = export.file.text();

    assert!(text.contains("(7),\n('007'),\n(NULL);"));
    assert_eq!(export.report.kind_mismatches, 1);
    assert!(!export.report.is_degraded());
}

#[test]
fn test_sql_whole_float_in_float_column_is_not_a_mismatch() {
    let dataset = GeneratedDataset::new(
        "prices",
        vec![
            Record::new().with("amount", 1.5),
            Record::new().with("amount", 2.0),
            Record::new().with("amount", 3),
        ],
    );

    let export = export_sql(&dataset, &no_header()).unwrap();
    assert!(export.file.text().contains("(1.5),\n(2),\n(3);"));
    assert_eq!(export.report.kind_mismatches, 0);

    // The reverse still counts: a fractional value in an integer column
    let dataset = GeneratedDataset::new(
        "prices",
        vec![Record::new().with("amount", 2), Record::new().with("amount", 2.5)],
    );
    let export = export_sql(&dataset, &no_header()).unwrap();
    assert_eq!(export.report.kind_mismatches, 1);
}

#[test]
fn test_sql_escapes_quotes_and_composites() {
    let dataset = GeneratedDataset::new(
        "authors",
        vec![Record::new()
            .with("name", "O'Brien")
            .with("meta", Value::Composite(json!({"quote": "it's"})))],
    );

    let export = export_sql(&dataset, &no_header()).unwrap();
    assert!(export
        .file
        .text()
        .contains(r#"('O''Brien', '{"quote":"it''s"}')"#));
}

#[test]
fn test_sql_non_finite_float_is_null() {
    let dataset = GeneratedDataset::new(
        "metrics",
        vec![Record::new().with("value", f64::NAN)],
    );

    let export = export_sql(&dataset, &no_header()).unwrap();
    assert!(export.file.text().contains("(NULL);"));
}

#[test]
fn test_sql_batch_size_splits_statements() {
    let data = (1..=5).map(|i| Record::new().with("n", i)).collect();
    let dataset = GeneratedDataset::new("numbers", data);
    let config = SqlConfig {
        batch_size: Some(2),
        ..no_header()
    };

    let export = export_sql(&dataset, &config).unwrap();
    let text = export.file.text();

    assert_eq!(text.matches("INSERT INTO numbers (n) VALUES").count(), 3);
    assert_eq!(text.matches(';').count(), 3);
    assert!(text.contains("(1),\n(2);\n\nINSERT"));
    assert!(text.ends_with("(5);\n"));
    assert_eq!(export.report.rows, 5);
}

#[test]
fn test_sql_batch_size_one_is_single_row_inserts() {
    let config = SqlConfig {
        batch_size: Some(1),
        ..no_header()
    };

    let export = export_sql(&users(), &config).unwrap();
    assert_eq!(
        export.file.text(),
        "INSERT INTO users (id, active, bio) VALUES\n(1, TRUE, NULL);\n\n\
         INSERT INTO users (id, active, bio) VALUES\n(2, FALSE, 'hi');\n"
    );
}

#[test]
fn test_sql_first_record_without_columns() {
    let dataset = GeneratedDataset::new("blank", vec![Record::new()]);
    let err = export_sql(&dataset, &SqlConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn test_sql_control_character_column_rejected() {
    let dataset = GeneratedDataset::new("t", vec![Record::new().with("a\nb", 1)]);
    let err = export_sql(&dataset, &SqlConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

// ============================================================================
// Structured Export Tests
// ============================================================================

#[test]
fn test_structured_users_pretty() {
    let export = export_structured(&users(), &StructuredConfig::default()).unwrap();

    assert_eq!(
        export.file.text(),
        r#"[
  {
    "id": 1,
    "active": true,
    "bio": null
  },
  {
    "id": 2,
    "active": false,
    "bio": "hi"
  }
]
"#
    );
    assert_eq!(export.file.filename, "users.json");
    assert_eq!(export.file.mime_type, "application/json");
    assert_eq!(export.report.rows, 2);
}

#[test]
fn test_structured_compact() {
    let config = StructuredConfig {
        pretty: false,
        ..StructuredConfig::default()
    };
    let export = export_structured(&users(), &config).unwrap();
    assert_eq!(
        export.file.text(),
        "[{\"id\":1,\"active\":true,\"bio\":null},{\"id\":2,\"active\":false,\"bio\":\"hi\"}]\n"
    );
}

#[test]
fn test_structured_round_trip() {
    let dataset = GeneratedDataset::new(
        "mixed",
        vec![
            Record::new()
                .with("id", MAX_SAFE_INTEGER)
                .with("ratio", 0.1)
                .with("whole", 3.0)
                .with("text", "quote \" backslash \\ newline \n tab \t é 🎉")
                .with("nested", Value::Composite(json!({"z": [1, null, {"y": false}], "a": 2.5})))
                .with("nothing", Value::Null),
            Record::new()
                .with("id", -4)
                .with("ratio", -1234.5678)
                .with("flag", true),
        ],
    );

    let export = export_structured(&dataset, &StructuredConfig::default()).unwrap();
    let decoded: Vec<Record> = serde_json::from_slice(&export.file.bytes).unwrap();

    assert_eq!(decoded, dataset.data);
}

#[test]
fn test_structured_empty_dataset() {
    let dataset = GeneratedDataset::new("empty", vec![]);
    let export = export_structured(&dataset, &StructuredConfig::default()).unwrap();
    assert_eq!(export.file.text(), "[]\n");
}

#[test]
fn test_structured_non_finite_fails_with_location() {
    let dataset = GeneratedDataset::new(
        "metrics",
        vec![
            Record::new().with("name", "a").with("score", 1.5),
            Record::new().with("name", "b").with("score", f64::INFINITY),
        ],
    );

    let err = export_structured(&dataset, &StructuredConfig::default()).unwrap_err();
    match err {
        Error::Serialization { column, row, .. } => {
            assert_eq!(column, "score");
            assert_eq!(row, 1);
        }
        other => panic!("Expected serialization error, got {other:?}"),
    }
}

#[test]
fn test_structured_strict_safe_integers() {
    let dataset = GeneratedDataset::new(
        "big",
        vec![Record::new().with("n", MAX_SAFE_INTEGER + 1)],
    );

    assert!(export_structured(&dataset, &StructuredConfig::default()).is_ok());

    let strict = StructuredConfig {
        strict_safe_integers: true,
        ..StructuredConfig::default()
    };
    let err = export_structured(&dataset, &strict).unwrap_err();
    assert!(matches!(err, Error::Serialization { row: 0, .. }));
}

// ============================================================================
// Shared Behaviour Tests
// ============================================================================

#[test]
fn test_empty_name_rejected_by_both_exporters() {
    for name in ["", "   "] {
        let dataset = GeneratedDataset::new(name, vec![Record::new().with("a", 1)]);
        assert!(matches!(
            export_sql(&dataset, &SqlConfig::default()),
            Err(Error::Validation { .. })
        ));
        assert!(matches!(
            export_structured(&dataset, &StructuredConfig::default()),
            Err(Error::Validation { .. })
        ));
    }
}

#[test]
fn test_exports_are_deterministic() {
    let dataset = users();
    let config = ExportConfig::default();

    for format in [ExportFormat::Json, ExportFormat::Sql] {
        let first = render(&dataset, format, &config).unwrap();
        let second = render(&dataset, format, &config).unwrap();
        assert_eq!(first.file.bytes, second.file.bytes);
    }
}

#[test]
fn test_export_does_not_mutate_input() {
    let dataset = users();
    let before = dataset.clone();
    render(&dataset, ExportFormat::Sql, &ExportConfig::default()).unwrap();
    render(&dataset, ExportFormat::Json, &ExportConfig::default()).unwrap();
    assert_eq!(dataset, before);
}

#[test]
fn test_sanitize_filename() {
    assert_eq!(sanitize_filename("users"), "users");
    assert_eq!(sanitize_filename("a/b\\c"), "abc");
    assert_eq!(sanitize_filename("../etc/passwd"), "etcpasswd");
    assert_eq!(sanitize_filename("  spaced  "), "spaced");
    assert_eq!(sanitize_filename("\n\t"), "dataset");
    assert_eq!(sanitize_filename("//"), "dataset");
}

// ============================================================================
// Export Service Tests
// ============================================================================

#[tokio::test]
async fn test_service_saves_through_sink() {
    let service = ExportService::new(MemorySink::new(), ExportConfig::default());

    let saved = service.export(&users(), ExportFormat::Sql).await.unwrap();

    assert_eq!(saved.location, "memory://users.sql");
    assert_eq!(saved.filename, "users.sql");
    assert_eq!(saved.report.rows, 2);
    let file = service.sink().get("users.sql").unwrap();
    assert!(file.text().contains("(2, FALSE, 'hi');"));
}

#[tokio::test]
async fn test_service_saves_nothing_on_failure() {
    let service = ExportService::new(MemorySink::new(), ExportConfig::default());
    let dataset = GeneratedDataset::new("bad", vec![Record::new().with("x", f64::NAN)]);

    assert!(service.export(&dataset, ExportFormat::Json).await.is_err());
    assert!(service.sink().files().is_empty());
}

#[tokio::test]
async fn test_service_export_all_isolates_failures() {
    let service = ExportService::new(MemorySink::new(), ExportConfig::default());
    let datasets = vec![
        GeneratedDataset::new("bad", vec![Record::new().with("x", f64::NAN)]),
        users(),
    ];

    let results = service
        .export_all(&datasets, &[ExportFormat::Json, ExportFormat::Sql])
        .await;

    assert_eq!(results.len(), 4);
    assert!(results[0].is_err());
    assert!(results[1].is_ok());
    assert!(results[2].is_ok());
    assert!(results[3].is_ok());

    let names: Vec<String> = service
        .sink()
        .files()
        .into_iter()
        .map(|file| file.filename)
        .collect();
    assert_eq!(names, vec!["bad.sql", "users.json", "users.sql"]);
}
