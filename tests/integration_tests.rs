//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: generation endpoint → datasets → JSON/SQL
//! files in a destination directory

use serde_json::json;
use shapegen_export::generate::{GenerationClient, GenerationRequest};
use shapegen_export::{
    load_datasets, load_datasets_from_str, CloudDestination, ExportConfig, ExportFormat,
    ExportService, Record,
};
use tempfile::tempdir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn generated_body() -> serde_json::Value {
    json!([
        {
            "name": "users",
            "data": [
                {"id": 1, "name": "O'Brien", "score": 9.5, "tags": ["a", "b"], "bio": null},
                {"id": 2, "name": "Zoë", "score": 7.25, "tags": [], "bio": "hi"}
            ]
        },
        {
            "name": "orders",
            "data": [
                {"order_id": 10, "user_id": 1, "paid": true},
                {"order_id": 11, "user_id": 2, "paid": false, "coupon": "SPRING"}
            ]
        }
    ])
}

// ============================================================================
// Generate → Export Integration Tests
// ============================================================================

#[tokio::test]
async fn test_generate_then_export_to_directory() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generateFakeData"))
        .and(body_partial_json(json!({"scale": 100, "numberMax": 150})))
        .respond_with(ResponseTemplate::new(200).set_body_json(generated_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client =
        GenerationClient::new(&format!("{}/api/generateFakeData", mock_server.uri())).unwrap();
    let request = GenerationRequest::new("users + orders")
        .scale(100)
        .number_max(150);
    let datasets = client.generate(&request).await.unwrap();
    assert_eq!(datasets.len(), 2);

    let temp_dir = tempdir().unwrap();
    let destination = CloudDestination::parse(temp_dir.path().to_str().unwrap()).unwrap();
    let service = ExportService::new(destination, ExportConfig::default());

    let results = service
        .export_all(&datasets, &[ExportFormat::Json, ExportFormat::Sql])
        .await;
    assert!(results.iter().all(Result::is_ok));

    for name in ["users.json", "users.sql", "orders.json", "orders.sql"] {
        assert!(temp_dir.path().join(name).is_file(), "missing {name}");
    }

    // JSON file re-decodes to the generated records
    let json_bytes = std::fs::read(temp_dir.path().join("users.json")).unwrap();
    let records: Vec<Record> = serde_json::from_slice(&json_bytes).unwrap();
    assert_eq!(records, datasets[0].data);

    // SQL file escapes quotes and keeps composites as text
    let sql = std::fs::read_to_string(temp_dir.path().join("users.sql")).unwrap();
    assert!(sql.contains("INSERT INTO users (id, name, score, tags, bio) VALUES"));
    assert!(sql.contains(r#"(1, 'O''Brien', 9.5, '["a","b"]', NULL)"#));
    assert!(sql.contains("(2, 'Zoë', 7.25, '[]', 'hi');"));

    // Extra key in orders is dropped and reported
    let orders_sql = results
        .iter()
        .flatten()
        .find(|saved| saved.filename == "orders.sql")
        .unwrap();
    assert_eq!(orders_sql.report.degraded_rows, 1);
    assert!(orders_sql.report.dropped_columns.contains("coupon"));
}

#[tokio::test]
async fn test_generation_failure_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("SyntaxError: Unexpected token"))
        .mount(&mock_server)
        .await;

    let client = GenerationClient::new(&mock_server.uri()).unwrap();
    let err = client
        .generate(&GenerationRequest::new("not a script"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("HTTP 400"));
    assert!(!err.is_export_rejection());
}

// ============================================================================
// File → Export Integration Tests
// ============================================================================

#[tokio::test]
async fn test_export_from_dataset_file() {
    let temp_dir = tempdir().unwrap();
    let input = temp_dir.path().join("datasets.json");
    std::fs::write(&input, generated_body().to_string()).unwrap();

    let datasets = load_datasets(&input).unwrap();
    let out_dir = temp_dir.path().join("out");
    let destination = CloudDestination::parse(out_dir.to_str().unwrap()).unwrap();

    let config = ExportConfig::from_yaml_str(
        "structured:\n  pretty: false\nsql:\n  header_comment: false\n  batch_size: 1\n",
    )
    .unwrap();
    let service = ExportService::new(destination, config);

    let saved = service.export(&datasets[1], ExportFormat::Sql).await.unwrap();
    assert_eq!(saved.filename, "orders.sql");

    let sql = std::fs::read_to_string(out_dir.join("orders.sql")).unwrap();
    assert_eq!(
        sql,
        "INSERT INTO orders (order_id, user_id, paid) VALUES\n(10, 1, TRUE);\n\n\
         INSERT INTO orders (order_id, user_id, paid) VALUES\n(11, 2, FALSE);\n"
    );

    service.export(&datasets[1], ExportFormat::Json).await.unwrap();
    let json = std::fs::read_to_string(out_dir.join("orders.json")).unwrap();
    assert_eq!(
        json,
        "[{\"order_id\":10,\"user_id\":1,\"paid\":true},\
         {\"order_id\":11,\"user_id\":2,\"paid\":false,\"coupon\":\"SPRING\"}]\n"
    );
}

#[tokio::test]
async fn test_single_dataset_object_and_failure_isolation() {
    let datasets = load_datasets_from_str(
        r#"{"name": "bad", "data": [{"id": 1, "ID": 2}]}"#,
    )
    .unwrap();
    assert_eq!(datasets.len(), 1);

    let temp_dir = tempdir().unwrap();
    let destination = CloudDestination::parse(temp_dir.path().to_str().unwrap()).unwrap();
    let service = ExportService::new(destination, ExportConfig::default());

    let results = service
        .export_all(&datasets, &[ExportFormat::Sql, ExportFormat::Json])
        .await;

    // Colliding column names only stop the SQL export
    assert!(results[0].as_ref().is_err_and(shapegen_export::Error::is_export_rejection));
    assert!(results[1].is_ok());
    assert!(!temp_dir.path().join("bad.sql").exists());
    assert!(temp_dir.path().join("bad.json").is_file());
}
