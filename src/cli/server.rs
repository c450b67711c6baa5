//! HTTP server mode for REST API access to the exporters

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ExportConfig;
use crate::dataset::GeneratedDataset;
use crate::error::{Error, Result};
use crate::export::{render, ExportFile};
use crate::schema::infer_columns;
use crate::types::ExportFormat;

/// Bytes left unescaped in an RFC 5987 `ext-value` (`attr-char`)
const ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Configuration every export request is rendered with
    pub export: ExportConfig,
}

/// App state shared across handlers
#[derive(Clone)]
struct AppState {
    config: ServerConfig,
}

/// Response wrapper
#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn error(msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

/// Build the application router
pub fn router(config: ServerConfig) -> Router {
    let state = AppState { config };

    // Build CORS layer - allow all origins for development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([header::CONTENT_DISPOSITION]);

    Router::new()
        .route("/health", get(health))
        .route("/export/json", post(export_json))
        .route("/export/sql", post(export_sql))
        .route("/inspect", post(inspect))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Start the HTTP server
pub async fn serve(config: ServerConfig, port: u16) -> Result<()> {
    let app = router(config);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Export a dataset as a JSON document
async fn export_json(
    State(state): State<Arc<AppState>>,
    Json(dataset): Json<GeneratedDataset>,
) -> Response {
    export_response(&state, &dataset, ExportFormat::Json)
}

/// Export a dataset as SQL INSERT statements
async fn export_sql(
    State(state): State<Arc<AppState>>,
    Json(dataset): Json<GeneratedDataset>,
) -> Response {
    export_response(&state, &dataset, ExportFormat::Sql)
}

/// Infer the columns of a dataset
async fn inspect(Json(dataset): Json<GeneratedDataset>) -> Response {
    let columns = infer_columns(&dataset.data);
    (
        StatusCode::OK,
        Json(ApiResponse::success(json!({
            "type": "SCHEMA",
            "dataset": dataset.name,
            "rows": dataset.len(),
            "columns": columns
        }))),
    )
        .into_response()
}

fn export_response(state: &AppState, dataset: &GeneratedDataset, format: ExportFormat) -> Response {
    match render(dataset, format, &state.config.export) {
        Ok(export) => {
            let headers = file_headers(&export.file, export.report.degraded_rows);
            (StatusCode::OK, headers, export.file.bytes).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// Download headers for an export file
fn file_headers(file: &ExportFile, degraded_rows: usize) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(file.mime_type));

    let disposition = HeaderValue::from_str(&content_disposition(&file.filename))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
    headers.insert(header::CONTENT_DISPOSITION, disposition);

    headers.insert("x-degraded-rows", HeaderValue::from(degraded_rows));
    headers
}

/// `Content-Disposition` value for a download
///
/// Non-ASCII names get an ASCII `filename` fallback plus an RFC 5987 encoded
/// `filename*` parameter.
fn content_disposition(filename: &str) -> String {
    let quoted = |name: &str| name.replace('\\', "\\\\").replace('"', "\\\"");

    if filename.is_ascii() {
        return format!("attachment; filename=\"{}\"", quoted(filename));
    }

    let fallback: String = filename
        .chars()
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        quoted(&fallback),
        utf8_percent_encode(filename, ATTR_CHAR)
    )
}

fn error_response(error: &Error) -> Response {
    let status = if error.is_export_rejection() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(ApiResponse::<()>::error(error.to_string()))).into_response()
}
