use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartError},
    http::{HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::{Datelike, Local};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use crate::archive::{Upload, process_batch};
use crate::calendar::parse_year;
use crate::config::ServiceConfig;
use crate::error::TimetableError;

const FILE_FIELD: &str = "file";
const YEAR_FIELD: &str = "year";

const INDEX_HTML: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>Timetable expander</title></head>
<body>
<h1>Timetable expander</h1>
<form method="post" action="/" enctype="multipart/form-data">
  <p><input type="file" name="file" accept=".xlsx,.csv" multiple required></p>
  <p><label>Year <input type="number" name="year" min="1" max="9999"></label></p>
  <p><button type="submit">Expand</button></p>
</form>
</body>
</html>
"#;

#[derive(Clone)]
pub struct AppState {
    config: Arc<ServiceConfig>,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    fn config(&self) -> Arc<ServiceConfig> {
        self.config.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    Invalid(String),
    Processing(TimetableError),
    Internal(String),
}

impl ApiError {
    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }
}

impl From<TimetableError> for ApiError {
    fn from(value: TimetableError) -> Self {
        ApiError::Processing(value)
    }
}

impl From<MultipartError> for ApiError {
    fn from(value: MultipartError) -> Self {
        ApiError::Invalid(value.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::Invalid(message) => (StatusCode::BAD_REQUEST, "invalid_request", message),
            ApiError::Processing(err) if err.is_client_error() => {
                (StatusCode::BAD_REQUEST, err.kind(), err.to_string())
            }
            ApiError::Processing(err) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", err.to_string())
            }
            ApiError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/", get(index).post(expand))
        .route("/expand", axum::routing::post(expand))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

pub async fn serve(config: ServiceConfig) -> std::io::Result<()> {
    let addr: SocketAddr = config.addr;
    let app = router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "timetable service listening");
    axum::serve(listener, app).await
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn expand(State(state): State<AppState>, multipart: Multipart) -> Result<Response, ApiError> {
    let config = state.config();
    let (uploads, year) = read_form(multipart).await?;
    if uploads.is_empty() {
        return Err(ApiError::invalid("no files selected"));
    }
    let year = match year {
        Some(raw) if !raw.trim().is_empty() => parse_year(&raw)?,
        _ => Local::now().year(),
    };

    // Workbook parsing and writing run on the blocking pool.
    let files = uploads.len();
    let worker_config = config.clone();
    let archive = tokio::task::spawn_blocking(move || {
        process_batch(&uploads, year, &worker_config.layout)
    })
    .await
    .map_err(|err| ApiError::Internal(err.to_string()))?
    .inspect_err(|err| {
        warn!(error = %err, files, "expansion request failed");
    })?;

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        config.archive_name
    ))
    .map_err(|err| ApiError::Internal(err.to_string()))?;
    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static("application/zip")),
        (header::CONTENT_DISPOSITION, disposition),
    ];
    Ok((headers, archive).into_response())
}

/// Collect every non-empty `file` part and the optional `year` field.
async fn read_form(mut multipart: Multipart) -> Result<(Vec<Upload>, Option<String>), ApiError> {
    let mut uploads = Vec::new();
    let mut year = None;
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                uploads.push(Upload::new(file_name, bytes.to_vec()));
            }
            Some(YEAR_FIELD) => {
                year = Some(field.text().await?);
            }
            _ => {}
        }
    }
    Ok((uploads, year))
}
