use axum::{
    routing::post,
    Router,
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::api::response;
use crate::error::{AppError, Result};
use crate::summarizer::SummarizationResult;
use crate::upload::{validate, UploadedFile, ValidationOutcome};
use crate::AppState;

/// Multipart field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

pub fn create_router(app_state: AppState) -> Router {
    let cors = cors_layer(app_state.config.cors_allowed_origin.as_deref());
    let body_limit = DefaultBodyLimit::max(app_state.config.max_upload_bytes);

    Router::new()
        .route("/api/summarize", post(summarize_handler))
        .layer(body_limit)
        .layer(cors)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let allow_origin = match origin.map(HeaderValue::from_str) {
        Some(Ok(origin)) => AllowOrigin::exact(origin),
        Some(Err(e)) => {
            warn!("Ignoring invalid CORS origin ({}), allowing any origin", e);
            AllowOrigin::from(cors::Any)
        }
        None => AllowOrigin::from(cors::Any),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(cors::Any)
        .allow_headers(cors::Any)
}

async fn summarize_handler(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Response {
    let start_time = std::time::Instant::now();
    let result = process_upload(&state, multipart).await;
    let elapsed = start_time.elapsed();

    match result {
        Ok(summary) => {
            info!(?elapsed, summary_len = summary.len(), "Upload summarized");
            response::success(summary).into_response()
        }
        Err(err) => {
            match &err {
                AppError::Rejected(reason) => info!(?reason, "Upload rejected"),
                AppError::Upload(msg) | AppError::PayloadTooLarge(msg) => {
                    info!(error = %msg, "Unreadable upload")
                }
                AppError::Processing(msg) | AppError::Config(msg) => {
                    error!(error = %msg, ?elapsed, "Error processing file")
                }
            }
            err.into_response()
        }
    }
}

async fn process_upload(
    state: &AppState,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<String> {
    let mut multipart = multipart?;
    let file = read_file_part(&mut multipart).await?;

    let text = match validate(file.as_ref()) {
        ValidationOutcome::Accepted(text) => text,
        ValidationOutcome::Rejected(reason) => return Err(reason.into()),
    };

    info!(
        file_name = file.as_ref().and_then(|f| f.name.as_deref()).unwrap_or_default(),
        chars = text.chars().count(),
        "Summarizing uploaded file"
    );

    match state.summarizer.summarize(&text).await {
        SummarizationResult::Summary(summary) => Ok(summary),
        SummarizationResult::Failure(message) => Err(AppError::Processing(message)),
    }
}

/// Returns the first part named `file`, skipping any other fields.
async fn read_file_part(multipart: &mut Multipart) -> Result<Option<UploadedFile>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await?;
        return Ok(Some(UploadedFile::new(name, bytes)));
    }
    Ok(None)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "An unexpected error occurred on the server.".to_string()
    };

    error!(error = %detail, "Panic while handling request");
    response::error(
        StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Processing(detail).to_string(),
    )
    .into_response()
}
