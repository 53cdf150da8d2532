use axum::{
    routing::{get, post},
    Router,
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::api::models::{check_id, DeletedSummary, SummaryPayload, SummaryUpdatePayload};
use crate::error::{AppError, Result};
use crate::store::SummaryStore;
use crate::summarizer;
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/summaries", post(create_summary).get(read_all_summaries))
        .route("/summaries/", post(create_summary).get(read_all_summaries))
        .route(
            "/summaries/:id",
            get(read_summary).put(update_summary).delete(delete_summary),
        )
        .route(
            "/summaries/:id/",
            get(read_summary).put(update_summary).delete(delete_summary),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn create_summary(
    State(state): State<AppState>,
    Json(payload): Json<SummaryPayload>,
) -> Result<impl IntoResponse> {
    let url = payload.validate().map_err(AppError::Validation)?;

    let record = state.store.create(url, &summarizer::placeholder(url)).await?;
    info!(id = record.id, url = %record.url, "created summary");

    spawn_generation(state.store.clone(), record.id, record.url.clone());

    Ok((StatusCode::CREATED, Json(record)))
}

async fn read_summary(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let id = check_id(id).map_err(AppError::Validation)?;

    let record = state.store.get(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(record))
}

async fn read_all_summaries(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let records = state.store.list().await?;
    Ok(Json(records))
}

async fn update_summary(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<SummaryUpdatePayload>,
) -> Result<impl IntoResponse> {
    let mut errors = Vec::new();
    let id = check_id(id).map_err(|e| errors.extend(e)).ok();
    let fields = payload.validate().map_err(|e| errors.extend(e)).ok();

    let (Some(id), Some((url, summary))) = (id, fields) else {
        return Err(AppError::Validation(errors));
    };

    let record = state
        .store
        .update(id, url, summary)
        .await?
        .ok_or(AppError::NotFound)?;
    info!(id = record.id, "updated summary");

    Ok(Json(record))
}

async fn delete_summary(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let id = check_id(id).map_err(AppError::Validation)?;

    let record = state.store.delete(id).await?.ok_or(AppError::NotFound)?;
    info!(id = record.id, url = %record.url, "deleted summary");

    Ok(Json(DeletedSummary {
        id: record.id,
        url: record.url,
    }))
}

/// Fetch and store the real summary text without blocking the response.
/// The placeholder stays in place when the page cannot be summarized.
fn spawn_generation(store: SummaryStore, id: i64, url: String) {
    tokio::spawn(async move {
        match summarizer::generate(&url).await {
            Ok(Some(text)) => {
                if let Err(err) = store.set_summary(id, &text).await {
                    warn!(id, "failed to store generated summary: {err}");
                }
            }
            Ok(None) => {
                warn!(id, url = %url, "page had no extractable text");
            }
            Err(err) => {
                warn!(id, url = %url, "summary generation failed: {err}");
            }
        }
    });
}
