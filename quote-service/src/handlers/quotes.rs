use crate::dtos::{QuoteListResponse, QuotePayload};
use crate::error::AppError;
use crate::models::Quote;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

#[tracing::instrument(skip(state))]
pub async fn list_quotes(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let quotes = state.store.quotes().await?;
    Ok(Json(QuoteListResponse { quotes }))
}

#[tracing::instrument(skip(state))]
pub async fn get_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Quote>, AppError> {
    match state.store.quote(&id).await? {
        Some(quote) => Ok(Json(quote)),
        None => Err(AppError::NotFound(anyhow::anyhow!("Quote Not Found"))),
    }
}

#[tracing::instrument(skip(state, payload))]
pub async fn create_quote(
    State(state): State<AppState>,
    Json(payload): Json<QuotePayload>,
) -> Result<impl IntoResponse, AppError> {
    let draft = payload.into_draft()?;
    let quote = state.store.create_quote(draft).await?;

    tracing::info!(quote_id = %quote.id, "Quote created");
    Ok((StatusCode::CREATED, Json(quote)))
}

#[tracing::instrument(skip(state, payload))]
pub async fn update_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<QuotePayload>,
) -> Result<StatusCode, AppError> {
    let mut quote = state
        .store
        .quote(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Quote Not Found")))?;

    // Read-modify-write: only the two text fields are caller-writable.
    let draft = payload.into_draft()?;
    quote.quote = draft.quote;
    quote.author = draft.author;

    state.store.update_quote(quote).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(skip(state))]
pub async fn delete_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let quote = state
        .store
        .quote(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Quote Not Found")))?;

    state.store.delete_quote(quote).await?;

    tracing::info!(quote_id = %id, "Quote deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(skip(state))]
pub async fn random_quote(State(state): State<AppState>) -> Result<Json<Quote>, AppError> {
    match state.store.random_quote().await? {
        Some(quote) => Ok(Json(quote)),
        None => Err(AppError::NotFound(anyhow::anyhow!("No quotes available"))),
    }
}
