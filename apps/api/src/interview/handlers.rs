//! Axum route handlers for the Interview API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{JsonBody, OptionalJson};
use crate::interview::classifier::Label;
use crate::interview::conversation::Turn;
use crate::interview::router::take_turn;
use crate::interview::sessions::{Session, SessionView};
use crate::interview::tracks::{default_track, resolve_track, KNOWN_TRACKS};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CreateInterviewRequest {
    pub track: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub label: Label,
    pub reply: String,
    pub current_question: String,
    pub turns: Vec<Turn>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResetRequest {
    pub track: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CredentialRequest {
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct TracksResponse {
    pub tracks: Vec<&'static str>,
    pub default: &'static str,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/tracks
pub async fn handle_list_tracks() -> Json<TracksResponse> {
    Json(TracksResponse {
        tracks: KNOWN_TRACKS.to_vec(),
        default: default_track(),
    })
}

/// POST /api/v1/interviews
///
/// Opens a session already reset for the chosen track.
pub async fn handle_create_interview(
    State(state): State<AppState>,
    OptionalJson(req): OptionalJson<CreateInterviewRequest>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let track = resolve_track(req.track.as_deref())?;
    let credential = req
        .api_key
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());

    let handle = state.sessions.insert(Session::new(track, credential)).await;
    let session = handle.lock().await;
    info!(
        session_id = %session.id,
        track = session.conversation.track(),
        "Interview started"
    );

    Ok((
        StatusCode::CREATED,
        Json(session.view(state.config.google_api_key.is_some())),
    ))
}

/// GET /api/v1/interviews/:id
///
/// Shares the session lock with `handle_answer`, so while a turn is in flight
/// this waits for it to finish (up to two LLM calls, each bounded by
/// `LLM_TIMEOUT_SECS`) and then returns the transcript including that turn.
pub async fn handle_get_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session.touch();
    Ok(Json(session.view(state.config.google_api_key.is_some())))
}

/// POST /api/v1/interviews/:id/answers
///
/// Classifies the answer against the current question, routes to the strong
/// or weak follow-up, and records both turns. The session stays locked for the
/// whole chain, so a second answer to the same session waits its turn.
pub async fn handle_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<AnswerRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    if req.answer.trim().is_empty() {
        return Err(AppError::Validation("answer cannot be empty".to_string()));
    }

    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session.touch();
    let credential = session.resolve_credential(state.config.google_api_key.as_deref())?;

    let outcome = take_turn(
        state.llm.as_ref(),
        &credential,
        &mut session.conversation,
        &req.answer,
    )
    .await?;
    session.touch();
    info!(session_id = %id, label = ?outcome.label, "Answer processed");

    Ok(Json(AnswerResponse {
        label: outcome.label,
        reply: outcome.reply,
        current_question: session.conversation.current_question().to_string(),
        turns: session.conversation.turns().to_vec(),
    }))
}

/// POST /api/v1/interviews/:id/reset
///
/// Without a track (or with no body at all) the session keeps its current one.
pub async fn handle_reset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    OptionalJson(req): OptionalJson<ResetRequest>,
) -> Result<Json<SessionView>, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session.touch();

    let track = match req.track.as_deref() {
        Some(t) => resolve_track(Some(t))?,
        None => session.conversation.track().to_string(),
    };
    session.conversation.reset(track);
    info!(session_id = %id, track = session.conversation.track(), "Interview reset");

    Ok(Json(session.view(state.config.google_api_key.is_some())))
}

/// PUT /api/v1/interviews/:id/credential
pub async fn handle_set_credential(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<CredentialRequest>,
) -> Result<StatusCode, AppError> {
    let key = req.api_key.trim();
    if key.is_empty() {
        return Err(AppError::Validation("api_key cannot be empty".to_string()));
    }

    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session.credential = Some(key.to_string());
    session.touch();
    info!(session_id = %id, "Credential attached to interview");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/interviews/:id
pub async fn handle_delete_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    info!(session_id = %id, "Interview deleted");
    Ok(StatusCode::NO_CONTENT)
}
