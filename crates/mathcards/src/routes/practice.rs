//! Practice session endpoints.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use mathcards_common::{PracticeSettings, SessionView, StartedSession};
use serde::Deserialize;

use super::error::ApiError;
use crate::state::AppState;

/// Start a new session with the learner's settings
pub async fn start_session(
    State(state): State<AppState>,
    payload: Result<Json<PracticeSettings>, JsonRejection>,
) -> Result<Json<StartedSession>, ApiError> {
    let Json(settings) = payload?;
    let started = state.sessions.start(settings).await;
    Ok(Json(started))
}

/// Current problem of a session, or its results once finished
pub async fn next_operation(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    let view = state.sessions.peek(&session_id).await?;
    Ok(Json(view))
}

#[derive(Deserialize)]
pub struct AnswerRequest {
    /// The learner's answer; must be a JSON integer
    answer: i64,
}

/// Grade an answer and move on to the next problem
pub async fn submit_answer(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    payload: Result<Json<AnswerRequest>, JsonRejection>,
) -> Result<Json<SessionView>, ApiError> {
    let answer = match payload {
        Ok(Json(request)) => request.answer,
        Err(rejection) => {
            // Unknown sessions report 404 ahead of payload problems
            state.sessions.ensure_exists(&session_id).await?;
            return Err(rejection.into());
        }
    };

    let view = state.sessions.answer(&session_id, answer).await?;
    Ok(Json(view))
}
