use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{
    error::ApiResult,
    extract::{ApiQuery, OptionalBody},
    state::AppState,
};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct NextRequest {
    /// The answer given to the current step
    pub answer: Option<String>,
    /// Conversation identity; the configured default session when absent
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NextResponse {
    pub status: u16,
    pub response: String,
    pub session_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateResponse {
    pub status: u16,
    pub message: String,
    pub generation: u64,
    pub lines: usize,
}

/// Update bot lines and flows
///
/// Downloads the lines and flows, validates them and swaps them in. Every
/// session restarts from `start` on its next step.
#[utoipa::path(
    get,
    path = "/update",
    responses(
        (status = 201, description = "Bot lines and flows updated", body = UpdateResponse),
        (status = 400, description = "Invalid bot lines detected"),
        (status = 500, description = "Bot lines could not be fetched")
    ),
    tag = "conversation"
)]
pub async fn update(
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, Json<UpdateResponse>)> {
    tracing::info!(source = %state.source.name(), "updating bot lines and flows");

    let graph = state.reload().await?;

    Ok((
        StatusCode::CREATED,
        Json(UpdateResponse {
            status: StatusCode::CREATED.as_u16(),
            message: "bot lines and flows updated".to_string(),
            generation: graph.generation(),
            lines: graph.len(),
        }),
    ))
}

/// Get the next step from the bot
///
/// Accepts `answer` and `session_id` as a form or JSON body or as query
/// parameters; body fields win. A body that does not parse is rejected without
/// stepping the session.
#[utoipa::path(
    post,
    path = "/next",
    request_body(
        content = NextRequest,
        content_type = "application/x-www-form-urlencoded",
        description = "The answer given to the current step, as a form or JSON"
    ),
    responses(
        (status = 200, description = "The next step", body = NextResponse),
        (status = 400, description = "Malformed body or query string")
    ),
    tag = "conversation"
)]
pub async fn next(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<NextRequest>,
    OptionalBody(body): OptionalBody<NextRequest>,
) -> ApiResult<Json<NextResponse>> {
    let body = body.unwrap_or_default();
    let answer = body.answer.or(query.answer);
    let session_id = body
        .session_id
        .or(query.session_id)
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| state.config.engine.default_session.clone());

    let response = state.engine.step(&session_id, answer.as_deref()).await?;

    Ok(Json(NextResponse {
        status: StatusCode::OK.as_u16(),
        response,
        session_id,
    }))
}
