use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::score::{
        EditScoreRequest, PreviewQuery, RecalculationReport, SubmissionPreview, SubmissionResult,
        SubmitScoreRequest,
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/scores",
    request_body = SubmitScoreRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Score submitted and round re-arbitrated", body = SubmissionResult),
        (status = 400, description = "Raw score outside the valid range"),
        (status = 403, description = "Player not enrolled in the round's season"),
        (status = 409, description = "Round closed or duplicate submission"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "scores"
)]
pub async fn submit_score(
    State(db): State<Database>,
    Json(req): Json<SubmitScoreRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let result = services::submit_score(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(result)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/scores/preview",
    params(PreviewQuery),
    responses(
        (status = 200, description = "Advisory preview of points for a prospective score", body = SubmissionPreview),
        (status = 400, description = "Raw score outside the valid range")
    ),
    tag = "scores"
)]
pub async fn preview_submission(
    State(db): State<Database>,
    Query(query): Query<PreviewQuery>,
) -> Result<Response, WebError> {
    let preview = services::preview_submission(db.pool(), query.game_id, query.raw_score).await?;

    Ok(Json(preview).into_response())
}

#[utoipa::path(
    put,
    path = "/api/scores/{score_id}",
    params(
        ("score_id" = Uuid, Path, description = "Score to edit")
    ),
    request_body = EditScoreRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Score updated and round re-arbitrated", body = storage::models::Score),
        (status = 400, description = "Raw score outside the valid range"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Score not found")
    ),
    tag = "scores"
)]
pub async fn edit_score(
    State(db): State<Database>,
    Path(score_id): Path<Uuid>,
    Json(req): Json<EditScoreRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let updated = services::edit_score(db.pool(), score_id, &req).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/scores/{score_id}",
    params(
        ("score_id" = Uuid, Path, description = "Score to delete")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Score deleted and round re-arbitrated"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Score not found")
    ),
    tag = "scores"
)]
pub async fn delete_score(
    State(db): State<Database>,
    Path(score_id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_score(db.pool(), score_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    post,
    path = "/api/games/{game_id}/recalculate-bonus",
    params(
        ("game_id" = Uuid, Path, description = "Round to re-synchronize")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Bonus flags re-derived from the round's score set", body = RecalculationReport),
        (status = 401, description = "Unauthorized")
    ),
    tag = "scores"
)]
pub async fn recalculate_bonus(
    State(db): State<Database>,
    Path(game_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let report = services::recalculate_bonus_points(db.pool(), game_id).await?;

    Ok(Json(report).into_response())
}
