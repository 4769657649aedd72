use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::player::{AchievementCheckResponse, CheckAchievementsQuery, HandicapResponse},
    models::UserAchievement,
};
use uuid::Uuid;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/players/{player_id}/handicap",
    params(
        ("player_id" = Uuid, Path, description = "Player to rate")
    ),
    responses(
        (status = 200, description = "Handicap recomputed from the player's full history", body = HandicapResponse),
        (status = 404, description = "Player not found")
    ),
    tag = "players"
)]
pub async fn get_handicap(
    State(db): State<Database>,
    Path(player_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let handicap_index = services::compute_handicap(db.pool(), player_id).await?;

    Ok(Json(HandicapResponse {
        player_id,
        handicap_index,
    })
    .into_response())
}

#[utoipa::path(
    post,
    path = "/api/players/{player_id}/achievements/check",
    params(
        ("player_id" = Uuid, Path, description = "Player to evaluate"),
        CheckAchievementsQuery
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Catalog evaluated; already-earned achievements are untouched", body = AchievementCheckResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "players"
)]
pub async fn check_achievements(
    State(db): State<Database>,
    Path(player_id): Path<Uuid>,
    Query(query): Query<CheckAchievementsQuery>,
) -> Result<Response, WebError> {
    let newly_earned =
        services::check_achievements(db.pool(), player_id, query.season_id).await?;

    Ok(Json(AchievementCheckResponse {
        player_id,
        newly_earned,
    })
    .into_response())
}

#[utoipa::path(
    get,
    path = "/api/players/{player_id}/achievements",
    params(
        ("player_id" = Uuid, Path, description = "Player whose earnings to list")
    ),
    responses(
        (status = 200, description = "Earned achievement records", body = Vec<UserAchievement>)
    ),
    tag = "players"
)]
pub async fn list_achievements(
    State(db): State<Database>,
    Path(player_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let earned = services::list_achievements(db.pool(), player_id).await?;

    Ok(Json(earned).into_response())
}
