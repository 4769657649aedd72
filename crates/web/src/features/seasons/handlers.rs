use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        leaderboard::LeaderboardEntry,
        season::{HeadToHeadQuery, HeadToHeadReport, SeasonSummary},
    },
};
use uuid::Uuid;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/seasons/{season_id}/leaderboard",
    params(
        ("season_id" = Uuid, Path, description = "Season to rank")
    ),
    responses(
        (status = 200, description = "Standings by total points descending", body = Vec<LeaderboardEntry>)
    ),
    tag = "seasons"
)]
pub async fn get_leaderboard(
    State(db): State<Database>,
    Path(season_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let entries = services::leaderboard(db.pool(), season_id).await?;

    Ok(Json(entries).into_response())
}

#[utoipa::path(
    get,
    path = "/api/seasons/{season_id}/summary",
    params(
        ("season_id" = Uuid, Path, description = "Season to summarize")
    ),
    responses(
        (status = 200, description = "Season awards; each is null when no player qualifies", body = SeasonSummary)
    ),
    tag = "seasons"
)]
pub async fn get_summary(
    State(db): State<Database>,
    Path(season_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let summary = services::season_summary(db.pool(), season_id).await?;

    Ok(Json(summary).into_response())
}

#[utoipa::path(
    get,
    path = "/api/seasons/{season_id}/head-to-head",
    params(
        ("season_id" = Uuid, Path, description = "Season scope"),
        HeadToHeadQuery
    ),
    responses(
        (status = 200, description = "Round-by-round record over the games both players played", body = HeadToHeadReport)
    ),
    tag = "seasons"
)]
pub async fn get_head_to_head(
    State(db): State<Database>,
    Path(season_id): Path<Uuid>,
    Query(query): Query<HeadToHeadQuery>,
) -> Result<Response, WebError> {
    let report =
        services::head_to_head(db.pool(), season_id, query.player1, query.player2).await?;

    Ok(Json(report).into_response())
}
