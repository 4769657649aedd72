use sqlx::PgPool;
use storage::{
    dto::{
        leaderboard::LeaderboardEntry,
        season::{HeadToHeadReport, SeasonSummary},
    },
    error::Result,
    repository::SeasonRepository,
    services::analytics,
};
use uuid::Uuid;

pub async fn leaderboard(pool: &PgPool, season_id: Uuid) -> Result<Vec<LeaderboardEntry>> {
    SeasonRepository::new(pool).leaderboard(season_id).await
}

/// Season awards plus round/player counts
pub async fn season_summary(pool: &PgPool, season_id: Uuid) -> Result<SeasonSummary> {
    analytics::season_summary(pool, season_id).await
}

pub async fn head_to_head(
    pool: &PgPool,
    season_id: Uuid,
    player1: Uuid,
    player2: Uuid,
) -> Result<HeadToHeadReport> {
    analytics::head_to_head(pool, season_id, player1, player2).await
}
