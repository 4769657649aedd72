use rust_decimal::Decimal;
use sqlx::PgPool;
use storage::{
    error::Result, models::UserAchievement, repository::AchievementRepository,
    services::{achievements, handicap},
};
use uuid::Uuid;

/// Recompute the player's handicap from their full history; the stored value
/// is refreshed as a side effect.
pub async fn compute_handicap(pool: &PgPool, player_id: Uuid) -> Result<Option<Decimal>> {
    handicap::compute_handicap(pool, player_id).await
}

/// Run the achievement engine, returning the keys earned by this pass
pub async fn check_achievements(
    pool: &PgPool,
    player_id: Uuid,
    season_id: Option<Uuid>,
) -> Result<Vec<String>> {
    achievements::check_and_award_achievements(pool, player_id, season_id).await
}

pub async fn list_achievements(pool: &PgPool, player_id: Uuid) -> Result<Vec<UserAchievement>> {
    AchievementRepository::new(pool).earned_by_player(player_id).await
}
