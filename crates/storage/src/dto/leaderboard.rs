use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One row of a season leaderboard, ordered by total points descending.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LeaderboardEntry {
    pub player_id: Uuid,
    pub display_name: String,
    pub games_played: i64,
    pub total_points: i64,
}
