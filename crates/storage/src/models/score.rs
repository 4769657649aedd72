use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One player's result for one round.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Score {
    pub score_id: Uuid,
    pub game_id: Uuid,
    pub player_id: Uuid,
    pub raw_score: i32,
    pub base_points: i32,
    pub bonus_points: i32,
    pub notes: Option<String>,
    pub submitted_at: NaiveDateTime,
    pub edited_by: Option<Uuid>,
    pub edited_at: Option<NaiveDateTime>,
}

impl Score {
    pub fn total_points(&self) -> i32 {
        self.base_points + self.bonus_points
    }
}
