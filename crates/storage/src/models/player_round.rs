use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One row of a player's history: their score annotated with the round's par,
/// date and season. Input shape for the handicap calculator and the
/// achievement engine; always fetched in chronological submission order.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PlayerRound {
    pub score_id: Uuid,
    pub game_id: Uuid,
    pub season_id: Uuid,
    pub raw_score: i32,
    pub base_points: i32,
    pub bonus_points: i32,
    pub course_par: i32,
    pub game_date: NaiveDate,
    pub submitted_at: NaiveDateTime,
}

impl PlayerRound {
    pub fn total_points(&self) -> i32 {
        self.base_points + self.bonus_points
    }

    pub fn differential(&self) -> i32 {
        self.raw_score - self.course_par
    }
}
