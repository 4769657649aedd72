use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "game_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Active,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Game {
    pub game_id: Uuid,
    pub season_id: Uuid,
    pub course_id: Uuid,
    pub game_date: NaiveDate,
    pub status: GameStatus,
    pub created_at: NaiveDateTime,
}

/// A game joined with its course par, the shape the scoring services work with.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GameRound {
    pub game_id: Uuid,
    pub season_id: Uuid,
    pub game_date: NaiveDate,
    pub status: GameStatus,
    pub course_par: i32,
}
