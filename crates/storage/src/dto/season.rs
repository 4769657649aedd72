use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// One score row of a season, annotated with its round's par and date. The
/// fetch order (submission time, then insertion order) is the traversal order
/// used by the award tie-breaks.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SeasonScore {
    pub score_id: Uuid,
    pub game_id: Uuid,
    pub player_id: Uuid,
    pub raw_score: i32,
    pub base_points: i32,
    pub bonus_points: i32,
    pub course_par: i32,
    pub game_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SeasonSummary {
    pub season_id: Uuid,
    pub mvp: Option<MvpAward>,
    pub most_improved: Option<ImprovementAward>,
    pub most_consistent: Option<ConsistencyAward>,
    pub best_round: Option<BestRound>,
    pub total_rounds: i64,
    pub total_players: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MvpAward {
    pub player_id: Uuid,
    pub total_points: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImprovementAward {
    pub player_id: Uuid,
    /// Average strokes shaved between the first and second half of the season.
    pub improvement: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConsistencyAward {
    pub player_id: Uuid,
    pub std_deviation: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BestRound {
    pub player_id: Uuid,
    pub game_id: Uuid,
    pub raw_score: i32,
    /// Signed relative-to-par label: "E", "+n" or "-n".
    pub to_par: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams, ToSchema)]
pub struct HeadToHeadQuery {
    pub player1: Uuid,
    pub player2: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HeadToHeadReport {
    pub player1_stats: PlayerSeasonStats,
    pub player2_stats: PlayerSeasonStats,
    pub shared_games: Vec<SharedGame>,
    pub record: HeadToHeadRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlayerSeasonStats {
    pub player_id: Uuid,
    pub games_played: i64,
    pub average_score: f64,
    pub total_points: i64,
    pub best_score: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SharedGame {
    pub game_id: Uuid,
    pub game_date: NaiveDate,
    pub player1_score: i32,
    pub player2_score: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HeadToHeadRecord {
    pub player1_wins: i64,
    pub player2_wins: i64,
    pub ties: i64,
}
