use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Freshly computed handicap; None while the player has fewer than 5 rounds.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HandicapResponse {
    pub player_id: Uuid,
    pub handicap_index: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams, ToSchema)]
pub struct CheckAchievementsQuery {
    pub season_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AchievementCheckResponse {
    pub player_id: Uuid,
    pub newly_earned: Vec<String>,
}
