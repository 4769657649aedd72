use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "achievement_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Milestone,
    Performance,
    Consistency,
    Special,
}

/// A catalog entry. Rule logic is attached in services::achievements by key.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Achievement {
    pub achievement_id: Uuid,
    pub key: String,
    pub name: String,
    pub description: String,
    pub category: AchievementCategory,
    pub tier: i16,
}

/// An earning record. Created by the achievement engine, never mutated or
/// deleted by normal flow. A season-scoped and a global earning of the same
/// achievement are distinct records.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserAchievement {
    pub user_achievement_id: Uuid,
    pub player_id: Uuid,
    pub achievement_id: Uuid,
    pub season_id: Option<Uuid>,
    pub earned_at: NaiveDateTime,
}
