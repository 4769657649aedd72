use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Request payload for submitting a new score
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitScoreRequest {
    pub game_id: Uuid,
    pub player_id: Uuid,

    #[validate(range(min = 50, max = 150, message = "Raw score must be between 50 and 150"))]
    pub raw_score: i32,

    #[validate(length(max = 1000, message = "Notes must be at most 1000 characters"))]
    pub notes: Option<String>,
}

/// Request payload for an admin edit of an existing score
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct EditScoreRequest {
    #[validate(range(min = 50, max = 150, message = "Raw score must be between 50 and 150"))]
    pub raw_score: i32,

    #[validate(length(max = 1000, message = "Notes must be at most 1000 characters"))]
    pub notes: Option<String>,

    pub edited_by: Uuid,
}

/// The submitter's final standing after round re-arbitration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionResult {
    pub score_id: Uuid,
    pub base_points: i32,
    pub bonus_points: i32,
    pub total_points: i32,
    /// Failures while propagating bonus changes to other players. The
    /// submission itself stands even when this is non-empty.
    pub propagation_failures: Vec<FailedBonusUpdate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams, ToSchema)]
pub struct PreviewQuery {
    pub game_id: Uuid,
    pub raw_score: i32,
}

/// Advisory preview shown in the confirmation dialog before submitting. May be
/// stale by the time of the actual commit.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionPreview {
    pub base_points: i32,
    pub would_take_bonus: bool,
}

/// Outcome of a bonus re-arbitration pass over one round.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecalculationReport {
    pub updated_scores: Vec<Uuid>,
    pub failed_updates: Vec<FailedBonusUpdate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FailedBonusUpdate {
    pub score_id: Uuid,
    pub player_id: Uuid,
    pub error: String,
}
