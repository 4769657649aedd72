use sqlx::PgPool;
use storage::{
    dto::score::{
        EditScoreRequest, RecalculationReport, SubmissionPreview, SubmissionResult,
        SubmitScoreRequest,
    },
    error::{Result, ScoringResult},
    models::Score,
    services::{bonus, submission},
};
use uuid::Uuid;

/// Submit a score and re-arbitrate the round's bonus point
pub async fn submit_score(
    pool: &PgPool,
    request: &SubmitScoreRequest,
) -> ScoringResult<SubmissionResult> {
    submission::submit_score(pool, request).await
}

/// Advisory preview for the submission confirmation dialog
pub async fn preview_submission(
    pool: &PgPool,
    game_id: Uuid,
    raw_score: i32,
) -> ScoringResult<SubmissionPreview> {
    submission::preview_submission(pool, game_id, raw_score).await
}

pub async fn edit_score(
    pool: &PgPool,
    score_id: Uuid,
    request: &EditScoreRequest,
) -> ScoringResult<Score> {
    submission::edit_score(pool, score_id, request).await
}

pub async fn delete_score(pool: &PgPool, score_id: Uuid) -> ScoringResult<()> {
    submission::delete_score(pool, score_id).await
}

/// Admin resync of a round's bonus flags
pub async fn recalculate_bonus_points(
    pool: &PgPool,
    game_id: Uuid,
) -> Result<RecalculationReport> {
    bonus::recalculate_bonus_points(pool, game_id).await
}
