use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::score::{EditScoreRequest, SubmissionPreview, SubmissionResult, SubmitScoreRequest};
use crate::error::{ScoringError, ScoringResult};
use crate::models::{GameStatus, Score};
use crate::repository::{GameRepository, ScoreRepository, SeasonRepository};
use crate::services::bonus;
use crate::services::points;
use crate::services::round_lock;

pub const MIN_RAW_SCORE: i32 = 50;
pub const MAX_RAW_SCORE: i32 = 150;

pub fn validate_raw_score(raw_score: i32) -> ScoringResult<()> {
    if !(MIN_RAW_SCORE..=MAX_RAW_SCORE).contains(&raw_score) {
        return Err(ScoringError::InvalidScore(raw_score));
    }
    Ok(())
}

/// Whether a score would take the bonus point given the round's existing
/// scores. Matching the current minimum still takes it (ties share the bonus).
pub fn would_take_bonus(existing: &[Score], raw_score: i32) -> bool {
    existing
        .iter()
        .map(|s| s.raw_score)
        .min()
        .is_none_or(|lowest| raw_score <= lowest)
}

/// Advisory preview for the confirmation dialog. Computed against a snapshot
/// that may be stale by the time of the actual commit; the persisted flags
/// come from re-arbitration at submit time.
pub async fn preview_submission(
    pool: &PgPool,
    game_id: Uuid,
    raw_score: i32,
) -> ScoringResult<SubmissionPreview> {
    validate_raw_score(raw_score)?;
    let existing = ScoreRepository::list_for_game(pool, game_id).await?;

    Ok(SubmissionPreview {
        base_points: points::base_points(raw_score),
        would_take_bonus: would_take_bonus(&existing, raw_score),
    })
}

/// Submit a score for an active round. Preconditions are checked in order and
/// the first failure wins: round active, player enrolled, no duplicate, raw
/// score in range. After the insert the whole round is re-arbitrated, which
/// can revoke other players' bonus points.
pub async fn submit_score(
    pool: &PgPool,
    request: &SubmitScoreRequest,
) -> ScoringResult<SubmissionResult> {
    let round = GameRepository::new(pool).find_round(request.game_id).await?;
    if round.status != GameStatus::Active {
        return Err(ScoringError::RoundClosed);
    }

    let enrolled = SeasonRepository::new(pool)
        .is_participant(round.season_id, request.player_id)
        .await?;
    if !enrolled {
        return Err(ScoringError::NotEnrolled);
    }

    let already_submitted =
        ScoreRepository::exists_for_game_and_player(pool, request.game_id, request.player_id)
            .await?;
    if already_submitted {
        return Err(ScoringError::DuplicateSubmission);
    }

    validate_raw_score(request.raw_score)?;

    // The insert and the re-arbitration share one transaction so the round
    // lock is held on the same connection the writes run on, and dropping the
    // transaction (error, client disconnect) releases it.
    let mut tx = pool.begin().await?;
    round_lock::lock_round(&mut tx, request.game_id).await?;
    let result = submit_in_round(&mut tx, request).await?;
    tx.commit().await?;

    Ok(result)
}

async fn submit_in_round(
    conn: &mut PgConnection,
    request: &SubmitScoreRequest,
) -> ScoringResult<SubmissionResult> {
    let inserted = ScoreRepository::insert(
        &mut *conn,
        request.game_id,
        request.player_id,
        request.raw_score,
        points::base_points(request.raw_score),
        0,
        request.notes.as_deref(),
    )
    .await
    .map_err(|e| {
        // The duplicate check above races with concurrent submitters; the
        // unique index is the backstop.
        if e.is_unique_violation() {
            ScoringError::DuplicateSubmission
        } else {
            ScoringError::Storage(e)
        }
    })?;

    let report = bonus::rearbitrate_round(&mut *conn, request.game_id).await?;

    // Re-read the submitter's row so the returned flags reflect arbitration.
    let settled = ScoreRepository::find_by_id(&mut *conn, inserted.score_id).await?;

    Ok(SubmissionResult {
        score_id: settled.score_id,
        base_points: settled.base_points,
        bonus_points: settled.bonus_points,
        total_points: settled.total_points(),
        propagation_failures: report.failed_updates,
    })
}

/// Admin edit of an existing score. Base points are recomputed from the new
/// raw score and the round is re-arbitrated before returning, since changing
/// the previous minimum can promote a new one.
pub async fn edit_score(
    pool: &PgPool,
    score_id: Uuid,
    request: &EditScoreRequest,
) -> ScoringResult<Score> {
    validate_raw_score(request.raw_score)?;

    let existing = ScoreRepository::find_by_id(pool, score_id).await?;

    let mut tx = pool.begin().await?;
    round_lock::lock_round(&mut tx, existing.game_id).await?;

    ScoreRepository::update(
        &mut *tx,
        existing.score_id,
        request.raw_score,
        points::base_points(request.raw_score),
        request.notes.as_deref(),
        request.edited_by,
    )
    .await?;
    bonus::rearbitrate_round(&mut tx, existing.game_id).await?;
    let settled = ScoreRepository::find_by_id(&mut *tx, existing.score_id).await?;

    tx.commit().await?;

    Ok(settled)
}

/// Delete a score and re-arbitrate the round it belonged to; removing the
/// minimum promotes the next-lowest score(s).
pub async fn delete_score(pool: &PgPool, score_id: Uuid) -> ScoringResult<()> {
    let existing = ScoreRepository::find_by_id(pool, score_id).await?;

    let mut tx = pool.begin().await?;
    round_lock::lock_round(&mut tx, existing.game_id).await?;

    ScoreRepository::delete(&mut *tx, existing.score_id).await?;
    bonus::rearbitrate_round(&mut tx, existing.game_id).await?;

    tx.commit().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn score(raw: i32, bonus: i32) -> Score {
        Score {
            score_id: Uuid::new_v4(),
            game_id: Uuid::new_v4(),
            player_id: Uuid::new_v4(),
            raw_score: raw,
            base_points: points::base_points(raw),
            bonus_points: bonus,
            notes: None,
            submitted_at: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            edited_by: None,
            edited_at: None,
        }
    }

    #[test]
    fn test_raw_score_range() {
        assert!(validate_raw_score(50).is_ok());
        assert!(validate_raw_score(150).is_ok());
        assert!(matches!(
            validate_raw_score(49),
            Err(ScoringError::InvalidScore(49))
        ));
        assert!(matches!(
            validate_raw_score(151),
            Err(ScoringError::InvalidScore(151))
        ));
    }

    #[test]
    fn test_preview_on_empty_round_takes_bonus() {
        assert!(would_take_bonus(&[], 120));
    }

    #[test]
    fn test_preview_against_existing_minimum() {
        let existing = vec![score(80, 1), score(92, 0)];
        assert!(would_take_bonus(&existing, 79));
        assert!(would_take_bonus(&existing, 80));
        assert!(!would_take_bonus(&existing, 81));
    }
}
