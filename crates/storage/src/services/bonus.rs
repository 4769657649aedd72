use sqlx::{Acquire, PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::score::{FailedBonusUpdate, RecalculationReport};
use crate::error::Result;
use crate::models::Score;
use crate::repository::ScoreRepository;
use crate::services::round_lock;

/// The arbiter's verdict for one score in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusDecision {
    pub score_id: Uuid,
    pub player_id: Uuid,
    pub should_have_bonus: bool,
}

/// A stored bonus flag that disagrees with the arbiter and must be rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusUpdate {
    pub score_id: Uuid,
    pub player_id: Uuid,
    pub bonus_points: i32,
}

/// Decide who holds the bonus point given the complete current score set of
/// one round. Every score tied at the round minimum holds it; there is no
/// single-winner tie-break. Pure and order-independent.
pub fn arbitrate(scores: &[Score]) -> Vec<BonusDecision> {
    let Some(lowest) = scores.iter().map(|s| s.raw_score).min() else {
        return Vec::new();
    };

    scores
        .iter()
        .map(|s| BonusDecision {
            score_id: s.score_id,
            player_id: s.player_id,
            should_have_bonus: s.raw_score == lowest,
        })
        .collect()
}

/// Diff the arbiter's verdict against the stored flags. Only rows whose flag
/// actually changes are returned, so a clean round plans zero writes.
pub fn plan_updates(scores: &[Score]) -> Vec<BonusUpdate> {
    arbitrate(scores)
        .into_iter()
        .zip(scores)
        .filter(|(decision, score)| {
            let target = i32::from(decision.should_have_bonus);
            target != score.bonus_points
        })
        .map(|(decision, _)| BonusUpdate {
            score_id: decision.score_id,
            player_id: decision.player_id,
            bonus_points: i32::from(decision.should_have_bonus),
        })
        .collect()
}

/// Admin re-synchronization for a round where drift is suspected, e.g. after a
/// write that bypassed the submission coordinator.
pub async fn recalculate_bonus_points(pool: &PgPool, game_id: Uuid) -> Result<RecalculationReport> {
    let mut tx = pool.begin().await?;
    round_lock::lock_round(&mut tx, game_id).await?;
    let report = rearbitrate_round(&mut tx, game_id).await?;
    tx.commit().await?;

    Ok(report)
}

/// Re-derive the round's bonus flags from its full current score set and
/// persist every changed row. Individual write failures are collected and
/// reported, not escalated; the next pass over this round self-heals them.
/// Runs on the connection whose transaction holds the round lock.
pub(crate) async fn rearbitrate_round(
    conn: &mut PgConnection,
    game_id: Uuid,
) -> Result<RecalculationReport> {
    let scores = ScoreRepository::list_for_game(&mut *conn, game_id).await?;

    let mut report = RecalculationReport {
        updated_scores: Vec::new(),
        failed_updates: Vec::new(),
    };

    for update in plan_updates(&scores) {
        match apply_update(conn, &update).await {
            Ok(()) => report.updated_scores.push(update.score_id),
            Err(error) => {
                tracing::warn!(
                    score_id = %update.score_id,
                    player_id = %update.player_id,
                    %error,
                    "Failed to propagate bonus point update"
                );
                report.failed_updates.push(FailedBonusUpdate {
                    score_id: update.score_id,
                    player_id: update.player_id,
                    error: error.to_string(),
                });
            }
        }
    }

    Ok(report)
}

/// One flag rewrite inside its own savepoint, so a failed row cannot poison
/// the surrounding transaction and the remaining rows still get applied.
async fn apply_update(conn: &mut PgConnection, update: &BonusUpdate) -> Result<()> {
    let mut savepoint = conn.begin().await?;
    ScoreRepository::set_bonus(&mut *savepoint, update.score_id, update.bonus_points).await?;
    savepoint.commit().await?;

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
            base_points: crate::services::points::base_points(raw),
            bonus_points: bonus,
            notes: None,
            submitted_at: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            edited_by: None,
            edited_at: None,
        }
    }

    #[test]
    fn test_empty_round_yields_no_decisions() {
        assert!(arbitrate(&[]).is_empty());
        assert!(plan_updates(&[]).is_empty());
    }

    #[test]
    fn test_single_score_holds_bonus() {
        let scores = vec![score(88, 0)];
        let decisions = arbitrate(&scores);
        assert_eq!(decisions.len(), 1);
        assert!(decisions[0].should_have_bonus);
    }

    #[test]
    fn test_only_minimum_holds_bonus() {
        let scores = vec![score(90, 0), score(82, 0), score(101, 0)];
        let decisions = arbitrate(&scores);
        let holders: Vec<bool> = decisions.iter().map(|d| d.should_have_bonus).collect();
        assert_eq!(holders, vec![false, true, false]);
    }

    #[test]
    fn test_tied_minimum_all_hold_bonus() {
        let scores = vec![score(82, 0), score(82, 0), score(95, 0)];
        let decisions = arbitrate(&scores);
        assert!(decisions[0].should_have_bonus);
        assert!(decisions[1].should_have_bonus);
        assert!(!decisions[2].should_have_bonus);
    }

    #[test]
    fn test_new_low_score_revokes_previous_holder() {
        // A held the bonus at 74; B arrives with 70.
        let scores = vec![score(74, 1), score(70, 0)];
        let updates = plan_updates(&scores);
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].bonus_points, 0);
        assert_eq!(updates[1].bonus_points, 1);
    }

    #[test]
    fn test_settled_round_plans_no_updates() {
        let scores = vec![score(74, 0), score(70, 1), score(88, 0)];
        assert!(plan_updates(&scores).is_empty());
    }

    #[test]
    fn test_plan_is_idempotent_once_applied() {
        let mut scores = vec![score(91, 1), score(85, 0)];
        for update in plan_updates(&scores.clone()) {
            let row = scores
                .iter_mut()
                .find(|s| s.score_id == update.score_id)
                .unwrap();
            row.bonus_points = update.bonus_points;
        }
        assert!(plan_updates(&scores).is_empty());
    }
}
