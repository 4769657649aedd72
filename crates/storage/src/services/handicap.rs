use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::repository::{PlayerRepository, ScoreRepository};

/// Fewer rounds than this means the player is not ratable yet.
pub const MIN_RATABLE_ROUNDS: usize = 5;

/// How many of the best (lowest) differentials feed the index, as a step
/// function of the total rounds played. Simplified from the USGA table.
pub fn best_differential_count(total_rounds: usize) -> usize {
    match total_rounds {
        0..=4 => 0,
        5..=6 => 1,
        7..=8 => 2,
        9..=11 => 3,
        12..=14 => 4,
        15..=16 => 5,
        17..=18 => 6,
        19 => 7,
        _ => 8,
    }
}

/// Differential-based handicap index over a player's entire history of
/// (raw score, course par) pairs. None until the player has 5 rounds.
pub fn handicap_index(rounds: &[(i32, i32)]) -> Option<Decimal> {
    let used = best_differential_count(rounds.len());
    if used == 0 {
        return None;
    }

    let mut differentials: Vec<i32> = rounds.iter().map(|(raw, par)| raw - par).collect();
    differentials.sort_unstable();

    let sum: i64 = differentials[..used].iter().map(|&d| i64::from(d)).sum();
    let average = Decimal::from(sum) / Decimal::from(used as u64);
    let index = average * Decimal::new(96, 2);

    Some(index.round_dp(1))
}

/// Recompute the player's handicap from scratch over their full history and
/// persist it. The stored value is only a cache; this computation always
/// supersedes it.
pub async fn compute_handicap(pool: &PgPool, player_id: Uuid) -> Result<Option<Decimal>> {
    let history = ScoreRepository::history_for_player(pool, player_id, None).await?;

    let rounds: Vec<(i32, i32)> = history
        .iter()
        .map(|r| (r.raw_score, r.course_par))
        .collect();
    let index = handicap_index(&rounds);

    PlayerRepository::new(pool)
        .update_handicap(player_id, index)
        .await?;

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_rounds_is_unrated() {
        let rounds = vec![(80, 72); 4];
        assert_eq!(handicap_index(&rounds), None);
    }

    #[test]
    fn test_five_rounds_uses_single_best_differential() {
        // Differentials: 18, 13, 10, 23, 8 -> best is 8 -> 8 * 0.96 = 7.68 -> 7.7
        let rounds = vec![(90, 72), (85, 72), (82, 72), (95, 72), (80, 72)];
        assert_eq!(handicap_index(&rounds), Some(Decimal::new(77, 1)));
    }

    #[test]
    fn test_seven_rounds_average_two_best() {
        // Differentials sorted: 4, 6, 8, 10, 12, 14, 16 -> best two avg 5 -> 4.8
        let rounds = vec![
            (76, 72),
            (78, 72),
            (80, 72),
            (82, 72),
            (84, 72),
            (86, 72),
            (88, 72),
        ];
        assert_eq!(handicap_index(&rounds), Some(Decimal::new(48, 1)));
    }

    #[test]
    fn test_negative_differentials_supported() {
        let rounds = vec![(70, 72), (71, 72), (90, 72), (95, 72), (99, 72)];
        // Best differential is -2 -> -1.92 -> -1.9
        assert_eq!(handicap_index(&rounds), Some(Decimal::new(-19, 1)));
    }

    #[test]
    fn test_best_count_step_table() {
        assert_eq!(best_differential_count(4), 0);
        assert_eq!(best_differential_count(5), 1);
        assert_eq!(best_differential_count(6), 1);
        assert_eq!(best_differential_count(7), 2);
        assert_eq!(best_differential_count(8), 2);
        assert_eq!(best_differential_count(9), 3);
        assert_eq!(best_differential_count(11), 3);
        assert_eq!(best_differential_count(12), 4);
        assert_eq!(best_differential_count(14), 4);
        assert_eq!(best_differential_count(15), 5);
        assert_eq!(best_differential_count(16), 5);
        assert_eq!(best_differential_count(17), 6);
        assert_eq!(best_differential_count(18), 6);
        assert_eq!(best_differential_count(19), 7);
        assert_eq!(best_differential_count(20), 8);
        assert_eq!(best_differential_count(40), 8);
    }
}
