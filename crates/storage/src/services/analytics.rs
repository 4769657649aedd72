use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::season::{
    BestRound, ConsistencyAward, HeadToHeadRecord, HeadToHeadReport, ImprovementAward, MvpAward,
    PlayerSeasonStats, SeasonScore, SeasonSummary, SharedGame,
};
use crate::error::Result;
use crate::repository::SeasonRepository;

/// Group a season's scores by player, preserving first-seen traversal order.
/// Award ties are broken by this order, which follows submission time.
fn group_by_player(scores: &[SeasonScore]) -> Vec<(Uuid, Vec<&SeasonScore>)> {
    let mut groups: Vec<(Uuid, Vec<&SeasonScore>)> = Vec::new();
    for score in scores {
        match groups.iter_mut().find(|(id, _)| *id == score.player_id) {
            Some((_, rounds)) => rounds.push(score),
            None => groups.push((score.player_id, vec![score])),
        }
    }
    groups
}

/// Highest season total of base + bonus points. Ties keep the first player in
/// traversal order.
pub fn mvp(scores: &[SeasonScore]) -> Option<MvpAward> {
    group_by_player(scores)
        .into_iter()
        .map(|(player_id, rounds)| {
            let total: i64 = rounds
                .iter()
                .map(|s| i64::from(s.base_points + s.bonus_points))
                .sum();
            (player_id, total)
        })
        .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })
        .map(|(player_id, total_points)| MvpAward {
            player_id,
            total_points,
        })
}

/// Largest positive drop between a player's first-half and second-half scoring
/// averages, chronological split at floor(n/2). Needs at least 4 rounds.
pub fn most_improved(scores: &[SeasonScore]) -> Option<ImprovementAward> {
    let mut best: Option<(Uuid, f64)> = None;

    for (player_id, rounds) in group_by_player(scores) {
        if rounds.len() < 4 {
            continue;
        }

        let split = rounds.len() / 2;
        let first_avg = average(rounds[..split].iter().map(|s| s.raw_score));
        let second_avg = average(rounds[split..].iter().map(|s| s.raw_score));
        let improvement = first_avg - second_avg;

        if improvement > 0.0 && best.is_none_or(|(_, b)| improvement > b) {
            best = Some((player_id, improvement));
        }
    }

    best.map(|(player_id, improvement)| ImprovementAward {
        player_id,
        improvement,
    })
}

/// Lowest population standard deviation of raw scores over the season. Needs
/// at least 3 rounds.
pub fn most_consistent(scores: &[SeasonScore]) -> Option<ConsistencyAward> {
    let mut best: Option<(Uuid, f64)> = None;

    for (player_id, rounds) in group_by_player(scores) {
        if rounds.len() < 3 {
            continue;
        }

        let deviation = population_std_dev(rounds.iter().map(|s| s.raw_score));
        if best.is_none_or(|(_, b)| deviation < b) {
            best = Some((player_id, deviation));
        }
    }

    best.map(|(player_id, std_deviation)| ConsistencyAward {
        player_id,
        std_deviation,
    })
}

/// The single round, across all players, with the lowest score relative to
/// its course par.
pub fn best_round(scores: &[SeasonScore]) -> Option<BestRound> {
    scores
        .iter()
        .reduce(|best, candidate| {
            if candidate.raw_score - candidate.course_par < best.raw_score - best.course_par {
                candidate
            } else {
                best
            }
        })
        .map(|s| BestRound {
            player_id: s.player_id,
            game_id: s.game_id,
            raw_score: s.raw_score,
            to_par: to_par_label(s.raw_score - s.course_par),
        })
}

/// Signed relative-to-par label: "E" for even, otherwise "+n"/"-n".
pub fn to_par_label(diff: i32) -> String {
    match diff {
        0 => "E".to_string(),
        d if d > 0 => format!("+{d}"),
        d => d.to_string(),
    }
}

/// The rounds both players played, in traversal order.
pub fn shared_games(scores: &[SeasonScore], player1: Uuid, player2: Uuid) -> Vec<SharedGame> {
    scores
        .iter()
        .filter(|s| s.player_id == player1)
        .filter_map(|own| {
            scores
                .iter()
                .find(|s| s.player_id == player2 && s.game_id == own.game_id)
                .map(|other| SharedGame {
                    game_id: own.game_id,
                    game_date: own.game_date,
                    player1_score: own.raw_score,
                    player2_score: other.raw_score,
                })
        })
        .collect()
}

/// Per shared round the lower raw score wins; equal raw scores tie.
pub fn head_to_head_record(shared: &[SharedGame]) -> HeadToHeadRecord {
    let mut record = HeadToHeadRecord::default();
    for game in shared {
        match game.player1_score.cmp(&game.player2_score) {
            std::cmp::Ordering::Less => record.player1_wins += 1,
            std::cmp::Ordering::Greater => record.player2_wins += 1,
            std::cmp::Ordering::Equal => record.ties += 1,
        }
    }
    record
}

/// A player's aggregate line for the season.
pub fn player_stats(scores: &[SeasonScore], player_id: Uuid) -> PlayerSeasonStats {
    let rounds: Vec<&SeasonScore> = scores.iter().filter(|s| s.player_id == player_id).collect();

    let total_points: i64 = rounds
        .iter()
        .map(|s| i64::from(s.base_points + s.bonus_points))
        .sum();
    let average_score = if rounds.is_empty() {
        0.0
    } else {
        average(rounds.iter().map(|s| s.raw_score))
    };

    PlayerSeasonStats {
        player_id,
        games_played: rounds.len() as i64,
        average_score,
        total_points,
        best_score: rounds.iter().map(|s| s.raw_score).min(),
    }
}

pub async fn season_summary(pool: &PgPool, season_id: Uuid) -> Result<SeasonSummary> {
    let repo = SeasonRepository::new(pool);
    let scores = repo.season_scores(season_id).await?;

    Ok(SeasonSummary {
        season_id,
        mvp: mvp(&scores),
        most_improved: most_improved(&scores),
        most_consistent: most_consistent(&scores),
        best_round: best_round(&scores),
        total_rounds: repo.count_rounds(season_id).await?,
        total_players: repo.count_participants(season_id).await?,
    })
}

pub async fn head_to_head(
    pool: &PgPool,
    season_id: Uuid,
    player1: Uuid,
    player2: Uuid,
) -> Result<HeadToHeadReport> {
    let scores = SeasonRepository::new(pool).season_scores(season_id).await?;
    let shared = shared_games(&scores, player1, player2);

    Ok(HeadToHeadReport {
        player1_stats: player_stats(&scores, player1),
        player2_stats: player_stats(&scores, player2),
        record: head_to_head_record(&shared),
        shared_games: shared,
    })
}

fn average(values: impl Iterator<Item = i32>) -> f64 {
    let collected: Vec<i32> = values.collect();
    if collected.is_empty() {
        return 0.0;
    }
    collected.iter().map(|&v| f64::from(v)).sum::<f64>() / collected.len() as f64
}

fn population_std_dev(values: impl Iterator<Item = i32>) -> f64 {
    let collected: Vec<f64> = values.map(f64::from).collect();
    let n = collected.len() as f64;
    let mean = collected.iter().sum::<f64>() / n;
    let variance = collected.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn score(player: u128, game: u128, raw: i32, bonus: i32, par: i32) -> SeasonScore {
        SeasonScore {
            score_id: Uuid::new_v4(),
            game_id: Uuid::from_u128(game),
            player_id: Uuid::from_u128(player),
            raw_score: raw,
            base_points: crate::services::points::base_points(raw),
            bonus_points: bonus,
            course_par: par,
            game_date: NaiveDate::from_ymd_opt(2025, 6, 1 + game as u32).unwrap(),
        }
    }

    #[test]
    fn test_empty_season_has_no_awards() {
        assert!(mvp(&[]).is_none());
        assert!(most_improved(&[]).is_none());
        assert!(most_consistent(&[]).is_none());
        assert!(best_round(&[]).is_none());
    }

    #[test]
    fn test_mvp_sums_base_and_bonus() {
        let scores = vec![
            score(1, 1, 80, 0, 72), // 4
            score(2, 1, 78, 1, 72), // 6
            score(1, 2, 85, 1, 72), // 4
            score(2, 2, 95, 0, 72), // 2
        ];
        let award = mvp(&scores).unwrap();
        assert_eq!(award.player_id, Uuid::from_u128(2));
        assert_eq!(award.total_points, 8);
    }

    #[test]
    fn test_mvp_tie_keeps_first_in_traversal_order() {
        let scores = vec![score(1, 1, 80, 0, 72), score(2, 2, 80, 0, 72)];
        assert_eq!(mvp(&scores).unwrap().player_id, Uuid::from_u128(1));
    }

    #[test]
    fn test_most_improved_halves() {
        // First half [90, 85] avg 87.5, second half [70, 68] avg 69 -> 18.5.
        let scores = vec![
            score(1, 1, 90, 0, 72),
            score(1, 2, 85, 0, 72),
            score(1, 3, 70, 0, 72),
            score(1, 4, 68, 0, 72),
        ];
        let award = most_improved(&scores).unwrap();
        assert_eq!(award.player_id, Uuid::from_u128(1));
        assert!((award.improvement - 18.5).abs() < 1e-9);
    }

    #[test]
    fn test_most_improved_needs_four_rounds() {
        let scores = vec![
            score(1, 1, 95, 0, 72),
            score(1, 2, 80, 0, 72),
            score(1, 3, 75, 0, 72),
        ];
        assert!(most_improved(&scores).is_none());
    }

    #[test]
    fn test_most_improved_odd_round_count_splits_at_floor() {
        // floor(5/2) = 2: first half [100, 96], second half [88, 86, 84].
        let scores = vec![
            score(1, 1, 100, 0, 72),
            score(1, 2, 96, 0, 72),
            score(1, 3, 88, 0, 72),
            score(1, 4, 86, 0, 72),
            score(1, 5, 84, 0, 72),
        ];
        let award = most_improved(&scores).unwrap();
        assert!((award.improvement - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_regressing_players_win_nothing() {
        let scores = vec![
            score(1, 1, 80, 0, 72),
            score(1, 2, 82, 0, 72),
            score(1, 3, 90, 0, 72),
            score(1, 4, 95, 0, 72),
        ];
        assert!(most_improved(&scores).is_none());
    }

    #[test]
    fn test_most_consistent_prefers_lowest_deviation() {
        let scores = vec![
            score(1, 1, 80, 0, 72),
            score(1, 2, 80, 0, 72),
            score(1, 3, 80, 0, 72),
            score(2, 1, 70, 0, 72),
            score(2, 2, 90, 0, 72),
            score(2, 3, 110, 0, 72),
        ];
        let award = most_consistent(&scores).unwrap();
        assert_eq!(award.player_id, Uuid::from_u128(1));
        assert!(award.std_deviation.abs() < 1e-9);
    }

    #[test]
    fn test_most_consistent_needs_three_rounds() {
        let scores = vec![score(1, 1, 80, 0, 72), score(1, 2, 80, 0, 72)];
        assert!(most_consistent(&scores).is_none());
    }

    #[test]
    fn test_best_round_is_relative_to_par() {
        let scores = vec![
            score(1, 1, 70, 0, 72), // -2
            score(2, 2, 66, 0, 70), // -4
            score(3, 3, 80, 0, 90), // -10
        ];
        let best = best_round(&scores).unwrap();
        assert_eq!(best.player_id, Uuid::from_u128(3));
        assert_eq!(best.raw_score, 80);
        assert_eq!(best.to_par, "-10");
    }

    #[test]
    fn test_to_par_labels() {
        assert_eq!(to_par_label(0), "E");
        assert_eq!(to_par_label(3), "+3");
        assert_eq!(to_par_label(-2), "-2");
    }

    #[test]
    fn test_head_to_head_record_split() {
        // (72,75) p1, (80,78) p2, (74,74) tie.
        let scores = vec![
            score(1, 1, 72, 0, 72),
            score(2, 1, 75, 0, 72),
            score(1, 2, 80, 0, 72),
            score(2, 2, 78, 0, 72),
            score(1, 3, 74, 0, 72),
            score(2, 3, 74, 0, 72),
        ];
        let shared = shared_games(&scores, Uuid::from_u128(1), Uuid::from_u128(2));
        assert_eq!(shared.len(), 3);

        let record = head_to_head_record(&shared);
        assert_eq!(
            record,
            HeadToHeadRecord {
                player1_wins: 1,
                player2_wins: 1,
                ties: 1
            }
        );
    }

    #[test]
    fn test_head_to_head_ignores_unshared_rounds() {
        let scores = vec![
            score(1, 1, 72, 0, 72),
            score(2, 2, 75, 0, 72),
            score(1, 3, 80, 0, 72),
            score(2, 3, 85, 0, 72),
        ];
        let shared = shared_games(&scores, Uuid::from_u128(1), Uuid::from_u128(2));
        assert_eq!(shared.len(), 1);
        assert_eq!(head_to_head_record(&shared).player1_wins, 1);
    }

    #[test]
    fn test_player_stats_aggregation() {
        let scores = vec![
            score(1, 1, 80, 1, 72), // 4 + 1
            score(1, 2, 90, 0, 72), // 2
            score(2, 1, 85, 0, 72),
        ];
        let stats = player_stats(&scores, Uuid::from_u128(1));
        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.total_points, 7);
        assert_eq!(stats.best_score, Some(80));
        assert!((stats.average_score - 85.0).abs() < 1e-9);
    }
}
