use chrono::NaiveTime;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::leaderboard::LeaderboardEntry;
use crate::error::Result;
use crate::models::PlayerRound;
use crate::repository::{AchievementRepository, ScoreRepository, SeasonRepository};

/// How a rule fires. Each achievement in the catalog is data plus one of these
/// variants; adding an achievement means a seed row and a `Rule` entry, not a
/// new branch in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Total games played reached this count.
    GamesPlayed(usize),
    /// Cumulative points in the season in scope.
    SeasonPoints(i64),
    /// First round holding any bonus point.
    FirstBonus,
    /// Bonus point in this many consecutive rounds, walking history in
    /// chronological order.
    BonusStreak(usize),
    /// Any round strictly under the course par.
    UnderPar,
    /// This many bonus-earning rounds within the season in scope.
    SeasonBonusRounds(usize),
    /// Any score submitted within 24 hours of its round's calendar date.
    PromptSubmission,
    /// Spread of the most recent `window` rounds below `max_spread` strokes.
    ConsistentScoring { window: usize, max_spread: i32 },
    /// Current position on the season leaderboard (1-based).
    SeasonRank(usize),
    /// Played every round anyone in the season played.
    PerfectAttendance,
}

impl Trigger {
    /// Season-scoped triggers are evaluated against the season subset and are
    /// skipped entirely when no season is in scope.
    pub fn is_season_scoped(&self) -> bool {
        matches!(
            self,
            Trigger::SeasonPoints(_)
                | Trigger::SeasonBonusRounds(_)
                | Trigger::SeasonRank(_)
                | Trigger::PerfectAttendance
        )
    }
}

pub struct Rule {
    pub key: &'static str,
    pub trigger: Trigger,
}

/// Rule logic for the seeded catalog, joined to the DB rows by key.
pub fn rule_catalog() -> &'static [Rule] {
    static RULES: &[Rule] = &[
        Rule { key: "first_round", trigger: Trigger::GamesPlayed(1) },
        Rule { key: "rounds_5", trigger: Trigger::GamesPlayed(5) },
        Rule { key: "rounds_10", trigger: Trigger::GamesPlayed(10) },
        Rule { key: "rounds_25", trigger: Trigger::GamesPlayed(25) },
        Rule { key: "rounds_50", trigger: Trigger::GamesPlayed(50) },
        Rule { key: "season_points_50", trigger: Trigger::SeasonPoints(50) },
        Rule { key: "season_points_100", trigger: Trigger::SeasonPoints(100) },
        Rule { key: "season_points_200", trigger: Trigger::SeasonPoints(200) },
        Rule { key: "first_bonus", trigger: Trigger::FirstBonus },
        Rule { key: "bonus_streak_3", trigger: Trigger::BonusStreak(3) },
        Rule { key: "bonus_streak_5", trigger: Trigger::BonusStreak(5) },
        Rule { key: "under_par", trigger: Trigger::UnderPar },
        Rule { key: "season_bonus_5", trigger: Trigger::SeasonBonusRounds(5) },
        Rule { key: "prompt_submission", trigger: Trigger::PromptSubmission },
        Rule {
            key: "steady_hands",
            trigger: Trigger::ConsistentScoring { window: 5, max_spread: 5 },
        },
        Rule { key: "season_champion", trigger: Trigger::SeasonRank(1) },
        Rule { key: "season_runner_up", trigger: Trigger::SeasonRank(2) },
        Rule { key: "season_third", trigger: Trigger::SeasonRank(3) },
        Rule { key: "perfect_attendance", trigger: Trigger::PerfectAttendance },
    ];
    RULES
}

/// Season-scoped evaluation inputs: the player's rounds within the season and
/// the season leaderboard.
pub struct SeasonContext<'a> {
    pub season_id: Uuid,
    pub rounds: &'a [PlayerRound],
    pub leaderboard: &'a [LeaderboardEntry],
}

/// Evaluate one trigger against a player's chronological all-time history and,
/// where scoped, the season context. Pure; earning state lives elsewhere.
pub fn evaluate(
    trigger: &Trigger,
    player_id: Uuid,
    history: &[PlayerRound],
    season: Option<&SeasonContext<'_>>,
) -> bool {
    match *trigger {
        Trigger::GamesPlayed(count) => history.len() >= count,

        Trigger::SeasonPoints(points) => season.is_some_and(|ctx| {
            let total: i64 = ctx.rounds.iter().map(|r| i64::from(r.total_points())).sum();
            total >= points
        }),

        Trigger::FirstBonus => history.iter().any(|r| r.bonus_points > 0),

        Trigger::BonusStreak(length) => {
            let mut run = 0usize;
            for round in history {
                if round.bonus_points > 0 {
                    run += 1;
                    if run >= length {
                        return true;
                    }
                } else {
                    run = 0;
                }
            }
            false
        }

        Trigger::UnderPar => history.iter().any(|r| r.raw_score < r.course_par),

        Trigger::SeasonBonusRounds(count) => season.is_some_and(|ctx| {
            ctx.rounds.iter().filter(|r| r.bonus_points > 0).count() >= count
        }),

        Trigger::PromptSubmission => history.iter().any(|r| {
            let round_start = r.game_date.and_time(NaiveTime::MIN);
            (r.submitted_at - round_start).num_seconds().abs() <= 24 * 60 * 60
        }),

        Trigger::ConsistentScoring { window, max_spread } => {
            if history.len() < window {
                return false;
            }
            let recent = &history[history.len() - window..];
            let max = recent.iter().map(|r| r.raw_score).max().unwrap_or(0);
            let min = recent.iter().map(|r| r.raw_score).min().unwrap_or(0);
            max - min < max_spread
        }

        Trigger::SeasonRank(rank) => season.is_some_and(|ctx| {
            ctx.leaderboard
                .iter()
                .position(|e| e.player_id == player_id)
                == Some(rank - 1)
        }),

        Trigger::PerfectAttendance => season.is_some_and(|ctx| {
            let most_played = ctx
                .leaderboard
                .iter()
                .map(|e| e.games_played)
                .max()
                .unwrap_or(0);
            ctx.leaderboard
                .iter()
                .find(|e| e.player_id == player_id)
                .is_some_and(|e| e.games_played > 0 && e.games_played == most_played)
        }),
    }
}

/// Run the whole catalog for a player and record anything newly earned.
/// Earning is terminal; re-awarding an already-earned (player, achievement,
/// scope) is a silent no-op. Returns the keys earned by this pass.
pub async fn check_and_award_achievements(
    pool: &PgPool,
    player_id: Uuid,
    season_id: Option<Uuid>,
) -> Result<Vec<String>> {
    let history = ScoreRepository::history_for_player(pool, player_id, None).await?;

    let (season_rounds, leaderboard) = match season_id {
        Some(sid) => (
            ScoreRepository::history_for_player(pool, player_id, Some(sid)).await?,
            SeasonRepository::new(pool).leaderboard(sid).await?,
        ),
        None => (Vec::new(), Vec::new()),
    };
    let season_ctx = season_id.map(|sid| SeasonContext {
        season_id: sid,
        rounds: &season_rounds,
        leaderboard: &leaderboard,
    });

    let repo = AchievementRepository::new(pool);
    let mut newly_earned = Vec::new();

    for achievement in repo.list_catalog().await? {
        let Some(rule) = rule_catalog().iter().find(|r| r.key == achievement.key) else {
            tracing::warn!(key = %achievement.key, "No rule registered for catalog achievement");
            continue;
        };

        let scope = if rule.trigger.is_season_scoped() {
            match &season_ctx {
                Some(ctx) => Some(ctx.season_id),
                None => continue,
            }
        } else {
            None
        };

        if !evaluate(&rule.trigger, player_id, &history, season_ctx.as_ref()) {
            continue;
        }

        if repo.award(player_id, achievement.achievement_id, scope).await? {
            tracing::info!(
                player_id = %player_id,
                key = %achievement.key,
                "Achievement earned"
            );
            newly_earned.push(achievement.key);
        }
    }

    Ok(newly_earned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn round(raw: i32, par: i32, bonus: i32, day: u32) -> PlayerRound {
        let game_date = NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
        PlayerRound {
            score_id: Uuid::new_v4(),
            game_id: Uuid::new_v4(),
            season_id: Uuid::from_u128(7),
            raw_score: raw,
            base_points: crate::services::points::base_points(raw),
            bonus_points: bonus,
            course_par: par,
            game_date,
            submitted_at: game_date.and_hms_opt(18, 0, 0).unwrap(),
        }
    }

    fn entry(player_id: Uuid, games_played: i64, total_points: i64) -> LeaderboardEntry {
        LeaderboardEntry {
            player_id,
            display_name: String::new(),
            games_played,
            total_points,
        }
    }

    #[test]
    fn test_games_played_threshold() {
        let player = Uuid::from_u128(1);
        let history: Vec<PlayerRound> = (1..=5).map(|d| round(90, 72, 0, d)).collect();
        assert!(evaluate(&Trigger::GamesPlayed(5), player, &history, None));
        assert!(!evaluate(&Trigger::GamesPlayed(6), player, &history, None));
    }

    #[test]
    fn test_bonus_streak_resets_on_miss() {
        let player = Uuid::from_u128(1);
        let history = vec![
            round(80, 72, 1, 1),
            round(80, 72, 1, 2),
            round(80, 72, 0, 3),
            round(80, 72, 1, 4),
            round(80, 72, 1, 5),
        ];
        assert!(!evaluate(&Trigger::BonusStreak(3), player, &history, None));

        let unbroken = vec![
            round(80, 72, 1, 1),
            round(80, 72, 1, 2),
            round(80, 72, 1, 3),
        ];
        assert!(evaluate(&Trigger::BonusStreak(3), player, &unbroken, None));
    }

    #[test]
    fn test_under_par_requires_strictly_below() {
        let player = Uuid::from_u128(1);
        let at_par = vec![round(72, 72, 0, 1)];
        assert!(!evaluate(&Trigger::UnderPar, player, &at_par, None));

        let below = vec![round(71, 72, 0, 1)];
        assert!(evaluate(&Trigger::UnderPar, player, &below, None));
    }

    #[test]
    fn test_consistent_scoring_looks_at_last_five_only() {
        let player = Uuid::from_u128(1);
        let trigger = Trigger::ConsistentScoring { window: 5, max_spread: 5 };

        // Wild early round, tight last five.
        let mut history = vec![round(110, 72, 0, 1)];
        history.extend((2..=6).map(|d| round(84 + (d as i32 % 3), 72, 0, d)));
        assert!(evaluate(&trigger, player, &history, None));

        // Spread of exactly 5 does not qualify.
        let spread_five = vec![
            round(80, 72, 0, 1),
            round(85, 72, 0, 2),
            round(82, 72, 0, 3),
            round(83, 72, 0, 4),
            round(81, 72, 0, 5),
        ];
        assert!(!evaluate(&trigger, player, &spread_five, None));
    }

    #[test]
    fn test_consistent_scoring_needs_full_window() {
        let player = Uuid::from_u128(1);
        let trigger = Trigger::ConsistentScoring { window: 5, max_spread: 5 };
        let history: Vec<PlayerRound> = (1..=4).map(|d| round(80, 72, 0, d)).collect();
        assert!(!evaluate(&trigger, player, &history, None));
    }

    #[test]
    fn test_prompt_submission_within_a_day() {
        let player = Uuid::from_u128(1);
        let mut prompt = round(90, 72, 0, 10);
        prompt.submitted_at = prompt.game_date.and_hms_opt(23, 0, 0).unwrap();
        assert!(evaluate(&Trigger::PromptSubmission, player, &[prompt], None));

        let mut late = round(90, 72, 0, 10);
        late.submitted_at = NaiveDate::from_ymd_opt(2025, 6, 13)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        assert!(!evaluate(&Trigger::PromptSubmission, player, &[late], None));
    }

    #[test]
    fn test_season_scoped_triggers_need_season_context() {
        let player = Uuid::from_u128(1);
        let history: Vec<PlayerRound> = (1..=10).map(|d| round(70, 72, 1, d)).collect();
        assert!(!evaluate(&Trigger::SeasonPoints(10), player, &history, None));
        assert!(!evaluate(&Trigger::SeasonRank(1), player, &history, None));
    }

    #[test]
    fn test_season_points_sum_base_and_bonus() {
        let player = Uuid::from_u128(1);
        let rounds: Vec<PlayerRound> = (1..=8).map(|d| round(74, 72, 1, d)).collect();
        let leaderboard = vec![entry(player, 8, 56)];
        let ctx = SeasonContext {
            season_id: Uuid::from_u128(7),
            rounds: &rounds,
            leaderboard: &leaderboard,
        };
        // 8 rounds at 6 base + 1 bonus = 56 points.
        assert!(evaluate(&Trigger::SeasonPoints(50), player, &rounds, Some(&ctx)));
        assert!(!evaluate(&Trigger::SeasonPoints(100), player, &rounds, Some(&ctx)));
    }

    #[test]
    fn test_season_rank_positions() {
        let first = Uuid::from_u128(1);
        let second = Uuid::from_u128(2);
        let leaderboard = vec![entry(first, 5, 40), entry(second, 5, 30)];
        let ctx = SeasonContext {
            season_id: Uuid::from_u128(7),
            rounds: &[],
            leaderboard: &leaderboard,
        };
        assert!(evaluate(&Trigger::SeasonRank(1), first, &[], Some(&ctx)));
        assert!(!evaluate(&Trigger::SeasonRank(1), second, &[], Some(&ctx)));
        assert!(evaluate(&Trigger::SeasonRank(2), second, &[], Some(&ctx)));
    }

    #[test]
    fn test_perfect_attendance_matches_season_maximum() {
        let everywhere = Uuid::from_u128(1);
        let sometimes = Uuid::from_u128(2);
        let leaderboard = vec![entry(everywhere, 10, 40), entry(sometimes, 7, 45)];
        let ctx = SeasonContext {
            season_id: Uuid::from_u128(7),
            rounds: &[],
            leaderboard: &leaderboard,
        };
        assert!(evaluate(&Trigger::PerfectAttendance, everywhere, &[], Some(&ctx)));
        assert!(!evaluate(&Trigger::PerfectAttendance, sometimes, &[], Some(&ctx)));
    }

    #[test]
    fn test_perfect_attendance_needs_at_least_one_game() {
        let player = Uuid::from_u128(1);
        let leaderboard = vec![entry(player, 0, 0)];
        let ctx = SeasonContext {
            season_id: Uuid::from_u128(7),
            rounds: &[],
            leaderboard: &leaderboard,
        };
        assert!(!evaluate(&Trigger::PerfectAttendance, player, &[], Some(&ctx)));
    }

    #[test]
    fn test_every_seeded_key_has_a_rule() {
        // Keys seeded by the 0002 migration.
        let seeded = [
            "first_round",
            "rounds_5",
            "rounds_10",
            "rounds_25",
            "rounds_50",
            "season_points_50",
            "season_points_100",
            "season_points_200",
            "first_bonus",
            "bonus_streak_3",
            "bonus_streak_5",
            "under_par",
            "season_bonus_5",
            "prompt_submission",
            "steady_hands",
            "season_champion",
            "season_runner_up",
            "season_third",
            "perfect_attendance",
        ];
        for key in seeded {
            assert!(
                rule_catalog().iter().any(|r| r.key == key),
                "missing rule for {key}"
            );
        }
    }
}
