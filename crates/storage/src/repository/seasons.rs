use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::leaderboard::LeaderboardEntry;
use crate::dto::season::SeasonScore;
use crate::error::Result;

pub struct SeasonRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SeasonRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn is_participant(&self, season_id: Uuid, player_id: Uuid) -> Result<bool> {
        let enrolled = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM season_players WHERE season_id = $1 AND player_id = $2)",
        )
        .bind(season_id)
        .bind(player_id)
        .fetch_one(self.pool)
        .await?;

        Ok(enrolled)
    }

    /// Season standings: total points descending, with games played.
    pub async fn leaderboard(&self, season_id: Uuid) -> Result<Vec<LeaderboardEntry>> {
        let entries = sqlx::query_as::<_, LeaderboardEntry>(
            r#"
            SELECT p.player_id, p.display_name,
                   COUNT(s.score_id) AS games_played,
                   COALESCE(SUM(s.base_points + s.bonus_points), 0) AS total_points
            FROM season_players sp
            INNER JOIN players p ON sp.player_id = p.player_id
            LEFT JOIN games g ON g.season_id = sp.season_id
            LEFT JOIN scores s ON s.game_id = g.game_id AND s.player_id = p.player_id
            WHERE sp.season_id = $1
            GROUP BY p.player_id, p.display_name
            ORDER BY total_points DESC, games_played DESC
            "#,
        )
        .bind(season_id)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    /// Every score in every round of a season, annotated with par and date.
    /// Ordered by submission time; awards break ties by this traversal order.
    pub async fn season_scores(&self, season_id: Uuid) -> Result<Vec<SeasonScore>> {
        let scores = sqlx::query_as::<_, SeasonScore>(
            r#"
            SELECT s.score_id, s.game_id, s.player_id, s.raw_score, s.base_points,
                   s.bonus_points, c.par AS course_par, g.game_date
            FROM scores s
            INNER JOIN games g ON s.game_id = g.game_id
            INNER JOIN courses c ON g.course_id = c.course_id
            WHERE g.season_id = $1
            ORDER BY s.submitted_at
            "#,
        )
        .bind(season_id)
        .fetch_all(self.pool)
        .await?;

        Ok(scores)
    }

    pub async fn count_rounds(&self, season_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM games WHERE season_id = $1",
        )
        .bind(season_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    pub async fn count_participants(&self, season_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM season_players WHERE season_id = $1",
        )
        .bind(season_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }
}
