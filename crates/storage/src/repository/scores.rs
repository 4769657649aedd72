use sqlx::PgExecutor;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{PlayerRound, Score};

const SCORE_COLUMNS: &str = "score_id, game_id, player_id, raw_score, base_points, \
     bonus_points, notes, submitted_at, edited_by, edited_at";

/// Round-score persistence. Methods take any executor so the submission
/// coordinator can run them on the connection holding the round lock; plain
/// reads pass the pool.
pub struct ScoreRepository;

impl ScoreRepository {
    pub async fn find_by_id(executor: impl PgExecutor<'_>, score_id: Uuid) -> Result<Score> {
        let score = sqlx::query_as::<_, Score>(&format!(
            "SELECT {SCORE_COLUMNS} FROM scores WHERE score_id = $1"
        ))
        .bind(score_id)
        .fetch_optional(executor)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(score)
    }

    /// The complete current score set for one round.
    pub async fn list_for_game(executor: impl PgExecutor<'_>, game_id: Uuid) -> Result<Vec<Score>> {
        let scores = sqlx::query_as::<_, Score>(&format!(
            "SELECT {SCORE_COLUMNS} FROM scores WHERE game_id = $1 ORDER BY submitted_at"
        ))
        .bind(game_id)
        .fetch_all(executor)
        .await?;

        Ok(scores)
    }

    pub async fn exists_for_game_and_player(
        executor: impl PgExecutor<'_>,
        game_id: Uuid,
        player_id: Uuid,
    ) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM scores WHERE game_id = $1 AND player_id = $2)",
        )
        .bind(game_id)
        .bind(player_id)
        .fetch_one(executor)
        .await?;

        Ok(exists)
    }

    pub async fn insert(
        executor: impl PgExecutor<'_>,
        game_id: Uuid,
        player_id: Uuid,
        raw_score: i32,
        base_points: i32,
        bonus_points: i32,
        notes: Option<&str>,
    ) -> Result<Score> {
        let score = sqlx::query_as::<_, Score>(&format!(
            r#"
            INSERT INTO scores (game_id, player_id, raw_score, base_points, bonus_points, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {SCORE_COLUMNS}
            "#
        ))
        .bind(game_id)
        .bind(player_id)
        .bind(raw_score)
        .bind(base_points)
        .bind(bonus_points)
        .bind(notes)
        .fetch_one(executor)
        .await?;

        Ok(score)
    }

    pub async fn update(
        executor: impl PgExecutor<'_>,
        score_id: Uuid,
        raw_score: i32,
        base_points: i32,
        notes: Option<&str>,
        edited_by: Uuid,
    ) -> Result<Score> {
        let score = sqlx::query_as::<_, Score>(&format!(
            r#"
            UPDATE scores
            SET raw_score = $2, base_points = $3, notes = $4, edited_by = $5, edited_at = NOW()
            WHERE score_id = $1
            RETURNING {SCORE_COLUMNS}
            "#
        ))
        .bind(score_id)
        .bind(raw_score)
        .bind(base_points)
        .bind(notes)
        .bind(edited_by)
        .fetch_optional(executor)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(score)
    }

    pub async fn set_bonus(
        executor: impl PgExecutor<'_>,
        score_id: Uuid,
        bonus_points: i32,
    ) -> Result<()> {
        let result = sqlx::query("UPDATE scores SET bonus_points = $2 WHERE score_id = $1")
            .bind(score_id)
            .bind(bonus_points)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    pub async fn delete(executor: impl PgExecutor<'_>, score_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM scores WHERE score_id = $1")
            .bind(score_id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// A player's history in chronological submission order, each score
    /// annotated with its round's par, date and season.
    pub async fn history_for_player(
        executor: impl PgExecutor<'_>,
        player_id: Uuid,
        season_id: Option<Uuid>,
    ) -> Result<Vec<PlayerRound>> {
        let base = r#"
            SELECT s.score_id, s.game_id, g.season_id, s.raw_score, s.base_points,
                   s.bonus_points, c.par AS course_par, g.game_date, s.submitted_at
            FROM scores s
            INNER JOIN games g ON s.game_id = g.game_id
            INNER JOIN courses c ON g.course_id = c.course_id
            WHERE s.player_id = $1
        "#;

        let rounds = if let Some(season_id) = season_id {
            sqlx::query_as::<_, PlayerRound>(&format!(
                "{base} AND g.season_id = $2 ORDER BY s.submitted_at"
            ))
            .bind(player_id)
            .bind(season_id)
            .fetch_all(executor)
            .await?
        } else {
            sqlx::query_as::<_, PlayerRound>(&format!("{base} ORDER BY s.submitted_at"))
                .bind(player_id)
                .fetch_all(executor)
                .await?
        };

        Ok(rounds)
    }
}
