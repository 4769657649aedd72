use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::GameRound;

pub struct GameRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> GameRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch a game joined with its course par.
    pub async fn find_round(&self, game_id: Uuid) -> Result<GameRound> {
        let round = sqlx::query_as::<_, GameRound>(
            r#"
            SELECT g.game_id, g.season_id, g.game_date, g.status, c.par AS course_par
            FROM games g
            INNER JOIN courses c ON g.course_id = c.course_id
            WHERE g.game_id = $1
            "#,
        )
        .bind(game_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(round)
    }
}
