use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Player;

pub struct PlayerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PlayerRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, player_id: Uuid) -> Result<Player> {
        let player = sqlx::query_as::<_, Player>(
            r#"
            SELECT player_id, display_name, handicap_index, created_at
            FROM players
            WHERE player_id = $1
            "#,
        )
        .bind(player_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(player)
    }

    pub async fn update_handicap(&self, player_id: Uuid, handicap: Option<Decimal>) -> Result<()> {
        let result = sqlx::query("UPDATE players SET handicap_index = $2 WHERE player_id = $1")
            .bind(player_id)
            .bind(handicap)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
