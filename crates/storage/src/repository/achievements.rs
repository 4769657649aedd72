use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Achievement, UserAchievement};

pub struct AchievementRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AchievementRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_catalog(&self) -> Result<Vec<Achievement>> {
        let catalog = sqlx::query_as::<_, Achievement>(
            r#"
            SELECT achievement_id, key, name, description, category, tier
            FROM achievements
            ORDER BY category, tier, key
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(catalog)
    }

    pub async fn earned_by_player(&self, player_id: Uuid) -> Result<Vec<UserAchievement>> {
        let earned = sqlx::query_as::<_, UserAchievement>(
            r#"
            SELECT user_achievement_id, player_id, achievement_id, season_id, earned_at
            FROM user_achievements
            WHERE player_id = $1
            ORDER BY earned_at
            "#,
        )
        .bind(player_id)
        .fetch_all(self.pool)
        .await?;

        Ok(earned)
    }

    /// Record an earning. Re-awarding an already-earned (player, achievement,
    /// scope) is a no-op; returns whether a new record was created.
    pub async fn award(
        &self,
        player_id: Uuid,
        achievement_id: Uuid,
        season_id: Option<Uuid>,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_achievements (player_id, achievement_id, season_id)
            VALUES ($1, $2, $3)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(player_id)
        .bind(achievement_id)
        .bind(season_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
