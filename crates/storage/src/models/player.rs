use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Player {
    pub player_id: Uuid,
    pub display_name: String,
    /// Stored copy of the latest computed handicap index. Always superseded by
    /// a fresh computation when requested; None means not yet ratable.
    pub handicap_index: Option<Decimal>,
    pub created_at: NaiveDateTime,
}
