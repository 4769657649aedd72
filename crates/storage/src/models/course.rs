use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub course_id: Uuid,
    pub name: String,
    pub par: i32,
    pub created_at: NaiveDateTime,
}
