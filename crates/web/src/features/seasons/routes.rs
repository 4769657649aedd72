use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{get_head_to_head, get_leaderboard, get_summary};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/:season_id/leaderboard", get(get_leaderboard))
        .route("/:season_id/summary", get(get_summary))
        .route("/:season_id/head-to-head", get(get_head_to_head))
}
