use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{delete_score, edit_score, preview_submission, recalculate_bonus, submit_score};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(submit_score))
        .route("/:score_id", put(edit_score))
        .route("/:score_id", delete(delete_score))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/preview", get(preview_submission))
        .merge(protected)
}

pub fn game_routes(api_keys: ApiKeys) -> Router<Database> {
    Router::new()
        .route("/:game_id/recalculate-bonus", post(recalculate_bonus))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
