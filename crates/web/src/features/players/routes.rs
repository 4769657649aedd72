use axum::{
    Router, middleware,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{check_achievements, get_handicap, list_achievements};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/:player_id/achievements/check", post(check_achievements))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/:player_id/handicap", get(get_handicap))
        .route("/:player_id/achievements", get(list_achievements))
        .merge(protected)
}
