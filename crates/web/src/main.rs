use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;

use config::Config;
use middleware::auth::ApiKeys;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::scores::handlers::submit_score,
        features::scores::handlers::preview_submission,
        features::scores::handlers::edit_score,
        features::scores::handlers::delete_score,
        features::scores::handlers::recalculate_bonus,
        features::players::handlers::get_handicap,
        features::players::handlers::check_achievements,
        features::players::handlers::list_achievements,
        features::seasons::handlers::get_leaderboard,
        features::seasons::handlers::get_summary,
        features::seasons::handlers::get_head_to_head,
    ),
    components(
        schemas(
            storage::dto::score::SubmitScoreRequest,
            storage::dto::score::EditScoreRequest,
            storage::dto::score::SubmissionResult,
            storage::dto::score::SubmissionPreview,
            storage::dto::score::RecalculationReport,
            storage::dto::score::FailedBonusUpdate,
            storage::dto::player::HandicapResponse,
            storage::dto::player::AchievementCheckResponse,
            storage::dto::leaderboard::LeaderboardEntry,
            storage::dto::season::SeasonSummary,
            storage::dto::season::MvpAward,
            storage::dto::season::ImprovementAward,
            storage::dto::season::ConsistencyAward,
            storage::dto::season::BestRound,
            storage::dto::season::HeadToHeadReport,
            storage::dto::season::PlayerSeasonStats,
            storage::dto::season::SharedGame,
            storage::dto::season::HeadToHeadRecord,
            storage::models::Score,
            storage::models::Game,
            storage::models::GameStatus,
            storage::models::Course,
            storage::models::Season,
            storage::models::Player,
            storage::models::Achievement,
            storage::models::AchievementCategory,
            storage::models::UserAchievement,
        )
    ),
    tags(
        (name = "scores", description = "Score submission and bonus arbitration"),
        (name = "players", description = "Handicap and achievement endpoints"),
        (name = "seasons", description = "Season analytics endpoints"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting league scoring API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/scores", features::scores::routes(api_keys.clone()))
        .nest("/api/games", features::scores::game_routes(api_keys.clone()))
        .nest("/api/players", features::players::routes(api_keys))
        .nest("/api/seasons", features::seasons::routes())
        .layer(CorsLayer::permissive())
        .with_state(db);

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;

    tracing::info!("Listening at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
