//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::Router;
use promo_cache::{RedisPool, RedisPoolConfig};
use promo_common::{AppConfig, AppError, JwtService};
use promo_db::{
    create_pool, PgCommentRepository, PgCompanyRepository, PgPromoRepository, PgUserRepository,
};
use promo_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health probes are merged outside the rate limiter so orchestrators
/// can poll them freely.
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    let health = apply_middleware(health_routes());

    api.merge(health).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = promo_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Create Redis pool
    info!("Connecting to Redis...");
    let redis_config = RedisPoolConfig::from(&config.redis);
    let redis_pool = RedisPool::new(redis_config)
        .map_err(|e| AppError::Cache(e.to_string()))?;
    let shared_redis = Arc::new(redis_pool);
    info!("Redis connection established");

    // Create JWT service
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.token_expiry,
    ));

    // Create repositories
    let company_repo = Arc::new(PgCompanyRepository::new(pool.clone()));
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let promo_repo = Arc::new(PgPromoRepository::new(pool.clone()));
    let comment_repo = Arc::new(PgCommentRepository::new(pool.clone()));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .redis_pool(shared_redis)
        .company_repo(company_repo)
        .user_repo(user_repo)
        .promo_repo(promo_repo)
        .comment_repo(comment_repo)
        .jwt_service(jwt_service)
        .activation(config.activation.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let host: IpAddr = config
        .server
        .host
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid server host {:?}: {}", config.server.host, e)))?;
    let addr = SocketAddr::from((host, config.server.port));

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
