//! API routes

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod entity_types;
pub mod health;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{auth::require_auth, state::AppState};

/// Create all API routes
pub fn create_router(state: AppState) -> Router {
    // Health check routes (at root level for infrastructure monitoring)
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness));

    // Public API routes (no auth required)
    let public_api_routes = Router::new().route("/auth/login", post(auth::login));

    // Protected API routes (auth required)
    let protected_api_routes = Router::new()
        .route("/auth/me", get(auth::me))
        // Configuration views
        .route("/config", get(config::get_full_config))
        .route("/config/llm", get(config::get_llm_config))
        .route("/config/llm/status", get(config::get_llm_status))
        .route("/config/embedder", get(config::get_embedder_config))
        .route("/config/embedder/status", get(config::get_embedder_status))
        // Dashboard
        .route("/dashboard/stats", get(dashboard::get_stats))
        .route("/dashboard/status", get(dashboard::get_service_status))
        .route("/dashboard/queue", get(dashboard::get_queue_status))
        // Entity-type management (proxied to the MCP server)
        .route("/entity-types", get(entity_types::list_entity_types))
        .route("/entity-types", post(entity_types::create_entity_type))
        .route("/entity-types/reset", post(entity_types::reset_entity_types))
        .route("/entity-types/:name", get(entity_types::get_entity_type))
        .route("/entity-types/:name", put(entity_types::update_entity_type))
        .route("/entity-types/:name", delete(entity_types::delete_entity_type))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let api_routes = Router::new()
        .merge(public_api_routes)
        .merge(protected_api_routes);

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        // Admin UI is served from a separate origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}
