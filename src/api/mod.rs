//! API 模块
//!
//! 提供 REST API 支持。

pub mod app_state;
pub mod dto;
pub mod handlers;
pub mod routes;

use crate::api::app_state::AppState;
use crate::error::AppError;
use axum::{Router, http::HeaderValue};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// 根据配置的来源构建 CORS 层；无法解析的来源会被忽略
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin {}: {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn create_router(app_state: AppState, cors_origins: &[String]) -> Router {
    let api = Router::new()
        .merge(routes::game_routes::create_game_router())
        .merge(routes::admin_routes::create_admin_router());

    Router::new()
        .nest("/api/v1", api)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

pub async fn initialize_api(app_state: AppState, cors_origins: &[String]) -> Result<Router, AppError> {
    tracing::info!("Initializing API router...");
    Ok(create_router(app_state, cors_origins))
}
