//! Admin Routes

use axum::{Router, routing::get};

use crate::api::app_state::AppState;
use crate::api::handlers::admin_handler::*;

/// 创建管理路由器
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/debug", get(debug_snapshot))
        .route("/admin/data", get(admin_data))
}
