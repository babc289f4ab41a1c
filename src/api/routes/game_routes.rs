//! Game Routes
//!
//! 定义猜测游戏相关的 API 路由。

use axum::{Router, routing::post};

use crate::api::app_state::AppState;
use crate::api::handlers::game_handler::*;

/// 创建游戏路由器
pub fn create_game_router() -> Router<AppState> {
    Router::new()
        .route("/predict", post(predict))
        .route("/candidates", post(candidates))
        .route("/feedback", post(feedback))
        .route("/questions", post(add_question))
        .route("/add-question", post(add_question_by_query))
}
