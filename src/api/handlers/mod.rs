//! Handlers 模块
//!
//! HTTP 请求处理程序。

pub mod admin_handler;
pub mod game_handler;

pub use admin_handler::*;
pub use game_handler::*;
