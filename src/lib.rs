//! Guesswork - 二十问猜测引擎
//!
//! 通过是/否问题逐步缩小候选实体，按信息增益挑选下一个问题，
//! 并根据玩家反馈调整问题权重、学习新实体。

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;
