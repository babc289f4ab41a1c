//! 可观测性模块
//!
//! 提供 Prometheus 文本格式指标、结构化日志和健康检查。

use axum::{Json, Router, response::IntoResponse, routing::get};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::config::LoggingConfig;

// ===== Game Metrics =====

/// 游戏指标
#[derive(Default)]
pub struct GameMetrics {
    pub predictions_total: AtomicU64,
    pub guesses_total: AtomicU64,
    pub questions_served_total: AtomicU64,
    pub give_ups_total: AtomicU64,
    pub feedback_correct_total: AtomicU64,
    pub feedback_incorrect_total: AtomicU64,
    pub questions_added_total: AtomicU64,
    pub persistence_errors_total: AtomicU64,
}

impl GameMetrics {
    /// 记录一次预测请求的结果
    pub fn record_round(&self, guessed: bool, served_question: bool) {
        self.predictions_total.fetch_add(1, Ordering::Relaxed);
        if guessed {
            self.guesses_total.fetch_add(1, Ordering::Relaxed);
        } else if served_question {
            self.questions_served_total.fetch_add(1, Ordering::Relaxed);
        } else {
            self.give_ups_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// 记录反馈
    pub fn record_feedback(&self, correct: bool) {
        let counter = if correct {
            &self.feedback_correct_total
        } else {
            &self.feedback_incorrect_total
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_question_added(&self) {
        self.questions_added_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_persistence_error(&self) {
        self.persistence_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// 生成 Prometheus 格式指标
    pub fn gather(&self) -> String {
        let counters = [
            ("guesswork_predictions_total", "Total predict rounds", &self.predictions_total),
            ("guesswork_guesses_total", "Rounds that ended with a committed guess", &self.guesses_total),
            ("guesswork_questions_served_total", "Rounds that returned a next question", &self.questions_served_total),
            ("guesswork_give_ups_total", "Rounds with neither a guess nor a question", &self.give_ups_total),
            ("guesswork_feedback_correct_total", "Feedback confirming a guess", &self.feedback_correct_total),
            ("guesswork_feedback_incorrect_total", "Feedback denying a guess", &self.feedback_incorrect_total),
            ("guesswork_questions_added_total", "Questions added to the bank", &self.questions_added_total),
            ("guesswork_persistence_errors_total", "Failed state writes", &self.persistence_errors_total),
        ];

        counters
            .iter()
            .map(|(name, help, counter)| {
                format!(
                    "# HELP {name} {help}\n# TYPE {name} counter\n{name} {}\n",
                    counter.load(Ordering::Relaxed)
                )
            })
            .collect()
    }
}

// ===== Health Check =====

/// 健康检查状态
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: f64,
    pub checks: Vec<HealthCheck>,
}

/// 单个健康检查项
#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: String,
    pub message: Option<String>,
    pub latency_ms: Option<u64>,
}

/// 健康检查结果
#[derive(Clone)]
pub struct HealthCheckResult {
    pub name: String,
    pub healthy: bool,
    pub message: String,
    pub latency_ms: u64,
}

/// 可观测性状态
pub struct ObservabilityState {
    pub metrics: GameMetrics,
    pub health_checks: Mutex<Vec<HealthCheckResult>>,
    pub start_time: DateTime<Utc>,
    pub version: String,
}

impl ObservabilityState {
    pub fn new(version: String) -> Self {
        Self {
            metrics: GameMetrics::default(),
            health_checks: Mutex::new(Vec::new()),
            start_time: Utc::now(),
            version,
        }
    }

    /// 添加健康检查结果
    pub async fn add_health_check(&self, result: HealthCheckResult) {
        let mut checks = self.health_checks.lock().await;
        checks.push(result);
        if checks.len() > 10 {
            checks.remove(0);
        }
    }

    /// 获取应用正常运行时间
    pub fn uptime_seconds(&self) -> f64 {
        (Utc::now() - self.start_time).num_seconds() as f64
    }
}

// ===== Health Check Handlers =====

/// 获取完整健康状态
pub async fn health_check(
    state: axum::extract::State<Arc<ObservabilityState>>,
) -> impl IntoResponse {
    let checks = state.health_checks.lock().await;
    let all_healthy = checks.iter().all(|c| c.healthy);

    let health_status = HealthStatus {
        status: if all_healthy {
            "healthy".to_string()
        } else {
            "unhealthy".to_string()
        },
        timestamp: Utc::now().to_rfc3339(),
        version: state.version.clone(),
        uptime_seconds: state.uptime_seconds(),
        checks: checks
            .iter()
            .map(|c| HealthCheck {
                name: c.name.clone(),
                status: if c.healthy {
                    "healthy".to_string()
                } else {
                    "unhealthy".to_string()
                },
                message: Some(c.message.clone()),
                latency_ms: Some(c.latency_ms),
            })
            .collect(),
    };

    let status_code = if all_healthy {
        axum::http::StatusCode::OK
    } else {
        axum::http::StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(health_status))
}

/// 简单存活检查
pub async fn liveness() -> impl IntoResponse {
    "OK"
}

/// 就绪检查
pub async fn readiness(state: axum::extract::State<Arc<ObservabilityState>>) -> impl IntoResponse {
    let checks = state.health_checks.lock().await;
    let all_healthy = checks.iter().all(|c| c.healthy);

    if all_healthy {
        (axum::http::StatusCode::OK, "Ready")
    } else {
        (axum::http::StatusCode::SERVICE_UNAVAILABLE, "Not Ready")
    }
}

/// Prometheus 指标端点
pub async fn metrics(state: axum::extract::State<Arc<ObservabilityState>>) -> impl IntoResponse {
    (axum::http::StatusCode::OK, state.metrics.gather())
}

/// 版本信息端点
pub async fn version(state: axum::extract::State<Arc<ObservabilityState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "version": state.version,
        "uptime_seconds": state.uptime_seconds(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// 创建可观测性路由
pub fn create_observability_router(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        .route("/metrics", get(metrics))
        .route("/version", get(version))
        .with_state(state)
}

// ===== Structured Logging =====

/// 初始化日志
///
/// `RUST_LOG` 优先于配置中的级别。配置了 `log_dir` 时按天滚动写入文件，
/// 返回的 guard 需要在进程退出前一直持有。
pub fn init_tracing(
    config: &LoggingConfig,
    service_name: &str,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let (writer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, format!("{}.log", service_name));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (fmt::writer::BoxMakeWriter::new(writer), Some(guard))
        }
        None => (fmt::writer::BoxMakeWriter::new(std::io::stdout), None),
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if config.structured {
        registry
            .with(fmt::layer().json().with_writer(writer).with_target(true))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(writer)
                    .with_target(true)
                    .with_line_number(true),
            )
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("tracing subscriber already set: {}", e);
    }
    guard
}
