use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::seed;
use crate::models::taxonomy::RelevanceRule;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
    /// 允许跨域的来源
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8000,
            cors_origins: vec!["http://localhost:3000".into()],
        }
    }
}

/// 存储后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON 文件
    #[default]
    File,
    /// 仅内存（重启后丢失）
    Memory,
}

/// 存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// 后端类型
    pub backend: StorageBackend,
    /// 数据目录
    pub data_dir: PathBuf,
    /// 问题库文件名
    pub questions_file: String,
    /// 实体目录文件名
    pub entities_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            data_dir: PathBuf::from("./data"),
            questions_file: "questions.json".into(),
            entities_file: "entities.json".into(),
        }
    }
}

impl StorageConfig {
    pub fn questions_path(&self) -> PathBuf {
        self.data_dir.join(&self.questions_file)
    }

    pub fn entities_path(&self) -> PathBuf {
        self.data_dir.join(&self.entities_file)
    }
}

/// 引擎配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 给出最终猜测所需的最少回答数
    pub min_questions: usize,
    /// 给出最终猜测所需的匹配率（严格大于）
    pub min_confidence: f64,
    /// 猜对时问题权重的乘数
    pub reward_factor: f64,
    /// 猜错时问题权重的乘数
    pub penalty_factor: f64,
    /// 最大权重超过该值时触发归一化
    pub renormalize_threshold: f64,
    /// 归一化后的最大权重
    pub renormalize_target: f64,
    /// 根分类问题（空回答集时的提问顺序）
    pub root_questions: Vec<String>,
    /// 相关性规则表
    pub relevance_rules: Vec<RelevanceRule>,
    /// 调试快照中的样本数量
    pub sample_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_questions: 8,
            min_confidence: 0.8,
            reward_factor: 1.05,
            penalty_factor: 0.95,
            renormalize_threshold: 10.0,
            renormalize_target: 5.0,
            root_questions: seed::root_questions(),
            relevance_rules: seed::relevance_rules(),
            sample_size: 5,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录，未设置时输出到标准输出
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            structured: false,
            log_dir: None,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// 存储配置
    pub storage: StorageConfig,
    /// 引擎配置
    pub engine: EngineConfig,
    /// 日志配置
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// 创建测试配置：内存存储
    pub fn testing() -> Self {
        let mut config = Self::default();
        config.storage.backend = StorageBackend::Memory;
        config
    }
}
