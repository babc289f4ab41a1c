use crate::config::config::AppConfig;
use crate::error::Result;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// 环境变量前缀
const ENV_PREFIX: &str = "GUESSWORK_";

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 优先级（后者覆盖前者）：
    /// 1. 内置默认值
    /// 2. ./config.toml
    /// 3. 环境变量，例如 `GUESSWORK_SERVER__PORT=9000`
    pub fn load() -> Result<AppConfig> {
        Self::load_from(default_config_path())
    }

    /// 从指定路径加载配置
    ///
    /// 文件格式或字段类型错误时返回 `AppError::Config`。
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig> {
        Ok(Self::figment(path.as_ref()).extract()?)
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> std::result::Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        let engine = &config.engine;
        if !(0.0..=1.0).contains(&engine.min_confidence) {
            return Err(ConfigValidationError::InvalidConfidence(engine.min_confidence));
        }

        if engine.reward_factor <= 0.0 || engine.penalty_factor <= 0.0 {
            return Err(ConfigValidationError::InvalidFactor);
        }

        if engine.renormalize_target <= 0.0
            || engine.renormalize_target > engine.renormalize_threshold
        {
            return Err(ConfigValidationError::InvalidRenormalization {
                threshold: engine.renormalize_threshold,
                target: engine.renormalize_target,
            });
        }

        if config.storage.questions_file.is_empty() || config.storage.entities_file.is_empty() {
            return Err(ConfigValidationError::InvalidPath(
                "storage file names must not be empty".into(),
            ));
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("服务端口无效，必须大于 0")]
    InvalidPort,

    #[error("最小置信度必须在 [0, 1] 之间，当前为 {0}")]
    InvalidConfidence(f64),

    #[error("权重调整乘数必须为正数")]
    InvalidFactor,

    #[error("归一化目标 {target} 必须为正且不大于阈值 {threshold}")]
    InvalidRenormalization { threshold: f64, target: f64 },

    #[error("配置路径无效: {0}")]
    InvalidPath(String),
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.toml")
}

/// 检查配置文件是否存在
pub fn config_exists() -> bool {
    default_config_path().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = ConfigLoader::load_from("/nonexistent/guesswork.toml").unwrap();
        assert_eq!(config.engine.min_questions, 8);
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nport = 9100\n\n[engine]\nmin_questions = 5\n\n[storage]\nbackend = \"memory\""
        )
        .unwrap();

        let config = ConfigLoader::load_from(file.path()).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.engine.min_questions, 5);
        assert_eq!(config.engine.min_confidence, 0.8);
        assert_eq!(
            config.storage.backend,
            crate::config::config::StorageBackend::Memory
        );
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = \"not a number\"").unwrap();

        let err = ConfigLoader::load_from(file.path()).unwrap_err();
        assert!(matches!(err, crate::error::AppError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidPort)
        ));

        let mut config = AppConfig::default();
        config.engine.min_confidence = 1.5;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidConfidence(_))
        ));

        let mut config = AppConfig::default();
        config.engine.renormalize_target = 20.0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidRenormalization { .. })
        ));
    }
}
