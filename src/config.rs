//! 配置
//!
//! 从 TOML 文件加载（默认 ~/.config/trivia/config.toml），文件不存在时使用默认值，
//! 命令行参数覆盖文件中的值。

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://opentdb.com/api.php";
pub const DEFAULT_AMOUNT: u8 = 50;
/// API 单次最多返回 50 题
pub const MAX_AMOUNT: u8 = 50;

const APP_DIR: &str = "trivia";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("amount must be between 1 and 50, got {0}")]
    Amount(u8),
    #[error("invalid endpoint {0:?}: {1}")]
    Endpoint(String, String),
    #[error("could not determine user data directory")]
    NoDataDir,
    #[error("cannot create data directory {}: {source}", .path.display())]
    DataDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub endpoint: String,
    pub amount: u8,
    /// 请求超时（秒），不设置则不限时
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            amount: DEFAULT_AMOUNT,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: Option<PathBuf>,
    /// 启动时恢复上次的题库和答题记录
    pub resume: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// 命令行覆盖项
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub amount: Option<u8>,
    pub endpoint: Option<String>,
    pub resume: bool,
    pub log_level: Option<String>,
}

impl Config {
    /// 默认配置文件路径
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// 从文件加载，文件不存在时返回默认配置
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(amount) = overrides.amount {
            self.api.amount = amount;
        }
        if let Some(endpoint) = overrides.endpoint {
            self.api.endpoint = endpoint;
        }
        if overrides.resume {
            self.storage.resume = true;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.amount == 0 || self.api.amount > MAX_AMOUNT {
            return Err(ConfigError::Amount(self.api.amount));
        }
        self.endpoint().map(|_| ())
    }

    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.api.endpoint)
            .map_err(|e| ConfigError::Endpoint(self.api.endpoint.clone(), e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::Endpoint(
                self.api.endpoint.clone(),
                format!("unsupported scheme {other}"),
            )),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.api.timeout_secs.map(Duration::from_secs)
    }

    /// 数据目录 (~/.local/share/trivia/)，不存在时创建
    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        let dir = match &self.storage.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .ok_or(ConfigError::NoDataDir)?
                .join(APP_DIR),
        };
        fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
            path: dir.clone(),
            source,
        })?;
        Ok(dir)
    }

    pub fn log_file(&self, data_dir: &Path) -> PathBuf {
        self.logging
            .file
            .clone()
            .unwrap_or_else(|| data_dir.join("trivia.log"))
    }
}
