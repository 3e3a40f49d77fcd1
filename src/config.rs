//! 商店配置模块

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 星级显示的星数上限
const MAX_STARS_LIMIT: u32 = 10;

/// 会话空闲时间上限（一年）
const MAX_SESSION_IDLE_MINUTES: u64 = 60 * 24 * 365;

/// 商店系统配置结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 服务配置
    pub http: HttpConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 页面 / 会话配置
    pub store: StoreConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// 绑定地址
    pub bind_address: String,
    /// HTTP 服务端口
    pub port: u16,
    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志文件路径
    pub log_path: PathBuf,
    /// 日志文件名前缀
    pub file_prefix: String,
    /// 是否启用控制台输出
    pub console_output: bool,
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

/// 页面与会话配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// 数量输入下限
    pub quantity_min: u32,
    /// 数量输入上限
    pub quantity_max: u32,
    /// 数量输入初始值
    pub quantity_default: u32,
    /// 星级显示的总星数
    pub max_stars: u32,
    /// 会话空闲多久后被清理（分钟）
    pub session_idle_minutes: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            timeout_seconds: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("./logs"),
            file_prefix: "headphone-store".to_string(),
            console_output: true,
            level: "info".to_string(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            quantity_min: 1,
            quantity_max: 10,
            quantity_default: 1,
            max_stars: 5,
            session_idle_minutes: 30,
        }
    }
}

impl HttpConfig {
    /// 解析监听地址
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_address, self.port)
            .parse()
            .map_err(|e| ConfigError::Validation(format!("无效的监听地址: {}", e)))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl StoreConfig {
    pub fn session_idle(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.session_idle_minutes as i64)
    }
}

impl Config {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        // 确保目录存在
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::FileWrite(e.to_string()))?;
        }

        fs::write(path.as_ref(), content).map_err(|e| ConfigError::FileWrite(e.to_string()))?;

        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 验证HTTP配置
        if self.http.port == 0 {
            return Err(ConfigError::Validation("HTTP端口必须大于0".to_string()));
        }
        if self.http.bind_address.is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }

        // 验证数量范围
        let store = &self.store;
        if store.quantity_min == 0 {
            return Err(ConfigError::Validation("数量下限必须大于0".to_string()));
        }
        if store.quantity_min > store.quantity_max {
            return Err(ConfigError::Validation(format!(
                "数量下限 {} 大于上限 {}",
                store.quantity_min, store.quantity_max
            )));
        }
        if !(store.quantity_min..=store.quantity_max).contains(&store.quantity_default) {
            return Err(ConfigError::Validation(format!(
                "数量初始值 {} 不在 [{}, {}] 范围内",
                store.quantity_default, store.quantity_min, store.quantity_max
            )));
        }
        if store.max_stars == 0 || store.max_stars > MAX_STARS_LIMIT {
            return Err(ConfigError::Validation(format!(
                "星数必须在 1 到 {} 之间",
                MAX_STARS_LIMIT
            )));
        }
        if store.session_idle_minutes == 0 || store.session_idle_minutes > MAX_SESSION_IDLE_MINUTES {
            return Err(ConfigError::Validation(format!(
                "会话空闲时间必须在 1 到 {} 分钟之间",
                MAX_SESSION_IDLE_MINUTES
            )));
        }

        // 验证日志级别
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("文件写入错误: {0}")]
    FileWrite(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置序列化错误: {0}")]
    Serialize(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
}

/// 从文件或默认值加载配置，并完成校验
pub fn load_config() -> Result<Config, ConfigError> {
    let config_paths = ["config.toml", "./config/config.toml"];

    for path in &config_paths {
        if Path::new(path).exists() {
            let config = Config::load_from_file(path)?;
            config.validate()?;
            return Ok(config);
        }
    }

    // 未找到配置文件，使用默认配置
    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.store.quantity_min, 1);
        assert_eq!(config.store.quantity_max, 10);
        assert_eq!(config.store.quantity_default, 1);
        assert_eq!(config.store.max_stars, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.store.quantity_min = 5;
        config.store.quantity_max = 3;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.store.quantity_default = 11;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.store.max_stars = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.store.max_stars = 10;
        assert!(config.validate().is_ok());
        config.store.max_stars = 11;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.store.session_idle_minutes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_save_load() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("conf").join("store.toml");

        let mut config = Config::default();
        config.http.port = 9090;
        config.store.quantity_max = 20;
        config.save_to_file(&config_path).unwrap();

        let loaded = Config::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.http.port, 9090);
        assert_eq!(loaded.store.quantity_max, 20);
        assert_eq!(loaded.logging.file_prefix, config.logging.file_prefix);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("partial.toml");
        fs::write(&config_path, "[http]\nport = 3000\n").unwrap();

        let loaded = Config::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.http.port, 3000);
        assert_eq!(loaded.http.bind_address, "0.0.0.0");
        assert_eq!(loaded.store.quantity_max, 10);
    }

    #[test]
    fn test_socket_addr() {
        let mut config = Config::default();
        config.http.bind_address = "127.0.0.1".to_string();
        let addr = config.http.socket_addr().unwrap();
        assert_eq!(addr.port(), 8080);

        config.http.bind_address = "not an ip".to_string();
        assert!(config.http.socket_addr().is_err());
    }
}
