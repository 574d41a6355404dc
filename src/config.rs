//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 工作线程数（0 表示使用 CPU 核心数）
    #[serde(default)]
    pub workers: usize,
}

/// 行情数据源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// 单次请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// 连接超时时间（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// 批量查询时的最大并发请求数
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// 请求头 User-Agent
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// 热门榜的候选股票
    #[serde(default = "default_hot_list")]
    pub hot_list: Vec<String>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
    /// 错误响应是否返回完整细节
    #[serde(default)]
    pub debug_errors: bool,
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,
    /// 数据源配置
    #[serde(default)]
    pub feed: FeedConfig,
    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

// 默认值函数
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_timeout() -> u64 { 8 }
fn default_connect_timeout() -> u64 { 3 }
fn default_max_concurrency() -> usize { 8 }
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}
fn default_log_level() -> String { "info".to_string() }
fn default_hot_list() -> Vec<String> {
    [
        "600519", "601318", "600036", "601012", "600900", "000858", "000333", "300750",
        "002594", "000001", "601899", "600276",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            max_concurrency: default_max_concurrency(),
            user_agent: default_user_agent(),
            hot_list: default_hot_list(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            debug_errors: false,
        }
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// 加载配置，优先从文件，失败则使用默认值，最后应用环境变量覆盖
    ///
    /// 日志系统依赖配置中的级别，此时尚未初始化，加载过程的提示随配置一并返回。
    pub fn load() -> (Self, Vec<(log::Level, String)>) {
        let (mut config, notes) = Self::load_from(&["config.json", "config/config.json"]);
        config.apply_env(|key| std::env::var(key).ok());
        (config, notes)
    }

    /// 依次尝试给定路径，返回第一个可用的配置
    pub fn load_from<P: AsRef<Path>>(paths: &[P]) -> (Self, Vec<(log::Level, String)>) {
        let mut notes = Vec::new();

        for path in paths {
            let path: &Path = path.as_ref();
            if !path.exists() {
                continue;
            }
            match Self::from_file(path) {
                Ok(config) => {
                    notes.push((log::Level::Info, format!("从 {} 加载配置成功", path.display())));
                    return (config, notes);
                }
                Err(e) => notes.push((
                    log::Level::Warn,
                    format!("加载配置文件 {} 失败: {}", path.display(), e),
                )),
            }
        }

        notes.push((log::Level::Info, "使用默认配置".to_string()));
        (Self::default(), notes)
    }

    /// 应用环境变量覆盖：QUOTE_DEBUG、PORT
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("QUOTE_DEBUG") {
            self.log.debug_errors = matches!(value.trim(), "1" | "true" | "TRUE" | "yes");
        }
        if let Some(port) = lookup("PORT").and_then(|p| p.trim().parse().ok()) {
            self.server.port = port;
        }
    }

    /// 校验配置
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.feed.timeout_secs == 0 {
            anyhow::bail!("feed.timeout_secs 必须大于 0");
        }
        if self.feed.max_concurrency == 0 {
            anyhow::bail!("feed.max_concurrency 必须大于 0");
        }
        Ok(())
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.feed.timeout_secs, 8);
        assert_eq!(config.feed.max_concurrency, 8);
        assert!(!config.log.debug_errors);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"feed": {"max_concurrency": 4}, "log": {"debug_errors": true}}"#)
                .unwrap();
        assert_eq!(config.feed.max_concurrency, 4);
        assert_eq!(config.feed.timeout_secs, 8);
        assert!(config.log.debug_errors);
        assert_eq!(config.server.port, 8080);
        assert!(!config.feed.hot_list.is_empty());
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.feed.max_concurrency = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.feed.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_broken_file_reported() {
        let dir = std::env::temp_dir().join(format!("quote-backend-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let broken = dir.join("config.json");
        fs::write(&broken, "{ not json").unwrap();

        let (config, notes) = AppConfig::load_from(&[broken.as_path()]);
        assert_eq!(config.server.port, 8080);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].0, log::Level::Warn);
        assert!(notes[0].1.contains("config.json"));
        assert_eq!(notes[1].0, log::Level::Info);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_env(|key| match key {
            "QUOTE_DEBUG" => Some("1".to_string()),
            "PORT" => Some("9090".to_string()),
            _ => None,
        });
        assert!(config.log.debug_errors);
        assert_eq!(config.server.port, 9090);
    }
}
