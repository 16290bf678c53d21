//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 推理服务配置
    #[serde(default)]
    pub inference: InferenceConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 上传文件最大大小（字节），默认 50MB
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5070
}

fn default_max_upload_bytes() -> usize {
    50 * 1024 * 1024 // 50 MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 推理服务配置（OpenAI 兼容 API）
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceConfig {
    /// 推理服务基础 URL（含 /v1）
    #[serde(default = "default_inference_url")]
    pub url: String,

    /// Bearer token；本地服务通常不校验
    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_inference_timeout")]
    pub timeout_secs: u64,

    /// 使用内置的假推理客户端（离线演示）
    #[serde(default)]
    pub fake: bool,
}

fn default_inference_url() -> String {
    "http://localhost:8000/v1".to_string()
}

fn default_api_key() -> String {
    "dummy-key".to_string()
}

fn default_inference_timeout() -> u64 {
    300
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            url: default_inference_url(),
            api_key: default_api_key(),
            timeout_secs: default_inference_timeout(),
            fake: false,
        }
    }
}

impl InferenceConfig {
    /// 日志中展示用的 api_key
    pub fn masked_api_key(&self) -> String {
        let visible: String = self.api_key.chars().take(3).collect();
        if self.api_key.chars().count() <= 3 {
            "***".to_string()
        } else {
            format!("{}***", visible)
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5070);
        assert_eq!(config.server.max_upload_bytes, 50 * 1024 * 1024);
        assert_eq!(config.inference.url, "http://localhost:8000/v1");
        assert_eq!(config.inference.timeout_secs, 300);
        assert!(!config.inference.fake);
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5070");
    }

    #[test]
    fn test_masked_api_key() {
        let mut config = InferenceConfig::default();
        assert_eq!(config.masked_api_key(), "dum***");
        config.api_key = "ab".to_string();
        assert_eq!(config.masked_api_key(), "***");
    }
}
