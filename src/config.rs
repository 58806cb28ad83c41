//! 应用配置模块
//!
//! 负责从环境变量加载应用配置，包括：
//! - 服务器监听地址和端口
//! - Gemini API 凭证、模型和上游地址

use anyhow::{Context, Result};

use crate::upstream::gemini::{GEMINI_DEFAULT_BASE_URL, GEMINI_DEFAULT_MODEL};

/// 应用配置
///
/// 包含服务器运行所需的所有配置项，进程启动时加载一次
#[derive(Debug, Clone)]
pub struct Config {
    /// 服务器监听地址（如 "0.0.0.0" 或 "127.0.0.1"）
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
    /// Gemini API 密钥
    ///
    /// 未设置时服务仍然可以启动，但每个请求都会得到明确的 500 响应
    pub api_key: Option<String>,
    /// Gemini 模型标识（固定配置，不从请求中派生）
    pub model: String,
    /// Gemini API 基础 URL（测试时可指向本地 mock）
    pub upstream_base_url: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// # 环境变量
    ///
    /// - `PROMPTRELAY_HOST`: 服务器监听地址（默认: "0.0.0.0"）
    /// - `PROMPTRELAY_PORT`: 服务器监听端口（默认: 8080）
    /// - `GEMINI_API_KEY`: Gemini API 密钥（缺失不会阻止启动）
    /// - `GEMINI_MODEL`: 模型标识（默认: "gemini-1.5-pro-latest"）
    /// - `GEMINI_BASE_URL`: 上游基础 URL（默认: 官方端点）
    ///
    /// # 错误
    ///
    /// - 如果 `PROMPTRELAY_PORT` 不是有效的端口号
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("PROMPTRELAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = std::env::var("PROMPTRELAY_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .context("PROMPTRELAY_PORT must be a valid port number")?;

        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| GEMINI_DEFAULT_MODEL.to_string());

        let upstream_base_url = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| GEMINI_DEFAULT_BASE_URL.to_string());

        Ok(Self {
            host,
            port,
            api_key,
            model,
            upstream_base_url,
        })
    }
}
