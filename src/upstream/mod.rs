//! Upstream 抽象层
//!
//! 定义文本生成服务的统一接口，网关通过该接口调用上游 API

pub mod gemini;

use async_trait::async_trait;
use http::StatusCode;
use thiserror::Error;

/// 上游调用失败
///
/// 三类失败分别对应不同的下游映射：
/// - `Api`: 上游明确返回了错误状态码，状态码和错误信息透传给调用方
/// - `Network`: 传输层失败（连接、超时等）
/// - `Malformed`: 上游响应格式不符合预期
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("Failed to reach Gemini API: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected Gemini API response: {0}")]
    Malformed(String),
}

/// 文本生成服务的统一接口
///
/// 生产实现为 [`gemini::GeminiClient`]；测试中用无网络的 stub 替代
#[async_trait]
pub trait TextGenerationClient: Send + Sync {
    /// 客户端名称（用于日志和健康检查）
    fn name(&self) -> &str;

    /// 发送 prompt 并返回生成的文本
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError>;
}
