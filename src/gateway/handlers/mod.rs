//! HTTP 请求处理器

pub mod analyze;
pub mod health;

pub use analyze::handle_analyze;
pub use health::handle_health;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::upstream::UpstreamError;

/// 统一的错误响应体
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// 请求处理失败，每个类别映射到固定的 status/body
#[derive(Debug, Error)]
pub enum ApiError {
    /// 请求体缺少非空的 prompt 字段
    #[error("Prompt is required.")]
    PromptMissing,

    /// 服务端未配置上游 API 密钥
    #[error("API key is not configured on the server.")]
    ApiKeyMissing,

    /// 上游返回错误状态码，透传给调用方
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    /// 其他内部错误（请求体解析失败、网络错误、响应格式异常）
    #[error("{0}")]
    Internal(String),
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Api { status, message } => Self::Upstream { status, message },
            other => Self::Internal(other.to_string()),
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::PromptMissing => StatusCode::BAD_REQUEST,
            Self::ApiKeyMissing | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        match &self {
            Self::Internal(_) => tracing::error!(%status, "{}", message),
            Self::Upstream { .. } => tracing::warn!(%status, "upstream error: {}", message),
            _ => tracing::debug!(%status, "{}", message),
        }

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
