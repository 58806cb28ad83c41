//! 健康检查和版本信息处理器

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::json;

use crate::gateway::state::AppState;

/// 健康检查响应
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    model: String,
    /// 已配置的上游客户端名称；密钥缺失时为 None
    #[serde(skip_serializing_if = "Option::is_none")]
    upstream: Option<String>,
}

/// GET /health
pub async fn handle_health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        model: state.model().to_string(),
        upstream: state.client().map(|c| c.name().to_string()),
    }))
}
