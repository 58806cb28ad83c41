//! Analyze API 处理器

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::gateway::handlers::ApiError;
use crate::gateway::state::AppState;
use crate::utils::extract_prompt;

/// 成功响应体
#[derive(Serialize)]
pub struct AnalyzeResponse {
    text: String,
}

/// POST /api/analyze 处理器
///
/// 校验请求体中的 prompt，转发给上游生成文本，
/// 把成功结果和各类失败映射为统一的响应契约
pub async fn handle_analyze(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    // 请求体解析失败与其他内部错误走同一条 500 路径
    let payload: Value = serde_json::from_str(&body)
        .map_err(|e| ApiError::Internal(format!("Invalid JSON body: {e}")))?;

    let prompt = extract_prompt(&payload).ok_or(ApiError::PromptMissing)?;

    // 密钥未配置时不存在上游客户端，不发起任何外部调用
    let client = state.client().ok_or(ApiError::ApiKeyMissing)?;

    tracing::info!(upstream = client.name(), prompt_len = prompt.len(), "request");

    let text = client.generate(prompt).await?;

    Ok(Json(AnalyzeResponse { text }))
}
