//! Gemini 客户端
//!
//! 调用 Google Gemini generateContent API 的 [`TextGenerationClient`] 实现

mod constants;

pub use constants::{GEMINI_DEFAULT_BASE_URL, GEMINI_DEFAULT_MODEL};

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::sync::OnceLock;
use std::time::Duration;

use crate::upstream::{TextGenerationClient, UpstreamError};
use crate::utils::should_disable_tls_verify;

use constants::{GEMINI_API_VERSION, GEMINI_ERROR_FALLBACK};

/// API 请求超时（秒）
const API_TIMEOUT_SECS: u64 = 300;

/// 共享的 API 客户端
static API_CLIENT: OnceLock<Client> = OnceLock::new();

fn get_api_client() -> &'static Client {
    API_CLIENT.get_or_init(|| {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(API_TIMEOUT_SECS))
            .pool_max_idle_per_host(10);

        if should_disable_tls_verify() {
            tracing::warn!("TLS certificate verification is DISABLED - for debugging only!");
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder.build().expect("Failed to create Gemini API client")
    })
}

/// generateContent 请求体
///
/// 形如 `{ "contents": [{ "role": "user", "parts": [{ "text": ... }] }] }`
#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

impl GenerateContentRequest {
    fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

/// Gemini API 客户端
///
/// base_url 和 model 来自配置，密钥通过 query 参数传给上游
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.base_url, GEMINI_API_VERSION, self.model
        )
    }
}

/// 从成功响应中提取 candidates[0].content.parts[0].text
fn extract_generated_text(response: &Value) -> Option<&str> {
    response
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
}

/// 从错误响应中提取 error.message
fn extract_error_message(body: &Value) -> Option<&str> {
    body.get("error")?.get("message")?.as_str()
}

#[async_trait]
impl TextGenerationClient for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        let payload = GenerateContentRequest::from_prompt(prompt);

        let response = get_api_client()
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // 错误体不是 JSON 时仍然透传状态码，信息退回兜底文案
            let error_body: Value = response.json().await.unwrap_or_default();
            tracing::error!(status = %status, model = %self.model, "Gemini API error: {}", error_body);

            let message = extract_error_message(&error_body)
                .unwrap_or(GEMINI_ERROR_FALLBACK)
                .to_string();
            return Err(UpstreamError::Api { status, message });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed(format!("invalid JSON body: {e}")))?;

        let text = extract_generated_text(&body)
            .ok_or_else(|| UpstreamError::Malformed("no generated text in response".to_string()))?
            .to_string();

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new(server.uri(), "test-model", "test-key")
    }

    #[tokio::test]
    async fn generate_extracts_candidate_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/test-model:generateContent"))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{ "role": "user", "parts": [{ "text": "hi" }] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "hello" }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server).generate("hi").await.unwrap();
        assert_eq!(text, "hello");
    }

    #[tokio::test]
    async fn generate_passes_through_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": { "message": "quota exceeded" }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("hi").await.unwrap_err();
        match err {
            UpstreamError::Api { status, message } => {
                assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
                assert_eq!(message, "quota exceeded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn generate_falls_back_on_opaque_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("hi").await.unwrap_err();
        match err {
            UpstreamError::Api { status, message } => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(message, GEMINI_ERROR_FALLBACK);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn generate_rejects_success_body_without_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("hi").await.unwrap_err();
        assert!(matches!(err, UpstreamError::Malformed(_)));
        assert!(!err.to_string().is_empty());
    }
}
