//! Gateway 应用状态

use std::sync::Arc;

use crate::upstream::TextGenerationClient;

/// Gateway 应用状态
///
/// 持有上游客户端；未配置 API 密钥时为 None，
/// 此时不会发起任何上游调用，请求直接得到明确的 500 响应
#[derive(Clone)]
pub struct AppState {
    client: Option<Arc<dyn TextGenerationClient>>,
    model: String,
}

impl AppState {
    pub fn new(client: Option<Arc<dyn TextGenerationClient>>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn client(&self) -> Option<&Arc<dyn TextGenerationClient>> {
        self.client.as_ref()
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}
