//! Gemini API 配置常量

pub const GEMINI_DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const GEMINI_API_VERSION: &str = "v1beta";
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-1.5-pro-latest";

/// 上游错误响应里找不到可读信息时的兜底文案
pub const GEMINI_ERROR_FALLBACK: &str = "Failed to get response from Gemini API.";
