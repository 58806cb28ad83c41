use serde_json::Value;

/// 是否禁用 TLS 验证（用于调试 mitmproxy 等场景）
pub fn should_disable_tls_verify() -> bool {
    std::env::var("PROMPTRELAY_DISABLE_TLS_VERIFY")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// 从请求体中提取 prompt 字段
///
/// # 参数
///
/// * `body` - JSON 格式的请求体
///
/// # 返回值
///
/// 返回非空的 prompt 字符串；字段缺失、类型不对或为空串时返回 None
#[inline]
pub fn extract_prompt(body: &Value) -> Option<&str> {
    body.get("prompt")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::extract_prompt;
    use serde_json::json;

    #[test]
    fn extract_prompt_returns_non_empty_string() {
        assert_eq!(extract_prompt(&json!({ "prompt": "hi" })), Some("hi"));
    }

    #[test]
    fn extract_prompt_rejects_missing_empty_and_non_string() {
        assert_eq!(extract_prompt(&json!({})), None);
        assert_eq!(extract_prompt(&json!({ "prompt": "" })), None);
        assert_eq!(extract_prompt(&json!({ "prompt": 42 })), None);
        assert_eq!(extract_prompt(&json!({ "prompt": null })), None);
    }
}
