//! Serve 命令 - 启动中继服务器
//!
//! 此模块实现 `serve` 命令，启动 HTTP 服务器以转发 Gemini 请求。

use anyhow::Result;

use crate::config::Config;
use crate::gateway;

/// 执行服务器启动命令
///
/// # 参数
///
/// * `config` - 应用配置，包含监听地址、端口和上游凭证
///
/// # 功能
///
/// - 根据配置创建上游客户端（密钥缺失时告警但不退出）
/// - 初始化 HTTP 路由和中间件
/// - 启动服务器并等待关闭信号
/// - 支持优雅关闭（Ctrl+C 或 SIGTERM）
pub async fn serve_command(config: Config) -> Result<()> {
    gateway::serve(config).await
}
