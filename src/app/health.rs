//! 健康检查与兜底路由

use axum::{http::Uri, response::Json};

use crate::core::error::CoreError;

/// 健康检查处理器
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// 未匹配任何路由
pub async fn not_found(uri: Uri) -> CoreError {
    CoreError::NotFound(format!("路径不存在: {}", uri.path()))
}
