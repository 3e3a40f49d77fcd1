//! 核心响应处理模块

use serde::Serialize;

use super::middleware::RequestId;

/// JSON 接口的统一外层结构，`request_id` 与响应头 `x-request-id` 一致
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    pub request_id: String,
    pub timestamp: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, request_id: &RequestId) -> Self {
        Self {
            success: true,
            data,
            request_id: request_id.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
