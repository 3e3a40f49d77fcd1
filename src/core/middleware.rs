//! 核心中间件模块

use std::fmt;
use std::time::Instant;

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tracing::info;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 每个请求的唯一标识，放在请求扩展中供处理器读取
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// 请求日志中间件
///
/// 生成请求 ID，写入请求扩展和 `x-request-id` 响应头，并记录方法、路径、状态和耗时。
pub async fn request_logging_middleware(mut req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = RequestId(Uuid::new_v4());
    req.extensions_mut().insert(request_id);

    let method = req.method().clone();
    let uri = req.uri().clone();

    let mut response = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    info!(
        request_id = %request_id,
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "{} {}",
        method,
        uri
    );

    response
}
