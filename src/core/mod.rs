//! 核心层：错误、响应、中间件与会话

pub mod error;
pub mod middleware;
pub mod response;
pub mod session;
