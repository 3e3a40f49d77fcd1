//! # 耳机单品商店
//!
//! 服务端渲染的单品展示页：商品卡片、星级评分、详情 / 评价 / 配送标签页，
//! 以及只给出提示、不做真实交易的“加入购物车”和“购买”按钮。
//!
//! 分层结构：
//! - `app`: 页面、处理器与业务服务
//! - `core`: 错误、响应、中间件、会话
//! - `infrastructure`: 日志
//! - `config`: TOML 配置

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::app::health::{health_check, not_found};
use crate::app::product::handler::{self, AppState};
use crate::app::product::model::{Product, QuantityRange};
use crate::app::product::service::ProductService;
use crate::config::Config;
use crate::core::middleware::request_logging_middleware;
use crate::core::session::SessionStore;

/// 根据配置组装应用状态
pub fn build_state(config: &Config) -> AppState {
    AppState {
        product_service: ProductService::new(
            Product::studio_pro_wireless(),
            config.store.max_stars,
        ),
        sessions: SessionStore::new(config.store.session_idle()),
        quantity_range: QuantityRange::from(&config.store),
    }
}

/// 创建路由
pub fn build_router(config: &Config) -> Router {
    Router::new()
        .route("/", get(handler::show_page))
        .route("/cart", post(handler::add_to_cart))
        .route("/buy", post(handler::buy))
        .route("/api/product", get(handler::product_summary))
        .route("/health", get(health_check))
        .fallback(not_found)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.http.timeout()))
        .with_state(build_state(config))
}
