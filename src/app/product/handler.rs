//! 商品页面处理器

use axum::{
    extract::{rejection::FormRejection, State},
    http::{header, HeaderMap, HeaderValue},
    response::{Html, IntoResponse, Response},
    Extension, Form, Json,
};
use serde::Deserialize;
use tracing::info;

use super::model::QuantityRange;
use super::page::{self, Notice, PageView};
use super::service::{ProductService, ProductSummary};
use crate::core::error::CoreError;
use crate::core::middleware::RequestId;
use crate::core::response::ApiResponse;
use crate::core::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
    pub sessions: SessionStore,
    pub quantity_range: QuantityRange,
}

/// 数量表单，按原样接收再解析，以便非数字输入返回统一的错误结构
#[derive(Debug, Deserialize)]
pub struct QuantityForm {
    #[serde(default)]
    pub quantity: Option<String>,
}

impl QuantityForm {
    fn quantity(&self, range: &QuantityRange) -> Result<u32, CoreError> {
        let raw = self
            .quantity
            .as_deref()
            .ok_or_else(|| CoreError::BadRequest("缺少数量".to_string()))?;
        range.parse(raw)
    }
}

/// 触发本次页面重新执行的交互
#[derive(Debug, Clone, Copy)]
enum Interaction {
    View,
    AddToCart(u32),
    Buy(u32),
}

pub async fn show_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, CoreError> {
    rerun(&state, &headers, Interaction::View)
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<QuantityForm>, FormRejection>,
) -> Result<Response, CoreError> {
    let Form(form) = form?;
    let quantity = form.quantity(&state.quantity_range)?;
    rerun(&state, &headers, Interaction::AddToCart(quantity))
}

pub async fn buy(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<QuantityForm>, FormRejection>,
) -> Result<Response, CoreError> {
    let Form(form) = form?;
    let quantity = form.quantity(&state.quantity_range)?;
    rerun(&state, &headers, Interaction::Buy(quantity))
}

pub async fn product_summary(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Json<ApiResponse<ProductSummary>> {
    Json(ApiResponse::success(
        state.product_service.summary(),
        &request_id,
    ))
}

/// 从头到尾执行一次页面：先应用交互，再读取（并清除）一次性购买标记，最后排版
fn rerun(
    state: &AppState,
    headers: &HeaderMap,
    interaction: Interaction,
) -> Result<Response, CoreError> {
    let default_quantity = state.quantity_range.default;

    // 只有提交表单才需要保存会话
    let create = !matches!(interaction, Interaction::View);
    let run = state.sessions.run(headers, create, |session| {
        match interaction {
            Interaction::View => {}
            Interaction::AddToCart(quantity) => session.set_quantity(quantity),
            Interaction::Buy(quantity) => {
                session.set_quantity(quantity);
                session.mark_buy_clicked();
            }
        }
        let quantity = session.quantity().unwrap_or(default_quantity);
        (quantity, session.take_buy_clicked())
    })?;
    let (quantity, buy_clicked) = run.output;

    let service = &state.product_service;
    let mut notices = Vec::new();
    if let Interaction::AddToCart(_) = interaction {
        info!(session = ?run.id, quantity, "加入购物车");
        notices.push(Notice::success(service.cart_message(quantity)));
    }
    if buy_clicked {
        info!(session = ?run.id, quantity, "进入购买流程");
        notices.push(Notice::warning(service.purchase_message(quantity)));
    }

    let view = PageView {
        quantity,
        range: state.quantity_range,
        notices,
    };
    let mut response = Html(page::render_page(service, &view)).into_response();

    if let Some(cookie) = run.set_cookie() {
        let value = HeaderValue::from_str(&cookie)
            .map_err(|e| CoreError::InternalServerError(format!("无效的 cookie: {}", e)))?;
        response.headers_mut().insert(header::SET_COOKIE, value);
    }

    Ok(response)
}
