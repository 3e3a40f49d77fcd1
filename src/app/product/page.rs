//! 商品页面排版
//!
//! 页面每次交互都从头到尾重新生成：标题区、左右两栏（图片 / 信息）、
//! 详情 / 评价 / 配送三个标签页、数量与按钮、一次性提示，最后是页脚。

use std::fmt::Write;

use super::model::QuantityRange;
use super::service::ProductService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
}

/// 只显示一次的提示条
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }

    fn css_class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "notice notice-success",
            NoticeKind::Warning => "notice notice-warning",
        }
    }
}

/// 本次渲染所需的会话相关数据
#[derive(Debug, Clone)]
pub struct PageView {
    pub quantity: u32,
    pub range: QuantityRange,
    pub notices: Vec<Notice>,
}

const STYLE: &str = r#"
<style>
    body { font-family: sans-serif; margin: 0 auto; max-width: 1100px; padding: 24px; color: #262730; }
    hr { border: none; border-top: 1px solid #e6e6e6; margin: 24px 0; }
    .columns { display: flex; gap: 32px; flex-wrap: wrap; }
    .column { flex: 1 1 400px; }
    .column img { width: 100%; border-radius: 8px; }
    .caption { color: #808495; font-size: 0.85rem; text-align: center; }
    .tag { color: #808495; font-size: 0.85rem; }
    .tabs input[type=radio] { display: none; }
    .tabs label { display: inline-block; padding: 8px 14px; cursor: pointer; border-bottom: 2px solid transparent; }
    .tabs .panel { display: none; padding: 8px 0; }
    #tab-detail:checked ~ label[for=tab-detail],
    #tab-review:checked ~ label[for=tab-review],
    #tab-shipping:checked ~ label[for=tab-shipping] { border-bottom-color: #ff4b4b; color: #ff4b4b; }
    #tab-detail:checked ~ .panel-detail,
    #tab-review:checked ~ .panel-review,
    #tab-shipping:checked ~ .panel-shipping { display: block; }
    .buttons { display: flex; gap: 12px; margin-top: 12px; }
    .buttons button { flex: 1; padding: 0.6rem 1.2rem; border-radius: 0.4rem; font-weight: 600; cursor: pointer; }
    .secondary-btn { background: white; border: 1px solid #d0d0d5; }
    .primary-btn { background-color: #ff4b4b; color: white; border: none; width: 100%; }
    .primary-btn:hover { background-color: #ff2b2b; }
    .notice { margin-top: 12px; padding: 12px 16px; border-radius: 0.4rem; }
    .notice-success { background: #dff5e3; color: #1b5e20; }
    .notice-warning { background: #fff4d6; color: #7a5200; }
</style>
"#;

/// 生成完整的商品页面
pub fn render_page(service: &ProductService, view: &PageView) -> String {
    let product = service.product();
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>🎧 프리미엄 헤드폰 쇼핑몰</title>\n");
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n");

    // 标题区
    html.push_str("<h1>🎧 프리미엄 헤드폰 스토어</h1>\n");
    html.push_str("<h3>음악을 새롭게 경험하세요.</h3>\n");
    html.push_str(
        "<p>고음질, 편안한 착용감, 세련된 디자인까지 갖춘<br>프리미엄 헤드폰을 만나보세요.</p>\n",
    );
    html.push_str("<hr>\n<div class=\"columns\">\n");

    // 左栏：图片
    let _ = writeln!(
        html,
        "<div class=\"column\">\n<img src=\"{}\" alt=\"{}\">\n<p class=\"caption\">{}</p>\n</div>",
        escape_html(&product.image_url),
        escape_html(&product.name),
        escape_html(&product.name),
    );

    // 右栏：商品信息
    html.push_str("<div class=\"column\">\n");
    let _ = writeln!(html, "<h3>{}</h3>", escape_html(&product.name));
    let _ = writeln!(html, "<p><strong>가격:</strong> {}만원</p>", product.price);
    let _ = writeln!(
        html,
        "<p><strong>타입:</strong> {}</p>",
        product.connection_label()
    );
    let _ = writeln!(html, "<p class=\"tag\">{}</p>", escape_html(&product.tag));
    let _ = writeln!(html, "<p>{}</p>", escape_html(&product.description));

    let summary = service.rating_summary();
    let _ = writeln!(
        html,
        "<p class=\"rating-summary\"><strong>평균 별점:</strong> {:.1} / {}.0 &nbsp;{} &nbsp;({}개 리뷰)</p>",
        summary.average,
        service.max_stars(),
        summary.stars,
        summary.count,
    );

    render_tabs(&mut html, service);
    render_order_form(&mut html, view);

    for notice in &view.notices {
        let _ = writeln!(
            html,
            "<div class=\"{}\">{}</div>",
            notice.css_class(),
            escape_html(&notice.message)
        );
    }

    html.push_str("</div>\n</div>\n");

    // 页脚在两栏之外
    html.push_str("<hr>\n<footer><p>© 2026 Headphone Store. All rights reserved.</p></footer>\n");
    html.push_str("</body>\n</html>\n");
    html
}

fn render_tabs(html: &mut String, service: &ProductService) {
    let product = service.product();

    html.push_str("<div class=\"tabs\">\n");
    html.push_str("<input type=\"radio\" name=\"tabs\" id=\"tab-detail\" checked>\n");
    html.push_str("<input type=\"radio\" name=\"tabs\" id=\"tab-review\">\n");
    html.push_str("<input type=\"radio\" name=\"tabs\" id=\"tab-shipping\">\n");
    html.push_str("<label for=\"tab-detail\">📋 상세설명</label>\n");
    html.push_str("<label for=\"tab-review\">⭐ 리뷰</label>\n");
    html.push_str("<label for=\"tab-shipping\">🚚 배송정보</label>\n");

    html.push_str("<div class=\"panel panel-detail\">\n<h3>상세설명</h3>\n");
    render_bullets(html, &product.spec);
    html.push_str("</div>\n");

    html.push_str("<div class=\"panel panel-review\">\n<h3>리뷰</h3>\n<ul class=\"reviews\">\n");
    for review in &product.reviews {
        let _ = writeln!(
            html,
            "<li><strong>{}</strong> | {} ({}/{})<p>→ {}</p></li>",
            escape_html(&review.user),
            service.stars(f64::from(review.rating)),
            review.rating,
            service.max_stars(),
            escape_html(&review.text),
        );
    }
    html.push_str("</ul>\n</div>\n");

    html.push_str("<div class=\"panel panel-shipping\">\n<h3>배송 / 교환 / 반품 안내</h3>\n");
    render_bullets(html, &product.shipping);
    html.push_str("</div>\n</div>\n");
}

/// 数量输入和两个按钮共用一个表单，按钮用 `formaction` 区分去向
fn render_order_form(html: &mut String, view: &PageView) {
    let _ = write!(
        html,
        concat!(
            "<form method=\"post\" action=\"/cart\" class=\"order\">\n",
            "<label for=\"quantity\">수량</label>\n",
            "<input type=\"number\" id=\"quantity\" name=\"quantity\" min=\"{}\" max=\"{}\" step=\"1\" value=\"{}\" required>\n",
            "<div class=\"buttons\">\n",
            "<button type=\"submit\" class=\"secondary-btn\">🧺 장바구니에 담기</button>\n",
            "<button type=\"submit\" class=\"primary-btn\" formaction=\"/buy\">💳 구매하기</button>\n",
            "</div>\n</form>\n",
        ),
        view.range.min, view.range.max, view.quantity,
    );
}

/// 把 `- ` 开头的行渲染成列表
fn render_bullets(html: &mut String, text: &str) {
    html.push_str("<ul>\n");
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let item = line.strip_prefix("- ").unwrap_or(line);
        let _ = writeln!(html, "<li>{}</li>", escape_html(item));
    }
    html.push_str("</ul>\n");
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::product::model::Product;

    fn view(notices: Vec<Notice>) -> PageView {
        PageView {
            quantity: 1,
            range: QuantityRange::default(),
            notices,
        }
    }

    fn render(notices: Vec<Notice>) -> String {
        let service = ProductService::new(Product::studio_pro_wireless(), 5);
        render_page(&service, &view(notices))
    }

    #[test]
    fn test_page_sections() {
        let html = render(Vec::new());
        assert!(html.contains("프리미엄 헤드폰 스토어"));
        assert!(html.contains("<h3>Studio Pro Wireless</h3>"));
        assert!(html.contains("29.9만원"));
        assert!(html.contains("무선"));
        assert!(html.contains("베스트셀러"));
        assert!(html.contains("4.7 / 5.0"));
        assert!(html.contains("(3개 리뷰)"));
        assert!(html.contains("<li>블루투스: 5.3</li>"));
        assert!(html.contains("<li>배송기간: 영업일 기준 1~2일</li>"));
        assert!(html.contains("formaction=\"/buy\""));
        assert!(!html.contains("class=\"notice"));

        // 页脚位于两栏容器闭合之后
        let footer = html.find("© 2026 Headphone Store. All rights reserved.").unwrap();
        let columns_end = html.rfind("</div>\n</div>\n").unwrap();
        assert!(columns_end < footer);
        assert!(html[columns_end..footer].contains("<hr>"));
    }

    #[test]
    fn test_rating_scale_follows_max_stars() {
        let service = ProductService::new(Product::studio_pro_wireless(), 10);
        let html = render_page(&service, &view(Vec::new()));
        assert!(html.contains("4.7 / 10.0"));
        assert!(html.contains("★★★★☆☆☆☆☆☆ (4/10)"));
        assert!(!html.contains("/ 5.0"));
    }

    #[test]
    fn test_reviews_listed_in_order() {
        let html = render(Vec::new());
        let first = html.find("민수").unwrap();
        let second = html.find("지현").unwrap();
        let third = html.find("현우").unwrap();
        assert!(first < second && second < third);
        assert!(html.contains("★★★★☆ (4/5)"));
    }

    #[test]
    fn test_quantity_input_bounds() {
        let service = ProductService::new(Product::studio_pro_wireless(), 5);
        let mut page_view = view(Vec::new());
        page_view.quantity = 7;
        let html = render_page(&service, &page_view);
        assert!(html.contains("min=\"1\" max=\"10\" step=\"1\" value=\"7\""));
    }

    #[test]
    fn test_notices_are_escaped() {
        let html = render(vec![
            Notice::success("ok <b>"),
            Notice::warning("'x'"),
        ]);
        assert!(html.contains("<div class=\"notice notice-success\">ok &lt;b&gt;</div>"));
        assert!(html.contains("<div class=\"notice notice-warning\">&#39;x&#39;</div>"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("<\"'>"), "&lt;&quot;&#39;&gt;");
        assert_eq!(escape_html("평범한 텍스트"), "평범한 텍스트");
    }
}
