//! 商品业务服务

use std::sync::Arc;

use serde::Serialize;

use super::model::Product;
use super::rating::render_stars;

/// 评分汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSummary {
    pub average: f64,
    pub stars: String,
    pub count: usize,
}

/// `/api/product` 返回的商品摘要
#[derive(Debug, Clone, Serialize)]
pub struct ProductSummary {
    pub name: String,
    pub price: f64,
    pub wireless: bool,
    pub tag: String,
    pub image_url: String,
    pub rating: RatingSummary,
}

#[derive(Clone)]
pub struct ProductService {
    product: Arc<Product>,
    max_stars: u32,
}

impl ProductService {
    pub fn new(product: Product, max_stars: u32) -> Self {
        Self {
            product: Arc::new(product),
            max_stars,
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn stars(&self, rating: f64) -> String {
        render_stars(rating, self.max_stars)
    }

    pub fn max_stars(&self) -> u32 {
        self.max_stars
    }

    pub fn rating_summary(&self) -> RatingSummary {
        let average = self.product.average_rating();
        RatingSummary {
            average,
            stars: self.stars(average),
            count: self.product.reviews.len(),
        }
    }

    pub fn summary(&self) -> ProductSummary {
        let product = &self.product;
        ProductSummary {
            name: product.name.clone(),
            price: product.price,
            wireless: product.wireless,
            tag: product.tag.clone(),
            image_url: product.image_url.clone(),
            rating: self.rating_summary(),
        }
    }

    /// 加入购物车后的提示（不做任何实际的购物车变更）
    pub fn cart_message(&self, quantity: u32) -> String {
        format!(
            "'{}' {}개가 장바구니에 추가되었습니다.",
            self.product.name, quantity
        )
    }

    /// 购买提示，支付流程尚未实现
    pub fn purchase_message(&self, quantity: u32) -> String {
        format!(
            "'{}' {}개를 구매 진행합니다. (결제 로직은 아직 구현되지 않았습니다.)",
            self.product.name, quantity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ProductService {
        ProductService::new(Product::studio_pro_wireless(), 5)
    }

    #[test]
    fn test_rating_summary() {
        let summary = service().rating_summary();
        assert_eq!(summary.count, 3);
        assert_eq!(format!("{:.1}", summary.average), "4.7");
        assert_eq!(summary.stars, "★★★★⯨");
    }

    #[test]
    fn test_messages_contain_name_and_quantity() {
        let service = service();

        let cart = service.cart_message(3);
        assert!(cart.contains("Studio Pro Wireless"));
        assert!(cart.contains("3개"));

        let purchase = service.purchase_message(2);
        assert!(purchase.contains("Studio Pro Wireless"));
        assert!(purchase.contains("2개를 구매"));
    }

    #[test]
    fn test_summary() {
        let summary = service().summary();
        assert_eq!(summary.name, "Studio Pro Wireless");
        assert!(summary.wireless);
        assert_eq!(summary.rating.count, 3);
    }
}
