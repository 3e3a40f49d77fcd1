//! 商品数据模型

use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;
use crate::core::error::CoreError;

/// 用户评价，只以在列表中的位置区分
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub user: String,
    /// 1–5，不做强制校验
    pub rating: u8,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    /// 单位：万韩元（页面显示为 "만원"）
    pub price: f64,
    pub wireless: bool,
    pub description: String,
    pub tag: String,
    pub image_url: String,
    /// 以 `- ` 开头的逐行要点
    pub spec: String,
    pub shipping: String,
    pub reviews: Vec<Review>,
}

impl Product {
    /// 店铺唯一在售的商品
    pub fn studio_pro_wireless() -> Self {
        Self {
            name: "Studio Pro Wireless".to_string(),
            price: 29.9,
            wireless: true,
            description: "스튜디오급 사운드와 30시간 배터리.".to_string(),
            tag: "베스트셀러".to_string(),
            image_url: "https://images.pexels.com/photos/374870/pexels-photo-374870.jpeg"
                .to_string(),
            spec: "\
- 드라이버: 40mm 네오디뮴
- 주파수 응답: 20Hz ~ 20kHz
- 블루투스: 5.3
- 배터리: 최대 30시간 재생
- 충전 포트: USB-C
"
            .to_string(),
            shipping: "\
- 배송비: 3,000원 (5만원 이상 구매 시 무료)
- 배송기간: 영업일 기준 1~2일
- 교환/반품: 수령일로부터 7일 이내 가능
"
            .to_string(),
            reviews: vec![
                Review {
                    user: "민수".to_string(),
                    rating: 5,
                    text: "저음도 탄탄하고 오래 써도 귀가 편해요.".to_string(),
                },
                Review {
                    user: "지현".to_string(),
                    rating: 4,
                    text: "노이즈 캔슬링이 생각보다 좋습니다.".to_string(),
                },
                Review {
                    user: "현우".to_string(),
                    rating: 5,
                    text: "출퇴근용으로 최고예요.".to_string(),
                },
            ],
        }
    }

    /// 所有评价的平均分，没有评价时为 0
    pub fn average_rating(&self) -> f64 {
        if self.reviews.is_empty() {
            return 0.0;
        }
        let total: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        f64::from(total) / self.reviews.len() as f64
    }

    pub fn connection_label(&self) -> &'static str {
        if self.wireless {
            "무선"
        } else {
            "유선"
        }
    }
}

/// 数量输入的取值范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityRange {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl Default for QuantityRange {
    fn default() -> Self {
        Self::from(&StoreConfig::default())
    }
}

impl From<&StoreConfig> for QuantityRange {
    fn from(config: &StoreConfig) -> Self {
        Self {
            min: config.quantity_min,
            max: config.quantity_max,
            default: config.quantity_default,
        }
    }
}

impl QuantityRange {
    pub fn clamp(&self, raw: i64) -> u32 {
        raw.clamp(i64::from(self.min), i64::from(self.max)) as u32
    }

    /// 解析表单提交的数量；非数字报错，越界则夹到范围内
    pub fn parse(&self, raw: &str) -> Result<u32, CoreError> {
        let value: i64 = raw
            .trim()
            .parse()
            .map_err(|_| CoreError::BadRequest(format!("无效的数量: {:?}", raw)))?;
        Ok(self.clamp(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_rating() {
        let product = Product::studio_pro_wireless();
        let avg = product.average_rating();
        assert!((avg - 14.0 / 3.0).abs() < 1e-9);
        assert_eq!(format!("{:.2}", avg), "4.67");
        assert_eq!(format!("{:.1}", avg), "4.7");
    }

    #[test]
    fn test_average_rating_without_reviews() {
        let mut product = Product::studio_pro_wireless();
        product.reviews.clear();
        assert_eq!(product.average_rating(), 0.0);
    }

    #[test]
    fn test_connection_label() {
        let mut product = Product::studio_pro_wireless();
        assert_eq!(product.connection_label(), "무선");
        product.wireless = false;
        assert_eq!(product.connection_label(), "유선");
    }

    #[test]
    fn test_quantity_clamp() {
        let range = QuantityRange::default();
        assert_eq!(range.clamp(3), 3);
        assert_eq!(range.clamp(0), 1);
        assert_eq!(range.clamp(-7), 1);
        assert_eq!(range.clamp(11), 10);
        assert_eq!(range.clamp(i64::MAX), 10);
    }

    #[test]
    fn test_quantity_parse() {
        let range = QuantityRange::default();
        assert_eq!(range.parse("3").unwrap(), 3);
        assert_eq!(range.parse(" 42 ").unwrap(), 10);
        assert!(range.parse("").is_err());
        assert!(range.parse("two").is_err());
        assert!(range.parse("2.5").is_err());
    }
}
