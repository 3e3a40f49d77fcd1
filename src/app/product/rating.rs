//! 星级文本

use std::iter;

pub const FULL_STAR: char = '★';
pub const HALF_STAR: char = '⯨';
pub const EMPTY_STAR: char = '☆';

pub const DEFAULT_MAX_STARS: u32 = 5;

/// 把评分渲染成固定长度 `max_stars` 的星级字符串
///
/// 整数部分为实心星；小数部分 ≥ 0.5 且还有空位时补一颗半星（占一个位置）；
/// 其余用空心星补齐。负数、NaN 按 0 处理，超出上限的评分截到满星。
pub fn render_stars(rating: f64, max_stars: u32) -> String {
    let rating = if rating.is_nan() { 0.0 } else { rating.max(0.0) };
    let whole = rating.floor();

    let mut filled = (whole as u64).min(u64::from(max_stars)) as u32;
    let half = rating - whole >= 0.5 && filled < max_stars;

    let mut stars = String::with_capacity(max_stars as usize * FULL_STAR.len_utf8());
    stars.extend(iter::repeat(FULL_STAR).take(filled as usize));
    if half {
        stars.push(HALF_STAR);
        filled += 1;
    }
    stars.extend(iter::repeat(EMPTY_STAR).take((max_stars - filled) as usize));
    stars
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(stars: &str) -> (usize, usize, usize) {
        let count = |glyph| stars.chars().filter(|c| *c == glyph).count();
        (count(FULL_STAR), count(HALF_STAR), count(EMPTY_STAR))
    }

    #[test]
    fn test_known_ratings() {
        let cases = [
            (0.0, (0, 0, 5)),
            (1.0, (1, 0, 4)),
            (1.5, (1, 1, 3)),
            (2.5, (2, 1, 2)),
            (5.0, (5, 0, 0)),
        ];
        for (rating, expected) in cases {
            let stars = render_stars(rating, DEFAULT_MAX_STARS);
            assert_eq!(stars.chars().count(), 5, "rating {}", rating);
            assert_eq!(counts(&stars), expected, "rating {}", rating);
        }
    }

    #[test]
    fn test_glyph_order() {
        assert_eq!(render_stars(2.5, 5), "★★⯨☆☆");
        assert_eq!(render_stars(4.67, 5), "★★★★⯨");
        assert_eq!(render_stars(3.49, 5), "★★★☆☆");
    }

    #[test]
    fn test_no_half_star_when_full() {
        assert_eq!(render_stars(5.5, 5), "★★★★★");
    }

    #[test]
    fn test_malformed_ratings_keep_length() {
        for rating in [-1.0, -0.5, 7.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let stars = render_stars(rating, 5);
            assert_eq!(stars.chars().count(), 5, "rating {}", rating);
        }
        assert_eq!(render_stars(-2.0, 5), "☆☆☆☆☆");
        assert_eq!(render_stars(9.0, 5), "★★★★★");
    }

    #[test]
    fn test_custom_max_stars() {
        assert_eq!(render_stars(3.5, 10).chars().count(), 10);
        assert_eq!(render_stars(3.5, 0), "");
        assert_eq!(render_stars(0.7, 1), "⯨");
    }
}
