//! Order totals and promo code discounts.
//!
//! Intermediate amounts keep full precision; only [`round_total`] rounds.

use bigdecimal::{BigDecimal, RoundingMode, Zero};

use super::promo_code::{DiscountType, PromoCode};

/// Price and quantity of one order item, as captured at sale time.
#[derive(Debug, Clone, PartialEq)]
pub struct LineAmount {
    pub list_price: BigDecimal,
    pub quantity: i32,
}

pub fn subtotal(lines: &[LineAmount]) -> BigDecimal {
    lines
        .iter()
        .map(|line| &line.list_price * BigDecimal::from(line.quantity))
        .sum()
}

/// Applies `promo` to `total`. A fixed discount never takes the total
/// below zero.
pub fn apply_discount(total: &BigDecimal, promo: &PromoCode) -> BigDecimal {
    match promo.kind() {
        DiscountType::Fixed if *total > promo.order_limit_price => {
            let discounted = total - &promo.discount;
            if discounted < BigDecimal::zero() {
                BigDecimal::zero()
            } else {
                discounted
            }
        }
        DiscountType::Fixed => total.clone(),
        DiscountType::Percent => total - total * &promo.discount / BigDecimal::from(100),
        DiscountType::Other(_) => total.clone(),
    }
}

/// Two decimal places, half away from zero.
pub fn round_total(total: &BigDecimal) -> BigDecimal {
    total.with_scale_round(2, RoundingMode::HalfUp)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    fn line(price: &str, quantity: i32) -> LineAmount {
        LineAmount {
            list_price: dec(price),
            quantity,
        }
    }

    fn promo(kind: &str, discount: &str, limit: &str) -> PromoCode {
        PromoCode {
            code_id: 1,
            code_name: "TEST".to_string(),
            discount: dec(discount),
            discount_type: kind.to_string(),
            order_limit_price: dec(limit),
        }
    }

    #[test]
    fn subtotal_sums_price_times_quantity() {
        let total = subtotal(&[line("10", 2), line("5", 1)]);
        assert_eq!(round_total(&total).to_string(), "25.00");
    }

    #[test]
    fn subtotal_of_nothing_is_zero() {
        assert_eq!(subtotal(&[]), BigDecimal::zero());
    }

    #[test]
    fn percent_discount() {
        let total = apply_discount(&dec("100.00"), &promo("percent", "10", "0"));
        assert_eq!(round_total(&total).to_string(), "90.00");
    }

    #[test]
    fn fixed_discount_above_limit() {
        let total = apply_discount(&dec("100.00"), &promo("fixed", "20", "50"));
        assert_eq!(round_total(&total).to_string(), "80.00");
    }

    #[test]
    fn fixed_discount_below_limit_is_ignored() {
        let total = apply_discount(&dec("40.00"), &promo("fixed", "20", "50"));
        assert_eq!(round_total(&total).to_string(), "40.00");
    }

    #[test]
    fn fixed_discount_requires_strictly_greater_total() {
        let total = apply_discount(&dec("50.00"), &promo("fixed", "20", "50"));
        assert_eq!(total, dec("50.00"));
    }

    #[test]
    fn fixed_discount_is_floored_at_zero() {
        let total = apply_discount(&dec("15.00"), &promo("fixed", "20", "10"));
        assert_eq!(total, BigDecimal::zero());
    }

    #[test]
    fn unknown_discount_type_is_a_no_op() {
        let total = apply_discount(&dec("100.00"), &promo("proced", "10", "0"));
        assert_eq!(total, dec("100.00"));
    }

    #[test]
    fn rounding_happens_once_at_the_end() {
        // 3 x 3.335 = 10.005; rounding each line first would give 10.02.
        let total = subtotal(&[line("3.335", 3)]);
        assert_eq!(round_total(&total).to_string(), "10.01");
    }

    #[test]
    fn percent_discount_rounds_half_up() {
        // 10.05 - 10% = 9.045
        let total = apply_discount(&dec("10.05"), &promo("percent", "10", "0"));
        assert_eq!(round_total(&total).to_string(), "9.05");
    }
}
