use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::catalog::ensure_name;
use super::errors::DomainError;

/// How a promo code's `discount` is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscountType {
    /// Absolute amount, only above `order_limit_price`.
    Fixed,
    /// Percentage of the order total.
    Percent,
    /// Stored value neither of the above; applies no discount.
    Other(String),
}

impl DiscountType {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "fixed" => DiscountType::Fixed,
            "percent" => DiscountType::Percent,
            _ => DiscountType::Other(raw.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PromoCode {
    pub code_id: i32,
    pub code_name: String,
    #[schema(value_type = String)]
    pub discount: BigDecimal,
    pub discount_type: String,
    #[schema(value_type = String)]
    pub order_limit_price: BigDecimal,
}

impl PromoCode {
    pub fn kind(&self) -> DiscountType {
        DiscountType::parse(&self.discount_type)
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PromoCodeInput {
    pub code_name: String,
    #[schema(value_type = String)]
    pub discount: BigDecimal,
    pub discount_type: String,
    #[serde(default)]
    #[schema(value_type = String)]
    pub order_limit_price: BigDecimal,
}

impl PromoCodeInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_name("code_name", &self.code_name)?;
        if self.discount < BigDecimal::zero() {
            return Err(DomainError::invalid("discount must not be negative"));
        }
        if self.order_limit_price < BigDecimal::zero() {
            return Err(DomainError::invalid("order_limit_price must not be negative"));
        }
        match DiscountType::parse(&self.discount_type) {
            DiscountType::Percent if self.discount > BigDecimal::from(100) => Err(
                DomainError::invalid("percent discount must not exceed 100"),
            ),
            DiscountType::Other(kind) => Err(DomainError::invalid(format!(
                "discount_type must be 'fixed' or 'percent', got '{kind}'"
            ))),
            _ => Ok(()),
        }
    }

    /// Stored form of `discount_type`.
    pub fn canonical_type(&self) -> String {
        self.discount_type.trim().to_ascii_lowercase()
    }
}
