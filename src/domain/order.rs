use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::errors::{ensure_positive, DomainError};
use super::party::{Customer, Staff, Store};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Order {
    pub order_id: i32,
    pub customer_id: i32,
    pub order_status: i16,
    pub order_date: NaiveDate,
    pub required_date: NaiveDate,
    pub shipped_date: Option<NaiveDate>,
    pub store_id: i32,
    pub staff_id: i32,
    pub promo_code: Option<i32>,
}

/// Body of order creation and full replacement. `order_date` is set by the
/// database on create and only taken from the body on update.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderInput {
    pub customer_id: i32,
    pub order_status: i16,
    pub order_date: Option<NaiveDate>,
    pub required_date: NaiveDate,
    pub shipped_date: Option<NaiveDate>,
    pub store_id: i32,
    pub staff_id: i32,
    pub promo_code: Option<i32>,
}

impl OrderInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_positive("customer_id", self.customer_id)?;
        ensure_positive("store_id", self.store_id)?;
        ensure_positive("staff_id", self.staff_id)?;
        if self.order_status < 0 {
            return Err(DomainError::invalid("order_status must not be negative"));
        }
        if let (Some(ordered), Some(shipped)) = (self.order_date, self.shipped_date) {
            if shipped < ordered {
                return Err(DomainError::invalid(
                    "shipped_date must not be before order_date",
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OrderItem {
    pub order_id: i32,
    pub item_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    #[schema(value_type = String)]
    pub list_price: BigDecimal,
    #[schema(value_type = String)]
    pub discount: BigDecimal,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewOrderItem {
    pub product_id: i32,
    pub quantity: i32,
    #[schema(value_type = String)]
    pub list_price: BigDecimal,
    #[serde(default)]
    #[schema(value_type = String)]
    pub discount: BigDecimal,
}

impl NewOrderItem {
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_positive("product_id", self.product_id)?;
        ensure_positive("quantity", self.quantity)?;
        if self.list_price < BigDecimal::zero() {
            return Err(DomainError::invalid("list_price must not be negative"));
        }
        if self.discount < BigDecimal::zero() {
            return Err(DomainError::invalid("discount must not be negative"));
        }
        Ok(())
    }
}

/// Read-side snapshot of an order with everything it references.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub customer_data: Customer,
    pub store_data: Store,
    pub staff_data: Staff,
    pub order_items: Vec<OrderItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OrderTotal {
    pub order_id: i32,
    #[schema(value_type = String)]
    pub subtotal: BigDecimal,
    /// Name of the promo code that was applied, if one matched.
    pub promo_code: Option<String>,
    #[schema(value_type = String)]
    pub total: BigDecimal,
}
