use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::errors::{ensure_non_negative, ensure_positive, DomainError};

/// Quantity on hand of one product in one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Stock {
    pub store_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

/// Body of both stock creation and the quantity overwrite.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StockInput {
    pub store_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

impl StockInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_positive("store_id", self.store_id)?;
        ensure_positive("product_id", self.product_id)?;
        ensure_non_negative("quantity", self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StockProduct {
    pub product_id: i32,
    pub product_name: Option<String>,
    pub brand_id: Option<i32>,
    pub category_id: Option<i32>,
    pub model_year: Option<i16>,
    #[schema(value_type = Option<String>)]
    pub list_price: Option<BigDecimal>,
    pub quantity: i32,
}

/// Every stock row of a store, plus the store-wide unit count.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StoreStock {
    pub store_id: i32,
    pub quantity: i64,
    pub products: Vec<StockProduct>,
}

impl StoreStock {
    pub fn from_products(store_id: i32, products: Vec<StockProduct>) -> Self {
        let quantity = products.iter().map(|p| i64::from(p.quantity)).sum();
        Self {
            store_id,
            quantity,
            products,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SendProduct {
    pub sender_id: i32,
    pub receiver_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

impl SendProduct {
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_positive("quantity", self.quantity)?;
        if self.sender_id == self.receiver_id {
            return Err(DomainError::invalid(
                "sender_id and receiver_id must be different stores",
            ));
        }
        Ok(())
    }
}

/// Quantities of both rows after a committed transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TransferReceipt {
    pub sender: Stock,
    pub receiver: Stock,
}
