use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::errors::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Brand {
    pub brand_id: i32,
    pub brand_name: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BrandInput {
    pub brand_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Category {
    pub category_id: i32,
    pub category_name: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CategoryInput {
    pub category_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Product {
    pub product_id: i32,
    pub product_name: String,
    pub brand_id: i32,
    pub category_id: i32,
    pub model_year: i16,
    #[schema(value_type = String)]
    pub list_price: BigDecimal,
}

/// Product with its brand and category resolved.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub brand_data: Brand,
    pub category_data: Category,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProductInput {
    pub product_name: String,
    pub brand_id: i32,
    pub category_id: i32,
    pub model_year: i16,
    #[schema(value_type = String)]
    pub list_price: BigDecimal,
}

pub(crate) fn ensure_name(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid(format!("{field} must not be empty")));
    }
    Ok(())
}

impl BrandInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_name("brand_name", &self.brand_name)
    }
}

impl CategoryInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_name("category_name", &self.category_name)
    }
}

impl ProductInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_name("product_name", &self.product_name)?;
        if self.list_price < BigDecimal::zero() {
            return Err(DomainError::invalid("list_price must not be negative"));
        }
        if !(1900..=2100).contains(&self.model_year) {
            return Err(DomainError::invalid(format!(
                "model_year {} is out of range",
                self.model_year
            )));
        }
        Ok(())
    }
}
