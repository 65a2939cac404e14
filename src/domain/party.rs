//! Stores, the staff who work in them and the customers who buy from them.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::catalog::ensure_name;
use super::errors::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Store {
    pub store_id: i32,
    pub store_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StoreInput {
    pub store_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

impl StoreInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_name("store_name", &self.store_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Customer {
    pub customer_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CustomerInput {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

impl CustomerInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_name("first_name", &self.first_name)?;
        ensure_name("last_name", &self.last_name)?;
        ensure_email(&self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Staff {
    pub staff_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub active: bool,
    pub store_id: i32,
    pub manager_id: Option<i32>,
}

/// Staff member with the store and manager records resolved.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StaffView {
    #[serde(flatten)]
    pub staff: Staff,
    pub store_data: Store,
    pub manager_data: Option<Staff>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StaffInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    pub store_id: i32,
    pub manager_id: Option<i32>,
}

fn default_active() -> bool {
    true
}

impl StaffInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_name("first_name", &self.first_name)?;
        ensure_name("last_name", &self.last_name)?;
        ensure_email(&self.email)
    }
}

/// One sold line attributed to the staff member who took the order.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StaffReportLine {
    pub full_name: String,
    pub category: String,
    pub product: String,
    pub quantity: i32,
    #[schema(value_type = String)]
    pub line_total: BigDecimal,
    pub order_date: NaiveDate,
}

pub(crate) fn ensure_email(email: &str) -> Result<(), DomainError> {
    let trimmed = email.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(DomainError::invalid(format!("'{email}' is not a valid email"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(email: &str) -> CustomerInput {
        CustomerInput {
            first_name: "Debra".to_string(),
            last_name: "Burks".to_string(),
            phone: None,
            email: email.to_string(),
            street: None,
            city: Some("Orchard Park".to_string()),
            state: Some("NY".to_string()),
            zip_code: Some("14127".to_string()),
        }
    }

    #[test]
    fn customer_email_must_have_both_parts() {
        assert!(customer("debra.burks@yahoo.com").validate().is_ok());
        assert!(customer("debra.burks").validate().is_err());
        assert!(customer("@yahoo.com").validate().is_err());
    }

    #[test]
    fn staff_defaults_to_active() {
        let staff: StaffInput = serde_json::from_value(serde_json::json!({
            "first_name": "Fabiola",
            "last_name": "Jackson",
            "email": "fabiola.jackson@bikes.shop",
            "store_id": 1
        }))
        .expect("valid staff body");
        assert!(staff.active);
        assert!(staff.manager_id.is_none());
        assert!(staff.validate().is_ok());
    }
}
