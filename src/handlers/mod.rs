pub mod catalog;
pub mod customers;
pub mod orders;
pub mod promo_codes;
pub mod staff;
pub mod stocks;
pub mod stores;

use actix_web::{error, web, HttpRequest};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

use crate::domain::errors::DomainError;
use crate::domain::page::ListQuery;
use crate::errors::AppError;

/// Runs blocking repository work on actix's thread pool.
pub(crate) async fn run<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    web::block(work)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(AppError::from)
}

// ── Shared DTOs ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Rows to skip. Defaults to 0.
    pub offset: Option<i64>,
    /// Page size. Defaults to 10, maximum 100.
    pub limit: Option<i64>,
    /// Case-insensitive substring filter.
    pub search: Option<String>,
}

impl ListParams {
    pub fn into_query(self) -> ListQuery {
        ListQuery::new(self.offset, self.limit, self.search)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Created {
    pub id: i32,
}

/// Partial update: only the named columns are written.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PatchRequest {
    #[schema(value_type = Object)]
    pub fields: Map<String, Value>,
}

// ── Extractor errors ─────────────────────────────────────────────────────────

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        error::Error::from(AppError::BadRequest(err.to_string()))
    })
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req: &HttpRequest| {
        error::Error::from(AppError::BadRequest(err.to_string()))
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        error::Error::from(AppError::BadRequest(err.to_string()))
    })
}
