use actix_web::{web, HttpResponse};

use super::{run, Created, ListParams};
use crate::domain::errors::{require_affected, DomainError};
use crate::domain::page::Page;
use crate::domain::ports::PromoCodeRepository;
use crate::domain::promo_code::{PromoCode, PromoCodeInput};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /code
#[utoipa::path(
    post,
    path = "/code",
    request_body = PromoCodeInput,
    responses(
        (status = 201, description = "Promo code created", body = Created),
        (status = 400, description = "Invalid promo code"),
        (status = 409, description = "Code name already taken"),
    ),
    tag = "promo codes"
)]
pub async fn create_code(
    state: web::Data<AppState>,
    body: web::Json<PromoCodeInput>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner();
    let id = run(move || {
        input.validate()?;
        state.promo_codes.create(&input)
    })
    .await?;
    Ok(HttpResponse::Created().json(Created { id }))
}

/// GET /code
#[utoipa::path(
    get,
    path = "/code",
    params(ListParams),
    responses((status = 200, description = "Page of promo codes", body = Page<PromoCode>)),
    tag = "promo codes"
)]
pub async fn list_codes(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, AppError> {
    let query = params.into_inner().into_query();
    let page = run(move || state.promo_codes.list(&query)).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /code/{id}
#[utoipa::path(
    get,
    path = "/code/{id}",
    params(("id" = i32, Path, description = "Promo code id")),
    responses(
        (status = 200, description = "Promo code found", body = PromoCode),
        (status = 404, description = "Promo code not found"),
    ),
    tag = "promo codes"
)]
pub async fn get_code(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let code = run(move || {
        state
            .promo_codes
            .find_by_id(id)?
            .ok_or(DomainError::NotFound("Promo code"))
    })
    .await?;
    Ok(HttpResponse::Ok().json(code))
}

/// PUT /code/{id}
#[utoipa::path(
    put,
    path = "/code/{id}",
    params(("id" = i32, Path, description = "Promo code id")),
    request_body = PromoCodeInput,
    responses(
        (status = 204, description = "Promo code replaced"),
        (status = 404, description = "Promo code not found"),
    ),
    tag = "promo codes"
)]
pub async fn update_code(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<PromoCodeInput>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let input = body.into_inner();
    run(move || {
        input.validate()?;
        require_affected(state.promo_codes.update(id, &input)?, "Promo code")
    })
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /code/{id}
///
/// Orders that used the code keep their items; their `promo_code` becomes null.
#[utoipa::path(
    delete,
    path = "/code/{id}",
    params(("id" = i32, Path, description = "Promo code id")),
    responses(
        (status = 204, description = "Promo code deleted"),
        (status = 404, description = "Promo code not found"),
    ),
    tag = "promo codes"
)]
pub async fn delete_code(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    run(move || require_affected(state.promo_codes.delete(id)?, "Promo code")).await?;
    Ok(HttpResponse::NoContent().finish())
}
