use actix_web::{web, HttpResponse};

use super::{run, Created, ListParams, PatchRequest};
use crate::domain::errors::{require_affected, DomainError};
use crate::domain::page::Page;
use crate::domain::party::{Customer, CustomerInput};
use crate::domain::patch::{PatchSet, CUSTOMER_PATCH};
use crate::domain::ports::CustomerRepository;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /customer
#[utoipa::path(
    post,
    path = "/customer",
    request_body = CustomerInput,
    responses(
        (status = 201, description = "Customer created", body = Created),
        (status = 400, description = "Invalid customer"),
    ),
    tag = "customers"
)]
pub async fn create_customer(
    state: web::Data<AppState>,
    body: web::Json<CustomerInput>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner();
    let id = run(move || {
        input.validate()?;
        state.customers.create(&input)
    })
    .await?;
    Ok(HttpResponse::Created().json(Created { id }))
}

/// GET /customer
#[utoipa::path(
    get,
    path = "/customer",
    params(ListParams),
    responses((status = 200, description = "Page of customers", body = Page<Customer>)),
    tag = "customers"
)]
pub async fn list_customers(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, AppError> {
    let query = params.into_inner().into_query();
    let page = run(move || state.customers.list(&query)).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /customer/{id}
#[utoipa::path(
    get,
    path = "/customer/{id}",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer found", body = Customer),
        (status = 404, description = "Customer not found"),
    ),
    tag = "customers"
)]
pub async fn get_customer(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let customer = run(move || {
        state
            .customers
            .find_by_id(id)?
            .ok_or(DomainError::NotFound("Customer"))
    })
    .await?;
    Ok(HttpResponse::Ok().json(customer))
}

/// PUT /customer/{id}
#[utoipa::path(
    put,
    path = "/customer/{id}",
    params(("id" = i32, Path, description = "Customer id")),
    request_body = CustomerInput,
    responses(
        (status = 204, description = "Customer replaced"),
        (status = 404, description = "Customer not found"),
    ),
    tag = "customers"
)]
pub async fn update_customer(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<CustomerInput>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let input = body.into_inner();
    run(move || {
        input.validate()?;
        require_affected(state.customers.update(id, &input)?, "Customer")
    })
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// PATCH /customer/{id}
#[utoipa::path(
    patch,
    path = "/customer/{id}",
    params(("id" = i32, Path, description = "Customer id")),
    request_body = PatchRequest,
    responses(
        (status = 204, description = "Customer updated"),
        (status = 400, description = "Empty patch, unknown column or mistyped value"),
        (status = 404, description = "Customer not found"),
    ),
    tag = "customers"
)]
pub async fn patch_customer(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<PatchRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let fields = body.into_inner().fields;
    run(move || {
        let patch = PatchSet::build(&CUSTOMER_PATCH, id, &fields)?;
        require_affected(state.customers.patch(&patch)?, CUSTOMER_PATCH.entity)
    })
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /customer/{id}
#[utoipa::path(
    delete,
    path = "/customer/{id}",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 404, description = "Customer not found"),
        (status = 409, description = "Customer still has orders"),
    ),
    tag = "customers"
)]
pub async fn delete_customer(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    run(move || require_affected(state.customers.delete(id)?, "Customer")).await?;
    Ok(HttpResponse::NoContent().finish())
}
