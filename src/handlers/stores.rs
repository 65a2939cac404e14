use actix_web::{web, HttpResponse};

use super::{run, Created, ListParams, PatchRequest};
use crate::domain::errors::{require_affected, DomainError};
use crate::domain::page::Page;
use crate::domain::party::{Store, StoreInput};
use crate::domain::patch::{PatchSet, STORE_PATCH};
use crate::domain::ports::StoreRepository;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /store
#[utoipa::path(
    post,
    path = "/store",
    request_body = StoreInput,
    responses(
        (status = 201, description = "Store created", body = Created),
        (status = 400, description = "Invalid store"),
    ),
    tag = "stores"
)]
pub async fn create_store(
    state: web::Data<AppState>,
    body: web::Json<StoreInput>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner();
    let id = run(move || {
        input.validate()?;
        state.stores.create(&input)
    })
    .await?;
    Ok(HttpResponse::Created().json(Created { id }))
}

/// GET /store
#[utoipa::path(
    get,
    path = "/store",
    params(ListParams),
    responses((status = 200, description = "Page of stores", body = Page<Store>)),
    tag = "stores"
)]
pub async fn list_stores(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, AppError> {
    let query = params.into_inner().into_query();
    let page = run(move || state.stores.list(&query)).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /store/{id}
#[utoipa::path(
    get,
    path = "/store/{id}",
    params(("id" = i32, Path, description = "Store id")),
    responses(
        (status = 200, description = "Store found", body = Store),
        (status = 404, description = "Store not found"),
    ),
    tag = "stores"
)]
pub async fn get_store(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let store = run(move || {
        state
            .stores
            .find_by_id(id)?
            .ok_or(DomainError::NotFound("Store"))
    })
    .await?;
    Ok(HttpResponse::Ok().json(store))
}

/// PUT /store/{id}
#[utoipa::path(
    put,
    path = "/store/{id}",
    params(("id" = i32, Path, description = "Store id")),
    request_body = StoreInput,
    responses(
        (status = 204, description = "Store replaced"),
        (status = 404, description = "Store not found"),
    ),
    tag = "stores"
)]
pub async fn update_store(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<StoreInput>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let input = body.into_inner();
    run(move || {
        input.validate()?;
        require_affected(state.stores.update(id, &input)?, "Store")
    })
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// PATCH /store/{id}
#[utoipa::path(
    patch,
    path = "/store/{id}",
    params(("id" = i32, Path, description = "Store id")),
    request_body = PatchRequest,
    responses(
        (status = 204, description = "Store updated"),
        (status = 400, description = "Empty patch, unknown column or mistyped value"),
        (status = 404, description = "Store not found"),
    ),
    tag = "stores"
)]
pub async fn patch_store(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<PatchRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let fields = body.into_inner().fields;
    run(move || {
        let patch = PatchSet::build(&STORE_PATCH, id, &fields)?;
        require_affected(state.stores.patch(&patch)?, STORE_PATCH.entity)
    })
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /store/{id}
#[utoipa::path(
    delete,
    path = "/store/{id}",
    params(("id" = i32, Path, description = "Store id")),
    responses(
        (status = 204, description = "Store deleted"),
        (status = 404, description = "Store not found"),
        (status = 409, description = "Store still has staff or orders"),
    ),
    tag = "stores"
)]
pub async fn delete_store(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    run(move || require_affected(state.stores.delete(id)?, "Store")).await?;
    Ok(HttpResponse::NoContent().finish())
}
