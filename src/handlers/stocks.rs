use actix_web::{web, HttpResponse};

use super::{run, ListParams};
use crate::domain::page::Page;
use crate::domain::stock::{SendProduct, Stock, StockInput, StoreStock, TransferReceipt};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /stock
#[utoipa::path(
    post,
    path = "/stock",
    request_body = StockInput,
    responses(
        (status = 201, description = "Stock row created", body = Stock),
        (status = 400, description = "Invalid stock row"),
        (status = 409, description = "Row exists or store/product unknown"),
    ),
    tag = "stock"
)]
pub async fn create_stock(
    state: web::Data<AppState>,
    body: web::Json<StockInput>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner();
    let stock = run(move || state.stock.create_stock(&input)).await?;
    Ok(HttpResponse::Created().json(stock))
}

/// GET /stock
///
/// Stock grouped by store; `count` is the number of stores holding stock.
#[utoipa::path(
    get,
    path = "/stock",
    params(ListParams),
    responses((status = 200, description = "Page of store stock", body = Page<StoreStock>)),
    tag = "stock"
)]
pub async fn list_stock(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, AppError> {
    let query = params.into_inner().into_query();
    let page = run(move || state.stock.list_stock(&query)).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /stock/{store_id}
#[utoipa::path(
    get,
    path = "/stock/{store_id}",
    params(("store_id" = i32, Path, description = "Store id")),
    responses(
        (status = 200, description = "Products and total quantity held by the store", body = StoreStock),
        (status = 404, description = "Store holds no stock"),
    ),
    tag = "stock"
)]
pub async fn get_store_stock(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let store_id = path.into_inner();
    let stock = run(move || state.stock.get_store_stock(store_id)).await?;
    Ok(HttpResponse::Ok().json(stock))
}

/// PUT /stock
#[utoipa::path(
    put,
    path = "/stock",
    request_body = StockInput,
    responses(
        (status = 204, description = "Quantity set"),
        (status = 404, description = "Stock row not found"),
    ),
    tag = "stock"
)]
pub async fn update_stock(
    state: web::Data<AppState>,
    body: web::Json<StockInput>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner();
    run(move || state.stock.set_quantity(&input)).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /stock/{store_id}/{product_id}
#[utoipa::path(
    delete,
    path = "/stock/{store_id}/{product_id}",
    params(
        ("store_id" = i32, Path, description = "Store id"),
        ("product_id" = i32, Path, description = "Product id"),
    ),
    responses(
        (status = 204, description = "Stock row deleted"),
        (status = 404, description = "Stock row not found"),
    ),
    tag = "stock"
)]
pub async fn delete_stock(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
) -> Result<HttpResponse, AppError> {
    let (store_id, product_id) = path.into_inner();
    run(move || state.stock.delete_stock(store_id, product_id)).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /stock/send_product
///
/// Moves units of one product from the sender store to the receiver store.
/// The decrement and the receiver upsert commit together or not at all.
#[utoipa::path(
    post,
    path = "/stock/send_product",
    request_body = SendProduct,
    responses(
        (status = 200, description = "Both stock rows after the transfer", body = TransferReceipt),
        (status = 400, description = "Non-positive quantity or same store"),
        (status = 404, description = "Sender holds no stock of the product"),
        (status = 422, description = "Sender holds fewer units than requested"),
    ),
    tag = "stock"
)]
pub async fn send_product(
    state: web::Data<AppState>,
    body: web::Json<SendProduct>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    let receipt = run(move || state.stock.send_product(&request)).await?;
    Ok(HttpResponse::Ok().json(receipt))
}
