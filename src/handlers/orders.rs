use actix_web::{web, HttpResponse};
use serde::Deserialize;
use utoipa::IntoParams;

use super::{run, Created, ListParams, PatchRequest};
use crate::domain::order::{NewOrderItem, Order, OrderInput, OrderItem, OrderTotal, OrderView};
use crate::domain::page::Page;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TotalParams {
    pub order_id: i32,
    /// Promo code name, matched case-insensitively.
    pub promo_code: Option<String>,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /order
///
/// Creates an order without items; `order_date` defaults to today.
#[utoipa::path(
    post,
    path = "/order",
    request_body = OrderInput,
    responses(
        (status = 201, description = "Order created", body = Created),
        (status = 400, description = "Invalid order"),
        (status = 409, description = "Unknown customer, store, staff or promo code"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    state: web::Data<AppState>,
    body: web::Json<OrderInput>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner();
    let id = run(move || state.orders.create_order(&input)).await?;
    Ok(HttpResponse::Created().json(Created { id }))
}

/// GET /order
///
/// Returns a page of orders without their items.
#[utoipa::path(
    get,
    path = "/order",
    params(ListParams),
    responses((status = 200, description = "Page of orders", body = Page<Order>)),
    tag = "orders"
)]
pub async fn list_orders(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, AppError> {
    let query = params.into_inner().into_query();
    let page = run(move || state.orders.list_orders(&query)).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /order/{id}
///
/// Returns the order with its customer, store, staff member and items.
#[utoipa::path(
    get,
    path = "/order/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order found", body = OrderView),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let order = run(move || state.orders.get_order(id)).await?;
    Ok(HttpResponse::Ok().json(order))
}

/// PUT /order/{id}
#[utoipa::path(
    put,
    path = "/order/{id}",
    params(("id" = i32, Path, description = "Order id")),
    request_body = OrderInput,
    responses(
        (status = 204, description = "Order replaced"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order has items reserved from another store"),
    ),
    tag = "orders"
)]
pub async fn update_order(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<OrderInput>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let input = body.into_inner();
    run(move || state.orders.update_order(id, &input)).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// PATCH /order/{id}
#[utoipa::path(
    patch,
    path = "/order/{id}",
    params(("id" = i32, Path, description = "Order id")),
    request_body = PatchRequest,
    responses(
        (status = 204, description = "Order updated"),
        (status = 400, description = "Empty patch, unknown column or mistyped value"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order has items reserved from another store"),
    ),
    tag = "orders"
)]
pub async fn patch_order(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<PatchRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let fields = body.into_inner().fields;
    run(move || state.orders.patch_order(id, &fields)).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /order/{id}
///
/// Deleting an order deletes its items; their stock is not returned.
#[utoipa::path(
    delete,
    path = "/order/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    run(move || state.orders.delete_order(id)).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /order/{id}/items
///
/// Reserves the quantity from the stock of the order's store and appends the
/// item. Nothing changes when the store holds too few units.
#[utoipa::path(
    post,
    path = "/order/{id}/items",
    params(("id" = i32, Path, description = "Order id")),
    request_body = NewOrderItem,
    responses(
        (status = 201, description = "Item added", body = OrderItem),
        (status = 400, description = "Invalid item"),
        (status = 404, description = "Order not found or store holds no stock of the product"),
        (status = 422, description = "Store holds fewer units than requested"),
    ),
    tag = "orders"
)]
pub async fn add_item(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<NewOrderItem>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let item = body.into_inner();
    let added = run(move || state.orders.add_item(order_id, &item)).await?;
    Ok(HttpResponse::Created().json(added))
}

/// DELETE /order/{id}/items/{item_id}
///
/// Removes the item and returns its quantity to the order's store.
#[utoipa::path(
    delete,
    path = "/order/{id}/items/{item_id}",
    params(
        ("id" = i32, Path, description = "Order id"),
        ("item_id" = i32, Path, description = "Item number within the order"),
    ),
    responses(
        (status = 200, description = "Removed item", body = OrderItem),
        (status = 404, description = "Order item not found"),
    ),
    tag = "orders"
)]
pub async fn remove_item(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
) -> Result<HttpResponse, AppError> {
    let (order_id, item_id) = path.into_inner();
    let removed = run(move || state.orders.remove_item(order_id, item_id)).await?;
    Ok(HttpResponse::Ok().json(removed))
}

/// GET /order/total_sum
///
/// Sum of the order's items, discounted by the promo code when it exists.
/// An unknown code yields the undiscounted total with `promo_code: null`.
#[utoipa::path(
    get,
    path = "/order/total_sum",
    params(TotalParams),
    responses(
        (status = 200, description = "Order total", body = OrderTotal),
        (status = 404, description = "Order has no items"),
    ),
    tag = "orders"
)]
pub async fn total_sum(
    state: web::Data<AppState>,
    params: web::Query<TotalParams>,
) -> Result<HttpResponse, AppError> {
    let TotalParams {
        order_id,
        promo_code,
    } = params.into_inner();
    let total = run(move || state.orders.order_total(order_id, promo_code.as_deref())).await?;
    Ok(HttpResponse::Ok().json(total))
}
