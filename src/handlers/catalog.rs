use actix_web::{web, HttpResponse};

use super::{run, Created, ListParams};
use crate::domain::catalog::{Brand, BrandInput, Category, CategoryInput, ProductInput, ProductView};
use crate::domain::errors::{require_affected, DomainError};
use crate::domain::page::Page;
use crate::domain::ports::{BrandRepository, CategoryRepository, ProductRepository};
use crate::errors::AppError;
use crate::state::AppState;

// ── Brands ───────────────────────────────────────────────────────────────────

/// POST /brand
#[utoipa::path(
    post,
    path = "/brand",
    request_body = BrandInput,
    responses(
        (status = 201, description = "Brand created", body = Created),
        (status = 400, description = "Invalid brand"),
    ),
    tag = "catalog"
)]
pub async fn create_brand(
    state: web::Data<AppState>,
    body: web::Json<BrandInput>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner();
    let id = run(move || {
        input.validate()?;
        state.brands.create(&input)
    })
    .await?;
    Ok(HttpResponse::Created().json(Created { id }))
}

/// GET /brand
#[utoipa::path(
    get,
    path = "/brand",
    params(ListParams),
    responses((status = 200, description = "Page of brands", body = Page<Brand>)),
    tag = "catalog"
)]
pub async fn list_brands(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, AppError> {
    let query = params.into_inner().into_query();
    let page = run(move || state.brands.list(&query)).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /brand/{id}
#[utoipa::path(
    get,
    path = "/brand/{id}",
    params(("id" = i32, Path, description = "Brand id")),
    responses(
        (status = 200, description = "Brand found", body = Brand),
        (status = 404, description = "Brand not found"),
    ),
    tag = "catalog"
)]
pub async fn get_brand(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let brand = run(move || {
        state
            .brands
            .find_by_id(id)?
            .ok_or(DomainError::NotFound("Brand"))
    })
    .await?;
    Ok(HttpResponse::Ok().json(brand))
}

/// PUT /brand/{id}
#[utoipa::path(
    put,
    path = "/brand/{id}",
    params(("id" = i32, Path, description = "Brand id")),
    request_body = BrandInput,
    responses(
        (status = 204, description = "Brand replaced"),
        (status = 404, description = "Brand not found"),
    ),
    tag = "catalog"
)]
pub async fn update_brand(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<BrandInput>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let input = body.into_inner();
    run(move || {
        input.validate()?;
        require_affected(state.brands.update(id, &input)?, "Brand")
    })
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /brand/{id}
#[utoipa::path(
    delete,
    path = "/brand/{id}",
    params(("id" = i32, Path, description = "Brand id")),
    responses(
        (status = 204, description = "Brand deleted"),
        (status = 404, description = "Brand not found"),
        (status = 409, description = "Brand still referenced by products"),
    ),
    tag = "catalog"
)]
pub async fn delete_brand(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    run(move || require_affected(state.brands.delete(id)?, "Brand")).await?;
    Ok(HttpResponse::NoContent().finish())
}

// ── Categories ───────────────────────────────────────────────────────────────

/// POST /category
#[utoipa::path(
    post,
    path = "/category",
    request_body = CategoryInput,
    responses(
        (status = 201, description = "Category created", body = Created),
        (status = 400, description = "Invalid category"),
    ),
    tag = "catalog"
)]
pub async fn create_category(
    state: web::Data<AppState>,
    body: web::Json<CategoryInput>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner();
    let id = run(move || {
        input.validate()?;
        state.categories.create(&input)
    })
    .await?;
    Ok(HttpResponse::Created().json(Created { id }))
}

/// GET /category
#[utoipa::path(
    get,
    path = "/category",
    params(ListParams),
    responses((status = 200, description = "Page of categories", body = Page<Category>)),
    tag = "catalog"
)]
pub async fn list_categories(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, AppError> {
    let query = params.into_inner().into_query();
    let page = run(move || state.categories.list(&query)).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /category/{id}
#[utoipa::path(
    get,
    path = "/category/{id}",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 404, description = "Category not found"),
    ),
    tag = "catalog"
)]
pub async fn get_category(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let category = run(move || {
        state
            .categories
            .find_by_id(id)?
            .ok_or(DomainError::NotFound("Category"))
    })
    .await?;
    Ok(HttpResponse::Ok().json(category))
}

/// PUT /category/{id}
#[utoipa::path(
    put,
    path = "/category/{id}",
    params(("id" = i32, Path, description = "Category id")),
    request_body = CategoryInput,
    responses(
        (status = 204, description = "Category replaced"),
        (status = 404, description = "Category not found"),
    ),
    tag = "catalog"
)]
pub async fn update_category(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<CategoryInput>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let input = body.into_inner();
    run(move || {
        input.validate()?;
        require_affected(state.categories.update(id, &input)?, "Category")
    })
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /category/{id}
#[utoipa::path(
    delete,
    path = "/category/{id}",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category still referenced by products"),
    ),
    tag = "catalog"
)]
pub async fn delete_category(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    run(move || require_affected(state.categories.delete(id)?, "Category")).await?;
    Ok(HttpResponse::NoContent().finish())
}

// ── Products ─────────────────────────────────────────────────────────────────

/// POST /product
#[utoipa::path(
    post,
    path = "/product",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = Created),
        (status = 400, description = "Invalid product"),
        (status = 409, description = "Unknown brand or category"),
    ),
    tag = "catalog"
)]
pub async fn create_product(
    state: web::Data<AppState>,
    body: web::Json<ProductInput>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner();
    let id = run(move || {
        input.validate()?;
        state.products.create(&input)
    })
    .await?;
    Ok(HttpResponse::Created().json(Created { id }))
}

/// GET /product
///
/// Products come with their brand and category.
#[utoipa::path(
    get,
    path = "/product",
    params(ListParams),
    responses((status = 200, description = "Page of products", body = Page<ProductView>)),
    tag = "catalog"
)]
pub async fn list_products(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, AppError> {
    let query = params.into_inner().into_query();
    let page = run(move || state.products.list(&query)).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /product/{id}
#[utoipa::path(
    get,
    path = "/product/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ProductView),
        (status = 404, description = "Product not found"),
    ),
    tag = "catalog"
)]
pub async fn get_product(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let product = run(move || {
        state
            .products
            .find_by_id(id)?
            .ok_or(DomainError::NotFound("Product"))
    })
    .await?;
    Ok(HttpResponse::Ok().json(product))
}

/// PUT /product/{id}
#[utoipa::path(
    put,
    path = "/product/{id}",
    params(("id" = i32, Path, description = "Product id")),
    request_body = ProductInput,
    responses(
        (status = 204, description = "Product replaced"),
        (status = 404, description = "Product not found"),
    ),
    tag = "catalog"
)]
pub async fn update_product(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<ProductInput>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let input = body.into_inner();
    run(move || {
        input.validate()?;
        require_affected(state.products.update(id, &input)?, "Product")
    })
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /product/{id}
#[utoipa::path(
    delete,
    path = "/product/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found"),
    ),
    tag = "catalog"
)]
pub async fn delete_product(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    run(move || require_affected(state.products.delete(id)?, "Product")).await?;
    Ok(HttpResponse::NoContent().finish())
}
