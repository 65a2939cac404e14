use actix_web::{web, HttpResponse};

use super::{run, Created, ListParams, PatchRequest};
use crate::domain::errors::{require_affected, DomainError};
use crate::domain::page::Page;
use crate::domain::party::{StaffInput, StaffReportLine, StaffView};
use crate::domain::patch::{PatchSet, STAFF_PATCH};
use crate::domain::ports::StaffRepository;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /staff
#[utoipa::path(
    post,
    path = "/staff",
    request_body = StaffInput,
    responses(
        (status = 201, description = "Staff member created", body = Created),
        (status = 400, description = "Invalid staff member"),
    ),
    tag = "staff"
)]
pub async fn create_staff(
    state: web::Data<AppState>,
    body: web::Json<StaffInput>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner();
    let id = run(move || {
        input.validate()?;
        state.staff.create(&input)
    })
    .await?;
    Ok(HttpResponse::Created().json(Created { id }))
}

/// GET /staff
#[utoipa::path(
    get,
    path = "/staff",
    params(ListParams),
    responses((status = 200, description = "Page of staff", body = Page<StaffView>)),
    tag = "staff"
)]
pub async fn list_staff(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, AppError> {
    let query = params.into_inner().into_query();
    let page = run(move || state.staff.list(&query)).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /staff/{id}
#[utoipa::path(
    get,
    path = "/staff/{id}",
    params(("id" = i32, Path, description = "Staff id")),
    responses(
        (status = 200, description = "Staff member found", body = StaffView),
        (status = 404, description = "Staff member not found"),
    ),
    tag = "staff"
)]
pub async fn get_staff(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let staff = run(move || {
        state
            .staff
            .find_by_id(id)?
            .ok_or(DomainError::NotFound("Staff"))
    })
    .await?;
    Ok(HttpResponse::Ok().json(staff))
}

/// PUT /staff/{id}
#[utoipa::path(
    put,
    path = "/staff/{id}",
    params(("id" = i32, Path, description = "Staff id")),
    request_body = StaffInput,
    responses(
        (status = 204, description = "Staff member replaced"),
        (status = 404, description = "Staff member not found"),
    ),
    tag = "staff"
)]
pub async fn update_staff(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<StaffInput>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let input = body.into_inner();
    run(move || {
        input.validate()?;
        require_affected(state.staff.update(id, &input)?, "Staff")
    })
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// PATCH /staff/{id}
#[utoipa::path(
    patch,
    path = "/staff/{id}",
    params(("id" = i32, Path, description = "Staff id")),
    request_body = PatchRequest,
    responses(
        (status = 204, description = "Staff member updated"),
        (status = 400, description = "Empty patch, unknown column or mistyped value"),
        (status = 404, description = "Staff member not found"),
    ),
    tag = "staff"
)]
pub async fn patch_staff(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<PatchRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let fields = body.into_inner().fields;
    run(move || {
        let patch = PatchSet::build(&STAFF_PATCH, id, &fields)?;
        require_affected(state.staff.patch(&patch)?, STAFF_PATCH.entity)
    })
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /staff/{id}
#[utoipa::path(
    delete,
    path = "/staff/{id}",
    params(("id" = i32, Path, description = "Staff id")),
    responses(
        (status = 204, description = "Staff member deleted"),
        (status = 404, description = "Staff member not found"),
        (status = 409, description = "Staff member still manages staff or has orders"),
    ),
    tag = "staff"
)]
pub async fn delete_staff(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    run(move || require_affected(state.staff.delete(id)?, "Staff")).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /staffreport
///
/// One line per item sold, attributed to the staff member who took the order.
#[utoipa::path(
    get,
    path = "/staffreport",
    params(ListParams),
    responses((status = 200, description = "Page of report lines", body = Page<StaffReportLine>)),
    tag = "staff"
)]
pub async fn staff_report(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, AppError> {
    let query = params.into_inner().into_query();
    let page = run(move || state.staff.report(&query)).await?;
    Ok(HttpResponse::Ok().json(page))
}
