//! HTTP handlers for the Equipment API

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestResponse, BadRequestUuidResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
    UuidPath, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::EquipmentResult;
use crate::models::{CreateEquipment, Equipment, EquipmentCategory, QuantityChange};
use crate::repository::EquipmentRepository;
use crate::service::EquipmentService;

/// OpenAPI documentation for the Equipment API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_equipment,
        register_equipment,
        get_by_serial,
        delete_equipment,
        increment_stock,
        decrement_stock,
    ),
    components(
        schemas(Equipment, CreateEquipment, EquipmentCategory, QuantityChange),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Equipment", description = "Equipment stock management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the equipment router with all HTTP endpoints
pub fn router<R: EquipmentRepository + 'static>(service: EquipmentService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_equipment).post(register_equipment))
        .route("/serial/{serial_number}", get(get_by_serial))
        .route("/{id}", delete(delete_equipment))
        .route("/{id}/increment", patch(increment_stock))
        .route("/{id}/decrement", patch(decrement_stock))
        .with_state(shared_service)
}

/// List every registered equipment line
#[utoipa::path(
    get,
    path = "",
    tag = "Equipment",
    responses(
        (status = 200, description = "List of equipment", body = Vec<Equipment>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_equipment<R: EquipmentRepository>(
    State(service): State<Arc<EquipmentService<R>>>,
) -> EquipmentResult<Json<Vec<Equipment>>> {
    let equipment = service.list_equipment().await?;
    Ok(Json(equipment))
}

/// Register a new equipment line
#[utoipa::path(
    post,
    path = "",
    tag = "Equipment",
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment registered successfully", body = Equipment),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register_equipment<R: EquipmentRepository>(
    State(service): State<Arc<EquipmentService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateEquipment>,
) -> EquipmentResult<impl IntoResponse> {
    let equipment = service.register(input).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Get an equipment line by serial number
#[utoipa::path(
    get,
    path = "/serial/{serial_number}",
    tag = "Equipment",
    params(
        ("serial_number" = String, Path, description = "Equipment serial number")
    ),
    responses(
        (status = 200, description = "Equipment found", body = Equipment),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_by_serial<R: EquipmentRepository>(
    State(service): State<Arc<EquipmentService<R>>>,
    axum::extract::Path(serial_number): axum::extract::Path<String>,
) -> EquipmentResult<Json<Equipment>> {
    let equipment = service.find_by_serial(&serial_number).await?;
    Ok(Json(equipment))
}

/// Delete an equipment line
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Equipment",
    params(
        ("id" = Uuid, Path, description = "Equipment ID")
    ),
    responses(
        (status = 204, description = "Equipment deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_equipment<R: EquipmentRepository>(
    State(service): State<Arc<EquipmentService<R>>>,
    UuidPath(id): UuidPath,
) -> EquipmentResult<impl IntoResponse> {
    service.delete_equipment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Increment the stock of an equipment line
#[utoipa::path(
    patch,
    path = "/{id}/increment",
    tag = "Equipment",
    params(
        ("id" = Uuid, Path, description = "Equipment ID")
    ),
    request_body = QuantityChange,
    responses(
        (status = 200, description = "Stock incremented successfully", body = Equipment),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn increment_stock<R: EquipmentRepository>(
    State(service): State<Arc<EquipmentService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(change): ValidatedJson<QuantityChange>,
) -> EquipmentResult<Json<Equipment>> {
    let equipment = service.increment(id, change.quantity).await?;
    Ok(Json(equipment))
}

/// Decrement the stock of an equipment line
#[utoipa::path(
    patch,
    path = "/{id}/decrement",
    tag = "Equipment",
    params(
        ("id" = Uuid, Path, description = "Equipment ID")
    ),
    request_body = QuantityChange,
    responses(
        (status = 200, description = "Stock decremented successfully", body = Equipment),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn decrement_stock<R: EquipmentRepository>(
    State(service): State<Arc<EquipmentService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(change): ValidatedJson<QuantityChange>,
) -> EquipmentResult<Json<Equipment>> {
    let equipment = service.decrement(id, change.quantity).await?;
    Ok(Json(equipment))
}
