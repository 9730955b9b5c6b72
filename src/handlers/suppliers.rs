use super::common::{created_response, success_response, JsonBody, RecordId};
use crate::{
    commands::suppliers::{
        CreateSupplierCommand, DeleteSupplierCommand, SupplierFields, UpdateSupplierCommand,
    },
    dto::{DeletedSupplier, SupplierResponse},
    errors::{ErrorResponse, ServiceError},
    ApiResponse, AppState,
};
use axum::{extract::State, response::IntoResponse, routing::get, Router};

pub fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_suppliers).post(create_supplier))
        .route(
            "/:id",
            get(get_supplier).put(update_supplier).delete(delete_supplier),
        )
}

/// List all suppliers
#[utoipa::path(
    get,
    path = "/suppliers",
    responses(
        (status = 200, description = "Suppliers returned", body = ApiResponse<Vec<SupplierResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "suppliers"
)]
pub async fn list_suppliers(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let suppliers: Vec<SupplierResponse> = state
        .services
        .suppliers
        .list_suppliers()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(success_response("Suppliers retrieved successfully", suppliers))
}

/// Get a supplier by id
#[utoipa::path(
    get,
    path = "/suppliers/{id}",
    params(("id" = i32, Path, description = "Supplier ID")),
    responses(
        (status = 200, description = "Supplier returned", body = ApiResponse<SupplierResponse>),
        (status = 404, description = "Supplier not found", body = ErrorResponse)
    ),
    tag = "suppliers"
)]
pub async fn get_supplier(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, ServiceError> {
    let supplier = state.services.suppliers.get_supplier(id).await?;
    Ok(success_response(
        "Supplier retrieved successfully",
        SupplierResponse::from(supplier),
    ))
}

/// Create a supplier
#[utoipa::path(
    post,
    path = "/suppliers",
    request_body = SupplierFields,
    responses(
        (status = 201, description = "Supplier created", body = ApiResponse<SupplierResponse>),
        (status = 400, description = "Invalid supplier data", body = ErrorResponse),
        (status = 409, description = "Duplicate entry", body = ErrorResponse)
    ),
    tag = "suppliers"
)]
pub async fn create_supplier(
    State(state): State<AppState>,
    JsonBody(fields): JsonBody<SupplierFields>,
) -> Result<impl IntoResponse, ServiceError> {
    let supplier = state
        .services
        .suppliers
        .create_supplier(CreateSupplierCommand { fields })
        .await?;
    Ok(created_response(
        "Supplier created successfully",
        SupplierResponse::from(supplier),
    ))
}

/// Replace a supplier's fields
#[utoipa::path(
    put,
    path = "/suppliers/{id}",
    params(("id" = i32, Path, description = "Supplier ID")),
    request_body = SupplierFields,
    responses(
        (status = 200, description = "Supplier updated", body = ApiResponse<SupplierResponse>),
        (status = 400, description = "Invalid supplier data", body = ErrorResponse),
        (status = 404, description = "Supplier not found", body = ErrorResponse)
    ),
    tag = "suppliers"
)]
pub async fn update_supplier(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    body: Result<JsonBody<SupplierFields>, ServiceError>,
) -> Result<impl IntoResponse, ServiceError> {
    let fields = body.map(|JsonBody(fields)| fields).into();
    let supplier = state
        .services
        .suppliers
        .update_supplier(UpdateSupplierCommand { id, fields })
        .await?;
    Ok(success_response(
        "Supplier updated successfully",
        SupplierResponse::from(supplier),
    ))
}

/// Delete a supplier; its inventory items keep existing with `supplier_id = null`
#[utoipa::path(
    delete,
    path = "/suppliers/{id}",
    params(("id" = i32, Path, description = "Supplier ID")),
    responses(
        (status = 200, description = "Supplier deleted", body = ApiResponse<DeletedSupplier>),
        (status = 404, description = "Supplier not found", body = ErrorResponse)
    ),
    tag = "suppliers"
)]
pub async fn delete_supplier(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, ServiceError> {
    let result = state
        .services
        .suppliers
        .delete_supplier(DeleteSupplierCommand { id })
        .await?;
    Ok(success_response(
        "Supplier deleted successfully",
        DeletedSupplier::from(result),
    ))
}
