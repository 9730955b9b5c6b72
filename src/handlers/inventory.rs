use super::common::{
    created_response, success_response, JsonBody, RecordId, RequiredSupplier, SupplierHeader,
};
use crate::{
    commands::inventory::{
        CreateInventoryItemCommand, DeleteInventoryItemCommand, InventoryFields,
        UpdateInventoryItemCommand,
    },
    dto::{DeletedItem, InventoryItemResponse},
    errors::{ErrorResponse, ServiceError},
    services::inventory::InventoryFilterParams,
    ApiResponse, AppState,
};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};

pub fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_inventory).post(create_inventory))
        // static segment wins over `/:id`
        .route("/filter", get(filter_inventory))
        .route(
            "/:id",
            get(get_inventory).put(update_inventory).delete(delete_inventory),
        )
}

fn to_responses(items: Vec<crate::entities::inventory_item::Model>) -> Vec<InventoryItemResponse> {
    items.into_iter().map(Into::into).collect()
}

/// List inventory, scoped to the acting supplier when the header is present
#[utoipa::path(
    get,
    path = "/inventory",
    params(("X-Supplier-ID" = Option<i32>, Header, description = "Acting supplier")),
    responses(
        (status = 200, description = "Inventory returned", body = ApiResponse<Vec<InventoryItemResponse>>),
        (status = 400, description = "Supplier does not exist", body = ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn list_inventory(
    State(state): State<AppState>,
    SupplierHeader(acting): SupplierHeader,
) -> Result<impl IntoResponse, ServiceError> {
    let items = state.services.inventory.list_inventory(acting).await?;
    Ok(success_response(
        "Inventory retrieved successfully",
        to_responses(items),
    ))
}

/// Get an inventory item
#[utoipa::path(
    get,
    path = "/inventory/{id}",
    params(
        ("id" = i32, Path, description = "Inventory item ID"),
        ("X-Supplier-ID" = Option<i32>, Header, description = "Acting supplier")
    ),
    responses(
        (status = 200, description = "Inventory item returned", body = ApiResponse<InventoryItemResponse>),
        (status = 403, description = "Item belongs to another supplier", body = ErrorResponse),
        (status = 404, description = "Inventory item not found", body = ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn get_inventory(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    SupplierHeader(acting): SupplierHeader,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.services.inventory.get_item(id, acting).await?;
    Ok(success_response(
        "Inventory item retrieved successfully",
        InventoryItemResponse::from(item),
    ))
}

/// Create an inventory item owned by the acting supplier
#[utoipa::path(
    post,
    path = "/inventory",
    params(("X-Supplier-ID" = i32, Header, description = "Acting supplier")),
    request_body = InventoryFields,
    responses(
        (status = 201, description = "Inventory item created", body = ApiResponse<InventoryItemResponse>),
        (status = 400, description = "Missing supplier or invalid item", body = ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn create_inventory(
    State(state): State<AppState>,
    RequiredSupplier(acting): RequiredSupplier,
    body: Result<JsonBody<InventoryFields>, ServiceError>,
) -> Result<impl IntoResponse, ServiceError> {
    let fields = body.map(|JsonBody(fields)| fields).into();
    let item = state
        .services
        .inventory
        .create_item(CreateInventoryItemCommand { acting, fields })
        .await?;
    Ok(created_response(
        "Inventory item created successfully",
        InventoryItemResponse::from(item),
    ))
}

/// Replace an owned inventory item
#[utoipa::path(
    put,
    path = "/inventory/{id}",
    params(
        ("id" = i32, Path, description = "Inventory item ID"),
        ("X-Supplier-ID" = i32, Header, description = "Acting supplier")
    ),
    request_body = InventoryFields,
    responses(
        (status = 200, description = "Inventory item updated", body = ApiResponse<InventoryItemResponse>),
        (status = 400, description = "Missing supplier or invalid item", body = ErrorResponse),
        (status = 403, description = "Item belongs to another supplier", body = ErrorResponse),
        (status = 404, description = "Inventory item not found", body = ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn update_inventory(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    RequiredSupplier(acting): RequiredSupplier,
    body: Result<JsonBody<InventoryFields>, ServiceError>,
) -> Result<impl IntoResponse, ServiceError> {
    let fields = body.map(|JsonBody(fields)| fields).into();
    let item = state
        .services
        .inventory
        .update_item(UpdateInventoryItemCommand { id, acting, fields })
        .await?;
    Ok(success_response(
        "Inventory item updated successfully",
        InventoryItemResponse::from(item),
    ))
}

/// Delete an owned inventory item
#[utoipa::path(
    delete,
    path = "/inventory/{id}",
    params(
        ("id" = i32, Path, description = "Inventory item ID"),
        ("X-Supplier-ID" = i32, Header, description = "Acting supplier")
    ),
    responses(
        (status = 200, description = "Inventory item deleted", body = ApiResponse<DeletedItem>),
        (status = 400, description = "Missing or unknown supplier", body = ErrorResponse),
        (status = 403, description = "Item belongs to another supplier", body = ErrorResponse),
        (status = 404, description = "Inventory item not found", body = ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn delete_inventory(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    RequiredSupplier(acting): RequiredSupplier,
) -> Result<impl IntoResponse, ServiceError> {
    let id = state
        .services
        .inventory
        .delete_item(DeleteInventoryItemCommand { id, acting })
        .await?;
    Ok(success_response(
        "Inventory item deleted successfully",
        DeletedItem { id },
    ))
}

/// Filter inventory by category and stock level
#[utoipa::path(
    get,
    path = "/inventory/filter",
    params(
        InventoryFilterParams,
        ("X-Supplier-ID" = Option<i32>, Header, description = "Acting supplier")
    ),
    responses(
        (status = 200, description = "Filtered inventory returned", body = ApiResponse<Vec<InventoryItemResponse>>),
        (status = 400, description = "Invalid filter or unknown supplier", body = ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn filter_inventory(
    State(state): State<AppState>,
    SupplierHeader(acting): SupplierHeader,
    query: Result<Query<InventoryFilterParams>, axum::extract::rejection::QueryRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    let Query(params) = query?;
    let items = state
        .services
        .inventory
        .filter_inventory(&params, acting)
        .await?;
    Ok(success_response(
        "Inventory filtered successfully",
        to_responses(items),
    ))
}
