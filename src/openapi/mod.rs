use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stockroom API",
        version = "0.1.0",
        description = r#"
# Stockroom API

Inventory items and the suppliers that own them.

## Acting supplier

Inventory writes are scoped to the supplier named in the `X-Supplier-ID` header. Reads accept
the header optionally and narrow results to that supplier's items. Values that are missing,
non-numeric or not positive are treated as absent.

## Error Handling

Failures share one body shape:

```json
{
  "error": "Bad Request",
  "message": "Validation failed",
  "errors": ["Category is required", "Name is required"],
  "timestamp": "2024-01-01T00:00:00Z"
}
```
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "suppliers", description = "Supplier records"),
        (name = "inventory", description = "Inventory items scoped by supplier")
    ),
    paths(
        // Suppliers
        crate::handlers::suppliers::list_suppliers,
        crate::handlers::suppliers::get_supplier,
        crate::handlers::suppliers::create_supplier,
        crate::handlers::suppliers::update_supplier,
        crate::handlers::suppliers::delete_supplier,

        // Inventory
        crate::handlers::inventory::list_inventory,
        crate::handlers::inventory::get_inventory,
        crate::handlers::inventory::create_inventory,
        crate::handlers::inventory::update_inventory,
        crate::handlers::inventory::delete_inventory,
        crate::handlers::inventory::filter_inventory,
    ),
    components(
        schemas(
            crate::ResponseMeta,
            crate::dto::SupplierResponse,
            crate::dto::DeletedSupplier,
            crate::dto::InventoryItemResponse,
            crate::dto::DeletedItem,
            crate::commands::suppliers::SupplierFields,
            crate::commands::inventory::InventoryFields,
            crate::services::inventory::StockLevel,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
