pub mod create_inventory_item_command;
pub mod delete_inventory_item_command;
pub mod update_inventory_item_command;

pub use create_inventory_item_command::CreateInventoryItemCommand;
pub use delete_inventory_item_command::DeleteInventoryItemCommand;
pub use update_inventory_item_command::UpdateInventoryItemCommand;

use crate::{
    commands::{blank_if_null, validate_name, MAX_TEXT_LEN},
    entities::{inventory_item, supplier},
    errors::ServiceError,
};
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Supplier identity asserted by the caller through `X-Supplier-ID`.
///
/// Always a positive id; anything else is treated as no identity at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActingSupplier(i32);

impl ActingSupplier {
    pub fn new(id: i32) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }

    /// Parses a raw header value; missing, non-numeric and non-positive values yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<i32>().ok().and_then(Self::new)
    }

    pub fn id(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for ActingSupplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Editable inventory fields. Ownership never comes from the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct InventoryFields {
    #[serde(deserialize_with = "blank_if_null")]
    #[validate(custom = "validate_name")]
    #[schema(example = "Hex bolt M8")]
    pub name: String,
    #[serde(deserialize_with = "blank_if_null")]
    #[validate(custom = "validate_category")]
    #[schema(example = "Fasteners")]
    pub category: String,
    /// Defaults to 0 when omitted
    #[validate(range(min = 0, message = "Quantity must be a non-negative number"))]
    #[schema(example = 25)]
    pub quantity: Option<i32>,
}

impl InventoryFields {
    pub fn new(name: impl Into<String>, category: impl Into<String>, quantity: Option<i32>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            quantity,
        }
    }

    pub(crate) fn quantity_value(&self) -> i32 {
        self.quantity.unwrap_or(0)
    }
}

pub(crate) fn validate_category(category: &str) -> Result<(), ValidationError> {
    if category.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("Category is required".into());
        return Err(err);
    }
    if category.chars().count() > MAX_TEXT_LEN {
        let mut err = ValidationError::new("length");
        err.message = Some("Category cannot exceed 255 characters".into());
        return Err(err);
    }
    Ok(())
}

/// Fails with "Supplier does not exist" when the acting supplier has no row.
pub(crate) async fn ensure_supplier_exists<C>(
    db: &C,
    acting: ActingSupplier,
) -> Result<(), ServiceError>
where
    C: ConnectionTrait,
{
    let found = supplier::Entity::find_by_id(acting.id()).count(db).await?;
    if found == 0 {
        return Err(ServiceError::validation("Supplier does not exist"));
    }
    Ok(())
}

/// Loads an item and checks that `acting` owns it.
pub(crate) async fn find_owned_item<C>(
    db: &C,
    item_id: i32,
    acting: ActingSupplier,
) -> Result<inventory_item::Model, ServiceError>
where
    C: ConnectionTrait,
{
    let item = inventory_item::Entity::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Inventory item not found"))?;

    if !item.is_owned_by(acting.id()) {
        return Err(ServiceError::forbidden(
            "Inventory item does not belong to this supplier",
        ));
    }
    Ok(item)
}
