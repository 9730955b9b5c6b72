pub mod create_supplier_command;
pub mod delete_supplier_command;
pub mod update_supplier_command;

pub use create_supplier_command::CreateSupplierCommand;
pub use delete_supplier_command::{DeleteSupplierCommand, DeleteSupplierResult};
pub use update_supplier_command::UpdateSupplierCommand;

use crate::commands::{blank_if_null, validate_name};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Editable supplier fields, shared by create and update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct SupplierFields {
    #[serde(deserialize_with = "blank_if_null")]
    #[validate(custom = "validate_name")]
    #[schema(example = "Acme Components")]
    pub name: String,
    #[validate(length(max = 255, message = "Email cannot exceed 255 characters"))]
    #[schema(example = "orders@acme.test")]
    pub email: Option<String>,
    #[validate(length(max = 255, message = "Phone cannot exceed 255 characters"))]
    pub phone: Option<String>,
    #[validate(length(max = 255, message = "Contact cannot exceed 255 characters"))]
    pub contact: Option<String>,
}

impl SupplierFields {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}
