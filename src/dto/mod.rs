//! Wire representations shared by the HTTP handlers and the typed client.

pub mod inventory;
pub mod supplier;

pub use inventory::{DeletedItem, InventoryItemResponse};
pub use supplier::{DeletedSupplier, SupplierResponse};
