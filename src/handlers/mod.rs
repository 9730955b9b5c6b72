pub mod common;
pub mod health;
pub mod inventory;
pub mod suppliers;

use crate::{
    db::DbPool,
    services::{inventory::InventoryService, suppliers::SupplierService},
};
use std::sync::Arc;

/// Services shared by every handler
#[derive(Clone)]
pub struct AppServices {
    pub suppliers: Arc<SupplierService>,
    pub inventory: Arc<InventoryService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            suppliers: Arc::new(SupplierService::new(db_pool.clone())),
            inventory: Arc::new(InventoryService::new(db_pool)),
        }
    }
}
