use super::{non_empty, supplier_name, Notification, Notifier, Prompt, Route, ViewLifecycle};
use crate::{
    client::ApiClient,
    dto::{InventoryItemResponse, SupplierResponse},
    services::inventory::{InventoryFilterParams, StockLevel},
};
use std::sync::Arc;
use tracing::warn;

/// Filter control state; blank category means no category filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryFilter {
    pub category: Option<String>,
    pub stock: Option<StockLevel>,
}

impl InventoryFilter {
    pub fn to_params(&self) -> InventoryFilterParams {
        InventoryFilterParams {
            category: self.category.as_deref().and_then(non_empty),
            stock: self.stock.map(|level| level.to_string()),
        }
    }
}

pub struct InventoryListView {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
    prompt: Arc<dyn Prompt>,
    items: Vec<InventoryItemResponse>,
    suppliers: Vec<SupplierResponse>,
    lifecycle: ViewLifecycle,
}

impl InventoryListView {
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>, prompt: Arc<dyn Prompt>) -> Self {
        Self {
            client,
            notifier,
            prompt,
            items: Vec::new(),
            suppliers: Vec::new(),
            lifecycle: ViewLifecycle::default(),
        }
    }

    pub fn items(&self) -> &[InventoryItemResponse] {
        &self.items
    }

    pub fn lifecycle(&self) -> ViewLifecycle {
        self.lifecycle.clone()
    }

    pub fn supplier_name(&self, supplier_id: Option<i32>) -> String {
        supplier_name(&self.suppliers, supplier_id)
    }

    pub async fn load(&mut self) {
        self.load_inventory().await;
        self.load_suppliers().await;
    }

    pub async fn load_inventory(&mut self) {
        let result = self.client.list_inventory().await;
        if !self.lifecycle.is_active() {
            return;
        }

        match result {
            Ok(items) => {
                if items.is_empty() {
                    self.notify("No inventory items available");
                }
                self.items = items;
            }
            Err(e) => {
                warn!("Loading inventory failed: {}", e);
                self.notify("Failed to load inventory");
            }
        }
    }

    pub async fn load_suppliers(&mut self) {
        let result = self.client.list_suppliers().await;
        if !self.lifecycle.is_active() {
            return;
        }

        match result {
            Ok(suppliers) => self.suppliers = suppliers,
            Err(e) => {
                warn!("Loading suppliers failed: {}", e);
                self.notify("Failed to load suppliers");
            }
        }
    }

    /// Deletes after confirmation, acting as the item's owner, then reloads the inventory.
    pub async fn delete(&mut self, id: i32) -> bool {
        if !self.prompt.confirm("Are you sure you want to delete this item?") {
            return false;
        }

        let owner = self
            .items
            .iter()
            .find(|item| item.id == id)
            .and_then(|item| item.supplier_id);
        let result = self.client.acting_as(owner).delete_inventory(id).await;
        if !self.lifecycle.is_active() {
            return false;
        }

        match result {
            Ok(_) => {
                self.notify("Inventory item deleted");
                self.load_inventory().await;
                true
            }
            Err(e) => {
                warn!(item_id = id, "Deleting inventory item failed: {}", e.user_message());
                self.notify("Failed to delete item");
                false
            }
        }
    }

    pub async fn apply_filter(&mut self, filter: &InventoryFilter) {
        let result = self.client.filter_inventory(&filter.to_params()).await;
        if !self.lifecycle.is_active() {
            return;
        }

        match result {
            Ok(items) => self.items = items,
            Err(e) => {
                warn!("Applying inventory filter failed: {}", e.user_message());
                self.notify("Failed to apply filters");
            }
        }
    }

    pub fn edit(&self, id: i32) -> Route {
        Route::InventoryEdit(id)
    }

    pub fn create(&self) -> Route {
        Route::InventoryCreate
    }

    fn notify(&self, message: &str) {
        self.notifier.notify(Notification::new(message));
    }
}
