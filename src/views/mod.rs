//! List and form view-models for the terminal frontend.
//!
//! Views talk to the API through [`ApiClient`](crate::client::ApiClient), report outcomes through
//! a [`Notifier`], ask for confirmation through a [`Prompt`] and answer navigation with a
//! [`Route`]. Rendering is left to the caller.

pub mod inventory_form;
pub mod inventory_list;
pub mod supplier_form;
pub mod supplier_list;
pub mod terminal;

pub use inventory_form::{InventoryForm, InventoryFormView};
pub use inventory_list::{InventoryFilter, InventoryListView};
pub use supplier_form::{SupplierForm, SupplierFormView};
pub use supplier_list::SupplierListView;

use crate::dto::SupplierResponse;
use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

/// How long a notification stays visible
pub const NOTIFICATION_DURATION: Duration = Duration::from_millis(3000);

/// Shown when a form fails client-side validation
pub const INVALID_FORM_MESSAGE: &str = "Please fill all required fields correctly";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub duration: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration: NOTIFICATION_DURATION,
        }
    }
}

/// Transient, non-blocking user notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Interactive yes/no confirmation
pub trait Prompt: Send + Sync {
    fn confirm(&self, question: &str) -> bool;
}

/// Navigation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    SupplierList,
    SupplierCreate,
    SupplierEdit(i32),
    InventoryList,
    InventoryCreate,
    InventoryEdit(i32),
}

impl Route {
    /// Record id carried by edit routes
    pub fn record_id(&self) -> Option<i32> {
        match self {
            Route::SupplierEdit(id) | Route::InventoryEdit(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::SupplierList => write!(f, "/suppliers"),
            Route::SupplierCreate => write!(f, "/suppliers/new"),
            Route::SupplierEdit(id) => write!(f, "/suppliers/edit/{}", id),
            Route::InventoryList => write!(f, "/inventory"),
            Route::InventoryCreate => write!(f, "/inventory/new"),
            Route::InventoryEdit(id) => write!(f, "/inventory/edit/{}", id),
        }
    }
}

/// Create or edit, decided by the presence of a record id in the route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i32),
}

impl FormMode {
    pub fn from_route(route: Route) -> Self {
        match route.record_id() {
            Some(id) => FormMode::Edit(id),
            None => FormMode::Create,
        }
    }
}

/// Shared liveness flag; once destroyed, results of in-flight requests are dropped
#[derive(Debug, Clone)]
pub struct ViewLifecycle {
    active: Arc<AtomicBool>,
}

impl Default for ViewLifecycle {
    fn default() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl ViewLifecycle {
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn destroy(&self) {
        self.active.store(false, Ordering::Release);
    }
}

/// Supplier name for an item's `supplier_id`
pub fn supplier_name(suppliers: &[SupplierResponse], supplier_id: Option<i32>) -> String {
    match supplier_id {
        None => "None".to_string(),
        Some(id) => suppliers
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| "Unknown".to_string()),
    }
}

/// Empty text inputs are sent as absent
pub(crate) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| value.to_string())
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn supplier(id: i32, name: &str) -> SupplierResponse {
        SupplierResponse {
            id,
            name: name.to_string(),
            email: None,
            phone: None,
            contact: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn supplier_name_lookup() {
        let suppliers = vec![supplier(1, "Acme")];
        assert_eq!(supplier_name(&suppliers, Some(1)), "Acme");
        assert_eq!(supplier_name(&suppliers, Some(2)), "Unknown");
        assert_eq!(supplier_name(&suppliers, None), "None");
    }

    #[test]
    fn form_mode_follows_route() {
        assert_eq!(FormMode::from_route(Route::SupplierEdit(4)), FormMode::Edit(4));
        assert_eq!(FormMode::from_route(Route::InventoryCreate), FormMode::Create);
        assert_eq!(Route::InventoryEdit(7).to_string(), "/inventory/edit/7");
    }

    #[test]
    fn lifecycle_is_shared_between_clones() {
        let lifecycle = ViewLifecycle::default();
        let handle = lifecycle.clone();
        handle.destroy();
        assert!(!lifecycle.is_active());
    }
}
