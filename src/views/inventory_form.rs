use super::{FormMode, Notification, Notifier, Route, ViewLifecycle, INVALID_FORM_MESSAGE};
use crate::{
    client::ApiClient,
    commands::{
        inventory::{validate_category, InventoryFields},
        validate_name,
    },
    dto::{InventoryItemResponse, SupplierResponse},
};
use std::sync::Arc;
use tracing::warn;
use validator::Validate;

/// Inventory form state. `supplier_id` is the picker selection and becomes the acting supplier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct InventoryForm {
    #[validate(custom = "validate_name")]
    pub name: String,
    #[validate(custom = "validate_category")]
    pub category: String,
    #[validate(range(min = 0))]
    pub quantity: i32,
    pub supplier_id: Option<i32>,
}

impl InventoryForm {
    pub fn to_fields(&self) -> InventoryFields {
        InventoryFields::new(self.name.clone(), self.category.clone(), Some(self.quantity))
    }
}

impl From<InventoryItemResponse> for InventoryForm {
    fn from(item: InventoryItemResponse) -> Self {
        Self {
            name: item.name,
            category: item.category,
            quantity: item.quantity,
            supplier_id: item.supplier_id,
        }
    }
}

pub struct InventoryFormView {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
    mode: FormMode,
    form: InventoryForm,
    suppliers: Vec<SupplierResponse>,
    lifecycle: ViewLifecycle,
}

impl InventoryFormView {
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>, route: Route) -> Self {
        Self {
            client,
            notifier,
            mode: FormMode::from_route(route),
            form: InventoryForm::default(),
            suppliers: Vec::new(),
            lifecycle: ViewLifecycle::default(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn form(&self) -> &InventoryForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut InventoryForm {
        &mut self.form
    }

    /// Choices for the supplier picker
    pub fn supplier_options(&self) -> &[SupplierResponse] {
        &self.suppliers
    }

    pub fn lifecycle(&self) -> ViewLifecycle {
        self.lifecycle.clone()
    }

    /// Loads picker choices and, in edit mode, the item. Returns a route when the view should be left.
    pub async fn init(&mut self) -> Option<Route> {
        self.load_suppliers().await;

        let FormMode::Edit(id) = self.mode else {
            return None;
        };

        let result = self.client.get_inventory(id).await;
        if !self.lifecycle.is_active() {
            return None;
        }

        match result {
            Ok(item) => {
                self.form = item.into();
                None
            }
            Err(e) => {
                warn!(item_id = id, "Loading inventory item failed: {}", e);
                self.notify("Failed to load item");
                Some(Route::InventoryList)
            }
        }
    }

    async fn load_suppliers(&mut self) {
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

    /// Validates locally, then creates or updates as the selected supplier.
    pub async fn submit(&mut self) -> Option<Route> {
        if self.form.validate().is_err() {
            self.notify(INVALID_FORM_MESSAGE);
            return None;
        }

        let client = self.client.acting_as(self.form.supplier_id);
        let fields = self.form.to_fields();
        let result = match self.mode {
            FormMode::Create => client.create_inventory(&fields).await,
            FormMode::Edit(id) => client.update_inventory(id, &fields).await,
        };
        if !self.lifecycle.is_active() {
            return None;
        }

        match result {
            Ok(_) => {
                self.notify(match self.mode {
                    FormMode::Create => "Item created successfully",
                    FormMode::Edit(_) => "Item updated successfully",
                });
                Some(Route::InventoryList)
            }
            Err(e) => {
                warn!("Saving inventory item failed: {}", e.user_message());
                self.notify("Failed to save item");
                None
            }
        }
    }

    pub fn cancel(&self) -> Route {
        Route::InventoryList
    }

    fn notify(&self, message: &str) {
        self.notifier.notify(Notification::new(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::test_support::{envelope, item, supplier, RecordingNotifier};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::{
        matchers::{body_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn view(server: &MockServer, route: Route) -> (InventoryFormView, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let view = InventoryFormView::new(
            ApiClient::new(server.uri()).unwrap(),
            notifier.clone(),
            route,
        );
        (view, notifier)
    }

    async fn mount_suppliers(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/suppliers"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(envelope(json!([supplier(1, "Acme"), supplier(2, "Globex")]))),
            )
            .mount(server)
            .await;
    }

    #[test]
    fn defaults_and_validation() {
        let form = InventoryForm::default();
        assert_eq!(form.quantity, 0);
        assert_eq!(form.supplier_id, None);
        assert!(form.validate().is_err());

        let valid = InventoryForm {
            name: "Bolt".into(),
            category: "Fasteners".into(),
            ..Default::default()
        };
        assert!(valid.validate().is_ok());
        assert!(InventoryForm {
            quantity: -1,
            ..valid.clone()
        }
        .validate()
        .is_err());
        assert!(InventoryForm {
            category: "c".repeat(256),
            ..valid
        }
        .validate()
        .is_err());
    }

    #[tokio::test]
    async fn create_posts_as_selected_supplier() {
        let server = MockServer::start().await;
        mount_suppliers(&server).await;
        Mock::given(method("POST"))
            .and(path("/inventory"))
            .and(header("x-supplier-id", "2"))
            .and(body_json(json!({"name": "Bolt", "category": "Fasteners", "quantity": 12})))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(envelope(item(1, "Bolt", 12, Some(2)))),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (mut view, notifier) = view(&server, Route::InventoryCreate);
        assert_eq!(view.init().await, None);
        assert_eq!(view.supplier_options().len(), 2);

        let form = view.form_mut();
        form.name = "Bolt".into();
        form.category = "Fasteners".into();
        form.quantity = 12;
        form.supplier_id = Some(2);

        assert_eq!(view.submit().await, Some(Route::InventoryList));
        assert_eq!(notifier.messages(), vec!["Item created successfully"]);
    }

    #[tokio::test]
    async fn invalid_quantity_is_not_submitted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let (mut view, notifier) = view(&server, Route::InventoryCreate);
        let form = view.form_mut();
        form.name = "Bolt".into();
        form.category = "Fasteners".into();
        form.quantity = -1;

        assert_eq!(view.submit().await, None);
        assert_eq!(notifier.messages(), vec![INVALID_FORM_MESSAGE]);
    }

    #[tokio::test]
    async fn edit_loads_item_and_updates() {
        let server = MockServer::start().await;
        mount_suppliers(&server).await;
        Mock::given(method("GET"))
            .and(path("/inventory/8"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(envelope(item(8, "Nut", 3, Some(1)))),
            )
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/inventory/8"))
            .and(header("x-supplier-id", "1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(envelope(item(8, "Nut", 30, Some(1)))),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (mut view, notifier) = view(&server, Route::InventoryEdit(8));
        assert_eq!(view.init().await, None);
        assert_eq!(view.form().name, "Nut");
        assert_eq!(view.form().supplier_id, Some(1));

        view.form_mut().quantity = 30;
        assert_eq!(view.submit().await, Some(Route::InventoryList));
        assert_eq!(notifier.messages(), vec!["Item updated successfully"]);
    }

    #[tokio::test]
    async fn failed_item_load_navigates_back() {
        let server = MockServer::start().await;
        mount_suppliers(&server).await;
        Mock::given(method("GET"))
            .and(path("/inventory/8"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let (mut view, notifier) = view(&server, Route::InventoryEdit(8));
        assert_eq!(view.init().await, Some(Route::InventoryList));
        assert_eq!(notifier.messages(), vec!["Failed to load item"]);
    }

    #[tokio::test]
    async fn server_rejection_keeps_form() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/suppliers"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/inventory"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "Bad Request",
                "message": "Supplier ID is required in header (X-Supplier-ID)",
                "timestamp": "2024-06-01T12:00:00Z"
            })))
            .mount(&server)
            .await;

        let (mut view, notifier) = view(&server, Route::InventoryCreate);
        view.init().await;
        let form = view.form_mut();
        form.name = "Bolt".into();
        form.category = "Fasteners".into();

        assert_eq!(view.submit().await, None);
        assert_eq!(view.form().name, "Bolt");
        assert_eq!(
            notifier.messages(),
            vec!["Failed to load suppliers", "Failed to save item"]
        );
    }

    #[tokio::test]
    async fn destroyed_form_drops_save_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/inventory"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(envelope(item(1, "Bolt", 0, Some(1))))
                    .set_delay(Duration::from_millis(200)),
            )
            .mount(&server)
            .await;

        let (mut view, notifier) = view(&server, Route::InventoryCreate);
        let form = view.form_mut();
        form.name = "Bolt".into();
        form.category = "Fasteners".into();
        form.supplier_id = Some(1);

        let lifecycle = view.lifecycle();
        let (route, _) = tokio::join!(view.submit(), async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            lifecycle.destroy();
        });
        assert_eq!(route, None);
        assert!(notifier.messages().is_empty());
    }
}
