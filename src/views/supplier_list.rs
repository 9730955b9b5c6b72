use super::{Notification, Notifier, Prompt, Route, ViewLifecycle};
use crate::{client::ApiClient, dto::SupplierResponse};
use std::sync::Arc;
use tracing::warn;

pub struct SupplierListView {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
    prompt: Arc<dyn Prompt>,
    suppliers: Vec<SupplierResponse>,
    lifecycle: ViewLifecycle,
}

impl SupplierListView {
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>, prompt: Arc<dyn Prompt>) -> Self {
        Self {
            client,
            notifier,
            prompt,
            suppliers: Vec::new(),
            lifecycle: ViewLifecycle::default(),
        }
    }

    pub fn suppliers(&self) -> &[SupplierResponse] {
        &self.suppliers
    }

    pub fn lifecycle(&self) -> ViewLifecycle {
        self.lifecycle.clone()
    }

    pub async fn load(&mut self) {
        let result = self.client.list_suppliers().await;
        if !self.lifecycle.is_active() {
            return;
        }

        match result {
            Ok(suppliers) => {
                if suppliers.is_empty() {
                    self.notify("No suppliers available");
                }
                self.suppliers = suppliers;
            }
            Err(e) => {
                warn!("Loading suppliers failed: {}", e);
                self.notify("Failed to load suppliers");
            }
        }
    }

    /// Deletes after confirmation and reloads the list. Returns whether the supplier was deleted.
    pub async fn delete(&mut self, id: i32) -> bool {
        if !self
            .prompt
            .confirm("Are you sure you want to delete this supplier?")
        {
            return false;
        }

        let result = self.client.delete_supplier(id).await;
        if !self.lifecycle.is_active() {
            return false;
        }

        match result {
            Ok(_) => {
                self.notify("Supplier deleted");
                self.load().await;
                true
            }
            Err(e) => {
                warn!(supplier_id = id, "Deleting supplier failed: {}", e);
                self.notify("Failed to delete supplier");
                false
            }
        }
    }

    pub fn edit(&self, id: i32) -> Route {
        Route::SupplierEdit(id)
    }

    pub fn create(&self) -> Route {
        Route::SupplierCreate
    }

    fn notify(&self, message: &str) {
        self.notifier.notify(Notification::new(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::test_support::{envelope, supplier, FixedPrompt, RecordingNotifier};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn view(server: &MockServer, confirm: bool) -> (SupplierListView, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let view = SupplierListView::new(
            ApiClient::new(server.uri()).unwrap(),
            notifier.clone(),
            Arc::new(FixedPrompt(confirm)),
        );
        (view, notifier)
    }

    #[tokio::test]
    async fn load_populates_rows() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/suppliers"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(envelope(json!([supplier(1, "Acme"), supplier(2, "Globex")]))),
            )
            .mount(&server)
            .await;

        let (mut view, notifier) = view(&server, true);
        view.load().await;

        assert_eq!(view.suppliers().len(), 2);
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn empty_and_failed_loads_notify() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/suppliers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/suppliers"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (mut view, notifier) = view(&server, true);
        view.load().await;
        view.load().await;

        assert_eq!(
            notifier.messages(),
            vec!["No suppliers available", "Failed to load suppliers"]
        );
    }

    #[tokio::test]
    async fn declined_confirmation_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (mut view, notifier) = view(&server, false);
        assert!(!view.delete(1).await);
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn confirmed_delete_notifies_and_reloads() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/suppliers/1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(envelope(json!({"id": 1, "released_items": 2}))),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/suppliers"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(envelope(json!([supplier(2, "Globex")]))),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (mut view, notifier) = view(&server, true);
        assert!(view.delete(1).await);
        assert_eq!(notifier.messages(), vec!["Supplier deleted"]);
        assert_eq!(view.suppliers()[0].id, 2);
    }

    #[tokio::test]
    async fn failed_delete_notifies() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/suppliers/9"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": "Not Found", "message": "Supplier not found",
                "timestamp": "2024-06-01T12:00:00Z"
            })))
            .mount(&server)
            .await;

        let (mut view, notifier) = view(&server, true);
        assert!(!view.delete(9).await);
        assert_eq!(notifier.messages(), vec!["Failed to delete supplier"]);
    }

    #[tokio::test]
    async fn destroyed_view_ignores_late_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/suppliers"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(envelope(json!([supplier(1, "Acme")])))
                    .set_delay(Duration::from_millis(200)),
            )
            .mount(&server)
            .await;

        let (mut view, notifier) = view(&server, true);
        let lifecycle = view.lifecycle();
        tokio::join!(view.load(), async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            lifecycle.destroy();
        });

        assert!(view.suppliers().is_empty());
        assert!(notifier.messages().is_empty());
    }

    #[test]
    fn navigation_targets() {
        let server_uri = "http://localhost:1";
        let view = SupplierListView::new(
            ApiClient::new(server_uri).unwrap(),
            Arc::new(RecordingNotifier::default()),
            Arc::new(FixedPrompt(true)),
        );
        assert_eq!(view.edit(3), Route::SupplierEdit(3));
        assert_eq!(view.create(), Route::SupplierCreate);
    }
}
