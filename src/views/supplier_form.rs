use super::{non_empty, FormMode, Notification, Notifier, Route, ViewLifecycle, INVALID_FORM_MESSAGE};
use crate::{
    client::ApiClient,
    commands::{suppliers::SupplierFields, validate_name},
    dto::SupplierResponse,
};
use std::sync::Arc;
use tracing::warn;
use validator::Validate;

/// Supplier form state as entered by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct SupplierForm {
    #[validate(custom = "validate_name")]
    pub name: String,
    #[validate(length(max = 255))]
    pub email: String,
    #[validate(length(max = 255))]
    pub phone: String,
    #[validate(length(max = 255))]
    pub contact: String,
}

impl SupplierForm {
    pub fn to_fields(&self) -> SupplierFields {
        SupplierFields {
            name: self.name.clone(),
            email: non_empty(&self.email),
            phone: non_empty(&self.phone),
            contact: non_empty(&self.contact),
        }
    }
}

impl From<SupplierResponse> for SupplierForm {
    fn from(supplier: SupplierResponse) -> Self {
        Self {
            name: supplier.name,
            email: supplier.email.unwrap_or_default(),
            phone: supplier.phone.unwrap_or_default(),
            contact: supplier.contact.unwrap_or_default(),
        }
    }
}

pub struct SupplierFormView {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
    mode: FormMode,
    form: SupplierForm,
    lifecycle: ViewLifecycle,
}

impl SupplierFormView {
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>, route: Route) -> Self {
        Self {
            client,
            notifier,
            mode: FormMode::from_route(route),
            form: SupplierForm::default(),
            lifecycle: ViewLifecycle::default(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn form(&self) -> &SupplierForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SupplierForm {
        &mut self.form
    }

    pub fn lifecycle(&self) -> ViewLifecycle {
        self.lifecycle.clone()
    }

    /// Loads the record in edit mode. Returns a route when the view should be left.
    pub async fn init(&mut self) -> Option<Route> {
        let FormMode::Edit(id) = self.mode else {
            return None;
        };

        let result = self.client.get_supplier(id).await;
        if !self.lifecycle.is_active() {
            return None;
        }

        match result {
            Ok(supplier) => {
                self.form = supplier.into();
                None
            }
            Err(e) => {
                warn!(supplier_id = id, "Loading supplier failed: {}", e);
                self.notify("Failed to load supplier");
                Some(Route::SupplierList)
            }
        }
    }

    /// Validates locally, then creates or updates. Navigates to the list on success.
    pub async fn submit(&mut self) -> Option<Route> {
        if self.form.validate().is_err() {
            self.notify(INVALID_FORM_MESSAGE);
            return None;
        }

        let fields = self.form.to_fields();
        let result = match self.mode {
            FormMode::Create => self.client.create_supplier(&fields).await,
            FormMode::Edit(id) => self.client.update_supplier(id, &fields).await,
        };
        if !self.lifecycle.is_active() {
            return None;
        }

        match result {
            Ok(_) => {
                self.notify(match self.mode {
                    FormMode::Create => "Supplier created successfully",
                    FormMode::Edit(_) => "Supplier updated successfully",
                });
                Some(Route::SupplierList)
            }
            Err(e) => {
                warn!("Saving supplier failed: {}", e.user_message());
                self.notify("Failed to save supplier");
                None
            }
        }
    }

    pub fn cancel(&self) -> Route {
        Route::SupplierList
    }

    fn notify(&self, message: &str) {
        self.notifier.notify(Notification::new(message));
    }
}
