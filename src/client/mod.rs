//! Typed HTTP client for the stockroom API, used by the terminal frontend.

use crate::{
    commands::{inventory::InventoryFields, suppliers::SupplierFields},
    dto::{DeletedItem, DeletedSupplier, InventoryItemResponse, SupplierResponse},
    errors::ErrorResponse,
    handlers::common::SUPPLIER_ID_HEADER,
    services::inventory::{ActingSupplier, InventoryFilterParams},
    ApiResponse,
};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Api {
        status: StatusCode,
        message: String,
        errors: Vec<String>,
    },

    #[error("response did not contain data")]
    MissingData,

    #[error("invalid base url: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status(),
            _ => None,
        }
    }

    /// Text suitable for a notification: itemized validation messages when present
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { errors, .. } if !errors.is_empty() => errors.join("; "),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    acting: Option<ActingSupplier>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(base_url));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("stockroom/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            acting: None,
        })
    }

    /// Copy of this client that sends `X-Supplier-ID` for the given supplier
    pub fn acting_as(&self, supplier_id: Option<i32>) -> Self {
        Self {
            acting: supplier_id.and_then(ActingSupplier::new),
            ..self.clone()
        }
    }

    pub fn acting_supplier(&self) -> Option<i32> {
        self.acting.map(|a| a.id())
    }

    // Suppliers

    pub async fn list_suppliers(&self) -> Result<Vec<SupplierResponse>, ClientError> {
        self.send(self.request(Method::GET, "/suppliers")).await
    }

    pub async fn get_supplier(&self, id: i32) -> Result<SupplierResponse, ClientError> {
        self.send(self.request(Method::GET, &format!("/suppliers/{}", id)))
            .await
    }

    pub async fn create_supplier(
        &self,
        fields: &SupplierFields,
    ) -> Result<SupplierResponse, ClientError> {
        self.send_json(Method::POST, "/suppliers", fields).await
    }

    pub async fn update_supplier(
        &self,
        id: i32,
        fields: &SupplierFields,
    ) -> Result<SupplierResponse, ClientError> {
        self.send_json(Method::PUT, &format!("/suppliers/{}", id), fields)
            .await
    }

    pub async fn delete_supplier(&self, id: i32) -> Result<DeletedSupplier, ClientError> {
        self.send(self.request(Method::DELETE, &format!("/suppliers/{}", id)))
            .await
    }

    // Inventory

    pub async fn list_inventory(&self) -> Result<Vec<InventoryItemResponse>, ClientError> {
        self.send(self.request(Method::GET, "/inventory")).await
    }

    pub async fn get_inventory(&self, id: i32) -> Result<InventoryItemResponse, ClientError> {
        self.send(self.request(Method::GET, &format!("/inventory/{}", id)))
            .await
    }

    pub async fn create_inventory(
        &self,
        fields: &InventoryFields,
    ) -> Result<InventoryItemResponse, ClientError> {
        self.send_json(Method::POST, "/inventory", fields).await
    }

    pub async fn update_inventory(
        &self,
        id: i32,
        fields: &InventoryFields,
    ) -> Result<InventoryItemResponse, ClientError> {
        self.send_json(Method::PUT, &format!("/inventory/{}", id), fields)
            .await
    }

    pub async fn delete_inventory(&self, id: i32) -> Result<DeletedItem, ClientError> {
        self.send(self.request(Method::DELETE, &format!("/inventory/{}", id)))
            .await
    }

    pub async fn filter_inventory(
        &self,
        filter: &InventoryFilterParams,
    ) -> Result<Vec<InventoryItemResponse>, ClientError> {
        self.send(self.request(Method::GET, "/inventory/filter").query(filter))
            .await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        match self.acting {
            Some(acting) => builder.header(SUPPLIER_ID_HEADER, acting.id()),
            None => builder,
        }
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(method, path).json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder.send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    debug!(%status, url = %response.url(), "API response");

    if status.is_success() {
        let envelope: ApiResponse<T> = response.json().await?;
        return envelope.data.ok_or(ClientError::MissingData);
    }

    let body = response.bytes().await?;
    match serde_json::from_slice::<ErrorResponse>(&body) {
        Ok(error) => Err(ClientError::Api {
            status,
            message: error.message,
            errors: error.errors.unwrap_or_default(),
        }),
        Err(e) => {
            warn!(%status, "Unparseable error body: {}", e);
            Err(ClientError::Api {
                status,
                message: status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string(),
                errors: Vec::new(),
            })
        }
    }
}
