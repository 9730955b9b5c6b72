//! Stockroom API Library
//!
//! Inventory items and their suppliers: the REST API, its typed client, and the list/form
//! view-models driven by the `stockroom` terminal frontend.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod client;
pub mod commands;
pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod services;
pub mod telemetry;
pub mod views;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::{any::Any, sync::Arc, time::Duration};
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer};
use utoipa::ToSchema;

use crate::{db::DbPool, errors::ServiceError};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(db: Arc<DbPool>, config: config::AppConfig) -> Self {
        let services = handlers::AppServices::new(db.clone());
        Self {
            db,
            config,
            services,
        }
    }
}

// Common response wrappers
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResponseMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

impl ResponseMeta {
    fn capture() -> Self {
        Self {
            request_id: telemetry::current_request_id().map(|rid| rid.as_str().to_string()),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            meta: Some(ResponseMeta::capture()),
        }
    }
}

/// Resource routes, mounted at the root
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/suppliers", handlers::suppliers::supplier_routes())
        .nest("/inventory", handlers::inventory::inventory_routes())
        .nest("/health", handlers::health::health_routes())
}

/// Full application router: routes, docs, JSON fallbacks, panic catcher, request timeout,
/// tracing and request ids.
///
/// Deployment-specific layers (CORS, compression) are added by the binary.
pub fn build_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);
    Router::new()
        .merge(api_routes())
        .merge(openapi::swagger_ui())
        .fallback(route_not_found)
        .layer(axum::middleware::map_response(json_method_not_allowed))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TimeoutLayer::new(timeout))
        .layer(axum::middleware::map_response(json_request_timeout))
        .layer(telemetry::configure_http_tracing())
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
        .with_state(state)
}

async fn route_not_found() -> ServiceError {
    ServiceError::not_found("Route not found")
}

/// axum answers unsupported methods with an empty 405; give it the standard body
async fn json_method_not_allowed(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }
    let allow = response.headers().get(axum::http::header::ALLOW).cloned();
    let mut replaced = (
        StatusCode::METHOD_NOT_ALLOWED,
        axum::Json(errors::ErrorResponse {
            error: "Method Not Allowed".to_string(),
            message: "Method not allowed".to_string(),
            errors: None,
            request_id: telemetry::current_request_id().map(|rid| rid.0),
            timestamp: Utc::now().to_rfc3339(),
        }),
    )
        .into_response();
    if let Some(allow) = allow {
        replaced
            .headers_mut()
            .insert(axum::http::header::ALLOW, allow);
    }
    replaced
}

/// `TimeoutLayer` answers with an empty 408
async fn json_request_timeout(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }
    ServiceError::RequestTimeout.into_response()
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    ServiceError::InternalError(format!("handler panicked: {}", detail)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    #[tokio::test]
    async fn timed_out_requests_get_a_json_body() {
        let app = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_millis(500)).await;
                    "late"
                }),
            )
            .layer(TimeoutLayer::new(Duration::from_millis(10)))
            .layer(axum::middleware::map_response(json_request_timeout));

        let response = app
            .oneshot(Request::get("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: errors::ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "Request Timeout");
        assert_eq!(body.message, "Request timed out");
    }
}
