use crate::{errors::ServiceError, services::inventory::ActingSupplier, ApiResponse};
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};

/// Header carrying the acting supplier identity
pub const SUPPLIER_ID_HEADER: &str = "x-supplier-id";

/// Standard success response
pub fn success_response<T: Serialize>(message: &str, data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::success(message, data))).into_response()
}

/// Standard created response
pub fn created_response<T: Serialize>(message: &str, data: T) -> Response {
    (StatusCode::CREATED, Json(ApiResponse::success(message, data))).into_response()
}

/// JSON body extractor whose rejections render as the standard error body
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Integer record id taken from the path
#[derive(Debug, Clone, Copy)]
pub struct RecordId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i32>::from_request_parts(parts, state).await?;
        Ok(Self(id))
    }
}

/// Optional acting supplier; invalid header values count as absent
#[derive(Debug, Clone, Copy)]
pub struct SupplierHeader(pub Option<ActingSupplier>);

#[async_trait]
impl<S> FromRequestParts<S> for SupplierHeader
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let acting = parts
            .headers
            .get(SUPPLIER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(ActingSupplier::parse);

        if let Some(acting) = acting {
            tracing::Span::current().record("supplier_id", acting.id());
        }
        Ok(Self(acting))
    }
}

/// Acting supplier for mutations; rejects before the body is read
#[derive(Debug, Clone, Copy)]
pub struct RequiredSupplier(pub ActingSupplier);

#[async_trait]
impl<S> FromRequestParts<S> for RequiredSupplier
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let SupplierHeader(acting) = SupplierHeader::from_request_parts(parts, state).await?;
        acting.map(Self).ok_or_else(|| {
            ServiceError::validation("Supplier ID is required in header (X-Supplier-ID)")
        })
    }
}
