use crate::{db::DbPool, errors::ServiceError};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;
use validator::ValidationError;

/// Command trait for implementing the Command Pattern
///
/// A command owns its validated input and performs one store operation against the pool.
#[async_trait]
pub trait Command: Send + Sync {
    /// The return type of the command when executed successfully
    type Result;

    /// Execute the command against the given pool
    async fn execute(&self, db_pool: Arc<DbPool>) -> Result<Self::Result, ServiceError>;
}

pub mod inventory;
pub mod suppliers;

/// Request body as received by a write path.
///
/// A body that failed to parse is only reported once the target record has passed
/// its existence and ownership checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload<T> {
    Parsed(T),
    Malformed(String),
}

impl<T> Payload<T> {
    /// Parsed fields, or the deferred parse failure as a 400
    pub fn fields(&self) -> Result<&T, ServiceError> {
        match self {
            Payload::Parsed(fields) => Ok(fields),
            Payload::Malformed(reason) => Err(ServiceError::BadRequest(reason.clone())),
        }
    }
}

impl<T> From<Result<T, ServiceError>> for Payload<T> {
    fn from(parsed: Result<T, ServiceError>) -> Self {
        match parsed {
            Ok(fields) => Payload::Parsed(fields),
            Err(err) => Payload::Malformed(err.response_message()),
        }
    }
}

/// Maximum length for every stored text column
pub const MAX_TEXT_LEN: usize = 255;

/// Shared `name` rule for suppliers and inventory items
pub(crate) fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("Name is required".into());
        return Err(err);
    }
    if name.chars().count() > MAX_TEXT_LEN {
        let mut err = ValidationError::new("length");
        err.message = Some("Name cannot exceed 255 characters".into());
        return Err(err);
    }
    Ok(())
}

/// Treats an explicit JSON `null` like an omitted text field
pub(crate) fn blank_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn blank_names_are_rejected() {
        let err = validate_name("   ").unwrap_err();
        assert_eq!(err.message.as_deref(), Some("Name is required"));
    }

    #[test]
    fn names_are_limited_by_characters_not_bytes() {
        assert!(validate_name(&"é".repeat(255)).is_ok());
        let err = validate_name(&"a".repeat(256)).unwrap_err();
        assert_eq!(
            err.message.as_deref(),
            Some("Name cannot exceed 255 characters")
        );
    }

    #[test]
    fn malformed_payload_surfaces_as_bad_request() {
        let payload: Payload<String> =
            Err(ServiceError::BadRequest("quantity: invalid type".into())).into();
        let err = payload.fields().unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.response_message(), "quantity: invalid type");

        let parsed = Payload::Parsed("Acme".to_string());
        assert_eq!(parsed.fields().unwrap(), "Acme");
    }
}
