//! HTTP mapping for [`StorefrontError`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::StorefrontError;

impl IntoResponse for StorefrontError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) | Self::Cart(_) => StatusCode::BAD_REQUEST,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request error");
        } else {
            tracing::debug!(error = %self, "Rejected request");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CartError;

    #[test]
    fn test_status_mapping() {
        let config = StorefrontError::Config("PORT must be a port number".into()).into_response();
        assert_eq!(config.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let validation = StorefrontError::Validation("quantity".into()).into_response();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        let cart = StorefrontError::from(CartError::Overflow).into_response();
        assert_eq!(cart.status(), StatusCode::BAD_REQUEST);
    }
}
