//! Service-level error taxonomy

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{Pincode, PincodeError};
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum MarketError {
    /// Rejected before any side effect.
    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Pincode(#[from] PincodeError),

    /// No seller exists for the requested pincode. A business-rule failure,
    /// kept distinct from validation so clients can offer a different UX.
    #[error("no sellers serve pincode {0}")]
    NotServiceable(Pincode),

    #[error("seller {0} not found")]
    SellerNotFound(Uuid),

    #[error("order {0} not found")]
    OrderNotFound(Uuid),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl MarketError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Pincode(_) => StatusCode::BAD_REQUEST,
            Self::NotServiceable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::SellerNotFound(_) | Self::OrderNotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code, independent of the display message.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) | Self::Pincode(_) => "BAD_USER_INPUT",
            Self::NotServiceable(_) => "NOT_SERVICEABLE",
            Self::SellerNotFound(_) | Self::OrderNotFound(_) => "NOT_FOUND",
            Self::Storage(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl IntoResponse for MarketError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(json!({ "error": self.to_string(), "code": self.code() }));
        (status, body).into_response()
    }
}
