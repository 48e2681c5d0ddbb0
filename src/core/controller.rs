use std::sync::Arc;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use crate::catalog::domain::CatalogService;
use crate::core::command::CommandError;

#[derive(Clone)]
pub struct AppState {
    pub catalog_service: Arc<dyn CatalogService>,
}

impl AppState {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> AppState {
        AppState {
            catalog_service,
        }
    }
}

// ErrorResponse is the body of every failed request
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        Self {
            success: false,
            error: error.to_string(),
        }
    }
}

pub type ServerError = (StatusCode, Json<ErrorResponse>);

pub fn json_to_server_error(err: JsonRejection) -> ServerError {
    warn!(error = %err.body_text(), "rejected request body");
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(err.body_text().as_str())))
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        let status = match err {
            CommandError::Database { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            CommandError::DuplicateKey { .. } => {
                StatusCode::CONFLICT
            }
            CommandError::Runtime { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            CommandError::Serialization { .. } => {
                StatusCode::BAD_REQUEST
            }
            CommandError::Validation { .. } => {
                StatusCode::BAD_REQUEST
            }
        };
        if status.is_server_error() {
            error!(error = ?err, "request failed");
        } else {
            warn!(status = status.as_u16(), error = err.message(), "request rejected");
        }
        (status, Json(ErrorResponse::new(err.message())))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use crate::core::command::CommandError;
    use crate::core::controller::{ErrorResponse, ServerError};

    #[tokio::test]
    async fn test_should_map_command_errors() {
        let cases = vec![
            (CommandError::validation("Missing required field: title"), StatusCode::BAD_REQUEST),
            (CommandError::Serialization { message: "bad".to_string() }, StatusCode::BAD_REQUEST),
            (CommandError::DuplicateKey { message: "dup".to_string() }, StatusCode::CONFLICT),
            (CommandError::Database { message: "disk".to_string(), reason_code: None }, StatusCode::INTERNAL_SERVER_ERROR),
            (CommandError::Runtime { message: "join".to_string(), reason_code: None }, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            let message = err.message().to_string();
            let (status, body): ServerError = err.into();
            assert_eq!(expected, status);
            assert_eq!(ErrorResponse { success: false, error: message }, body.0);
        }
    }
}
