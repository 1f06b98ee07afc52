use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rtsp_scout_common::error::EnumerationError;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Error determining local networks: {0}")]
    Enumeration(#[from] EnumerationError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::Enumeration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = self.to_string();

        error!(status = %status, message = %message, "Request error");

        (status, message).into_response()
    }
}
