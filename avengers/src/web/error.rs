use avengers_api_types::result::JsonError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::{character_store::DataSourceError, extension::ExtensionError};

#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error(transparent)]
    Extension(#[from] ExtensionError),
    #[error("Character data unavailable: {0}")]
    DataSource(#[from] DataSourceError),
    #[error("Invalid activity: {0}")]
    InvalidActivity(#[from] JsonRejection),
}

impl ApiError {
    fn as_status_code(&self) -> StatusCode {
        match self {
            ApiError::Extension(ExtensionError::DataSource(_)) | ApiError::DataSource(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Extension(ExtensionError::UnsupportedInvoke(_)) => {
                StatusCode::NOT_IMPLEMENTED
            }
            ApiError::Extension(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidActivity(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("error {}", self);
        let e = format!("{self}");

        (self.as_status_code(), Json(JsonError { error_message: e })).into_response()
    }
}
