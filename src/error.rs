use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<String>,
    },

    /// Non-2xx answer from an upstream service (peer or payment gateway).
    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("Erro no servidor")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Erro no servidor")]
    HttpError(#[from] reqwest::Error),

    #[error("Erro no servidor")]
    JsonError(#[from] serde_json::Error),

    #[error("Erro no servidor")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    message: message.clone(),
                    errors: None,
                    error: None,
                },
            ),
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message: message.clone(),
                    errors: None,
                    error: None,
                },
            ),
            AppError::Validation { message, errors } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message: message.clone(),
                    errors: Some(errors.clone()),
                    error: None,
                },
            ),
            AppError::Upstream { status, message } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                ErrorBody {
                    message: message.clone(),
                    errors: None,
                    error: Some(message.clone()),
                },
            ),
            AppError::OrmError(err) => internal(err.to_string()),
            AppError::HttpError(err) => internal(err.to_string()),
            AppError::JsonError(err) => internal(err.to_string()),
            AppError::Internal(err) => internal(err.to_string()),
        };

        (status, axum::Json(body)).into_response()
    }
}

fn internal(detail: String) -> (StatusCode, ErrorBody) {
    tracing::error!(error = %detail, "erro interno");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorBody {
            message: "Erro no servidor".to_string(),
            errors: None,
            error: Some(detail),
        },
    )
}

pub type AppResult<T> = Result<T, AppError>;
