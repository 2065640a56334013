use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Duplicate fields: {}", .0.join(", "))]
    Duplicate(Vec<&'static str>),
    #[error("Image upload error: {0}")]
    ImageUpload(String),
    #[error("Upstream error: {0}")]
    Upstream(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a [&'static str]>,
}

impl AppError {
    fn message(&self) -> String {
        match self {
            AppError::NotFound(msg) | AppError::InvalidRequest(msg) => msg.clone(),
            AppError::Duplicate(fields) => {
                format!("Employee with the same {} already exists", fields.join(", "))
            }
            _ => "Server error".to_string(),
        }
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::Database(e.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(e: mongodb::bson::ser::Error) -> Self {
        AppError::Database(format!("BSON serialization failed: {}", e))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest(_) | AppError::Duplicate(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("❌ {}", self);
        } else {
            log::warn!("⚠️  {}", self);
        }

        let fields = match self {
            AppError::Duplicate(fields) => Some(fields.as_slice()),
            _ => None,
        };

        HttpResponse::build(status).json(ErrorBody {
            message: self.message(),
            fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_hide_details() {
        let err = AppError::Database("connection refused".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Server error");
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn duplicate_maps_to_bad_request() {
        let err = AppError::Duplicate(vec!["username", "email"]);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.message(),
            "Employee with the same username, email already exists"
        );
    }

    #[test]
    fn not_found_keeps_message() {
        let err = AppError::NotFound("Employee not found".into());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Employee not found");
    }
}
