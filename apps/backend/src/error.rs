use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// One failed field of a validated request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    /// Name of the failed rule, e.g. `length` or `email`.
    pub validation: String,
    pub message: String,
}

/// Body every failure is rendered as.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized: {detail}")]
    Unauthorized { code: ErrorCode, detail: String },
    #[error("Forbidden: {detail}")]
    Forbidden { code: ErrorCode, detail: String },
    #[error("Validation error: {detail}")]
    Validation {
        detail: String,
        fields: Vec<FieldError>,
    },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
    #[error("Database unavailable: {detail}")]
    DbUnavailable { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Unauthorized { code, .. }
            | AppError::Forbidden { code, .. }
            | AppError::BadRequest { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::Internal { code, .. } => *code,
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::DbUnavailable { .. } => ErrorCode::DbUnavailable,
        }
    }

    /// Message shown to the client. Server-side failures never leak their
    /// detail; it goes to the log instead.
    pub fn message(&self) -> String {
        match self {
            AppError::Unauthorized { detail, .. }
            | AppError::Forbidden { detail, .. }
            | AppError::Validation { detail, .. }
            | AppError::BadRequest { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Conflict { detail, .. } => detail.clone(),
            AppError::Internal { .. } | AppError::DbUnavailable { .. } => {
                "internal server error".to_string()
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } | AppError::DbUnavailable { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn token_required() -> Self {
        Self::Unauthorized {
            code: ErrorCode::TokenRequired,
            detail: "token required".to_string(),
        }
    }

    pub fn invalid_token() -> Self {
        Self::Unauthorized {
            code: ErrorCode::InvalidToken,
            detail: "invalid or expired token".to_string(),
        }
    }

    pub fn invalid_credentials() -> Self {
        Self::Unauthorized {
            code: ErrorCode::InvalidCredentials,
            detail: "invalid email or password".to_string(),
        }
    }

    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::Forbidden {
            code: ErrorCode::Forbidden,
            detail: detail.into(),
        }
    }

    pub fn account_disabled() -> Self {
        Self::Forbidden {
            code: ErrorCode::AccountDisabled,
            detail: "account is disabled".to_string(),
        }
    }

    pub fn validation(detail: impl Into<String>, fields: Vec<FieldError>) -> Self {
        Self::Validation {
            detail: detail.into(),
            fields,
        }
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Internal {
            code,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::internal(ErrorCode::ConfigError, detail)
    }

    pub fn db_unavailable(detail: impl Into<String>) -> Self {
        Self::DbUnavailable {
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(detail) => {
                AppError::bad_request(ErrorCode::ValidationError, detail)
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::UniqueEmail => ErrorCode::EmailTaken,
                    _ => ErrorCode::Conflict,
                };
                AppError::conflict(code, detail)
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::User => ErrorCode::UserNotFound,
                    NotFoundKind::Notice => ErrorCode::NoticeNotFound,
                    NotFoundKind::Photo => ErrorCode::PhotoNotFound,
                    NotFoundKind::Carousel => ErrorCode::CarouselNotFound,
                    NotFoundKind::CarouselPhoto => ErrorCode::CarouselPhotoNotFound,
                    _ => ErrorCode::NotFound,
                };
                AppError::not_found(code, detail)
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::DbUnavailable => AppError::db_unavailable(detail),
                InfraErrorKind::Timeout => AppError::internal(ErrorCode::DbTimeout, detail),
                InfraErrorKind::ImageHost => {
                    AppError::internal(ErrorCode::ImageHostError, detail)
                }
                _ => AppError::internal(ErrorCode::DbError, detail),
            },
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        crate::infra::db_errors::map_db_err(e).into()
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let trace_id = trace_ctx::trace_id();

        if status.is_server_error() {
            error!(
                trace_id = %trace_id,
                code = %self.code(),
                detail = %Redacted(&self.to_string()),
                "request failed"
            );
        }

        let fields = match self {
            AppError::Validation { fields, .. } => fields.clone(),
            _ => Vec::new(),
        };

        let body = ErrorBody {
            error: true,
            message: self.message(),
            fields,
        };

        HttpResponse::build(status)
            .insert_header(("x-trace-id", trace_id))
            .json(body)
    }
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use serde_json::Value;

    use super::*;

    async fn body_of(err: AppError) -> (StatusCode, Value) {
        let resp = err.error_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn unauthorized_body_is_minimal() {
        let (status, body) = body_of(AppError::token_required()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], "token required");
        assert!(body.get("fields").is_none());
    }

    #[actix_web::test]
    async fn internal_detail_is_not_exposed() {
        let err = AppError::internal(ErrorCode::DbError, "relation \"users\" does not exist");
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "internal server error");
    }

    #[actix_web::test]
    async fn validation_lists_fields() {
        let err = AppError::validation(
            "validation failed",
            vec![FieldError {
                field: "title".into(),
                validation: "length".into(),
                message: "title must be at least 3 characters".into(),
            }],
        );
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fields"][0]["field"], "title");
        assert_eq!(body["fields"][0]["validation"], "length");
    }

    #[test]
    fn domain_errors_map_to_http_statuses() {
        let cases = [
            (
                DomainError::not_found(NotFoundKind::Notice, "notice not found"),
                StatusCode::NOT_FOUND,
            ),
            (
                DomainError::conflict(ConflictKind::UniqueEmail, "email already registered"),
                StatusCode::CONFLICT,
            ),
            (DomainError::validation("bad"), StatusCode::BAD_REQUEST),
            (
                DomainError::infra(InfraErrorKind::ImageHost, "upload failed"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (domain, expected) in cases {
            assert_eq!(AppError::from(domain).status(), expected);
        }
    }
}
