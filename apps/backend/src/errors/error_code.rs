//! Stable error codes.
//!
//! Codes never reach the response body (clients only see `error` and
//! `message`); they are attached to log events so failures can be grouped
//! without parsing free-text messages.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// No token in the Authorization header or query string
    TokenRequired,
    /// Token failed decryption, authentication or expiry checks
    InvalidToken,
    /// Login with unknown email or wrong password
    InvalidCredentials,
    /// Caller lacks the admin role or does not own the resource
    Forbidden,
    /// Account exists but has been disabled
    AccountDisabled,

    // Request Validation
    /// Field-level validation failure
    ValidationError,
    /// Malformed request (bad JSON, bad path id, missing parameter)
    BadRequest,
    /// Unsupported or missing upload content type
    UnsupportedMediaType,

    // Resources
    UserNotFound,
    NoticeNotFound,
    PhotoNotFound,
    CarouselNotFound,
    CarouselPhotoNotFound,
    NotFound,

    // Conflicts
    EmailTaken,
    Conflict,

    // System
    InternalError,
    DbError,
    DbUnavailable,
    DbTimeout,
    ImageHostError,
    ConfigError,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TokenRequired => "TOKEN_REQUIRED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::AccountDisabled => "ACCOUNT_DISABLED",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NoticeNotFound => "NOTICE_NOT_FOUND",
            Self::PhotoNotFound => "PHOTO_NOT_FOUND",
            Self::CarouselNotFound => "CAROUSEL_NOT_FOUND",
            Self::CarouselPhotoNotFound => "CAROUSEL_PHOTO_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::Conflict => "CONFLICT",
            Self::InternalError => "INTERNAL_ERROR",
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::ImageHostError => "IMAGE_HOST_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
