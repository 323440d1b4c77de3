use std::ops::{Deref, DerefMut};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::Error as JsonError;
use tracing::{debug, warn};
use validator::{Validate, ValidationErrors};

use crate::error::{AppError, FieldError};
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Largest JSON body accepted.
pub const MAX_JSON_BODY: usize = 2 * 1024 * 1024;

/// JSON body that has been parsed and then checked with its `validator`
/// rules.
///
/// Parse failures become a 400 with a sanitized message; rule failures
/// become a 400 listing each failed field.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for ValidatedJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("")
            .to_string();

        Box::pin(async move {
            let trace_id = trace_ctx::trace_id();

            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    warn!(trace_id = %trace_id, error = %e, "Failed to read request body chunk");
                    AppError::bad_request(ErrorCode::BadRequest, "failed to read request body")
                })?;
                if body.len() + chunk.len() > MAX_JSON_BODY {
                    return Err(AppError::bad_request(
                        ErrorCode::BadRequest,
                        "request body too large",
                    ));
                }
                body.extend_from_slice(&chunk);
            }

            let parsed = serde_json::from_slice::<T>(&body).map_err(|e| {
                debug!(
                    trace_id = %trace_id,
                    error = %Redacted(&e.to_string()),
                    content_type = %content_type,
                    body_size = body.len(),
                    "JSON parsing failed"
                );
                AppError::bad_request(ErrorCode::BadRequest, classify_json_error(&e))
            })?;

            parsed.validate().map_err(|errors| {
                let fields = field_errors(&errors);
                debug!(trace_id = %trace_id, failed = fields.len(), "request validation failed");
                AppError::validation("validation failed", fields)
            })?;

            Ok(ValidatedJson(parsed))
        })
    }
}

/// Flatten `validator` output into one entry per failed rule, ordered by
/// field name.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| FieldError {
                field: field.to_string(),
                validation: err.code.to_string(),
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} failed {} validation", err.code)),
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field).then(a.validation.cmp(&b.validation)));
    fields
}

fn classify_json_error(error: &JsonError) -> String {
    match error.classify() {
        serde_json::error::Category::Syntax => {
            format!("invalid JSON at line {}", error.line())
        }
        serde_json::error::Category::Eof => "invalid JSON: unexpected end of input".to_string(),
        serde_json::error::Category::Data => {
            "invalid JSON: wrong types or missing fields".to_string()
        }
        serde_json::error::Category::Io => "invalid JSON: I/O error while reading body".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(length(min = 3, message = "name must be at least 3 characters"))]
        name: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn classify_syntax_eof_and_data() {
        let syntax = serde_json::from_str::<Sample>(r#"{"name": }"#).unwrap_err();
        assert!(classify_json_error(&syntax).contains("line"));

        let eof = serde_json::from_str::<Sample>(r#"{"name": "abc""#).unwrap_err();
        assert!(classify_json_error(&eof).contains("unexpected end"));

        let data = serde_json::from_str::<Sample>(r#"{"name": 1, "email": "x"}"#).unwrap_err();
        assert!(classify_json_error(&data).contains("wrong types"));
    }

    #[test]
    fn field_errors_are_flattened_and_sorted() {
        let sample = Sample {
            name: "ab".into(),
            email: "not-an-email".into(),
        };
        let errors = sample.validate().unwrap_err();
        let fields = field_errors(&errors);

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field, "email");
        assert_eq!(fields[0].validation, "email");
        assert_eq!(fields[1].field, "name");
        assert_eq!(fields[1].message, "name must be at least 3 characters");
    }

    #[test]
    fn deref_and_into_inner() {
        let mut wrapped = ValidatedJson(Sample {
            name: "abc".into(),
            email: "a@b.co".into(),
        });
        wrapped.name.push('d');
        assert_eq!(wrapped.name, "abcd");
        assert_eq!(wrapped.into_inner().email, "a@b.co");
    }
}
