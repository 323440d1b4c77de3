//! SeaORM -> DomainError translation.
//!
//! Repositories convert `sea_orm::DbErr` into `DomainError` here; the HTTP
//! boundary then maps `DomainError` to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// `table.column` from SQLite's "UNIQUE constraint failed: table.column".
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    let marker = "UNIQUE constraint failed: ";
    let start = error_msg.find(marker)? + marker.len();
    error_msg[start..].split_whitespace().next()
}

fn map_unique_violation(error_msg: &str) -> (ConflictKind, &'static str) {
    let sqlite_email = extract_sqlite_table_column(error_msg)
        .map(|tc| tc.trim_end_matches(|c| c == ',' || c == ')') == "users.email")
        .unwrap_or(false);

    if sqlite_email
        || error_msg.contains("idx_users_email_unique")
        || error_msg.contains("users_email_key")
    {
        (ConflictKind::UniqueEmail, "email already registered")
    } else {
        (
            ConflictKind::Other("Unique".into()),
            "unique constraint violation",
        )
    }
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                "record not found",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");
        let (kind, detail) = map_unique_violation(&error_msg);
        return DomainError::conflict(kind, detail);
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Foreign key constraint violation");
        return DomainError::validation("referenced record does not exist");
    }

    if mentions_sqlstate(&error_msg, "23514") || error_msg.contains("CHECK constraint failed") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Check constraint violation");
        return DomainError::validation("check constraint violation");
    }

    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "database operation failed",
    )
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbErr, RuntimeErr};

    use super::*;

    #[test]
    fn sqlite_unique_email_is_conflict() {
        let err = DbErr::Exec(RuntimeErr::Internal(
            "error returned from database: (code: 2067) UNIQUE constraint failed: users.email"
                .into(),
        ));
        assert_eq!(
            map_db_err(err),
            DomainError::conflict(ConflictKind::UniqueEmail, "email already registered")
        );
    }

    #[test]
    fn postgres_unique_email_is_conflict() {
        let err = DbErr::Query(RuntimeErr::Internal(
            "duplicate key value violates unique constraint \"idx_users_email_unique\"".into(),
        ));
        assert!(matches!(
            map_db_err(err),
            DomainError::Conflict(ConflictKind::UniqueEmail, _)
        ));
    }

    #[test]
    fn record_not_found_maps_to_not_found() {
        let err = DbErr::RecordNotFound("users".into());
        assert!(matches!(map_db_err(err), DomainError::NotFound(_, _)));
    }

    #[test]
    fn unknown_errors_are_infra() {
        let err = DbErr::Custom("something odd".into());
        assert!(matches!(map_db_err(err), DomainError::Infra(_, _)));
    }
}
