//! Security audit events. Emitted at `warn` with a stable `event` field so
//! they can be filtered out of the request log.

use tracing::warn;

use crate::logging::pii::Redacted;
use crate::trace_ctx;

pub fn login_failed(reason: &str, email: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        email = %Redacted(email),
        reason,
        "Authentication failure"
    );
}

pub fn token_rejected(carrier: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        %trace_id,
        carrier,
        "Session token rejected"
    );
}

pub fn access_denied(subject_id: i32, institute_id: i32, action: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_ACCESS_DENIED",
        %trace_id,
        subject_id,
        institute_id,
        action,
        "Authorization failure"
    );
}
