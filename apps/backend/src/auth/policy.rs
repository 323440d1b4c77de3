//! Authorization checks applied by handlers to the bound session claim.
//!
//! Role and ownership decisions happen here, before any datastore access.

use super::claims::SessionClaim;
use crate::error::AppError;
use crate::logging::security;

/// The only privileged role. Every other role string is an ordinary member.
pub const ADMIN_ROLE: &str = "admin";

/// Institute scope taken from a verified claim. Repositories accept this
/// instead of a bare integer so a client-supplied id cannot be passed in by
/// accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TenantId(pub(crate) i32);

impl TenantId {
    pub fn get(self) -> i32 {
        self.0
    }
}

pub fn require_admin(claim: &SessionClaim) -> Result<(), AppError> {
    if claim.is_admin() {
        Ok(())
    } else {
        security::access_denied(claim.subject_id(), claim.tenant_id(), "admin_required");
        Err(AppError::forbidden("admin role required"))
    }
}

/// Admins may act on anyone in their institute; everyone else only on
/// themselves.
pub fn require_self_or_admin(claim: &SessionClaim, target_id: i32) -> Result<(), AppError> {
    if claim.is_admin() || claim.subject_id() == target_id {
        Ok(())
    } else {
        security::access_denied(claim.subject_id(), claim.tenant_id(), "self_or_admin_required");
        Err(AppError::forbidden("not allowed to modify this user"))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use time::OffsetDateTime;

    use super::*;
    use crate::auth::claims::SessionSubject;

    fn claim(id: i32, role: &str) -> SessionClaim {
        let now = OffsetDateTime::now_utc();
        SessionClaim::new(
            SessionSubject {
                subject_id: id,
                email: format!("u{id}@example.test"),
                display_name: format!("User {id}"),
                role: role.into(),
                tenant_id: 1,
            },
            now,
            now,
        )
    }

    #[test]
    fn admin_gate() {
        assert!(require_admin(&claim(1, "admin")).is_ok());
        let err = require_admin(&claim(1, "staff")).unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn self_or_admin_gate() {
        assert!(require_self_or_admin(&claim(5, "staff"), 5).is_ok());
        assert!(require_self_or_admin(&claim(1, "admin"), 5).is_ok());
        let err = require_self_or_admin(&claim(4, "staff"), 5).unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn tenant_comes_from_claim() {
        assert_eq!(claim(9, "staff").tenant().get(), 1);
    }
}
