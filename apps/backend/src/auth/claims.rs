//! The session claim carried inside every token and bound to each
//! authenticated request.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::policy::{TenantId, ADMIN_ROLE};

/// Who a token is being issued for. Built from a verified user row, never
/// from request input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSubject {
    pub subject_id: i32,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub tenant_id: i32,
}

/// Identity and tenant scope of an authenticated caller.
///
/// Only the token authority constructs these, either while issuing a token
/// or after a token has been decrypted and its envelope validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaim {
    #[serde(rename = "id")]
    subject_id: i32,
    email: String,
    #[serde(rename = "name")]
    display_name: String,
    role: String,
    #[serde(rename = "institute_id")]
    tenant_id: i32,
    #[serde(with = "time::serde::rfc3339")]
    issued_at: OffsetDateTime,
    #[serde(rename = "expired_at", with = "time::serde::rfc3339")]
    expires_at: OffsetDateTime,
}

impl SessionClaim {
    pub(crate) fn new(
        subject: SessionSubject,
        issued_at: OffsetDateTime,
        expires_at: OffsetDateTime,
    ) -> Self {
        Self {
            subject_id: subject.subject_id,
            email: subject.email,
            display_name: subject.display_name,
            role: subject.role,
            tenant_id: subject.tenant_id,
            issued_at,
            expires_at,
        }
    }

    /// Replace the payload timestamps with the authenticated envelope's.
    pub(crate) fn with_envelope_times(
        mut self,
        issued_at: OffsetDateTime,
        expires_at: OffsetDateTime,
    ) -> Self {
        self.issued_at = issued_at;
        self.expires_at = expires_at;
        self
    }

    pub fn subject_id(&self) -> i32 {
        self.subject_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn tenant_id(&self) -> i32 {
        self.tenant_id
    }

    /// Tenant scope for repository calls.
    pub fn tenant(&self) -> TenantId {
        TenantId(self.tenant_id)
    }

    pub fn issued_at(&self) -> OffsetDateTime {
        self.issued_at
    }

    pub fn expires_at(&self) -> OffsetDateTime {
        self.expires_at
    }

    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn claim(role: &str) -> SessionClaim {
        SessionClaim::new(
            SessionSubject {
                subject_id: 7,
                email: "ada@example.test".into(),
                display_name: "Ada".into(),
                role: role.into(),
                tenant_id: 3,
            },
            datetime!(2025-01-01 10:00 UTC),
            datetime!(2025-01-01 11:00 UTC),
        )
    }

    #[test]
    fn serializes_with_wire_names() {
        let value = serde_json::to_value(claim("staff")).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["name"], "Ada");
        assert_eq!(value["institute_id"], 3);
        assert_eq!(value["issued_at"], "2025-01-01T10:00:00Z");
        assert_eq!(value["expired_at"], "2025-01-01T11:00:00Z");
    }

    #[test]
    fn only_admin_role_is_privileged() {
        assert!(claim("admin").is_admin());
        assert!(!claim("Admin").is_admin());
        assert!(!claim("staff").is_admin());
        assert!(!claim("").is_admin());
    }
}
