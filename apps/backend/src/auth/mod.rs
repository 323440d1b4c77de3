//! Session authentication: token issuance/verification, password hashing
//! and the authorization checks handlers apply to a bound claim.

pub mod claims;
pub mod password;
pub mod policy;
pub mod token;

pub use claims::{SessionClaim, SessionSubject};
pub use password::PasswordHasher;
pub use policy::{require_admin, require_self_or_admin, TenantId, ADMIN_ROLE};
pub use token::{IssuedToken, TokenAuthority};
