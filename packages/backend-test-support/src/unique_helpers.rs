//! Unique test data built from ULIDs so parallel tests never collide on
//! unique columns (user emails, institute names).

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("notice");
/// let b = unique_str("notice");
/// assert_ne!(a, b);
/// assert!(a.starts_with("notice-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Lower-case address under `example.test`. Login lower-cases the address it
/// is given, so generated emails are lower-case up front.
///
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let email = unique_email("admin");
/// assert!(email.starts_with("admin-"));
/// assert!(email.ends_with("@example.test"));
/// assert_eq!(email, email.to_lowercase());
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new()).to_lowercase()
}
