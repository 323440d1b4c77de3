//! Masking of personal data and credentials in log output.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// Vetted literals; a failure here is a programming error caught by the tests
// below.
#[allow(clippy::unwrap_used)]
static PASETO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v4\.(local|public)\.[A-Za-z0-9_\-.]+").unwrap());

#[allow(clippy::unwrap_used)]
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap());

#[allow(clippy::unwrap_used)]
static OPAQUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9+/_\-]{24,}={0,2}").unwrap());

/// Mask session tokens, emails and long opaque strings (keys, hashes,
/// signatures).
///
/// Emails keep their first character and domain: `jane@x.org` becomes
/// `j***@x.org`.
pub fn redact(input: &str) -> String {
    let without_tokens = PASETO.replace_all(input, "[REDACTED_TOKEN]");

    let without_emails = EMAIL.replace_all(&without_tokens, |caps: &regex::Captures| {
        let full = &caps[0];
        match full.split_once('@') {
            Some((local, domain)) => match local.chars().next() {
                Some(first) => format!("{first}***@{domain}"),
                None => format!("@{domain}"),
            },
            None => full.to_string(),
        }
    });

    OPAQUE
        .replace_all(&without_emails, "[REDACTED]")
        .into_owned()
}

/// Display wrapper applying [`redact`], for use in `tracing` fields.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_emails() {
        assert_eq!(redact("user@example.com"), "u***@example.com");
        assert_eq!(
            redact("login for a@test.org failed"),
            "login for a***@test.org failed"
        );
    }

    #[test]
    fn masks_session_tokens() {
        let line = "Bearer v4.local.AbC-dEf_123.footer rejected";
        assert_eq!(redact(line), "Bearer [REDACTED_TOKEN] rejected");
    }

    #[test]
    fn masks_long_opaque_values() {
        let hash = "3Dz3Bq0pCzGvqyzDDO8cJ5yNUMJbWdzvkuWOi2nfGCQ";
        assert_eq!(redact(&format!("hash={hash}")), "hash=[REDACTED]");
    }

    #[test]
    fn leaves_ordinary_text_alone() {
        let msg = "UNIQUE constraint failed: users.email";
        assert_eq!(redact(msg), msg);
    }

    #[test]
    fn redacted_wrapper_displays_masked() {
        assert_eq!(format!("{}", Redacted("bob@x.io")), "b***@x.io");
    }
}
