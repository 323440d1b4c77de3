use std::fmt;

use base64::engine::general_purpose;
use base64::Engine as _;
use time::Duration;

use crate::error::AppError;

/// Token lifetime applied when none is configured.
pub const DEFAULT_TOKEN_DURATION: Duration = Duration::hours(1);

/// Key material and lifetime for session tokens.
///
/// Built once at startup and handed to the token authority; nothing reads
/// the key from the environment after that.
#[derive(Clone)]
pub struct SecurityConfig {
    key: [u8; 32],
    token_duration: Duration,
}

impl SecurityConfig {
    /// Parse key material in any of the accepted encodings: 64 hex chars,
    /// base64 (url-safe or standard) of 32 bytes, or 32 raw bytes.
    pub fn new(key_material: &str, token_duration: Duration) -> Result<Self, AppError> {
        let key = parse_key_material(key_material).ok_or_else(|| {
            AppError::config("TOKEN_SYMMETRIC_KEY must decode to exactly 32 bytes")
        })?;
        Ok(Self::from_key(key, token_duration))
    }

    pub fn from_key(key: [u8; 32], token_duration: Duration) -> Self {
        Self {
            key,
            token_duration,
        }
    }

    pub fn key(&self) -> &[u8; 32] {
        &self.key
    }

    pub fn token_duration(&self) -> Duration {
        self.token_duration
    }

    /// Fixed key, default lifetime. Only for tests.
    pub fn for_tests() -> Self {
        Self::from_key(*b"test-only-key-0123456789abcdefgh", DEFAULT_TOKEN_DURATION)
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("key", &"[REDACTED]")
            .field("token_duration", &self.token_duration)
            .finish()
    }
}

fn parse_key_material(raw: &str) -> Option<[u8; 32]> {
    let trimmed = raw.trim();

    if trimmed.len() == 64 && trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
        let bytes = hex::decode(trimmed).ok()?;
        return bytes.as_slice().try_into().ok();
    }

    for engine in [&general_purpose::URL_SAFE_NO_PAD, &general_purpose::STANDARD] {
        if let Ok(bytes) = engine.decode(trimmed) {
            if bytes.len() == 32 {
                return bytes.as_slice().try_into().ok();
            }
        }
    }

    trimmed.as_bytes().try_into().ok()
}
