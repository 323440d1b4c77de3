//! Session token issuance and verification.
//!
//! Tokens are PASETO `v4.local`: the session claim travels as the custom
//! `payload` claim inside an authenticated-encrypted envelope whose `iat` and
//! `exp` claims are the source of truth for the session's lifetime.

use rusty_paseto::prelude::*;
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};
use tracing::debug;

use super::claims::{SessionClaim, SessionSubject};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::security_config::SecurityConfig;

const PAYLOAD_CLAIM: &str = "payload";

/// A freshly minted token with the claim it encodes.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claim: SessionClaim,
}

/// Creates and verifies session tokens with a single pre-shared key.
///
/// Holds only immutable configuration, so one instance is shared by every
/// request without locking.
#[derive(Debug, Clone)]
pub struct TokenAuthority {
    config: SecurityConfig,
}

impl TokenAuthority {
    pub fn new(config: SecurityConfig) -> Self {
        Self { config }
    }

    pub fn token_duration(&self) -> Duration {
        self.config.token_duration()
    }

    fn key(&self) -> PasetoSymmetricKey<V4, Local> {
        PasetoSymmetricKey::<V4, Local>::from(Key::from(*self.config.key()))
    }

    /// Issue a token valid from now for the configured duration.
    pub fn issue(&self, subject: SessionSubject) -> Result<IssuedToken, AppError> {
        self.issue_at(subject, OffsetDateTime::now_utc())
    }

    /// Issue a token as if the current time were `now`.
    ///
    /// Timestamps are truncated to whole seconds so the claim handed back to
    /// the caller is exactly what a later `verify` reconstructs.
    pub fn issue_at(
        &self,
        subject: SessionSubject,
        now: OffsetDateTime,
    ) -> Result<IssuedToken, AppError> {
        let issued_at = now
            .replace_nanosecond(0)
            .map_err(|e| token_build_error(e.to_string()))?;
        let expires_at = issued_at
            .checked_add(self.config.token_duration())
            .ok_or_else(|| token_build_error("expiry is out of range".to_string()))?;
        let claim = SessionClaim::new(subject, issued_at, expires_at);

        let payload =
            serde_json::to_value(&claim).map_err(|e| token_build_error(e.to_string()))?;
        let iat = issued_at
            .format(&Rfc3339)
            .map_err(|e| token_build_error(e.to_string()))?;
        let exp = expires_at
            .format(&Rfc3339)
            .map_err(|e| token_build_error(e.to_string()))?;

        let key = self.key();
        let token = PasetoBuilder::<V4, Local>::default()
            .set_claim(IssuedAtClaim::try_from(iat).map_err(|e| token_build_error(e.to_string()))?)
            .set_claim(
                ExpirationClaim::try_from(exp).map_err(|e| token_build_error(e.to_string()))?,
            )
            .set_claim(
                CustomClaim::try_from((PAYLOAD_CLAIM, payload))
                    .map_err(|e| token_build_error(e.to_string()))?,
            )
            .build(&key)
            .map_err(|e| token_build_error(e.to_string()))?;

        Ok(IssuedToken { token, claim })
    }

    /// Decrypt and authenticate `token`, reject it if the envelope has
    /// expired, and return the claim with the envelope's timestamps.
    ///
    /// Every failure collapses into the same 401 so callers learn nothing
    /// about why a token was refused.
    pub fn verify(&self, token: &str) -> Result<SessionClaim, AppError> {
        let key = self.key();
        let value = PasetoParser::<V4, Local>::default()
            .parse(token, &key)
            .map_err(|e| {
                debug!(error = %e, "token rejected");
                AppError::invalid_token()
            })?;

        let issued_at = envelope_time(&value, "iat")?;
        let expires_at = envelope_time(&value, "exp")?;

        let payload = value
            .get(PAYLOAD_CLAIM)
            .cloned()
            .ok_or_else(AppError::invalid_token)?;
        let claim: SessionClaim = serde_json::from_value(payload).map_err(|e| {
            debug!(error = %e, "token payload did not deserialize");
            AppError::invalid_token()
        })?;

        Ok(claim.with_envelope_times(issued_at, expires_at))
    }
}

fn envelope_time(value: &Value, name: &str) -> Result<OffsetDateTime, AppError> {
    value
        .get(name)
        .and_then(Value::as_str)
        .and_then(|s| OffsetDateTime::parse(s, &Rfc3339).ok())
        .ok_or_else(AppError::invalid_token)
}

fn token_build_error(detail: String) -> AppError {
    AppError::internal(ErrorCode::InternalError, format!("token issuance failed: {detail}"))
}
