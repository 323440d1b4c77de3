//! Process configuration, read once from the environment at startup.

use std::time::Duration as StdDuration;

use time::Duration;
use tracing::warn;

use crate::error::AppError;
use crate::state::security_config::{SecurityConfig, DEFAULT_TOKEN_DURATION};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl std::fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// First admin account created at startup when no user holds its email yet.
#[derive(Clone)]
pub struct BootstrapConfig {
    pub institute_name: String,
    pub admin_name: String,
    pub admin_email: String,
    pub admin_password: String,
}

impl std::fmt::Debug for BootstrapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapConfig")
            .field("institute_name", &self.institute_name)
            .field("admin_name", &self.admin_name)
            .field("admin_password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub security: SecurityConfig,
    pub host: String,
    pub port: u16,
    pub auto_migrate: bool,
    /// Raw comma-separated origin list; parsed by the CORS middleware.
    pub cors_allowed_origins: String,
    pub cloudinary: Option<CloudinaryConfig>,
    pub upload_timeout: StdDuration,
    pub bootstrap: Option<BootstrapConfig>,
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| AppError::config(format!("{key} must be set")))
        };

        let database_url = require("DATABASE_URL")?;
        let key_material = require("TOKEN_SYMMETRIC_KEY")?;

        let token_duration = match get("TOKEN_DURATION") {
            None => DEFAULT_TOKEN_DURATION,
            Some(raw) => parse_duration(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "invalid TOKEN_DURATION, using default of 1h");
                DEFAULT_TOKEN_DURATION
            }),
        };
        let security = SecurityConfig::new(&key_material, token_duration)?;

        let host = get("BACKEND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get("PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                warn!(value = %raw, "invalid PORT, using default");
                DEFAULT_PORT
            }),
        };

        let auto_migrate = get("DB_AUTO_MIGRATE")
            .map(|v| parse_bool(&v))
            .unwrap_or(true);

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS").unwrap_or_default();

        let cloudinary = match (
            get("CLOUDINARY_CLOUD_NAME"),
            get("CLOUDINARY_API_KEY"),
            get("CLOUDINARY_API_SECRET"),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Some(CloudinaryConfig {
                cloud_name,
                api_key,
                api_secret,
            }),
            (None, None, None) => None,
            _ => {
                return Err(AppError::config(
                    "CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY and CLOUDINARY_API_SECRET must be set together",
                ))
            }
        };

        let upload_timeout = get("IMAGE_UPLOAD_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_UPLOAD_TIMEOUT_SECS);

        let bootstrap = match (
            get("BOOTSTRAP_ADMIN_EMAIL"),
            get("BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Some(admin_email), Some(admin_password)) => Some(BootstrapConfig {
                institute_name: get("BOOTSTRAP_INSTITUTE_NAME")
                    .unwrap_or_else(|| "Default Institute".to_string()),
                admin_name: get("BOOTSTRAP_ADMIN_NAME")
                    .unwrap_or_else(|| "Administrator".to_string()),
                admin_email,
                admin_password,
            }),
            _ => None,
        };

        Ok(Self {
            database_url,
            security,
            host,
            port,
            auto_migrate,
            cors_allowed_origins,
            cloudinary,
            upload_timeout: StdDuration::from_secs(upload_timeout),
            bootstrap,
        })
    }
}

fn parse_bool(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Parse a duration in the `ParseDuration` format used by Go services: an
/// optionally signed sequence of decimal numbers, each with a unit suffix,
/// such as `1h`, `1.5h`, `500ms` or `2h45m0.5s`. Units are `ns`, `us` (or
/// `µs`), `ms`, `s`, `m` and `h`. The magnitude is capped at `i64::MAX`
/// nanoseconds, roughly 292 years.
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    let (negative, mut rest) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    if rest == "0" {
        return Some(Duration::ZERO);
    }
    if rest.is_empty() {
        return None;
    }

    let limit = i64::MAX as u128;
    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        let (int_digits, after_int) = rest.split_at(int_len);

        let (frac_digits, after_number) = match after_int.strip_prefix('.') {
            Some(tail) => {
                let frac_len = tail.find(|c: char| !c.is_ascii_digit()).unwrap_or(tail.len());
                tail.split_at(frac_len)
            }
            None => ("", after_int),
        };
        if int_digits.is_empty() && frac_digits.is_empty() {
            return None;
        }

        let unit_len = after_number
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after_number.len());
        let (unit, tail) = after_number.split_at(unit_len);
        let unit_nanos = match unit {
            "ns" => 1,
            "us" | "\u{b5}s" | "\u{3bc}s" => NANOS_PER_MICRO,
            "ms" => NANOS_PER_MILLI,
            "s" => NANOS_PER_SEC,
            "m" => 60 * NANOS_PER_SEC,
            "h" => 3600 * NANOS_PER_SEC,
            _ => return None,
        };

        let whole: u128 = if int_digits.is_empty() {
            0
        } else {
            int_digits.parse().ok()?
        };
        let mut nanos = whole.checked_mul(unit_nanos)?;
        if !frac_digits.is_empty() {
            // Precision past 18 fractional digits is dropped.
            let kept = &frac_digits[..frac_digits.len().min(18)];
            let numerator: u128 = kept.parse().ok()?;
            let scale = 10u128.pow(kept.len() as u32);
            nanos = nanos.checked_add(numerator * unit_nanos / scale)?;
        }

        total = total.checked_add(nanos)?;
        if total > limit {
            return None;
        }
        rest = tail;
    }

    let nanos = i64::try_from(total).ok()?;
    Some(Duration::nanoseconds(if negative { -nanos } else { nanos }))
}
