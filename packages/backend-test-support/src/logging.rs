//! Test subscriber shared by unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Directive used when neither `TEST_LOG` nor `RUST_LOG` is set. Request
/// events and rejected logins log at `warn`, so they stay visible.
pub const DEFAULT_TEST_FILTER: &str = "warn,sqlx=error,sea_orm=error";

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|directive| !directive.trim().is_empty())
}

fn filter_from(test_log: Option<String>, rust_log: Option<String>) -> EnvFilter {
    non_blank(test_log)
        .or_else(|| non_blank(rust_log))
        .map(EnvFilter::new)
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_TEST_FILTER))
}

/// Install the test subscriber once per process. `TEST_LOG` wins over
/// `RUST_LOG`. Later calls, or a subscriber installed elsewhere, are no-ops.
pub fn init() {
    INSTALLED.get_or_init(|| {
        let filter = filter_from(std::env::var("TEST_LOG").ok(), std::env::var("RUST_LOG").ok());

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .with_target(false)
            .try_init()
            .ok();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_takes_precedence() {
        let filter = filter_from(Some("debug".into()), Some("error".into()));
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn blank_values_fall_back_to_default() {
        let filter = filter_from(Some("  ".into()), None);
        assert_eq!(filter.to_string(), EnvFilter::new(DEFAULT_TEST_FILTER).to_string());

        let filter = filter_from(Some(String::new()), Some("info".into()));
        assert_eq!(filter.to_string(), "info");
    }
}
