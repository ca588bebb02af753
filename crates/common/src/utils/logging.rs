use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Default directives used when neither `RUST_LOG` nor a configured level is available.
pub const DEFAULT_DIRECTIVES: &str = "info,tower_http=info,axum=info,sqlx=warn";

/// Build the filter: `RUST_LOG` wins, otherwise `level` applies to our crates
/// while noisy dependencies keep their defaults.
pub fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.trim();
        if level.is_empty() {
            EnvFilter::new(DEFAULT_DIRECTIVES)
        } else {
            EnvFilter::new(format!("{level},tower_http=info,axum=info,sqlx=warn"))
        }
    })
}

/// Initialize tracing subscriber with sensible defaults and stdout writer.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info,tower_http=info,axum=info`
/// - Writes to stdout to improve visibility in environments that hide stderr
pub fn init_logging_default() {
    init_logging("info", false);
}

/// Initialize tracing from an explicit level and output format.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(level: &str, json: bool) {
    let env_filter = build_env_filter(level);
    let _ = if json {
        fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .with_writer(io::stdout)
            .try_init()
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .compact()
            .with_writer(io::stdout)
            .try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init_logging("debug", false);
        init_logging("info", true);
        tracing::info!(event = "logging_test", "still alive");
    }

    #[test]
    fn empty_level_uses_defaults() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let filter = build_env_filter("  ");
        assert!(filter.to_string().contains("tower_http=info"));
    }
}
