use std::env;
use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "info";

/// `RUST_LOG` wins when set; otherwise `LOG_LEVEL` applies to this crate
/// and dependencies stay at `warn`.
fn build_filter(rust_log: Option<String>, log_level: Option<String>) -> EnvFilter {
    if let Some(directives) = rust_log.filter(|value| !value.trim().is_empty()) {
        return EnvFilter::new(directives);
    }
    let level = log_level
        .map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string());
    EnvFilter::new(format!("warn,homework_bot={}", level))
}

pub fn init_logging() {
    let filter = build_filter(env::var("RUST_LOG").ok(), env::var("LOG_LEVEL").ok());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stdout)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_scopes_to_crate() {
        let filter = build_filter(None, Some("DEBUG".to_string())).to_string();
        assert!(filter.contains("homework_bot=debug"), "{}", filter);
        assert!(filter.contains("warn"), "{}", filter);
    }

    #[test]
    fn test_rust_log_takes_precedence() {
        let filter = build_filter(Some("reqwest=trace".to_string()), Some("debug".to_string()));
        assert_eq!(filter.to_string(), "reqwest=trace");
    }

    #[test]
    fn test_default_level() {
        let filter = build_filter(None, Some("  ".to_string())).to_string();
        assert!(filter.contains("homework_bot=info"), "{}", filter);
    }
}
