use std::time::Duration;

/// Process configuration, read from the environment exactly once at
/// startup and handed down by value. Nothing below the binary touches
/// env vars.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub debug: bool,
    pub session_ttl: Duration,
    /// Reserved for token signing; nothing consumes it yet.
    pub secret_key: String,
}

fn truthy(v: &str) -> bool {
    v == "1" || v.eq_ignore_ascii_case("true")
}

fn seconds(v: &str) -> u64 {
    v.parse().expect("SESSION_MAX_AGE_SECONDS must be an integer")
}

impl Config {
    /// `DATABASE_URL` is required and `SESSION_MAX_AGE_SECONDS`, when
    /// set, must parse as whole seconds; everything else has a default.
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".to_string()),
            debug: std::env::var("DEBUG").as_deref().map(truthy).unwrap_or(false),
            session_ttl: Duration::from_secs(
                std::env::var("SESSION_MAX_AGE_SECONDS")
                    .as_deref()
                    .map(seconds)
                    .unwrap_or(3600),
            ),
            secret_key: std::env::var("SECRET_KEY").unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_forms() {
        assert!(truthy("1"));
        assert!(truthy("true"));
        assert!(truthy("True"));
        assert!(!truthy("0"));
        assert!(!truthy("false"));
        assert!(!truthy(""));
    }

    #[test]
    fn ttl_parses_integers() {
        assert_eq!(seconds("3600"), 3600);
        assert_eq!(seconds("1"), 1);
    }

    #[test]
    #[should_panic(expected = "SESSION_MAX_AGE_SECONDS")]
    fn ttl_rejects_garbage() {
        seconds("one hour");
    }
}
