use quizbank_core::approval::policy::{DEFAULT_APPROVAL_QUORUM, DEFAULT_DENIAL_QUORUM};
use quizbank_core::approval::QuorumPolicy;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration.
    pub jwt: JwtConfig,
    /// Vote thresholds for the approval workflow.
    pub quorum: QuorumPolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `APPROVAL_QUORUM`      | `2`                        |
    /// | `DENIAL_QUORUM`        | `2`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let quorum = parse_quorum(
            std::env::var("APPROVAL_QUORUM").ok().as_deref(),
            std::env::var("DENIAL_QUORUM").ok().as_deref(),
        )
        .unwrap_or_else(|e| panic!("Invalid quorum configuration: {e}"));

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            quorum,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Build a [`QuorumPolicy`] from optional raw env values.
fn parse_quorum(approval: Option<&str>, denial: Option<&str>) -> Result<QuorumPolicy, String> {
    fn parse(name: &str, raw: Option<&str>, default: u32) -> Result<u32, String> {
        match raw {
            None => Ok(default),
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| format!("{name} must be a positive integer, got '{raw}'")),
        }
    }

    let approval = parse("APPROVAL_QUORUM", approval, DEFAULT_APPROVAL_QUORUM)?;
    let denial = parse("DENIAL_QUORUM", denial, DEFAULT_DENIAL_QUORUM)?;
    QuorumPolicy::new(approval, denial).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quorum_defaults_to_two_and_two() {
        let policy = parse_quorum(None, None).unwrap();
        assert_eq!(policy.approval_quorum(), 2);
        assert_eq!(policy.denial_quorum(), 2);
    }

    #[test]
    fn quorum_overrides() {
        let policy = parse_quorum(Some("1"), Some(" 3 ")).unwrap();
        assert_eq!(policy.approval_quorum(), 1);
        assert_eq!(policy.denial_quorum(), 3);
    }

    #[test]
    fn quorum_rejects_zero_and_garbage() {
        assert!(parse_quorum(Some("0"), None).is_err());
        assert!(parse_quorum(None, Some("two")).is_err());
    }

    #[test]
    fn origins_are_trimmed_and_filtered() {
        assert_eq!(
            parse_origins("http://a.test, http://b.test,,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }
}
