use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use switchboard_core::AppError;
use tracing_subscriber::EnvFilter;

const SESSION_SECRET_MIN_LENGTH: usize = 32;

/// Process configuration read from the environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub frontend_url: String,
    pub bootstrap_token: String,
    /// Signs the session cookie.
    pub session_secret: String,
    pub api_host: String,
    pub api_port: u16,
    pub cookie_secure: bool,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(env::args().nth(1).as_deref(), |name| env::var(name).ok())
    }

    fn from_lookup(
        command: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| AppError::Validation(format!("{name} is required")))
        };

        let database_url = required("DATABASE_URL")?;
        let bootstrap_token = required("AUTH_BOOTSTRAP_TOKEN")?;
        let session_secret = required("SESSION_SECRET")?;
        if session_secret.len() < SESSION_SECRET_MIN_LENGTH {
            return Err(AppError::Validation(format!(
                "SESSION_SECRET must be at least {SESSION_SECRET_MIN_LENGTH} characters"
            )));
        }

        let api_port = match lookup("API_PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|error| AppError::Validation(format!("invalid API_PORT: {error}")))?,
            None => 3001,
        };

        Ok(Self {
            migrate_only: command == Some("migrate"),
            database_url,
            frontend_url: lookup("FRONTEND_URL")
                .unwrap_or_else(|| "http://localhost:3000".to_owned()),
            bootstrap_token,
            session_secret,
            api_host: lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned()),
            api_port,
            cookie_secure: lookup("SESSION_COOKIE_SECURE")
                .is_some_and(|value| value.eq_ignore_ascii_case("true")),
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
