use sha2::{Digest, Sha512};
use sqlx::PgPool;
use switchboard_core::AppError;
use tower_sessions::cookie::time::Duration;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;

pub const SESSION_COOKIE_NAME: &str = "switchboard.sid";
const SESSION_IDLE_MINUTES: i64 = 30;

pub async fn build_postgres_session_layer(
    pool: PgPool,
    cookie_secure: bool,
    session_secret: &str,
) -> Result<SessionManagerLayer<PostgresStore, SignedCookie>, AppError> {
    let session_store = PostgresStore::new(pool)
        .with_table_name("tower_sessions")
        .map_err(|error| {
            AppError::Validation(format!("invalid session table name configuration: {error}"))
        })?;

    session_store.migrate().await.map_err(|error| {
        AppError::Internal(format!("failed to initialize session store: {error}"))
    })?;

    configure_session_layer(session_store, cookie_secure, session_secret)
}

/// Applies cookie settings and signing to a session store.
pub fn configure_session_layer<S: SessionStore>(
    session_store: S,
    cookie_secure: bool,
    session_secret: &str,
) -> Result<SessionManagerLayer<S, SignedCookie>, AppError> {
    Ok(SessionManagerLayer::new(session_store)
        .with_name(SESSION_COOKIE_NAME)
        .with_secure(cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(SESSION_IDLE_MINUTES)))
        .with_signed(session_signing_key(session_secret)?))
}

/// Stretches `SESSION_SECRET` to the 64-byte master key cookie signing needs.
pub fn session_signing_key(session_secret: &str) -> Result<Key, AppError> {
    let digest = Sha512::digest(session_secret.as_bytes());
    Key::try_from(digest.as_slice())
        .map_err(|error| AppError::Internal(format!("invalid session signing key: {error}")))
}
