mod database;
mod sessions;
mod state_builder;

pub use database::connect_and_migrate;
pub use sessions::build_postgres_session_layer;
#[cfg(test)]
pub use sessions::{SESSION_COOKIE_NAME, configure_session_layer, session_signing_key};
pub use state_builder::build_app_state;
