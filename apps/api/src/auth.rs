//! Session authentication endpoints.
//!
//! The session only stores a [`switchboard_core::SessionIdentity`]; role,
//! status and grants are resolved again by the auth middleware on every
//! request.

mod bootstrap;
mod password;
mod session;

pub use bootstrap::bootstrap_handler;
pub use password::{login_handler, register_handler};
pub use session::{logout_handler, me_handler};

pub const SESSION_USER_KEY: &str = "admin_identity";
