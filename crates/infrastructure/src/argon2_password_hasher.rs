//! Argon2id hashing for staff passwords.
//!
//! Default cost is m=19456 KiB, t=2, p=1 (OWASP Password Storage cheat sheet).
//! Stored hashes are PHC strings, so verification reads the cost back from
//! the hash and keeps working after the defaults change.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use switchboard_application::PasswordHasher as PasswordHasherPort;
use switchboard_core::{AppError, AppResult};

const MEMORY_COST_KIB: u32 = 19_456;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;

/// Argon2id implementation of the password hashing port.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Creates a hasher with the default cost.
    #[must_use]
    pub fn new() -> Self {
        Self::with_cost(MEMORY_COST_KIB, TIME_COST).unwrap_or_else(|_| Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default()),
        })
    }

    /// Creates a hasher with an explicit memory and time cost.
    pub fn with_cost(memory_cost_kib: u32, time_cost: u32) -> AppResult<Self> {
        let params = Params::new(memory_cost_kib, time_cost, PARALLELISM, None)
            .map_err(|error| AppError::Validation(format!("invalid argon2 cost: {error}")))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasherPort for Argon2PasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|error| AppError::Internal(format!("failed to hash staff password: {error}")))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        let stored = PasswordHash::new(hash).map_err(|error| {
            AppError::Internal(format!("stored staff password hash is malformed: {error}"))
        })?;

        match self.argon2.verify_password(password.as_bytes(), &stored) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(error) => Err(AppError::Internal(format!(
                "staff password verification failed: {error}"
            ))),
        }
    }
}
