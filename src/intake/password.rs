//! Password hashing. Argon2id with default parameters and a fresh random
//! salt per call; only the PHC string ever leaves this module.

use anyhow::{anyhow, Result};
use argon2::{password_hash::SaltString, Argon2, PasswordHasher};
use rand::rngs::OsRng;
use secrecy::{ExposeSecret, SecretString};

/// Hash a raw password into a PHC-formatted Argon2id string.
pub fn hash(password: &SecretString) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map_err(|_| anyhow!("failed to hash password"))?
        .to_string();

    Ok(hash)
}
