use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::config::PasswordScheme;
use crate::error::{AppError, AppResult};

const ARGON2_PREFIX: &str = "$argon2";

pub fn hash_password(plain: &str, scheme: PasswordScheme) -> AppResult<String> {
    match scheme {
        PasswordScheme::Argon2 => argon2_hash(plain),
        PasswordScheme::Legacy => Ok(legacy_digest(plain)),
    }
}

/// Checks `plain` against a stored digest of either scheme.
pub fn verify_password(plain: &str, digest: &str) -> AppResult<bool> {
    if !digest.starts_with(ARGON2_PREFIX) {
        return Ok(legacy_digest(plain) == digest);
    }
    let parsed = PasswordHash::new(digest).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        AppError::PasswordHash(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

fn argon2_hash(plain: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            AppError::PasswordHash(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// 32-bit rolling hash over UTF-16 code units (`h = h * 31 + c`, wrapping),
/// rendered in decimal. Trivially collidable; only here so digests written
/// by the browser version still verify.
pub fn legacy_digest(plain: &str) -> String {
    plain
        .encode_utf16()
        .fold(0i32, |h, c| {
            h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(c))
        })
        .to_string()
}
