// ============================
// crates/backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use scrypt::{
    errors::InvalidParams,
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Params, Scrypt,
};

use crate::error::{AppError, AppResult};

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// scrypt block size
const SCRYPT_R: u32 = 8;
/// scrypt parallelism
const SCRYPT_P: u32 = 1;
/// Derived key length in bytes
const HASH_LEN: usize = 32;

/// Lowest accepted scrypt cost (`log_n`)
pub const MIN_PASSWORD_COST: u8 = 1;
/// Highest accepted scrypt cost; 20 already needs 1 GiB per hash
pub const MAX_PASSWORD_COST: u8 = 20;

/// scrypt parameters for a cost (`log_n`) within
/// `MIN_PASSWORD_COST..=MAX_PASSWORD_COST`
pub fn scrypt_params(log_n: u8) -> Result<Params, InvalidParams> {
    if !(MIN_PASSWORD_COST..=MAX_PASSWORD_COST).contains(&log_n) {
        return Err(InvalidParams);
    }
    Params::new(log_n, SCRYPT_R, SCRYPT_P, HASH_LEN)
}

/// Hash a password using scrypt, returning a PHC string with a fresh salt
pub fn hash_password(plain: &str, log_n: u8) -> AppResult<String> {
    let params = scrypt_params(log_n).map_err(|e| AppError::PasswordHash(e.to_string()))?;
    let salt = SaltString::generate(&mut OsRng);
    let hash = Scrypt
        .hash_password_customized(plain.as_bytes(), None, None, params, &salt)?
        .to_string();
    Ok(hash)
}

/// Verify a password against a hash.
///
/// The cost is read back from the PHC string, so hashes made under an older
/// `password_cost` still verify.
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
}
