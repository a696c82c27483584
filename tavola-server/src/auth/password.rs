//! 密码哈希 (argon2)

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use std::sync::OnceLock;

/// Hash verified when the username does not exist, so unknown users cost the
/// same argon2 work as a wrong password.
static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a PHC string; malformed hashes never match
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Burn one verification against the dummy hash
pub fn verify_dummy(password: &str) {
    let dummy = DUMMY_HASH.get_or_init(|| hash_password(&uuid::Uuid::new_v4().to_string()).ok());
    if let Some(hash) = dummy {
        let _ = verify_password(password, hash);
    }
}
