//! Salted password hashing.
//!
//! Stored format: `blake3$<salt_hex>$<hash_hex>` where the hash is
//! BLAKE3(salt || password). Verification recomputes the hash and compares
//! via `blake3::Hash` equality, which is constant-time.

use rand::RngCore;

use crate::AppError;

const SALT_LEN: usize = 16;
const SCHEME: &str = "blake3";

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    encode_hash(&salt, password)
}

/// Verify a password against a stored `blake3$salt$hash` string.
///
/// Returns false for malformed stored values rather than erroring; a
/// credentials row written by a federated-only signup has no password at
/// all and is handled before this call.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(3, '$');
    let (Some(scheme), Some(salt_hex), Some(hash_hex)) =
        (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    if scheme != SCHEME {
        return false;
    }

    let Some(salt) = decode_hex(salt_hex) else {
        return false;
    };
    let Ok(expected) = blake3::Hash::from_hex(hash_hex) else {
        return false;
    };

    digest(&salt, password) == expected
}

/// Validate password strength at registration time.
pub fn check_password_strength(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::bad_request(
            crate::errors::ErrorCode::InvalidPassword,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    Ok(())
}

fn digest(salt: &[u8], password: &str) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize()
}

fn encode_hash(salt: &[u8], password: &str) -> String {
    let hash = digest(salt, password);
    format!("{SCHEME}${}${}", hex(salt), hash.to_hex())
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn decode_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{check_password_strength, hash_password, verify_password};

    #[test]
    fn roundtrip_verifies() {
        let stored = hash_password("correct horse battery staple");
        assert!(verify_password("correct horse battery staple", &stored));
    }

    #[test]
    fn wrong_password_fails() {
        let stored = hash_password("correct horse battery staple");
        assert!(!verify_password("Tr0ub4dor&3", &stored));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let a = hash_password("same password");
        let b = hash_password("same password");
        assert_ne!(a, b);
        assert!(verify_password("same password", &a));
        assert!(verify_password("same password", &b));
    }

    #[test]
    fn malformed_stored_value_fails_closed() {
        assert!(!verify_password("pw", ""));
        assert!(!verify_password("pw", "blake3$zz$zz"));
        assert!(!verify_password("pw", "argon2$aa$bb"));
    }

    #[test]
    fn short_passwords_rejected() {
        assert!(check_password_strength("short").is_err());
        assert!(check_password_strength("long enough").is_ok());
    }
}
