/// Password Hashing and Verification
///
/// One-way, salted hashing of user secrets with bcrypt.
///
/// bcrypt ignores input beyond 72 bytes, so secrets are truncated to
/// that bound before hashing. The same truncation is applied on both
/// the hash and verify paths; skipping it on either side would make
/// long passwords fail verification against their own digest. The
/// consequence is that two secrets sharing their first 72 bytes are
/// interchangeable.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::error::AppError;

const MAX_SECRET_BYTES: usize = 72;

fn truncate_secret(secret: &str) -> &[u8] {
    let bytes = secret.as_bytes();
    if bytes.len() > MAX_SECRET_BYTES {
        &bytes[..MAX_SECRET_BYTES]
    } else {
        bytes
    }
}

/// Hash a password using bcrypt
///
/// # Errors
/// Returns error if bcrypt hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(truncate_secret(password), DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against its stored digest
///
/// A digest that cannot be parsed verifies as `false` rather than
/// erroring, so callers cannot leak digest format information.
pub fn verify_password(password: &str, digest: &str) -> bool {
    verify(truncate_secret(password), digest).unwrap_or_else(|e| {
        tracing::warn!("Rejecting password against undecodable digest: {}", e);
        false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password() {
        let password = "correct horse battery staple";
        let digest = hash_password(password).expect("Failed to hash password");

        assert_ne!(password, digest);
        assert!(digest.starts_with("$2"));
    }

    #[test]
    fn test_verify_password() {
        let password = "correct horse battery staple";
        let digest = hash_password(password).expect("Failed to hash password");

        assert!(verify_password(password, &digest));
    }

    #[test]
    fn test_verify_wrong_password() {
        let digest = hash_password("correct horse battery staple").expect("Failed to hash password");

        assert!(!verify_password("wrong horse battery staple", &digest));
    }

    #[test]
    fn test_verify_malformed_digest_returns_false() {
        assert!(!verify_password("any password", "not-a-bcrypt-digest"));
        assert!(!verify_password("any password", ""));
    }

    #[test]
    fn test_hashes_are_salted() {
        let password = "correct horse battery staple";
        let first = hash_password(password).expect("Failed to hash password");
        let second = hash_password(password).expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(verify_password(password, &first));
        assert!(verify_password(password, &second));
    }

    #[test]
    fn test_truncation_applies_to_both_paths() {
        // Secrets sharing their first 72 bytes collide past the bcrypt bound.
        let base = "x".repeat(72);
        let long_a = format!("{}alpha", base);
        let long_b = format!("{}bravo", base);

        let digest = hash_password(&long_a).expect("Failed to hash password");
        assert!(verify_password(&long_a, &digest));
        assert!(verify_password(&long_b, &digest));
        assert!(!verify_password(&base[..71], &digest));
    }
}
