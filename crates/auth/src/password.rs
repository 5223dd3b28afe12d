use crate::HashError;
use argon2::Argon2;
use argon2::PasswordHash;
use argon2::PasswordHasher;
use argon2::PasswordVerifier;
use argon2::password_hash::SaltString;

/// Capability seam for password hashing and verification.
pub trait CredentialVerifier {
    /// Derives a self-contained hash string: algorithm, parameters, fresh
    /// salt, and digest all embedded. The same password never hashes the
    /// same way twice.
    fn hash(&self, password: &str) -> Result<String, HashError>;
    /// Checks `password` against a stored hash string. Mismatches and
    /// malformed hash strings both come back `false`; this never panics.
    fn verify(&self, password: &str, hashword: &str) -> bool;
}

/// Argon2id with the crate's default parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2id;

fn salt() -> SaltString {
    use rand::Rng;
    let ref mut bytes = [0u8; 16];
    rand::rng().fill(bytes);
    SaltString::encode_b64(bytes).expect("salt")
}

impl CredentialVerifier for Argon2id {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        Argon2::default()
            .hash_password(password.as_bytes(), &salt())
            .map(|hash| hash.to_string())
            .map_err(|_| HashError)
    }

    fn verify(&self, password: &str, hashword: &str) -> bool {
        PasswordHash::new(hashword)
            .ok()
            .as_ref()
            .map(|hash| {
                Argon2::default()
                    .verify_password(password.as_bytes(), hash)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_not_plaintext() {
        let hashword = Argon2id.hash("hunter2").unwrap();
        assert_ne!(hashword, "hunter2");
        assert!(hashword.starts_with("$argon2"));
    }

    #[test]
    fn correct_password_verifies() {
        let hashword = Argon2id.hash("hunter2").unwrap();
        assert!(Argon2id.verify("hunter2", &hashword));
    }

    #[test]
    fn wrong_password_rejected() {
        let hashword = Argon2id.hash("hunter2").unwrap();
        assert!(!Argon2id.verify("hunter3", &hashword));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let one = Argon2id.hash("hunter2").unwrap();
        let two = Argon2id.hash("hunter2").unwrap();
        assert_ne!(one, two);
        assert!(Argon2id.verify("hunter2", &one));
        assert!(Argon2id.verify("hunter2", &two));
    }

    #[test]
    fn malformed_hashword_rejected() {
        assert!(!Argon2id.verify("hunter2", ""));
        assert!(!Argon2id.verify("hunter2", "not-a-phc-string"));
        assert!(!Argon2id.verify("hunter2", "$argon2id$truncated"));
    }
}
