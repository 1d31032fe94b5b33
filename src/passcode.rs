//! One-time order passcodes: generation and argon2 hashing.

use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use rand::Rng;

use crate::error::{AppError, AppResult};

pub const PASSCODE_LEN: usize = 5;

const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890";

/// Random passcode drawn uniformly from the 62 alphanumeric symbols.
pub fn generate(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

pub fn hash(passcode: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(passcode.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Returns `false` for a mismatch and for a stored hash that does not parse.
pub fn verify(passcode: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::warn!(error = %err, "stored passcode hash is malformed");
            return false;
        }
    };
    Argon2::default()
        .verify_password(passcode.as_bytes(), &parsed)
        .is_ok()
}

/// Hash on the blocking pool; argon2 is deliberately slow.
pub async fn hash_blocking(passcode: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hash(&passcode))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub async fn verify_blocking(passcode: String, hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || verify(&passcode, &hash))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_passcode_uses_charset() {
        let code = generate(PASSCODE_LEN);
        assert_eq!(code.len(), PASSCODE_LEN);
        assert!(code.bytes().all(|b| b.is_ascii_alphanumeric()));
    }

    #[test]
    fn charset_has_62_distinct_symbols() {
        let mut symbols = CHARSET.to_vec();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), 62);
    }

    #[test]
    fn generated_passcodes_vary() {
        let codes: std::collections::HashSet<String> =
            (0..50).map(|_| generate(PASSCODE_LEN)).collect();
        assert!(codes.len() > 1);
    }

    #[test]
    fn hash_verifies_only_the_original() {
        let hashed = hash("aB3xZ").unwrap();
        assert_ne!(hashed, "aB3xZ");
        assert!(verify("aB3xZ", &hashed));
        assert!(!verify("aB3xz", &hashed));
        assert!(!verify("", &hashed));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify("aB3xZ", "not-a-phc-string"));
    }

    #[tokio::test]
    async fn blocking_helpers_round_trip() {
        let hashed = hash_blocking("Q1w2E".into()).await.unwrap();
        assert!(verify_blocking("Q1w2E".into(), hashed.clone()).await.unwrap());
        assert!(!verify_blocking("nope0".into(), hashed).await.unwrap());
    }
}
