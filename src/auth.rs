//! Admin authentication.
//!
//! The register distinguishes only "authenticated admin" from "public".
//! Admins present a shared bearer token; only its SHA-256 digest is kept
//! in memory and comparisons run in constant time.

use subtle::ConstantTimeEq;

/// Hash a bearer token string using SHA-256.
pub fn hash_token(token: &str) -> [u8; 32] {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().into()
}

/// Generate a random bearer token (URL-safe base64, 32 bytes of entropy).
pub fn generate_token() -> String {
    use base64::Engine;
    let bytes: [u8; 32] = rand::random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Yes/no authentication check for admin operations.
#[derive(Clone)]
pub struct AdminAuth {
    token_hash: [u8; 32],
}

impl AdminAuth {
    pub fn new(token: &str) -> Self {
        Self {
            token_hash: hash_token(token),
        }
    }

    /// Whether `token` is the configured admin token.
    pub fn is_authenticated(&self, token: &str) -> bool {
        let candidate = hash_token(token);
        candidate[..].ct_eq(&self.token_hash[..]).into()
    }
}

impl std::fmt::Debug for AdminAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAuth").finish_non_exhaustive()
    }
}
