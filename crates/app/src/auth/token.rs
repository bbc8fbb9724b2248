//! API token generation and hashing.

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

/// Prefix identifying Souk API tokens.
pub const API_TOKEN_PREFIX: &str = "sk";

/// Number of random bytes behind each token.
pub const API_TOKEN_SECRET_BYTES: usize = 32;

/// Generate a fresh raw API token (`sk_<64 hex chars>`).
///
/// Only the SHA-256 hash is persisted; the raw token is shown to the
/// operator once and never recoverable afterwards.
#[must_use]
pub fn generate_api_token() -> String {
    let mut secret = [0_u8; API_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    let secret_hex: String = secret.iter().map(|byte| format!("{byte:02x}")).collect();

    format!("{API_TOKEN_PREFIX}_{secret_hex}")
}

/// Hash a raw token into its stored lookup key.
#[must_use]
pub fn hash_api_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
