//! Proof Key for Code Exchange (RFC 7636, S256) and the CSRF state nonce.

use base64::Engine as _;
use sha2::{Digest, Sha256};

use crate::error::AuthError;

#[derive(Debug, Clone)]
pub struct PkcePair {
    pub verifier: String,
    pub challenge: String,
}

impl PkcePair {
    /// Fresh 32-byte verifier and its S256 challenge.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::BrowserFlowFailed` if the OS RNG is unavailable.
    pub fn generate() -> Result<Self, AuthError> {
        let mut bytes = [0u8; 32];
        getrandom::fill(&mut bytes).map_err(|e| {
            AuthError::BrowserFlowFailed(format!("failed to generate PKCE verifier: {e}"))
        })?;
        Ok(Self::from_verifier(
            base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes),
        ))
    }

    #[must_use]
    pub fn from_verifier(verifier: String) -> Self {
        let digest = Sha256::digest(verifier.as_bytes());
        let challenge = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest);
        Self {
            verifier,
            challenge,
        }
    }
}

/// Random 16-byte hex `state` value.
///
/// # Errors
///
/// Returns `AuthError::BrowserFlowFailed` if the OS RNG is unavailable.
pub fn random_state() -> Result<String, AuthError> {
    let mut nonce_bytes = [0u8; 16];
    getrandom::fill(&mut nonce_bytes)
        .map_err(|e| AuthError::BrowserFlowFailed(format!("failed to generate CSRF nonce: {e}")))?;
    Ok(nonce_bytes.iter().map(|b| format!("{b:02x}")).collect())
}
