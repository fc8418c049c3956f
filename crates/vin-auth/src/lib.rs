//! # vin-auth
//!
//! Identity for the Vinventory client.
//!
//! The request pipeline sees only the [`IdentitySession`] capability and a
//! [`TokenStore`]. [`entra`] supplies the Microsoft Entra ID implementation:
//! refresh-token redemption for silent acquisition and a loopback browser
//! login (`tiny_http` + `open`, PKCE) for interactive acquisition.

pub mod browser_flow;
pub mod claims;
pub mod entra;
pub mod error;
pub mod pkce;
pub mod session;
pub mod token_store;

pub use claims::IdTokenClaims;
pub use entra::{EntraOptions, EntraSession, EntraSessionFactory};
pub use error::AuthError;
pub use session::{Account, IdentitySession, SessionFactory, TokenResult};
pub use token_store::{CredentialStore, MemoryTokenStore, TokenSource, TokenStore};

/// Decode the claims of the stored token, if there is one.
///
/// Returns `None` when nothing is stored or the token is not a readable JWT.
#[must_use]
pub fn current_claims(store: &dyn TokenStore) -> Option<IdTokenClaims> {
    let token = store.load()?;
    match IdTokenClaims::decode(&token) {
        Ok(claims) => Some(claims),
        Err(error) => {
            tracing::debug!(%error, "stored token is not a decodable JWT");
            None
        }
    }
}

/// Clear the stored token and the cached account.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if a credential file cannot be removed.
pub fn logout(store: &CredentialStore) -> Result<(), AuthError> {
    store.delete()?;
    store.delete_slot(entra::ACCOUNT_SLOT)
}
