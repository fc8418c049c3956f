//! The identity capability the request pipeline depends on.
//!
//! The pipeline never talks to an identity provider directly. It asks a
//! [`SessionFactory`] for a session once the remote tenant/client
//! configuration is known, then drives refreshes through [`IdentitySession`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vin_core::responses::RemoteAuthConfig;

use crate::error::AuthError;

/// A signed-in account known to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// `<oid>.<tid>`.
    pub home_account_id: String,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Account {
    /// Object id half of the home account id; the API's user id.
    #[must_use]
    pub fn object_id(&self) -> &str {
        self.home_account_id
            .split_once('.')
            .map_or(self.home_account_id.as_str(), |(oid, _)| oid)
    }
}

/// Tokens returned by a successful acquisition.
#[derive(Debug, Clone)]
pub struct TokenResult {
    /// Bearer token the API expects.
    pub id_token: String,
    pub access_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub account: Account,
}

#[async_trait]
pub trait IdentitySession: Send + Sync {
    /// The account a silent refresh can be attempted for, if any.
    async fn cached_account(&self) -> Option<Account>;

    /// Refresh without user interaction.
    ///
    /// # Errors
    ///
    /// `AuthError::InteractionRequired` when the user must sign in again;
    /// any other variant is a plain failure.
    async fn acquire_token_silently(
        &self,
        account: &Account,
        scopes: &[String],
    ) -> Result<TokenResult, AuthError>;

    /// Run the interactive sign-in flow.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the flow is abandoned, times out, or the code
    /// exchange fails.
    async fn acquire_token_interactively(&self, scopes: &[String])
    -> Result<TokenResult, AuthError>;
}

/// Builds a session from the API's `/config` response.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    /// # Errors
    ///
    /// Returns `AuthError` if the configuration is incomplete or the session
    /// cannot be constructed.
    async fn create(
        &self,
        config: &RemoteAuthConfig,
    ) -> Result<Arc<dyn IdentitySession>, AuthError>;
}
