//! Microsoft Entra ID public-client session.
//!
//! Silent acquisition redeems the cached refresh token at the v2.0 token
//! endpoint. Interactive acquisition runs the authorization-code flow with
//! PKCE through a loopback redirect. The account record (identity plus
//! refresh token) lives in its own credential slot, separate from the bearer
//! token the pipeline reads.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use vin_core::responses::RemoteAuthConfig;

use crate::browser_flow::{self, LoopbackListener};
use crate::claims::IdTokenClaims;
use crate::error::AuthError;
use crate::pkce::{self, PkcePair};
use crate::session::{Account, IdentitySession, SessionFactory, TokenResult};
use crate::token_store::CredentialStore;

/// Credential slot holding the serialized [`CachedAccount`].
pub const ACCOUNT_SLOT: &str = "account";

pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// Token endpoint `error` codes that mean the user has to sign in again.
const INTERACTION_ERRORS: [&str; 4] = [
    "invalid_grant",
    "interaction_required",
    "login_required",
    "consent_required",
];

/// Knobs for building sessions; tenant and client ids come from `/config`.
#[derive(Debug, Clone)]
pub struct EntraOptions {
    pub authority_host: String,
    pub redirect_port: u16,
    pub login_timeout: Duration,
    pub http_timeout: Duration,
}

impl Default for EntraOptions {
    fn default() -> Self {
        Self {
            authority_host: DEFAULT_AUTHORITY_HOST.to_string(),
            redirect_port: 0,
            login_timeout: Duration::from_secs(120),
            http_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedAccount {
    #[serde(flatten)]
    pub account: Account,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    id_token: Option<String>,
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct TokenErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

impl TokenErrorBody {
    fn summary(&self) -> String {
        match &self.error_description {
            Some(description) => format!("{}: {}", self.error, description.trim()),
            None => self.error.clone(),
        }
    }
}

pub struct EntraSession {
    http: reqwest::Client,
    authority: String,
    client_id: String,
    options: EntraOptions,
    store: Arc<CredentialStore>,
}

impl EntraSession {
    /// # Errors
    ///
    /// Returns `AuthError::Other` if the HTTP client cannot be built.
    pub fn new(
        authority: &str,
        client_id: &str,
        options: EntraOptions,
        store: Arc<CredentialStore>,
    ) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("vinventory-cli/", env!("CARGO_PKG_VERSION")))
            .timeout(options.http_timeout)
            .build()
            .map_err(|e| AuthError::Other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            authority: authority.trim_end_matches('/').to_string(),
            client_id: client_id.to_string(),
            options,
            store,
        })
    }

    #[must_use]
    pub fn authority(&self) -> &str {
        &self.authority
    }

    fn token_endpoint(&self) -> String {
        format!("{}/oauth2/v2.0/token", self.authority)
    }

    /// Authorize URL for the code flow.
    #[must_use]
    pub fn authorize_url(
        &self,
        redirect_uri: &str,
        scopes: &[String],
        state: &str,
        code_challenge: &str,
    ) -> String {
        format!(
            "{}/oauth2/v2.0/authorize?client_id={}&response_type=code&redirect_uri={}\
             &response_mode=query&scope={}&state={}&code_challenge={}&code_challenge_method=S256",
            self.authority,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(redirect_uri),
            urlencoding::encode(&scopes.join(" ")),
            urlencoding::encode(state),
            urlencoding::encode(code_challenge),
        )
    }

    /// Account record from the credential store.
    #[must_use]
    pub fn load_cached(&self) -> Option<CachedAccount> {
        let raw = self.store.load_slot(ACCOUNT_SLOT)?;
        match serde_json::from_str(&raw) {
            Ok(cached) => Some(cached),
            Err(error) => {
                tracing::warn!(%error, "ignoring unreadable cached account");
                None
            }
        }
    }

    fn save_cached(&self, cached: &CachedAccount) -> Result<(), AuthError> {
        let raw = serde_json::to_string(cached)
            .map_err(|e| AuthError::TokenStoreError(format!("serialize account: {e}")))?;
        self.store.store_slot(ACCOUNT_SLOT, &raw)
    }

    /// Drop the cached account so the next refresh needs a login.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the slot cannot be removed.
    pub fn forget(&self) -> Result<(), AuthError> {
        self.store.delete_slot(ACCOUNT_SLOT)
    }

    async fn post_token(
        &self,
        params: &[(&str, &str)],
    ) -> Result<Result<TokenResponse, TokenErrorBody>, reqwest::Error> {
        let response = self
            .http
            .post(self.token_endpoint())
            .form(params)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if status.is_success() {
            return Ok(serde_json::from_str(&text).map_err(|e| TokenErrorBody {
                error: "invalid_response".into(),
                error_description: Some(e.to_string()),
            }));
        }
        let error = serde_json::from_str::<TokenErrorBody>(&text).unwrap_or_else(|_| TokenErrorBody {
            error: format!("http_{}", status.as_u16()),
            error_description: Some(text.chars().take(200).collect()),
        });
        Ok(Err(error))
    }

    /// Cache the account derived from the id token and build the result.
    fn remember(
        &self,
        response: TokenResponse,
        previous_refresh: Option<String>,
    ) -> Result<TokenResult, AuthError> {
        let id_token = response
            .id_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::TokenEndpoint("response carried no id_token".into()))?;
        let claims = IdTokenClaims::decode(&id_token)?;
        let account = claims.to_account();

        let cached = CachedAccount {
            account: account.clone(),
            refresh_token: response.refresh_token.or(previous_refresh),
        };
        if let Err(error) = self.save_cached(&cached) {
            tracing::warn!(%error, "failed to cache account");
        }

        let expires_at = response
            .expires_in
            .map(|secs| Utc::now() + chrono::TimeDelta::seconds(secs));
        Ok(TokenResult {
            id_token,
            access_token: response.access_token,
            expires_at: expires_at.or(Some(claims.expires_at)),
            account,
        })
    }
}

#[async_trait]
impl IdentitySession for EntraSession {
    async fn cached_account(&self) -> Option<Account> {
        self.load_cached().map(|cached| cached.account)
    }

    async fn acquire_token_silently(
        &self,
        account: &Account,
        scopes: &[String],
    ) -> Result<TokenResult, AuthError> {
        let Some(cached) = self.load_cached() else {
            return Err(AuthError::InteractionRequired("no cached account".into()));
        };
        if cached.account.home_account_id != account.home_account_id {
            return Err(AuthError::InteractionRequired(format!(
                "account {} is not cached",
                account.username
            )));
        }
        let Some(refresh_token) = cached.refresh_token else {
            return Err(AuthError::InteractionRequired(
                "cached account has no refresh token".into(),
            ));
        };

        let scope = scopes.join(" ");
        let outcome = self
            .post_token(&[
                ("client_id", self.client_id.as_str()),
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.as_str()),
                ("scope", scope.as_str()),
            ])
            .await
            .map_err(|e| AuthError::SilentAcquisitionFailed(e.to_string()))?;

        match outcome {
            Ok(response) => {
                tracing::debug!(account = %account.username, "silent token refresh succeeded");
                self.remember(response, Some(refresh_token))
            }
            Err(body) if INTERACTION_ERRORS.contains(&body.error.as_str()) => {
                Err(AuthError::InteractionRequired(body.summary()))
            }
            Err(body) => Err(AuthError::SilentAcquisitionFailed(body.summary())),
        }
    }

    async fn acquire_token_interactively(
        &self,
        scopes: &[String],
    ) -> Result<TokenResult, AuthError> {
        let listener = LoopbackListener::bind(self.options.redirect_port)?;
        let redirect_uri = listener.redirect_uri().to_string();
        let pkce = PkcePair::generate()?;
        let state = pkce::random_state()?;

        browser_flow::open_browser(&self.authorize_url(
            &redirect_uri,
            scopes,
            &state,
            &pkce.challenge,
        ));
        let code = listener
            .wait_for_code(state, self.options.login_timeout)
            .await?;

        let scope = scopes.join(" ");
        let outcome = self
            .post_token(&[
                ("client_id", self.client_id.as_str()),
                ("grant_type", "authorization_code"),
                ("code", code.as_str()),
                ("redirect_uri", redirect_uri.as_str()),
                ("code_verifier", pkce.verifier.as_str()),
                ("scope", scope.as_str()),
            ])
            .await
            .map_err(|e| AuthError::TokenEndpoint(e.to_string()))?;

        let response = outcome.map_err(|body| AuthError::TokenEndpoint(body.summary()))?;
        self.remember(response, None)
    }
}

/// Builds [`EntraSession`]s from the API's tenant/client configuration.
pub struct EntraSessionFactory {
    options: EntraOptions,
    store: Arc<CredentialStore>,
}

impl EntraSessionFactory {
    #[must_use]
    pub const fn new(options: EntraOptions, store: Arc<CredentialStore>) -> Self {
        Self { options, store }
    }

    /// Build a concrete session, for callers that need [`EntraSession::forget`].
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Other` if the configuration lacks a tenant or client id.
    pub fn build(&self, config: &RemoteAuthConfig) -> Result<EntraSession, AuthError> {
        if !config.is_configured() {
            return Err(AuthError::Other(
                "remote auth config is missing the tenant or client id".into(),
            ));
        }
        let authority = format!(
            "{}/{}",
            self.options.authority_host.trim_end_matches('/'),
            config.tenant_id
        );
        EntraSession::new(
            &authority,
            &config.client_id,
            self.options.clone(),
            Arc::clone(&self.store),
        )
    }
}

#[async_trait]
impl SessionFactory for EntraSessionFactory {
    async fn create(
        &self,
        config: &RemoteAuthConfig,
    ) -> Result<Arc<dyn IdentitySession>, AuthError> {
        let session = self.build(config)?;
        tracing::debug!(authority = session.authority(), "identity session created");
        Ok(Arc::new(session))
    }
}
