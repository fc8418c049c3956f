//! # vin-client
//!
//! Typed client for the Vinventory REST API.
//!
//! Requests go through the authenticated [`pipeline`]; the per-resource
//! modules add typed wrappers for every endpoint plus the multi-call views
//! the inventory screens are built from (components with assignees, history
//! with users, user history with serial numbers).

mod components;
mod error;
mod history;
pub mod http;
pub mod pipeline;
mod request;
mod types;
mod users;

pub use error::ClientError;
pub use pipeline::{Pipeline, RefreshOutcome};
pub use request::{ApiRequest, FilePart, RequestBody};

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use vin_auth::{IdTokenClaims, IdentitySession, SessionFactory, TokenStore};
use vin_core::responses::RemoteAuthConfig;

/// Connection settings for [`VinClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub timeout: Duration,
    /// Scopes requested on silent and interactive acquisition.
    pub scopes: Vec<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api/v1".to_string(),
            timeout: Duration::from_secs(30),
            scopes: vec![
                "openid".into(),
                "profile".into(),
                "email".into(),
                "offline_access".into(),
                "user.read".into(),
                "User.ReadBasic.All".into(),
            ],
        }
    }
}

pub struct VinClient {
    pipeline: Pipeline,
}

impl VinClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(
        options: ClientOptions,
        tokens: Arc<dyn TokenStore>,
        sessions: Arc<dyn SessionFactory>,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("vinventory-cli/", env!("CARGO_PKG_VERSION")))
            .timeout(options.timeout)
            .build()?;
        Ok(Self {
            pipeline: Pipeline::new(http, &options.base_url, options.scopes, tokens, sessions),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.pipeline.base_url()
    }

    #[must_use]
    pub fn scopes(&self) -> &[String] {
        self.pipeline.scopes()
    }

    #[must_use]
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        self.pipeline.tokens()
    }

    /// Lazily created identity session (see [`Pipeline::session`]).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if `/config` cannot be fetched or the session
    /// cannot be built.
    pub async fn session(&self) -> Result<Arc<dyn IdentitySession>, ClientError> {
        self.pipeline.session().await
    }

    /// `GET /config`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport, status or parse failure.
    pub async fn remote_config(&self) -> Result<RemoteAuthConfig, ClientError> {
        self.pipeline.remote_config().await
    }

    /// Object id of the signed-in user, read from the stored token.
    #[must_use]
    pub fn current_user_id(&self) -> Option<String> {
        vin_auth::current_claims(self.tokens().as_ref()).map(|c: IdTokenClaims| c.object_id)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        what: &str,
    ) -> Result<T, ClientError> {
        let response = self.pipeline.execute(request).await?;
        http::decode(response, what).await
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        what: &str,
    ) -> Result<Vec<T>, ClientError> {
        let response = self.pipeline.execute(request).await?;
        http::decode_list(response, what).await
    }

    async fn fetch_unit(&self, request: ApiRequest) -> Result<(), ClientError> {
        self.pipeline.execute(request).await.map(drop)
    }
}
