//! The authenticated request pipeline.
//!
//! Every API call goes through [`Pipeline::execute`]: the cached identity
//! token is attached as a bearer token and a first 401 triggers exactly one
//! silent refresh followed by one replay of the original request.
//!
//! ```text
//! unauthenticated ─(token found)→ sent ─401→ refreshing ─┬→ retried
//!                                                        ├→ interactive login
//!                                                        └→ failed
//! ```

use std::sync::Arc;

use tokio::sync::OnceCell;
use vin_auth::{IdentitySession, SessionFactory, TokenStore};
use vin_core::responses::RemoteAuthConfig;

use crate::error::ClientError;
use crate::http;
use crate::request::{ApiRequest, RequestBody};

/// Result of handling a 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new token was obtained; replay the request with it.
    Refreshed(String),
    /// The user was sent through interactive login; do not replay.
    InteractiveLogin,
    /// No refresh was possible.
    Failed,
}

pub struct Pipeline {
    http: reqwest::Client,
    base_url: String,
    scopes: Vec<String>,
    tokens: Arc<dyn TokenStore>,
    sessions: Arc<dyn SessionFactory>,
    session: OnceCell<Arc<dyn IdentitySession>>,
}

impl Pipeline {
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        scopes: Vec<String>,
        tokens: Arc<dyn TokenStore>,
        sessions: Arc<dyn SessionFactory>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            scopes,
            tokens,
            sessions,
            session: OnceCell::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Send `request` with the cached token, recovering once from a 401.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error of the last attempt. When a
    /// refresh is attempted but does not lead to a replay, the original 401
    /// is returned.
    pub async fn execute(&self, mut request: ApiRequest) -> Result<reqwest::Response, ClientError> {
        let token = self.tokens.load();
        if token.is_none() {
            tracing::warn!(path = %request.path, "no identity token cached; sending unauthenticated request");
        }

        let response = self.send(&request, token.as_deref()).await?;
        let error = match http::check_response(response).await {
            Ok(response) => return Ok(response),
            Err(error) => error,
        };

        if !error.is_unauthorized() || request.retried {
            tracing::warn!(
                method = %request.method,
                path = %request.path,
                retried = request.retried,
                %error,
                "request failed"
            );
            return Err(error);
        }

        request.retried = true;
        match self.refresh().await {
            RefreshOutcome::Refreshed(token) => {
                let response = self.send(&request, Some(&token)).await?;
                http::check_response(response).await.inspect_err(|error| {
                    tracing::warn!(
                        method = %request.method,
                        path = %request.path,
                        %error,
                        "request failed after token refresh"
                    );
                })
            }
            RefreshOutcome::InteractiveLogin | RefreshOutcome::Failed => Err(error),
        }
    }

    /// The identity session, created on first use from `GET /config`.
    ///
    /// Only a successful initialization is kept; after a failure the next
    /// call tries again.
    ///
    /// # Errors
    ///
    /// Returns the config fetch or session construction error.
    pub async fn session(&self) -> Result<Arc<dyn IdentitySession>, ClientError> {
        self.session
            .get_or_try_init(|| async {
                let config = self.remote_config().await?;
                tracing::debug!(tenant = %config.tenant_id, "initializing identity session");
                self.sessions
                    .create(&config)
                    .await
                    .map_err(ClientError::from)
            })
            .await
            .cloned()
    }

    /// `GET /config`, sent without credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, a non-success status, or
    /// an unreadable body.
    pub async fn remote_config(&self) -> Result<RemoteAuthConfig, ClientError> {
        let request = ApiRequest::get("/config");
        let response = self.send(&request, None).await?;
        let response = http::check_response(response).await?;
        http::decode(response, "remote config").await
    }

    /// Attempt silent acquisition for the cached account.
    pub async fn refresh(&self) -> RefreshOutcome {
        let session = match self.session().await {
            Ok(session) => session,
            Err(error) => {
                tracing::warn!(%error, "identity session unavailable; cannot refresh token");
                return RefreshOutcome::Failed;
            }
        };

        let Some(account) = session.cached_account().await else {
            tracing::warn!("no cached account; cannot refresh token silently");
            return RefreshOutcome::Failed;
        };

        match session.acquire_token_silently(&account, &self.scopes).await {
            Ok(result) => {
                tracing::debug!(account = %account.username, "token refreshed silently");
                self.persist(&result.id_token);
                RefreshOutcome::Refreshed(result.id_token)
            }
            Err(error) if error.needs_interaction() => {
                tracing::info!(%error, "silent refresh needs interaction; starting login");
                match session.acquire_token_interactively(&self.scopes).await {
                    Ok(result) => self.persist(&result.id_token),
                    Err(error) => tracing::warn!(%error, "interactive login failed"),
                }
                RefreshOutcome::InteractiveLogin
            }
            Err(error) => {
                tracing::warn!(%error, "silent token refresh failed");
                RefreshOutcome::Failed
            }
        }
    }

    fn persist(&self, token: &str) {
        if let Err(error) = self.tokens.store(token) {
            tracing::warn!(%error, "failed to persist identity token");
        }
    }

    async fn send(
        &self,
        request: &ApiRequest,
        token: Option<&str>,
    ) -> Result<reqwest::Response, ClientError> {
        let url = request.url(&self.base_url);
        let mut builder = self.http.request(request.method.clone(), &url);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(parts) => builder.multipart(ApiRequest::multipart_form(parts)?),
        };

        tracing::debug!(
            method = %request.method,
            %url,
            authenticated = token.is_some(),
            retried = request.retried,
            "sending request"
        );
        builder.send().await.map_err(|error| {
            tracing::warn!(method = %request.method, %url, %error, "transport error");
            ClientError::Http(error)
        })
    }
}
