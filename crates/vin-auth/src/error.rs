use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated, run `vin auth login`")]
    NotAuthenticated,

    /// Silent acquisition cannot proceed without the user signing in again.
    #[error("interactive login required: {0}")]
    InteractionRequired(String),

    #[error("silent token acquisition failed: {0}")]
    SilentAcquisitionFailed(String),

    #[error("browser login failed: {0}")]
    BrowserFlowFailed(String),

    #[error("token endpoint error: {0}")]
    TokenEndpoint(String),

    #[error("token store error: {0}")]
    TokenStoreError(String),

    #[error("{0}")]
    Other(String),
}

impl AuthError {
    /// Whether the caller should fall back to an interactive login.
    #[must_use]
    pub const fn needs_interaction(&self) -> bool {
        matches!(self, Self::InteractionRequired(_))
    }
}
