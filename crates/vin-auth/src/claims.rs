use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::AuthError;
use crate::session::Account;

/// Claims read from an Entra id token.
///
/// Decoded without signature verification; the API validates the token, the
/// client only needs identity hints and the expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdTokenClaims {
    pub raw_jwt: String,
    /// Directory object id (`oid`, falling back to `sub`).
    pub object_id: String,
    /// Tenant id (`tid`).
    pub tenant_id: String,
    /// `preferred_username`, usually the UPN or email.
    pub username: Option<String>,
    pub name: Option<String>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawClaims {
    oid: Option<String>,
    sub: Option<String>,
    tid: Option<String>,
    preferred_username: Option<String>,
    name: Option<String>,
    exp: Option<i64>,
}

impl IdTokenClaims {
    /// Decode the payload segment of a JWT.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Other` if the token is not a three-part JWT, the
    /// payload is not base64url JSON, or `exp`/`oid` are missing.
    pub fn decode(jwt: &str) -> Result<Self, AuthError> {
        let parts: Vec<&str> = jwt.trim().split('.').collect();
        if parts.len() != 3 {
            return Err(AuthError::Other("invalid JWT format".into()));
        }
        let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(parts[1].trim_end_matches('='))
            .map_err(|e| AuthError::Other(format!("base64 decode failed: {e}")))?;
        let raw: RawClaims = serde_json::from_slice(&payload)
            .map_err(|e| AuthError::Other(format!("JSON parse failed: {e}")))?;

        let exp = raw
            .exp
            .ok_or_else(|| AuthError::Other("missing exp claim".into()))?;
        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| AuthError::Other("invalid exp timestamp".into()))?;
        let object_id = raw
            .oid
            .or(raw.sub)
            .ok_or_else(|| AuthError::Other("missing oid claim".into()))?;

        Ok(Self {
            raw_jwt: jwt.trim().to_string(),
            object_id,
            tenant_id: raw.tid.unwrap_or_default(),
            username: raw.preferred_username,
            name: raw.name,
            expires_at,
        })
    }

    /// `<oid>.<tid>`, the key the account cache is stored under.
    #[must_use]
    pub fn home_account_id(&self) -> String {
        format!("{}.{}", self.object_id, self.tenant_id)
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Check if the token is expired or expires within `buffer_secs`.
    #[must_use]
    pub fn is_near_expiry(&self, buffer_secs: i64) -> bool {
        let threshold = Utc::now() + chrono::TimeDelta::seconds(buffer_secs);
        self.expires_at <= threshold
    }

    #[must_use]
    pub fn to_account(&self) -> Account {
        Account {
            home_account_id: self.home_account_id(),
            username: self.username.clone().unwrap_or_default(),
            name: self.name.clone(),
        }
    }
}
