use serde::Serialize;
use vin_auth::{IdTokenClaims, TokenStore};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    user_id: Option<String>,
    username: Option<String>,
    name: Option<String>,
    tenant_id: Option<String>,
    expires_at: Option<String>,
    token_source: Option<String>,
    api_url: String,
    note: Option<String>,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let claims = vin_auth::current_claims(ctx.store.as_ref());
    let source = ctx.store.source().map(|source| source.to_string());
    let status = status_from(claims, source, ctx.client.base_url());
    output(&status, flags.format)
}

fn status_from(
    claims: Option<IdTokenClaims>,
    token_source: Option<String>,
    api_url: &str,
) -> AuthStatusResponse {
    let Some(claims) = claims else {
        let note = if token_source.is_some() {
            "stored token is not a readable id token"
        } else {
            "no token stored, run 'vin auth login'"
        };
        return AuthStatusResponse {
            authenticated: false,
            user_id: None,
            username: None,
            name: None,
            tenant_id: None,
            expires_at: None,
            token_source,
            api_url: api_url.to_string(),
            note: Some(note.into()),
        };
    };

    // An expired token is still sent; the API's 401 triggers a silent refresh.
    let expired = claims.is_expired();
    AuthStatusResponse {
        authenticated: !expired,
        user_id: Some(claims.object_id),
        username: claims.username,
        name: claims.name,
        tenant_id: Some(claims.tenant_id),
        expires_at: Some(claims.expires_at.to_rfc3339()),
        token_source,
        api_url: api_url.to_string(),
        note: expired.then(|| "token expired, it will be refreshed on the next request".into()),
    }
}
