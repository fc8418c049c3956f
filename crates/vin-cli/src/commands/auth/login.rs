use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    user_id: String,
    username: String,
    name: Option<String>,
    expires_at: Option<String>,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = Progress::spinner("fetching sign-in configuration")
        .track("could not reach the API", ctx.client.session())
        .await?;

    let result = Progress::spinner("waiting for browser sign-in")
        .track(
            "sign-in failed",
            session.acquire_token_interactively(ctx.client.scopes()),
        )
        .await?;

    ctx.client.tokens().store(&result.id_token)?;
    tracing::info!(user = %result.account.username, "signed in");

    output(
        &AuthLoginResponse {
            authenticated: true,
            user_id: result.account.object_id().to_string(),
            username: result.account.username,
            name: result.account.name,
            expires_at: result.expires_at.map(|at| at.to_rfc3339()),
        },
        flags.format,
    )
}
