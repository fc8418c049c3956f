use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::commands::shared::limit::apply_limit;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `vin user <subcommand>`.
pub async fn handle(
    action: &UserCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = ctx.config.general.default_limit;
    match action {
        UserCommands::List(args) => {
            let spinner = Progress::spinner("listing users");
            let mut users = if args.photos {
                spinner
                    .track("listing failed", ctx.client.list_users_with_photos())
                    .await?
            } else {
                spinner
                    .track("listing failed", ctx.client.list_users())
                    .await?
            };
            apply_limit(&mut users, flags.limit, limit);
            output(&users, flags.format)
        }
        UserCommands::Get { id, photo } => {
            let mut user = ctx.client.get_user(id).await?;
            if *photo {
                match ctx.client.user_photo(id).await {
                    Ok(url) if !url.trim().is_empty() => user.photo_url = Some(url),
                    Ok(_) => {}
                    Err(error) => tracing::warn!(user_id = %id, %error, "failed to fetch user photo"),
                }
            }
            output(&user, flags.format)
        }
        UserCommands::History { id } => {
            let mut entries = Progress::spinner("loading history")
                .track(
                    "history lookup failed",
                    ctx.client.user_history_with_serials(id),
                )
                .await?;
            apply_limit(&mut entries, flags.limit, limit);
            output(&entries, flags.format)
        }
    }
}
