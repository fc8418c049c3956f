use crate::cli::GlobalFlags;
use crate::commands::shared::limit::apply_limit;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

pub async fn run(id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut entries = Progress::spinner("loading history")
        .track(
            "history lookup failed",
            ctx.client.component_history_with_users(id),
        )
        .await?;
    apply_limit(&mut entries, flags.limit, ctx.config.general.default_limit);
    output(&entries, flags.format)
}
