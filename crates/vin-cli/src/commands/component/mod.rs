mod history;
mod images;
mod lifecycle;
mod list;
mod write;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ComponentCommands;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `vin component <subcommand>`.
pub async fn handle(
    action: ComponentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ComponentCommands::List(args) => list::run(args, ctx, flags).await,
        ComponentCommands::Get { id } => {
            let details = Progress::spinner("loading component")
                .track("lookup failed", ctx.client.component_details(id))
                .await?;
            output(&details, flags.format)
        }
        ComponentCommands::Create(args) => write::create(args, ctx, flags).await,
        ComponentCommands::Update(args) => write::update(args, ctx, flags).await,
        ComponentCommands::Activate { id } => lifecycle::activate(id, ctx, flags).await,
        ComponentCommands::Deactivate { id } => lifecycle::deactivate(id, ctx, flags).await,
        ComponentCommands::Assign { id, user } => lifecycle::assign(id, &user, ctx, flags).await,
        ComponentCommands::Return { id } => lifecycle::return_component(id, ctx, flags).await,
        ComponentCommands::History { id } => history::run(id, ctx, flags).await,
        ComponentCommands::Values { attribute } => {
            let values = ctx.client.unique_values(attribute).await?;
            output(&values, flags.format)
        }
        ComponentCommands::Images { id, upload } => images::run(id, &upload, ctx, flags).await,
    }
}
