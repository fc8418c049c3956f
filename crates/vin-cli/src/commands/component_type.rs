use serde::Serialize;
use vin_core::entities::{ComponentType, NewComponentType};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TypeCommands;
use crate::cli::subcommands::component_type::TypeUpdateArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct TypeDeleteResponse {
    id: i64,
    deleted: bool,
}

/// Handle `vin type <subcommand>`.
pub async fn handle(
    action: TypeCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TypeCommands::List => output(&ctx.client.list_types().await?, flags.format),
        TypeCommands::Get { id } => output(&ctx.client.get_type(id).await?, flags.format),
        TypeCommands::Create(args) => {
            let body = NewComponentType::new(args.name, &args.attributes);
            output(&ctx.client.create_type(&body).await?, flags.format)
        }
        TypeCommands::Update(args) => {
            let current = ctx.client.get_type(args.id).await?;
            let id = args.id;
            let body = merge_update(current, args)?;
            output(&ctx.client.update_type(id, &body).await?, flags.format)
        }
        TypeCommands::Delete { id } => {
            ctx.client.delete_type(id).await?;
            output(&TypeDeleteResponse { id, deleted: true }, flags.format)
        }
    }
}

/// Start from the stored type and replace what the flags name. An attribute
/// list, when given, replaces the whole list.
fn merge_update(current: ComponentType, args: TypeUpdateArgs) -> anyhow::Result<NewComponentType> {
    if args.name.is_none() && args.attributes.is_empty() {
        anyhow::bail!("type update: give --name and/or --attribute");
    }
    let mut body = NewComponentType::from(current);
    if let Some(name) = args.name {
        body.name = name;
    }
    if !args.attributes.is_empty() {
        body.attributes = NewComponentType::new("", &args.attributes).attributes;
    }
    Ok(body)
}
