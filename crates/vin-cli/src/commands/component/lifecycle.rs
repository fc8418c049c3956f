use serde::Serialize;
use vin_core::enums::Status;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct StatusChangeResponse {
    id: i64,
    status: Status,
    changed_by: String,
}

pub async fn activate(id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let user_id = ctx.require_user_id()?;
    ctx.client.activate_component(id, &user_id).await?;
    output(
        &StatusChangeResponse {
            id,
            status: Status::ReadyToUse,
            changed_by: user_id,
        },
        flags.format,
    )
}

pub async fn deactivate(id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let user_id = ctx.require_user_id()?;
    ctx.client.deactivate_component(id, &user_id).await?;
    output(
        &StatusChangeResponse {
            id,
            status: Status::OutOfInventory,
            changed_by: user_id,
        },
        flags.format,
    )
}

pub async fn assign(
    id: i64,
    user_id: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let entry = ctx.client.assign_component(id, user_id).await?;
    output(&entry, flags.format)
}

pub async fn return_component(
    id: i64,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let entry = ctx.client.return_component(id).await?;
    output(&entry, flags.format)
}
