use chrono::{DateTime, NaiveDate, Utc};
use vin_core::entities::{ComponentPatch, NewComponent};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::component::{
    ComponentCreateArgs, ComponentFieldArgs, ComponentUpdateArgs,
};
use crate::context::AppContext;
use crate::output::output;

pub async fn create(
    args: ComponentCreateArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let user_id = ctx.require_user_id()?;
    let component = new_component(args.type_id, args.fields);
    let created = ctx.client.create_component(component, &user_id).await?;
    output(&created, flags.format)
}

pub async fn update(
    args: ComponentUpdateArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut patch = to_patch(args.fields);
    patch.type_id = args.type_id;
    if patch.is_empty() {
        anyhow::bail!("component update: no fields given");
    }
    let updated = ctx.client.update_component(args.id, patch).await?;
    output(&updated, flags.format)
}

fn to_patch(fields: ComponentFieldArgs) -> ComponentPatch {
    ComponentPatch {
        serial_number: fields.serial_number,
        brand: fields.brand,
        model: fields.model,
        model_year: fields.model_year,
        condition: fields.condition,
        status: fields.status,
        type_id: None,
        screen_size: fields.screen_size,
        resolution: fields.resolution,
        processor_type: fields.processor_type,
        processor_cores: fields.processor_cores,
        ram: fields.ram,
        warranty_end_date: fields.warranty_end_date.map(start_of_day),
        notes: fields.notes,
    }
}

/// Unset text fields stay empty; the type's required attributes are
/// checked by the client before anything is sent.
fn new_component(type_id: i64, fields: ComponentFieldArgs) -> NewComponent {
    let patch = to_patch(fields);
    NewComponent {
        type_id,
        serial_number: patch.serial_number.unwrap_or_default(),
        brand: patch.brand.unwrap_or_default(),
        model: patch.model.unwrap_or_default(),
        model_year: patch.model_year,
        condition: patch.condition.unwrap_or_default(),
        status: patch.status.unwrap_or_default(),
        screen_size: patch.screen_size.unwrap_or_default(),
        resolution: patch.resolution.unwrap_or_default(),
        processor_type: patch.processor_type.unwrap_or_default(),
        processor_cores: patch.processor_cores,
        ram: patch.ram,
        warranty_end_date: patch.warranty_end_date,
        notes: patch.notes.unwrap_or_default(),
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}
