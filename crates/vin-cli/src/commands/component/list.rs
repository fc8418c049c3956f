use vin_config::GeneralConfig;
use vin_core::filter::ComponentFilter;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::component::ComponentListArgs;
use crate::commands::shared::limit::apply_limit;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

pub async fn run(
    args: ComponentListArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let with_assignees = args.assignees;
    let filter = build_filter(args, &ctx.config.general);
    tracing::debug!(?filter, with_assignees, "listing components");

    let spinner = Progress::spinner("listing components");
    let mut components = if with_assignees {
        spinner
            .track(
                "listing failed",
                ctx.client.list_components_with_assignees(&filter),
            )
            .await?
    } else {
        spinner
            .track("listing failed", ctx.client.list_components(&filter))
            .await?
    };

    if components.is_empty() && !flags.quiet {
        eprintln!("{}", empty_notice(&filter));
    }
    apply_limit(&mut components, flags.limit, ctx.config.general.default_limit);
    output(&components, flags.format)
}

fn empty_notice(filter: &ComponentFilter) -> &'static str {
    if filter.is_filtered() {
        "no components match the given filters"
    } else {
        "no components in inventory"
    }
}

/// Map CLI filters onto the listing query. Configured sort defaults apply
/// when the flags leave them out; an order is only sent alongside a sort.
fn build_filter(args: ComponentListArgs, general: &GeneralConfig) -> ComponentFilter {
    let sort = args.sort.or(general.default_sort);
    let order = args
        .order
        .or_else(|| sort.map(|_| general.default_order));

    ComponentFilter {
        type_id: args.type_id,
        serial_number: args.serial_number,
        status: args.status,
        condition: args.condition,
        brand: args.brand,
        model_year: args.model_year,
        ram: args.ram,
        processor_type: args.processor_type,
        processor_cores: args.processor_cores,
        screen_size: args.screen_size,
        search: args.search,
        sort,
        order,
    }
}
