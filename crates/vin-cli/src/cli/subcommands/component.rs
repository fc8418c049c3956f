use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use vin_core::enums::{Condition, FilterAttribute, SortOption, SortOrder, Status};

/// Component commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ComponentCommands {
    /// List components, optionally filtered, searched and sorted.
    List(ComponentListArgs),
    /// Show one component with its type, assignee and images.
    Get {
        /// Component ID.
        id: i64,
    },
    /// Add a component to the inventory.
    Create(ComponentCreateArgs),
    /// Edit fields of an existing component.
    Update(ComponentUpdateArgs),
    /// Put a component back into inventory.
    Activate {
        /// Component ID.
        id: i64,
    },
    /// Take a component out of inventory.
    Deactivate {
        /// Component ID.
        id: i64,
    },
    /// Hand a component to a user.
    Assign {
        /// Component ID.
        id: i64,
        /// Directory user ID of the new holder.
        #[arg(long)]
        user: String,
    },
    /// Take a component back from whoever holds it.
    Return {
        /// Component ID.
        id: i64,
    },
    /// Show the inventory history of a component.
    History {
        /// Component ID.
        id: i64,
    },
    /// List distinct values of a filterable attribute.
    Values {
        /// Attribute, e.g. brand, ram, processor-type.
        attribute: FilterAttribute,
    },
    /// List image URLs, uploading files first when given.
    Images {
        /// Component ID.
        id: i64,
        /// Image files to upload.
        #[arg(long = "upload", value_name = "FILE")]
        upload: Vec<PathBuf>,
    },
}

#[derive(Clone, Debug, Args)]
pub struct ComponentListArgs {
    /// Free-text search over brand, model, serial number and assignee name.
    #[arg(long)]
    pub search: Option<String>,
    /// Component type ID.
    #[arg(long)]
    pub type_id: Option<i64>,
    #[arg(long)]
    pub serial_number: Option<String>,
    /// Status, e.g. ready-to-use, being-used, out-of-inventory.
    #[arg(long)]
    pub status: Option<Status>,
    /// Condition, e.g. functioning, slightly-damaged, broken.
    #[arg(long)]
    pub condition: Option<Condition>,
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub model_year: Option<i64>,
    #[arg(long)]
    pub ram: Option<i64>,
    #[arg(long)]
    pub processor_type: Option<String>,
    #[arg(long)]
    pub processor_cores: Option<i64>,
    #[arg(long)]
    pub screen_size: Option<String>,
    /// Sort key (defaults to general.default_sort).
    #[arg(long)]
    pub sort: Option<SortOption>,
    /// Sort order: asc or desc (defaults to general.default_order).
    #[arg(long)]
    pub order: Option<SortOrder>,
    /// Fill in the current holder of every in-use component.
    #[arg(long)]
    pub assignees: bool,
}

/// Editable component fields shared by `create` and `update`.
#[derive(Clone, Debug, Default, Args)]
pub struct ComponentFieldArgs {
    #[arg(long)]
    pub serial_number: Option<String>,
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub model_year: Option<i64>,
    #[arg(long)]
    pub condition: Option<Condition>,
    #[arg(long)]
    pub status: Option<Status>,
    #[arg(long)]
    pub screen_size: Option<String>,
    #[arg(long)]
    pub resolution: Option<String>,
    #[arg(long)]
    pub processor_type: Option<String>,
    #[arg(long)]
    pub processor_cores: Option<i64>,
    #[arg(long)]
    pub ram: Option<i64>,
    /// Warranty end date (YYYY-MM-DD).
    #[arg(long)]
    pub warranty_end_date: Option<NaiveDate>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ComponentCreateArgs {
    /// Component type ID; its attributes decide which fields are required.
    #[arg(long)]
    pub type_id: i64,
    #[command(flatten)]
    pub fields: ComponentFieldArgs,
}

#[derive(Clone, Debug, Args)]
pub struct ComponentUpdateArgs {
    /// Component ID.
    pub id: i64,
    /// Move the component to another type.
    #[arg(long)]
    pub type_id: Option<i64>,
    #[command(flatten)]
    pub fields: ComponentFieldArgs,
}
