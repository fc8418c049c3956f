use clap::{Args, Subcommand};
use vin_core::enums::ComponentAttribute;

/// Component type commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TypeCommands {
    /// List all component types.
    List,
    /// Show one component type.
    Get {
        /// Type ID.
        id: i64,
    },
    /// Create a component type.
    Create(TypeCreateArgs),
    /// Rename a type or replace its required attributes.
    Update(TypeUpdateArgs),
    /// Delete a type no component uses.
    Delete {
        /// Type ID.
        id: i64,
    },
}

#[derive(Clone, Debug, Args)]
pub struct TypeCreateArgs {
    /// Type name, e.g. Laptop.
    pub name: String,
    /// Required attribute (repeatable), e.g. serialNumber, ram.
    #[arg(long = "attribute", value_name = "ATTRIBUTE")]
    pub attributes: Vec<ComponentAttribute>,
}

#[derive(Clone, Debug, Args)]
pub struct TypeUpdateArgs {
    /// Type ID.
    pub id: i64,
    #[arg(long)]
    pub name: Option<String>,
    /// Replacement attribute list (repeatable).
    #[arg(long = "attribute", value_name = "ATTRIBUTE")]
    pub attributes: Vec<ComponentAttribute>,
}
