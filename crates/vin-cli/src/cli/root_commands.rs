use clap::Subcommand;

use crate::cli::subcommands::{AuthCommands, ComponentCommands, TypeCommands, UserCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign out and inspect the stored identity.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Inventory components.
    Component {
        #[command(subcommand)]
        action: ComponentCommands,
    },
    /// Component types and their required attributes.
    Type {
        #[command(subcommand)]
        action: TypeCommands,
    },
    /// Directory users.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
}
