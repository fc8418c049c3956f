use clap::{Args, Subcommand};

/// Directory user commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// List directory users.
    List(UserListArgs),
    /// Show one user.
    Get {
        /// Directory user ID.
        id: String,
        /// Also fetch the profile photo URL.
        #[arg(long)]
        photo: bool,
    },
    /// Show everything a user was ever handed or returned.
    History {
        /// Directory user ID.
        id: String,
    },
}

#[derive(Clone, Debug, Args)]
pub struct UserListArgs {
    /// Also fetch profile photo URLs.
    #[arg(long)]
    pub photos: bool,
}
