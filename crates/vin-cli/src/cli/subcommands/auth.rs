use clap::Subcommand;

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Log in through the browser and store the identity token.
    Login,
    /// Clear the stored token and cached account.
    Logout,
    /// Show who is signed in and where the token came from.
    Status,
}
