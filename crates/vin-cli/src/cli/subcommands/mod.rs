pub mod auth;
pub mod component;
pub mod component_type;
pub mod user;

pub use auth::AuthCommands;
pub use component::ComponentCommands;
pub use component_type::TypeCommands;
pub use user::UserCommands;
