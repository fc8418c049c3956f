pub mod auth;
pub mod component;
pub mod component_type;
pub mod dispatch;
pub mod shared;
pub mod user;
