//! Entity structs mirrored from the Vinventory API.
//!
//! Field names are camelCase on the wire. Fields marked client-side (an
//! assignee on a component, a user on a history entry) are never sent by the
//! server; the client fills them in from follow-up lookups.

mod component;
mod component_type;
mod history;
mod user;

pub use component::{Component, ComponentPatch, CreateComponentRequest, NewComponent};
pub use component_type::{ComponentType, NewComponentType};
pub use history::{InventoryHistory, UserInventoryHistory};
pub use user::User;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default (the API sends `null` for unknown
/// user ids in fallback payloads).
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a timestamp, mapping the server's zero time
/// (`0001-01-01T00:00:00Z`) to `None`.
pub(crate) fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<DateTime<Utc>>::deserialize(deserializer)?;
    Ok(value.filter(|ts| ts.year() > 1))
}
