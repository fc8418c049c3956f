//! General application configuration.

use serde::{Deserialize, Serialize};
use vin_core::enums::{SortOption, SortOrder};

/// Default result limit.
const fn default_limit() -> u32 {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Sort column applied when a listing does not ask for one.
    #[serde(default)]
    pub default_sort: Option<SortOption>,

    /// Sort direction applied when a listing does not ask for one.
    #[serde(default)]
    pub default_order: SortOrder,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            default_sort: None,
            default_order: SortOrder::Asc,
        }
    }
}
