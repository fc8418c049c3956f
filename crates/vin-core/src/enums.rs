//! Domain enums mirrored from the Vinventory API.
//!
//! Wire strings are kept verbatim (`"Slightly Damaged"`, `"Being Used"`,
//! `"model_year"`, ...). Every enum exposes `as_str()`, an `ALL` table, and a
//! forgiving `FromStr` that accepts the wire string in any case with `-`/`_`
//! standing in for spaces, so `being-used` and `Being Used` parse alike.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a string does not name any variant of an enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

fn normalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect::<String>()
        .to_lowercase()
}

fn parse_wire<T: Copy>(
    raw: &str,
    kind: &'static str,
    all: &[T],
    as_str: impl Fn(T) -> &'static str,
) -> Result<T, ParseEnumError> {
    let wanted = normalize(raw);
    all.iter()
        .copied()
        .find(|candidate| normalize(as_str(*candidate)) == wanted)
        .ok_or_else(|| ParseEnumError {
            kind,
            value: raw.to_string(),
            expected: all
                .iter()
                .map(|candidate| as_str(*candidate))
                .collect::<Vec<_>>()
                .join(", "),
        })
}

// ---------------------------------------------------------------------------
// Condition
// ---------------------------------------------------------------------------

/// Physical condition of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub enum Condition {
    #[default]
    Functioning,
    #[serde(rename = "Slightly Damaged")]
    SlightlyDamaged,
    Broken,
}

impl Condition {
    pub const ALL: [Self; 3] = [Self::Functioning, Self::SlightlyDamaged, Self::Broken];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Functioning => "Functioning",
            Self::SlightlyDamaged => "Slightly Damaged",
            Self::Broken => "Broken",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_wire(s, "condition", &Self::ALL, Self::as_str)
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Inventory status of a component.
///
/// ```text
/// Ready to Use --assign--> Being Used --return--> Ready to Use
/// any --deactivate--> Out of Inventory --activate--> Ready to Use
/// ```
///
/// The server owns these transitions; the client only reads the status to
/// decide which follow-up lookups make sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub enum Status {
    #[serde(rename = "Out of Inventory")]
    OutOfInventory,
    #[serde(rename = "Being Used")]
    BeingUsed,
    #[default]
    #[serde(rename = "Ready to Use")]
    ReadyToUse,
}

impl Status {
    pub const ALL: [Self; 3] = [Self::OutOfInventory, Self::BeingUsed, Self::ReadyToUse];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OutOfInventory => "Out of Inventory",
            Self::BeingUsed => "Being Used",
            Self::ReadyToUse => "Ready to Use",
        }
    }

    /// Whether the component currently has an assignee worth looking up.
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        matches!(self, Self::BeingUsed)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_wire(s, "status", &Self::ALL, Self::as_str)
    }
}

// ---------------------------------------------------------------------------
// OperationType
// ---------------------------------------------------------------------------

/// Kind of event recorded in the inventory history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum OperationType {
    Added,
    Assigned,
    Returned,
    Activated,
    Deactivated,
}

impl OperationType {
    pub const ALL: [Self; 5] = [
        Self::Added,
        Self::Assigned,
        Self::Returned,
        Self::Activated,
        Self::Deactivated,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Added => "Added",
            Self::Assigned => "Assigned",
            Self::Returned => "Returned",
            Self::Activated => "Activated",
            Self::Deactivated => "Deactivated",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_wire(s, "operation type", &Self::ALL, Self::as_str)
    }
}

// ---------------------------------------------------------------------------
// SortOption / SortOrder
// ---------------------------------------------------------------------------

/// Column the component listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    ModelYear,
    ProcessorCores,
    Ram,
    WarrantyEndDate,
}

impl SortOption {
    pub const ALL: [Self; 4] = [
        Self::ModelYear,
        Self::ProcessorCores,
        Self::Ram,
        Self::WarrantyEndDate,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ModelYear => "model_year",
            Self::ProcessorCores => "processor_cores",
            Self::Ram => "ram",
            Self::WarrantyEndDate => "warranty_end_date",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_wire(s, "sort option", &Self::ALL, Self::as_str)
    }
}

/// Sort direction. The server treats anything but `desc` as ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub const ALL: [Self; 2] = [Self::Asc, Self::Desc];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_wire(s, "sort order", &Self::ALL, Self::as_str)
    }
}

// ---------------------------------------------------------------------------
// ComponentAttribute
// ---------------------------------------------------------------------------

/// A component field a component type can mark as required.
///
/// Serialized with the camelCase field name used on the wire, which is also
/// what a [`ComponentType`](crate::entities::ComponentType) lists in its
/// `attributes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum ComponentAttribute {
    SerialNumber,
    Brand,
    Model,
    ModelYear,
    Condition,
    ScreenSize,
    Resolution,
    ProcessorType,
    ProcessorCores,
    Ram,
    WarrantyEndDate,
    Notes,
}

impl ComponentAttribute {
    pub const ALL: [Self; 12] = [
        Self::SerialNumber,
        Self::Brand,
        Self::Model,
        Self::ModelYear,
        Self::Condition,
        Self::ScreenSize,
        Self::Resolution,
        Self::ProcessorType,
        Self::ProcessorCores,
        Self::Ram,
        Self::WarrantyEndDate,
        Self::Notes,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SerialNumber => "serialNumber",
            Self::Brand => "brand",
            Self::Model => "model",
            Self::ModelYear => "modelYear",
            Self::Condition => "condition",
            Self::ScreenSize => "screenSize",
            Self::Resolution => "resolution",
            Self::ProcessorType => "processorType",
            Self::ProcessorCores => "processorCores",
            Self::Ram => "ram",
            Self::WarrantyEndDate => "warrantyEndDate",
            Self::Notes => "notes",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SerialNumber => "Serial Number",
            Self::Brand => "Brand",
            Self::Model => "Model",
            Self::ModelYear => "Model Year",
            Self::Condition => "Condition",
            Self::ScreenSize => "Screen Size",
            Self::Resolution => "Resolution",
            Self::ProcessorType => "Processor Type",
            Self::ProcessorCores => "Processor Cores",
            Self::Ram => "RAM",
            Self::WarrantyEndDate => "Warranty End Date",
            Self::Notes => "Notes",
        }
    }
}

impl fmt::Display for ComponentAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentAttribute {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // camelCase has no separators, so also compare against the label
        // ("Serial Number") and the plain lowercase name ("serialnumber").
        let squashed: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|attr| attr.as_str().to_lowercase() == squashed)
            .map_or_else(
                || parse_wire(s, "attribute", &Self::ALL, Self::label),
                Ok,
            )
    }
}

// ---------------------------------------------------------------------------
// FilterAttribute
// ---------------------------------------------------------------------------

/// Component column with a distinct-values lookup
/// (`GET /components/{attribute}/uniquevalue`) and a matching list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FilterAttribute {
    Status,
    Condition,
    Brand,
    ModelYear,
    Ram,
    ProcessorType,
    ProcessorCores,
    ScreenSize,
    SerialNumber,
}

impl FilterAttribute {
    pub const ALL: [Self; 9] = [
        Self::Status,
        Self::Condition,
        Self::Brand,
        Self::ModelYear,
        Self::Ram,
        Self::ProcessorType,
        Self::ProcessorCores,
        Self::ScreenSize,
        Self::SerialNumber,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Condition => "condition",
            Self::Brand => "brand",
            Self::ModelYear => "model_year",
            Self::Ram => "ram",
            Self::ProcessorType => "processor_type",
            Self::ProcessorCores => "processor_cores",
            Self::ScreenSize => "screen_size",
            Self::SerialNumber => "serial_number",
        }
    }
}

impl fmt::Display for FilterAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterAttribute {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_wire(s, "filter attribute", &Self::ALL, Self::as_str)
    }
}
