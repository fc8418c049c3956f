//! Response and auxiliary payload shapes returned by the API.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::{Component, ComponentType, User};
use crate::enums::Status;

/// `GET /config`: identifiers needed to start an identity session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteAuthConfig {
    #[serde(default)]
    pub tenant_id: String,
    #[serde(default)]
    pub client_id: String,
}

impl RemoteAuthConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.tenant_id.trim().is_empty() && !self.client_id.trim().is_empty()
    }
}

/// `GET /components/{id}/last-interactant`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LastInteractant {
    pub last_interactant_user: User,
    pub component_status: Status,
}

/// `GET /components/{id}/image`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ComponentImages {
    #[serde(default)]
    pub images: Vec<String>,
}

/// `GET /auth/users/{id}/photo`. Empty when the user has no photo.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserPhoto {
    #[serde(default)]
    pub photo_url: String,
}

/// `{"error": "..."}` body the API sends with failures.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ApiErrorBody {
    pub error: String,
}

/// `{"message": "..."}` body the API sends for some successes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: String,
}

/// A distinct column value from `GET /components/{attribute}/uniquevalue`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(untagged)]
pub enum AttributeValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl AttributeValue {
    /// Blank strings are placeholders for unset columns.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

/// Everything the detail view shows for one component.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDetails {
    pub component: Component,
    pub component_type: Option<ComponentType>,
    pub last_interactant: Option<User>,
    #[serde(default)]
    pub images: Vec<String>,
}
