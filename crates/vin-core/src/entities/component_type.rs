use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ComponentAttribute;

/// A named schema listing which component attributes apply to (and are
/// required for) a class of components.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ComponentType {
    pub id: i64,
    pub name: String,
    /// Ordered camelCase component field names.
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl ComponentType {
    /// Attributes this type marks as required, in listed order.
    ///
    /// Names the client does not recognize are skipped; the server may know
    /// fields this client predates.
    #[must_use]
    pub fn required_attributes(&self) -> Vec<ComponentAttribute> {
        self.attributes
            .iter()
            .filter_map(|name| name.parse().ok())
            .collect()
    }
}

/// Body of `POST /types` and `PUT /types/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewComponentType {
    pub name: String,
    pub attributes: Vec<String>,
}

impl NewComponentType {
    /// Build a type body from typed attributes, dropping repeats but keeping
    /// first-seen order.
    #[must_use]
    pub fn new(name: impl Into<String>, attributes: &[ComponentAttribute]) -> Self {
        let mut seen = Vec::with_capacity(attributes.len());
        for attribute in attributes {
            if !seen.contains(attribute) {
                seen.push(*attribute);
            }
        }
        Self {
            name: name.into(),
            attributes: seen.iter().map(|a| a.as_str().to_string()).collect(),
        }
    }
}

impl From<ComponentType> for NewComponentType {
    fn from(value: ComponentType) -> Self {
        Self {
            name: value.name,
            attributes: value.attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_attributes_skip_unknown_names() {
        let ty = ComponentType {
            id: 1,
            name: "Laptop".into(),
            attributes: vec!["serialNumber".into(), "gpu".into(), "ram".into()],
        };
        assert_eq!(
            ty.required_attributes(),
            vec![ComponentAttribute::SerialNumber, ComponentAttribute::Ram]
        );
    }

    #[test]
    fn new_type_dedupes_in_order() {
        let body = NewComponentType::new(
            "Monitor",
            &[
                ComponentAttribute::ScreenSize,
                ComponentAttribute::Brand,
                ComponentAttribute::ScreenSize,
            ],
        );
        assert_eq!(body.attributes, vec!["screenSize", "brand"]);
    }
}
