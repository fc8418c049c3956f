use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{optional_timestamp, User};
use crate::enums::{ComponentAttribute, Condition, Status};
use crate::validation::ComponentFields;

/// A tracked piece of hardware inventory.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: i64,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub condition: Condition,
    #[serde(default)]
    pub status: Status,
    /// Current assignee. Client-side: filled from the last-interactant lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default)]
    pub model_year: Option<i64>,
    pub type_id: i64,
    #[serde(default)]
    pub screen_size: String,
    #[serde(default)]
    pub resolution: String,
    #[serde(default)]
    pub processor_type: String,
    #[serde(default)]
    pub processor_cores: Option<i64>,
    #[serde(default)]
    pub ram: Option<i64>,
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub warranty_end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: String,
    /// Maintained by the server's warranty notifier; ignored on update.
    #[serde(default)]
    pub email_notified: bool,
}

/// Payload for `POST /components` (the `component` half of the request).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewComponent {
    pub type_id: i64,
    pub serial_number: String,
    pub brand: String,
    pub model: String,
    pub model_year: Option<i64>,
    pub condition: Condition,
    pub status: Status,
    pub screen_size: String,
    pub resolution: String,
    pub processor_type: String,
    pub processor_cores: Option<i64>,
    pub ram: Option<i64>,
    pub warranty_end_date: Option<DateTime<Utc>>,
    pub notes: String,
}

impl NewComponent {
    /// Start a component of the given type with form defaults
    /// (`Ready to Use`, `Functioning`, everything else empty).
    #[must_use]
    pub fn of_type(type_id: i64) -> Self {
        Self {
            type_id,
            serial_number: String::new(),
            brand: String::new(),
            model: String::new(),
            model_year: None,
            condition: Condition::default(),
            status: Status::default(),
            screen_size: String::new(),
            resolution: String::new(),
            processor_type: String::new(),
            processor_cores: None,
            ram: None,
            warranty_end_date: None,
            notes: String::new(),
        }
    }
}

/// Body of `POST /components`: the component plus the acting user, which the
/// server records as the `Added` history entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateComponentRequest {
    pub component: NewComponent,
    pub user_id: String,
}

/// Partial edit applied to a fetched component before `PUT /components/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentPatch {
    pub serial_number: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub model_year: Option<i64>,
    pub condition: Option<Condition>,
    pub status: Option<Status>,
    pub type_id: Option<i64>,
    pub screen_size: Option<String>,
    pub resolution: Option<String>,
    pub processor_type: Option<String>,
    pub processor_cores: Option<i64>,
    pub ram: Option<i64>,
    pub warranty_end_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl ComponentPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Overwrite every field the patch sets.
    pub fn apply(self, component: &mut Component) {
        macro_rules! set {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = self.$field { component.$field = value; })*
            };
        }
        macro_rules! set_opt {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = self.$field { component.$field = Some(value); })*
            };
        }
        set!(
            serial_number,
            brand,
            model,
            condition,
            status,
            type_id,
            screen_size,
            resolution,
            processor_type,
            notes,
        );
        set_opt!(model_year, processor_cores, ram, warranty_end_date);
    }
}

fn text_present(value: &str) -> bool {
    !value.trim().is_empty()
}

impl ComponentFields for Component {
    fn type_id(&self) -> i64 {
        self.type_id
    }

    fn has(&self, attribute: ComponentAttribute) -> bool {
        match attribute {
            ComponentAttribute::SerialNumber => text_present(&self.serial_number),
            ComponentAttribute::Brand => text_present(&self.brand),
            ComponentAttribute::Model => text_present(&self.model),
            ComponentAttribute::ModelYear => self.model_year.is_some(),
            ComponentAttribute::Condition => true,
            ComponentAttribute::ScreenSize => text_present(&self.screen_size),
            ComponentAttribute::Resolution => text_present(&self.resolution),
            ComponentAttribute::ProcessorType => text_present(&self.processor_type),
            ComponentAttribute::ProcessorCores => self.processor_cores.is_some(),
            ComponentAttribute::Ram => self.ram.is_some(),
            ComponentAttribute::WarrantyEndDate => self.warranty_end_date.is_some(),
            ComponentAttribute::Notes => text_present(&self.notes),
        }
    }

    fn numeric_specs(&self) -> [(ComponentAttribute, Option<i64>); 3] {
        [
            (ComponentAttribute::ModelYear, self.model_year),
            (ComponentAttribute::ProcessorCores, self.processor_cores),
            (ComponentAttribute::Ram, self.ram),
        ]
    }
}

impl ComponentFields for NewComponent {
    fn type_id(&self) -> i64 {
        self.type_id
    }

    fn has(&self, attribute: ComponentAttribute) -> bool {
        match attribute {
            ComponentAttribute::SerialNumber => text_present(&self.serial_number),
            ComponentAttribute::Brand => text_present(&self.brand),
            ComponentAttribute::Model => text_present(&self.model),
            ComponentAttribute::ModelYear => self.model_year.is_some(),
            ComponentAttribute::Condition => true,
            ComponentAttribute::ScreenSize => text_present(&self.screen_size),
            ComponentAttribute::Resolution => text_present(&self.resolution),
            ComponentAttribute::ProcessorType => text_present(&self.processor_type),
            ComponentAttribute::ProcessorCores => self.processor_cores.is_some(),
            ComponentAttribute::Ram => self.ram.is_some(),
            ComponentAttribute::WarrantyEndDate => self.warranty_end_date.is_some(),
            ComponentAttribute::Notes => text_present(&self.notes),
        }
    }

    fn numeric_specs(&self) -> [(ComponentAttribute, Option<i64>); 3] {
        [
            (ComponentAttribute::ModelYear, self.model_year),
            (ComponentAttribute::ProcessorCores, self.processor_cores),
            (ComponentAttribute::Ram, self.ram),
        ]
    }
}
