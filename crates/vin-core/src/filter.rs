//! Query construction for `GET /components`.

use crate::enums::{Condition, SortOption, SortOrder, Status};

/// Filters, free-text search and sorting for the component listing.
///
/// Every filter is an exact match on the server. `search` matches brand,
/// model or serial number substrings, or the display name of the current
/// assignee of an in-use component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentFilter {
    pub type_id: Option<i64>,
    pub serial_number: Option<String>,
    pub status: Option<Status>,
    pub condition: Option<Condition>,
    pub brand: Option<String>,
    pub model_year: Option<i64>,
    pub ram: Option<i64>,
    pub processor_type: Option<String>,
    pub processor_cores: Option<i64>,
    pub screen_size: Option<String>,
    pub search: Option<String>,
    pub sort: Option<SortOption>,
    pub order: Option<SortOrder>,
}

impl ComponentFilter {
    /// Query pairs in a stable order: filters, then `search`, `sort`, `order`.
    /// Empty and whitespace-only values are left out.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let mut push = |key: &'static str, value: Option<String>| {
            if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                pairs.push((key, value));
            }
        };

        push("type_id", self.type_id.map(|v| v.to_string()));
        push("serial_number", self.serial_number.clone());
        push("status", self.status.map(|v| v.as_str().to_string()));
        push("condition", self.condition.map(|v| v.as_str().to_string()));
        push("brand", self.brand.clone());
        push("model_year", self.model_year.map(|v| v.to_string()));
        push("ram", self.ram.map(|v| v.to_string()));
        push("processor_type", self.processor_type.clone());
        push("processor_cores", self.processor_cores.map(|v| v.to_string()));
        push("screen_size", self.screen_size.clone());
        push("search", self.search.clone());
        push("sort", self.sort.map(|v| v.as_str().to_string()));
        push("order", self.order.map(|v| v.as_str().to_string()));
        pairs
    }

    /// Whether any filter (not counting sort/order) is set.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        self.query_pairs()
            .iter()
            .any(|(key, _)| !matches!(*key, "sort" | "order"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_filter_produces_no_pairs() {
        assert!(ComponentFilter::default().query_pairs().is_empty());
        assert!(!ComponentFilter::default().is_filtered());
    }

    #[test]
    fn pairs_follow_fixed_order_and_skip_blanks() {
        let filter = ComponentFilter {
            order: Some(SortOrder::Desc),
            sort: Some(SortOption::Ram),
            search: Some("thinkpad".into()),
            brand: Some("  ".into()),
            status: Some(Status::BeingUsed),
            type_id: Some(2),
            ram: Some(16),
            ..ComponentFilter::default()
        };
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("type_id", "2".to_string()),
                ("status", "Being Used".to_string()),
                ("ram", "16".to_string()),
                ("search", "thinkpad".to_string()),
                ("sort", "ram".to_string()),
                ("order", "desc".to_string()),
            ]
        );
        assert!(filter.is_filtered());
    }

    #[test]
    fn sort_alone_is_not_a_filter() {
        let filter = ComponentFilter {
            sort: Some(SortOption::ModelYear),
            order: Some(SortOrder::Asc),
            ..ComponentFilter::default()
        };
        assert!(!filter.is_filtered());
    }
}
