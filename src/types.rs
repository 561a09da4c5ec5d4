//! Core types for the pipeline
//!
//! Wire shapes (`Raw*`, [`CatalogEntry`], [`ListResponse`]) deserialize the
//! remote service's responses as-is, with optional fields and extra keys
//! tolerated. Validated shapes ([`DetailRecord`], [`Action`]) carry the
//! invariants the rest of the pipeline relies on; the only way to produce one
//! is through the projector's checked conversion.

use serde::{Deserialize, Serialize};

/// A lightweight pointer to a catalog record, as returned by the list endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stable slug assigned by the service
    pub index: String,
    /// Display name of the record
    pub name: String,
    /// Reference URI for the detail lookup, used verbatim
    pub url: String,
}

/// Response envelope of the list endpoint
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListResponse {
    /// Total number of records upstream (may exceed the fetched window)
    pub count: usize,
    /// The entries in this window
    pub results: Vec<CatalogEntry>,
}

/// Raw detail response, before schema validation
///
/// Every field is optional at this level; the projector decides what is
/// required and rejects the record otherwise.
#[derive(Clone, Debug, Deserialize)]
pub struct RawDetail {
    /// Record name
    #[serde(default)]
    pub name: Option<String>,
    /// Hit points; may be absent or null upstream
    #[serde(default)]
    pub hit_points: Option<i64>,
    /// Armor class in either of the service's two wire forms
    #[serde(default)]
    pub armor_class: Option<RawArmorClass>,
    /// Action list; may be absent or null upstream
    #[serde(default)]
    pub actions: Option<Vec<RawAction>>,
}

/// Armor class as the service encodes it: a bare integer, or a list of
/// components where the first element carries the value
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawArmorClass {
    /// Plain integer form
    Flat(i64),
    /// Component list form, e.g. `[{"type": "natural", "value": 15}]`
    Components(Vec<ArmorClassComponent>),
}

impl RawArmorClass {
    /// The effective armor class value, if the wire form carries one
    pub fn value(&self) -> Option<i64> {
        match self {
            RawArmorClass::Flat(value) => Some(*value),
            RawArmorClass::Components(components) => {
                components.first().and_then(|component| component.value)
            }
        }
    }
}

/// One element of the component-list armor class form
#[derive(Clone, Debug, Deserialize)]
pub struct ArmorClassComponent {
    /// The armor class value of this component
    #[serde(default)]
    pub value: Option<i64>,
}

/// Raw action entry, before schema validation
#[derive(Clone, Debug, Deserialize)]
pub struct RawAction {
    /// Action name
    #[serde(default)]
    pub name: Option<String>,
    /// Action description (wire field `desc`)
    #[serde(default)]
    pub desc: Option<String>,
}

/// A validated, projected record; the unit of the pipeline result
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    /// Record name, unique within a run
    pub name: String,
    /// Hit points, non-negative
    pub hit_points: u32,
    /// Armor class, non-negative
    pub armor_class: u32,
    /// Projected actions, in upstream order
    pub actions: Vec<Action>,
}

/// A projected action, keeping only name and description
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Action name
    pub name: String,
    /// Action description; serialized as `desc` per the output contract
    #[serde(rename = "desc")]
    pub description: String,
}

/// Pipeline stages, used to report where a run failed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Fetching the catalog window
    List,
    /// Sampling the window
    Select,
    /// Resolving detail records
    Resolve,
    /// Persisting the result
    Write,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::List => "list",
            Stage::Select => "select",
            Stage::Resolve => "resolve",
            Stage::Write => "write",
        };
        f.write_str(name)
    }
}

/// Terminal outcome of a successful run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The pipeline ran to completion and wrote the artifact
    Completed,
    /// The artifact already existed; nothing was fetched or written
    AlreadyComplete,
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_response_deserializes_wire_shape() {
        let body = r#"{
            "count": 334,
            "results": [
                {"index": "goblin", "name": "Goblin", "url": "/api/2014/monsters/goblin"}
            ]
        }"#;
        let response: ListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.count, 334);
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].name, "Goblin");
        assert_eq!(response.results[0].url, "/api/2014/monsters/goblin");
    }

    #[test]
    fn raw_detail_tolerates_missing_and_extra_fields() {
        let body = r#"{"name": "Goblin", "size": "Small", "alignment": "neutral evil"}"#;
        let raw: RawDetail = serde_json::from_str(body).unwrap();
        assert_eq!(raw.name.as_deref(), Some("Goblin"));
        assert!(raw.hit_points.is_none());
        assert!(raw.armor_class.is_none());
        assert!(raw.actions.is_none());
    }

    #[test]
    fn raw_detail_tolerates_null_fields() {
        let body = r#"{"name": "Goblin", "hit_points": null, "armor_class": null, "actions": null}"#;
        let raw: RawDetail = serde_json::from_str(body).unwrap();
        assert!(raw.hit_points.is_none());
        assert!(raw.armor_class.is_none());
        assert!(raw.actions.is_none());
    }

    #[test]
    fn armor_class_accepts_flat_integer() {
        let raw: RawDetail = serde_json::from_str(r#"{"armor_class": 15}"#).unwrap();
        assert_eq!(raw.armor_class.unwrap().value(), Some(15));
    }

    #[test]
    fn armor_class_accepts_component_list() {
        let body = r#"{"armor_class": [{"type": "armor", "value": 15, "armor": []}]}"#;
        let raw: RawDetail = serde_json::from_str(body).unwrap();
        assert_eq!(raw.armor_class.unwrap().value(), Some(15));
    }

    #[test]
    fn empty_armor_class_list_has_no_value() {
        let raw: RawDetail = serde_json::from_str(r#"{"armor_class": []}"#).unwrap();
        assert_eq!(raw.armor_class.unwrap().value(), None);
    }

    #[test]
    fn action_serializes_description_as_desc() {
        let action = Action {
            name: "Scimitar".to_string(),
            description: "Melee Weapon Attack".to_string(),
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["desc"], "Melee Weapon Attack");
        assert!(json.get("description").is_none());
    }
}
