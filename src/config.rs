//! Loading of the declarative input document and the shapes of its entries.
//!
//! The document is kept as a raw [`Value`] so that a single malformed entry
//! can be skipped without rejecting the whole file. Entries are decoded one
//! at a time by the dispatcher.

use std::{
    fs::{self, OpenOptions},
    path::Path,
};

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::{
    action::{Action, EntityType},
    error::{Error, Result},
};

pub const DEFAULT_INPUT_FILE: &str = "okta_config.json";

/// Reads `path` as JSON. A missing or empty file yields an empty object.
pub fn load_json(path: &Path) -> Result<Value> {
    let is_populated = fs::metadata(path)
        .map(|meta| meta.is_file() && meta.len() > 0)
        .unwrap_or(false);
    if !is_populated {
        return Ok(Value::Object(Map::new()));
    }

    let file = OpenOptions::new().read(true).open(path)?;
    serde_json::from_reader(file).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Returns `config[action][groups|group_rules]`, or nothing when any level is absent.
pub fn entries<'a>(config: &'a Value, action: Action, entity_type: EntityType) -> &'a [Value] {
    config
        .get(action.key())
        .and_then(|section| section.get(entity_type.section_key()))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Reads a string field, accepting numbers and booleans in their JSON spelling.
///
/// Values of any other shape read as absent, leaving the decision to skip an
/// entry to the presence checks.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// A `create.groups` entry. Both spellings of each field are accepted.
#[derive(Deserialize, Eq, PartialEq, Debug, Default)]
pub struct GroupEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    group_name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    group_description: Option<String>,
}

impl GroupEntry {
    pub fn name(&self) -> Option<&str> {
        present(&self.name).or_else(|| present(&self.group_name))
    }

    pub fn description(&self) -> Option<&str> {
        present(&self.description).or_else(|| present(&self.group_description))
    }
}

/// An `update.groups` or `delete.groups` entry.
#[derive(Deserialize, Eq, PartialEq, Debug, Default)]
pub struct GroupChange {
    #[serde(default, deserialize_with = "scalar_string")]
    pub group_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A `group_rules` entry, for any action.
#[derive(Deserialize, Eq, PartialEq, Debug, Default)]
pub struct RuleEntry {
    #[serde(default, deserialize_with = "scalar_string")]
    pub rule_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub attribute: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub value: Option<String>,
    #[serde(default, rename = "groupIds")]
    pub group_ids: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_empty_object() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = load_json(&dir.path().join("absent.json")).expect("Missing file should load");
        assert_eq!(config, json!({}));
    }

    #[test]
    fn empty_file_is_empty_object() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("empty.json");
        fs::write(&path, "").expect("Failed to write empty file");
        assert_eq!(load_json(&path).expect("Empty file should load"), json!({}));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").expect("Failed to write broken file");
        match load_json(&path) {
            Err(Error::Parse { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("Expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn entries_default_to_empty() {
        let config = json!({ "create": { "groups": [{ "name": "Ops" }] } });
        assert_eq!(entries(&config, Action::Create, EntityType::Group).len(), 1);
        assert!(entries(&config, Action::Create, EntityType::GroupRule).is_empty());
        assert!(entries(&config, Action::Delete, EntityType::Group).is_empty());
        let not_a_list = json!({ "update": { "groups": "nope" } });
        assert!(entries(&not_a_list, Action::Update, EntityType::Group).is_empty());
    }

    #[test]
    fn group_entry_accepts_aliases() {
        let entry: GroupEntry = serde_json::from_value(json!({
            "group_name": "Engineering",
            "description": "",
            "group_description": "Eng team"
        }))
        .expect("Failed to decode group entry");
        assert_eq!(entry.name(), Some("Engineering"));
        assert_eq!(entry.description(), Some("Eng team"));

        let entry: GroupEntry =
            serde_json::from_value(json!({ "name": "Sales" })).expect("Failed to decode group entry");
        assert_eq!(entry.description(), None);
    }

    #[test]
    fn rule_entry_reads_group_ids() {
        let entry: RuleEntry = serde_json::from_value(json!({
            "name": "Sales rule",
            "attribute": "department",
            "value": "Sales",
            "groupIds": ["g1", "g2"]
        }))
        .expect("Failed to decode rule entry");
        assert_eq!(entry.group_ids, Some(vec!["g1".to_string(), "g2".to_string()]));
        assert_eq!(entry.rule_id, None);
    }

    #[test]
    fn ids_accept_scalars() {
        let group: GroupChange = serde_json::from_value(json!({ "group_id": 42, "name": "x" }))
            .expect("Failed to decode group change");
        assert_eq!(group.group_id.as_deref(), Some("42"));

        let rule: RuleEntry = serde_json::from_value(json!({
            "rule_id": "r1",
            "attribute": "level",
            "value": 3,
            "groupIds": ["g1"]
        }))
        .expect("Failed to decode rule entry");
        assert_eq!(rule.value.as_deref(), Some("3"));

        let rule: RuleEntry = serde_json::from_value(json!({ "rule_id": { "nested": true } }))
            .expect("Failed to decode rule entry");
        assert_eq!(rule.rule_id, None);
    }
}
