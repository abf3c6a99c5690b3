//! Append-only record of the operations performed against the provider.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Local;
use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_json::{Value, ser::PrettyFormatter};

use crate::{
    action::{Action, EntityType},
    config::load_json,
    error::Result,
};

pub const DEFAULT_SUMMARY_FILE: &str = "okta_summary.json";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SummaryRecord {
    pub action: Action,
    pub entity_type: EntityType,
    pub name: String,
    pub id: String,
    pub timestamp: String,
}

impl SummaryRecord {
    pub fn new<N, I>(action: Action, entity_type: EntityType, name: N, id: I) -> Self
    where
        N: Into<String>,
        I: Into<String>,
    {
        Self {
            action,
            entity_type,
            name: name.into(),
            id: id.into(),
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

// The name and id keys carry the entity type, e.g. `group-rule_id`.
impl Serialize for SummaryRecord {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("action", &self.action)?;
        map.serialize_entry(&format!("{}_name", self.entity_type), &self.name)?;
        map.serialize_entry(&format!("{}_id", self.entity_type), &self.id)?;
        map.serialize_entry("timestamp", &self.timestamp)?;
        map.end()
    }
}

/// Serializes with four-space indentation.
pub fn to_pretty_string<T>(value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[derive(Debug, Clone)]
pub struct SummaryLog {
    path: PathBuf,
}

impl Default for SummaryLog {
    fn default() -> Self {
        Self::new(DEFAULT_SUMMARY_FILE)
    }
}

impl SummaryLog {
    pub fn new<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Existing entries; an unreadable log is treated as empty.
    pub fn entries(&self) -> Vec<Value> {
        match load_json(&self.path) {
            Ok(Value::Array(entries)) => entries,
            Ok(Value::Object(map)) if map.is_empty() => Vec::new(),
            Ok(_) => {
                tracing::warn!(path = %self.path.display(), "summary log is not an array, starting a new one");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "discarding unreadable summary log");
                Vec::new()
            }
        }
    }

    /// Appends one record and rewrites the whole file.
    pub fn record<N, I>(
        &self,
        action: Action,
        entity_type: EntityType,
        name: N,
        id: I,
    ) -> Result<SummaryRecord>
    where
        N: Into<String>,
        I: Into<String>,
    {
        let record = SummaryRecord::new(action, entity_type, name, id);

        let mut entries = self.entries();
        entries.push(serde_json::to_value(&record)?);
        fs::write(&self.path, to_pretty_string(&entries)?)?;

        tracing::debug!(path = %self.path.display(), total = entries.len(), "summary log updated");
        println!("Configuration saved:\n{}", to_pretty_string(&record)?);

        Ok(record)
    }
}
