//! Walks the config document and runs one operation per entry, in order.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    action::{Action, EntityType},
    client::Transport,
    config::{GroupChange, GroupEntry, RuleEntry, entries, load_json, present},
    error::Result,
    ops::{Outcome, Provisioner},
};

/// Tally of a run. Failed entries never stop the run.
#[derive(Eq, PartialEq, Debug, Default, Clone, Copy)]
pub struct RunReport {
    pub recorded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunReport {
    fn count(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Skipped => self.skipped += 1,
            Outcome::Recorded(_) => self.recorded += 1,
            Outcome::Failed { .. } => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.recorded + self.skipped + self.failed
    }
}

fn decode<D>(entry: &Value) -> Option<D>
where
    D: DeserializeOwned,
{
    serde_json::from_value(entry.clone()).ok()
}

fn skip_invalid(entity_type: EntityType, entry: &Value) -> Outcome {
    let noun = match entity_type {
        EntityType::Group => "group",
        EntityType::GroupRule => "group rule",
    };
    println!("Skipping invalid {noun} entry: {entry}");
    tracing::debug!(%entity_type, "entry skipped");
    Outcome::Skipped
}

/// Loads `path` and applies `action` to every `entity_type` entry it lists.
///
/// A config file that is not valid JSON stops the run before anything is sent.
pub fn process_config<T>(
    provisioner: &Provisioner<T>,
    path: &Path,
    action: Action,
    entity_type: EntityType,
) -> Result<RunReport>
where
    T: Transport,
{
    let config = load_json(path)?;
    let entries = entries(&config, action, entity_type);
    tracing::info!(%action, %entity_type, count = entries.len(), file = %path.display(), "processing config");

    let mut report = RunReport::default();
    for entry in entries {
        let outcome = process_entry(provisioner, action, entity_type, entry)?;
        report.count(&outcome);
    }

    tracing::info!(
        recorded = report.recorded,
        skipped = report.skipped,
        failed = report.failed,
        "run finished"
    );
    Ok(report)
}

fn process_entry<T>(
    provisioner: &Provisioner<T>,
    action: Action,
    entity_type: EntityType,
    entry: &Value,
) -> Result<Outcome>
where
    T: Transport,
{
    match (action, entity_type) {
        (Action::Create, EntityType::Group) => {
            let group = decode::<GroupEntry>(entry);
            match group.as_ref().and_then(|g| Some((g.name()?, g.description()?))) {
                Some((name, description)) => provisioner.create_group(name, description),
                None => Ok(skip_invalid(entity_type, entry)),
            }
        }
        (Action::Update, EntityType::Group) => match decode::<GroupChange>(entry) {
            Some(group) => provisioner.update_group(
                group.group_id.as_deref(),
                group.name.as_deref(),
                group.description.as_deref(),
            ),
            None => Ok(skip_invalid(entity_type, entry)),
        },
        (Action::Delete, EntityType::Group) => match decode::<GroupChange>(entry) {
            Some(group) => provisioner.delete_group(group.group_id.as_deref()),
            None => Ok(skip_invalid(entity_type, entry)),
        },
        (Action::Create, EntityType::GroupRule) => {
            let rule = decode::<RuleEntry>(entry);
            let fields = rule.as_ref().and_then(|r| {
                Some((
                    present(&r.name)?,
                    present(&r.attribute)?,
                    present(&r.value)?,
                    r.group_ids.as_deref()?,
                ))
            });
            match fields {
                Some((name, attribute, value, group_ids)) => {
                    provisioner.create_group_rule(name, attribute, value, group_ids)
                }
                None => Ok(skip_invalid(entity_type, entry)),
            }
        }
        (Action::Update, EntityType::GroupRule) => {
            let rule = decode::<RuleEntry>(entry);
            // Empty strings are sent as given; only absent fields are skipped.
            let expression = rule
                .as_ref()
                .and_then(|r| Some((r.attribute.as_deref()?, r.value.as_deref()?)));
            match (&rule, expression) {
                (Some(rule), Some((attribute, value))) => provisioner.update_group_rule(
                    rule.rule_id.as_deref(),
                    rule.name.as_deref(),
                    attribute,
                    value,
                    rule.group_ids.as_deref(),
                ),
                _ => Ok(skip_invalid(entity_type, entry)),
            }
        }
        (Action::Delete, EntityType::GroupRule) => match decode::<RuleEntry>(entry) {
            Some(rule) => provisioner.delete_group_rule(rule.rule_id.as_deref()),
            None => Ok(skip_invalid(entity_type, entry)),
        },
    }
}
