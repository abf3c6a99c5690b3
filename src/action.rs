use std::fmt::{self, Display};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, ValueEnum, Eq, PartialEq, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Update,
    Delete,
}

impl Action {
    /// Top-level key of the config document holding entries for this action.
    pub fn key(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Serialize, Deserialize, ValueEnum, Eq, PartialEq, Debug, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum EntityType {
    Group,
    GroupRule,
}

impl EntityType {
    /// Name as typed on the command line; also the prefix of the summary keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Group => "group",
            EntityType::GroupRule => "group-rule",
        }
    }

    /// Key of the entry list inside an action section of the config document.
    pub fn section_key(&self) -> &'static str {
        match self {
            EntityType::Group => "groups",
            EntityType::GroupRule => "group_rules",
        }
    }
}

impl Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
