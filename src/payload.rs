//! Request bodies for the groups and group-rules endpoints.

use serde::Serialize;

pub const GROUP_TYPE: &str = "OKTA_GROUP";
pub const RULE_TYPE: &str = "group_rule";
pub const RULE_STATUS: &str = "ACTIVE";
pub const EXPRESSION_TYPE: &str = "urn:okta:expression:1.0";

/// Membership condition matching users whose `attribute` contains `value`.
pub fn contains_expression(attribute: &str, value: &str) -> String {
    format!("Arrays.contains(user.{attribute}, \"{value}\")")
}

#[derive(Serialize, Eq, PartialEq, Debug, Clone)]
pub struct GroupProfile<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
}

#[derive(Serialize, Eq, PartialEq, Debug, Clone)]
pub struct GroupBody<'a> {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    pub profile: GroupProfile<'a>,
}

impl<'a> GroupBody<'a> {
    pub fn create(name: &'a str, description: &'a str) -> Self {
        Self {
            kind: Some(GROUP_TYPE),
            profile: GroupProfile {
                name: Some(name),
                description: Some(description),
            },
        }
    }

    pub fn update(name: Option<&'a str>, description: Option<&'a str>) -> Self {
        Self {
            kind: None,
            profile: GroupProfile { name, description },
        }
    }
}

#[derive(Serialize, Eq, PartialEq, Debug, Clone)]
pub struct Expression {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Serialize, Eq, PartialEq, Debug, Clone)]
pub struct Conditions {
    pub expression: Expression,
}

#[derive(Serialize, Eq, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AssignUserToGroups<'a> {
    pub group_ids: Option<&'a [String]>,
}

#[derive(Serialize, Eq, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RuleActions<'a> {
    pub assign_user_to_groups: AssignUserToGroups<'a>,
}

#[derive(Serialize, Eq, PartialEq, Debug, Clone)]
pub struct RuleBody<'a> {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    pub name: Option<&'a str>,
    pub status: &'static str,
    pub conditions: Conditions,
    pub actions: RuleActions<'a>,
}

impl<'a> RuleBody<'a> {
    fn build(
        kind: Option<&'static str>,
        name: Option<&'a str>,
        attribute: &str,
        value: &str,
        group_ids: Option<&'a [String]>,
    ) -> Self {
        Self {
            kind,
            name,
            status: RULE_STATUS,
            conditions: Conditions {
                expression: Expression {
                    value: contains_expression(attribute, value),
                    kind: EXPRESSION_TYPE,
                },
            },
            actions: RuleActions {
                assign_user_to_groups: AssignUserToGroups { group_ids },
            },
        }
    }

    pub fn create(name: &'a str, attribute: &str, value: &str, group_ids: &'a [String]) -> Self {
        Self::build(Some(RULE_TYPE), Some(name), attribute, value, Some(group_ids))
    }

    pub fn update(
        name: Option<&'a str>,
        attribute: &str,
        value: &str,
        group_ids: Option<&'a [String]>,
    ) -> Self {
        Self::build(None, name, attribute, value, group_ids)
    }

    pub fn expression(&self) -> &str {
        &self.conditions.expression.value
    }
}
