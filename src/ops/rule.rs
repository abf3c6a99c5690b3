use crate::{
    action::{Action, EntityType},
    client::{ApiRequest, GROUP_RULES_PATH, Method, Transport},
    error::Result,
    payload::RuleBody,
};

use super::{Outcome, Provisioner, require_id};

impl<T> Provisioner<T>
where
    T: Transport,
{
    fn log_expression(&self, rule: &str, body: &RuleBody<'_>) {
        if self.verbose {
            tracing::info!(rule, expression = body.expression(), "group rule expression");
        } else {
            tracing::debug!(rule, expression = body.expression(), "group rule expression");
        }
    }

    pub fn create_group_rule(
        &self,
        name: &str,
        attribute: &str,
        value: &str,
        group_ids: &[String],
    ) -> Result<Outcome> {
        let rule = RuleBody::create(name, attribute, value, group_ids);
        self.log_expression(name, &rule);

        let request = ApiRequest::new(Method::Post, GROUP_RULES_PATH, Some(Self::to_body(&rule)?));

        self.execute(request, Action::Create, EntityType::GroupRule, name, |response| {
            response.is_ok_or_created().then(|| response.id()).flatten()
        })
    }

    /// Replaces `rule_id` with a rule built from `attribute` and `value`.
    ///
    /// The summary records the configured name, or `rule_id` when no name is
    /// configured.
    pub fn update_group_rule(
        &self,
        rule_id: Option<&str>,
        name: Option<&str>,
        attribute: &str,
        value: &str,
        group_ids: Option<&[String]>,
    ) -> Result<Outcome> {
        let Some(rule_id) = require_id(rule_id, Action::Update, "rule_id") else {
            return Ok(Outcome::Skipped);
        };

        let rule = RuleBody::update(name, attribute, value, group_ids);
        let recorded_name = name.unwrap_or(rule_id);
        self.log_expression(recorded_name, &rule);

        let request = ApiRequest::new(
            Method::Put,
            format!("{GROUP_RULES_PATH}/{rule_id}"),
            Some(Self::to_body(&rule)?),
        );

        self.execute(
            request,
            Action::Update,
            EntityType::GroupRule,
            recorded_name,
            |response| response.is_ok_or_created().then(|| rule_id.to_string()),
        )
    }

    pub fn delete_group_rule(&self, rule_id: Option<&str>) -> Result<Outcome> {
        let Some(rule_id) = require_id(rule_id, Action::Delete, "rule_id") else {
            return Ok(Outcome::Skipped);
        };

        let request = ApiRequest::new(Method::Delete, format!("{GROUP_RULES_PATH}/{rule_id}"), None);

        self.execute(request, Action::Delete, EntityType::GroupRule, rule_id, |response| {
            response.is_no_content().then(|| rule_id.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        client::{ApiResponse, Method},
        ops::{Outcome, Provisioner},
        summary::SummaryLog,
        tests::FakeTransport,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::{TempDir, tempdir};

    fn provisioner(responses: Vec<ApiResponse>) -> (TempDir, Provisioner<FakeTransport>) {
        let dir = tempdir().expect("Failed to create temp dir");
        let summary = SummaryLog::new(dir.path().join("okta_summary.json"));
        let provisioner =
            Provisioner::new(FakeTransport::new(responses), summary).with_verbose(true);
        (dir, provisioner)
    }

    #[test]
    fn create_sends_contains_expression() {
        let (_dir, provisioner) = provisioner(vec![ApiResponse::new(200, r#"{"id":"r1"}"#)]);
        let groups = vec!["g1".to_string()];

        provisioner
            .create_group_rule("Sales rule", "department", "Sales", &groups)
            .expect("Failed to create rule");

        let requests = provisioner.transport().requests();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].path, "/api/v1/groups/rules");
        let body = requests[0].body.as_ref().expect("Rule create should carry a body");
        assert_eq!(body["type"], "group_rule");
        assert_eq!(
            body["conditions"]["expression"]["value"],
            r#"Arrays.contains(user.department, "Sales")"#
        );
        assert_eq!(body["actions"]["assignUserToGroups"]["groupIds"], json!(["g1"]));

        let entries = provisioner.summary().entries();
        assert_eq!(entries[0]["action"], "create");
        assert_eq!(entries[0]["group-rule_name"], "Sales rule");
        assert_eq!(entries[0]["group-rule_id"], "r1");
    }

    #[test]
    fn update_puts_to_rule_path() {
        let (_dir, provisioner) = provisioner(vec![ApiResponse::new(200, r#"{"id":"r1"}"#)]);
        let groups = vec!["g1".to_string(), "g2".to_string()];

        provisioner
            .update_group_rule(
                Some("r1"),
                Some("Sales rule"),
                "department",
                "Sales",
                Some(groups.as_slice()),
            )
            .expect("Failed to update rule");

        let requests = provisioner.transport().requests();
        assert_eq!(requests[0].method, Method::Put);
        assert_eq!(requests[0].path, "/api/v1/groups/rules/r1");
        let body = requests[0].body.as_ref().expect("Rule update should carry a body");
        assert!(body.get("type").is_none());
        assert_eq!(body["name"], "Sales rule");

        let entries = provisioner.summary().entries();
        assert_eq!(entries[0]["action"], "update");
        assert_eq!(entries[0]["group-rule_id"], "r1");
    }

    #[test]
    fn update_without_id_sends_nothing() {
        let (_dir, provisioner) = provisioner(vec![]);

        let outcome = provisioner
            .update_group_rule(Some(""), Some("Sales rule"), "department", "Sales", None)
            .expect("Skip should not fail");

        assert_eq!(outcome, Outcome::Skipped);
        assert!(provisioner.transport().requests().is_empty());
    }

    #[test]
    fn delete_records_id_twice() {
        let (_dir, provisioner) = provisioner(vec![ApiResponse::new(204, "")]);

        provisioner
            .delete_group_rule(Some("r9"))
            .expect("Failed to delete rule");

        let requests = provisioner.transport().requests();
        assert_eq!(requests[0].path, "/api/v1/groups/rules/r9");

        let entries = provisioner.summary().entries();
        assert_eq!(entries[0]["group-rule_name"], "r9");
        assert_eq!(entries[0]["group-rule_id"], "r9");
    }

    #[test]
    fn failed_create_leaves_summary_untouched() {
        let (_dir, provisioner) = provisioner(vec![ApiResponse::new(400, "bad expression")]);

        let outcome = provisioner
            .create_group_rule("Broken", "department", "Sales", &[])
            .expect("Rejection should not be an error");

        assert!(matches!(outcome, Outcome::Failed { status: Some(400), .. }));
        assert!(provisioner.summary().entries().is_empty());
    }
}
