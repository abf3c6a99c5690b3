use crate::{
    action::{Action, EntityType},
    client::{ApiRequest, GROUPS_PATH, Method, Transport},
    error::Result,
    payload::GroupBody,
};

use super::{Outcome, Provisioner, require_id};

impl<T> Provisioner<T>
where
    T: Transport,
{
    pub fn create_group(&self, name: &str, description: &str) -> Result<Outcome> {
        let body = Self::to_body(&GroupBody::create(name, description))?;
        let request = ApiRequest::new(Method::Post, GROUPS_PATH, Some(body));

        self.execute(request, Action::Create, EntityType::Group, name, |response| {
            response.is_ok_or_created().then(|| response.id()).flatten()
        })
    }

    /// Replaces the profile of `group_id`.
    ///
    /// The summary records the configured name, or `group_id` when no name is
    /// configured.
    pub fn update_group(
        &self,
        group_id: Option<&str>,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Outcome> {
        let Some(group_id) = require_id(group_id, Action::Update, "group_id") else {
            return Ok(Outcome::Skipped);
        };

        let body = Self::to_body(&GroupBody::update(name, description))?;
        let request = ApiRequest::new(Method::Put, format!("{GROUPS_PATH}/{group_id}"), Some(body));

        self.execute(
            request,
            Action::Update,
            EntityType::Group,
            name.unwrap_or(group_id),
            |response| response.is_ok_or_created().then(|| group_id.to_string()),
        )
    }

    /// Deletes `group_id`. The id doubles as the recorded name.
    pub fn delete_group(&self, group_id: Option<&str>) -> Result<Outcome> {
        let Some(group_id) = require_id(group_id, Action::Delete, "group_id") else {
            return Ok(Outcome::Skipped);
        };

        let request = ApiRequest::new(Method::Delete, format!("{GROUPS_PATH}/{group_id}"), None);

        self.execute(request, Action::Delete, EntityType::Group, group_id, |response| {
            response.is_no_content().then(|| group_id.to_string())
        })
    }
}
