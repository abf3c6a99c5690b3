//! Create, update and delete operations for groups and group rules.
//!
//! Every operation issues at most one request. A rejected request is reported
//! on stdout and the caller moves on to the next entry; only a failure to
//! write the summary log is returned as an error.

mod group;
mod rule;

use serde::Serialize;

use crate::{
    action::{Action, EntityType},
    client::{ApiRequest, ApiResponse, Transport},
    error::Result,
    summary::{SummaryLog, SummaryRecord},
};

/// What happened to a single config entry.
#[derive(PartialEq, Debug, Clone)]
pub enum Outcome {
    /// Nothing was sent.
    Skipped,
    /// The provider accepted the request and the summary log gained this record.
    Recorded(SummaryRecord),
    /// The provider rejected the request, or it never reached the provider.
    Failed { status: Option<u16>, body: String },
}

pub struct Provisioner<T> {
    transport: T,
    summary: SummaryLog,
    verbose: bool,
}

impl<T> Provisioner<T>
where
    T: Transport,
{
    pub fn new(transport: T, summary: SummaryLog) -> Self {
        Self {
            transport,
            summary,
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn summary(&self) -> &SummaryLog {
        &self.summary
    }

    fn to_body<B>(body: &B) -> Result<serde_json::Value>
    where
        B: Serialize,
    {
        serde_json::to_value(body).map_err(From::from)
    }

    /// Sends `request` and records `name` with the id returned by `accept`.
    ///
    /// `accept` returning `None` marks the response as a failure.
    fn execute<F>(
        &self,
        request: ApiRequest,
        action: Action,
        entity_type: EntityType,
        name: &str,
        accept: F,
    ) -> Result<Outcome>
    where
        F: FnOnce(&ApiResponse) -> Option<String>,
    {
        let noun = match entity_type {
            EntityType::Group => "group",
            EntityType::GroupRule => "rule",
        };

        let response = match self.transport.send(&request) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(method = %request.method, path = %request.path, error = %e, "request failed");
                println!("Failed to {action} {noun}: {e}");
                return Ok(Outcome::Failed {
                    status: None,
                    body: e.to_string(),
                });
            }
        };

        match accept(&response) {
            Some(id) => {
                tracing::info!(%action, %entity_type, entity = name, id = %id, "operation succeeded");
                let record = self.summary.record(action, entity_type, name, id)?;
                Ok(Outcome::Recorded(record))
            }
            None => {
                tracing::warn!(%action, %entity_type, entity = name, status = response.status, "operation rejected");
                println!("Failed to {action} {noun}: {}", response.body);
                Ok(Outcome::Failed {
                    status: Some(response.status),
                    body: response.body,
                })
            }
        }
    }
}

/// The identifier if present, or a warning that the entry is skipped.
fn require_id<'a>(id: Option<&'a str>, action: Action, field: &str) -> Option<&'a str> {
    match id.filter(|id| !id.is_empty()) {
        Some(id) => Some(id),
        None => {
            println!("Skipping {action}: Missing `{field}`");
            tracing::debug!(%action, field, "entry skipped");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{client::Method, tests::FakeTransport};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn transport_failure_is_reported_not_raised() {
        let dir = tempdir().expect("Failed to create temp dir");
        let provisioner = Provisioner::new(
            FakeTransport::unreachable(),
            SummaryLog::new(dir.path().join("summary.json")),
        );

        let outcome = provisioner
            .delete_group(Some("g1"))
            .expect("Transport failure should not be an error");

        assert!(matches!(outcome, Outcome::Failed { status: None, .. }));
        assert_eq!(provisioner.transport().requests().len(), 1);
        assert!(provisioner.summary().entries().is_empty());
    }

    #[test]
    fn require_id_rejects_empty() {
        assert_eq!(require_id(Some(""), Action::Update, "group_id"), None);
        assert_eq!(require_id(None, Action::Delete, "rule_id"), None);
        assert_eq!(require_id(Some("r1"), Action::Delete, "rule_id"), Some("r1"));
    }

    #[test]
    fn rejected_response_keeps_body() {
        let dir = tempdir().expect("Failed to create temp dir");
        let body = r#"{"errorCode":"E0000007","errorSummary":"Not found"}"#;
        let provisioner = Provisioner::new(
            FakeTransport::new(vec![ApiResponse::new(404, body)]),
            SummaryLog::new(dir.path().join("summary.json")),
        );

        let outcome = provisioner
            .update_group(Some("g404"), Some("Ops"), None)
            .expect("Rejection should not be an error");

        assert_eq!(
            outcome,
            Outcome::Failed {
                status: Some(404),
                body: body.to_string()
            }
        );
        assert_eq!(provisioner.transport().requests()[0].method, Method::Put);
    }
}
