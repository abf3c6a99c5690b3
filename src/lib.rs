pub mod action;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod ops;
pub mod payload;
pub mod settings;
pub mod summary;

pub use action::{Action, EntityType};
pub use client::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};
pub use dispatch::{RunReport, process_config};
pub use error::{Error, Result};
pub use ops::{Outcome, Provisioner};
pub use settings::Settings;
pub use summary::{SummaryLog, SummaryRecord};

/// Builds the HTTP-backed provisioner described by `settings`.
pub fn provisioner(settings: &Settings) -> Result<Provisioner<HttpTransport>> {
    let transport = HttpTransport::new(settings)?;
    let summary = SummaryLog::new(settings.summary_file.clone());
    Ok(Provisioner::new(transport, summary).with_verbose(settings.verbose))
}
