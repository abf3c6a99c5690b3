use clap::Parser;
use okta_groups::{
    Action, EntityType, config::DEFAULT_INPUT_FILE, logging, process_config, provisioner,
    settings::{self, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, Settings},
    summary::DEFAULT_SUMMARY_FILE,
};
use std::{error::Error, path::PathBuf, process, time::Duration};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Operation to apply to every listed entry
    #[arg(long, value_enum)]
    action: Action,

    /// Kind of entity to operate on
    #[arg(long = "type", value_enum)]
    entity_type: EntityType,

    /// JSON document listing the groups and group rules
    #[arg(long, value_name = "PATH", default_value = DEFAULT_INPUT_FILE)]
    input_file: PathBuf,

    /// Append-only log of successful operations
    #[arg(long, value_name = "PATH", default_value = DEFAULT_SUMMARY_FILE)]
    summary_file: PathBuf,

    /// Base URL of the Okta org
    #[arg(long, env = "OKTA_DOMAIN", value_name = "URL", default_value = DEFAULT_BASE_URL)]
    okta_domain: String,

    /// Per-request timeout; requests are not retried
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Log request details and group rule expressions
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let Some(api_token) = settings::api_token_from_env() else {
        println!(
            "Error: API token is missing. Please set the {} environment variable.",
            settings::API_TOKEN_ENV
        );
        process::exit(1);
    };

    let args = Args::parse();
    logging::init_tracing(args.verbose);

    let settings = Settings::new(args.okta_domain, api_token)
        .with_timeout(Duration::from_secs(args.timeout_secs))
        .with_summary_file(args.summary_file)
        .with_verbose(args.verbose);

    let provisioner = provisioner(&settings)?;
    process_config(&provisioner, &args.input_file, args.action, args.entity_type)?;

    Ok(())
}
