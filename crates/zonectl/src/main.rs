// # zonectl - apply one DNS record change
//
// Thin integration layer: reads the record and action from environment
// variables, wires the Route53 zone service into a `ZoneClient` and submits
// a single CREATE or DELETE. All conversion logic lives in zone-core.
//
// ## Configuration
//
// ### Record
// - `ZONE_ACTION`: create or delete
// - `ZONE_RECORD_NAME`: Fully-qualified record name
// - `ZONE_RECORD_TYPE`: Record type (A, CNAME, TXT, MX, ...)
// - `ZONE_RECORD_TARGETS`: Comma-separated targets (only the first is used)
//
// ### Zone (environment or `$ZONE_SECRETS_DIR/<KEY>`)
// - `AWS_ZONE_ID`, `AWS_HOSTED_ZONE_ID`, `AWS_LOAD_BALANCER_HOST`
// - `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`, `AWS_SESSION_TOKEN`: optional
//   static credentials; without them the AWS default credential chain is used
// - `ZONE_MODE=dry-run`: Log the change instead of sending it
//
// ### Logging
// - `ZONE_LOG_LEVEL`: trace, debug, info, warn, error
//
// ## Example
//
// ```bash
// export AWS_ZONE_ID=Z1 AWS_HOSTED_ZONE_ID=Z35SXDOTRQ7X7K
// export AWS_LOAD_BALANCER_HOST=lb-123.us-east-1.elb.amazonaws.com
// export ZONE_ACTION=create ZONE_RECORD_NAME=www.example.com
// export ZONE_RECORD_TYPE=A ZONE_RECORD_TARGETS=lb-123.us-east-1.elb.amazonaws.com
//
// zonectl
// ```

use anyhow::{Context, Result};
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;
use zone_core::{DeclarativeRecord, EnvOrFileSource, ZoneClient};
use zone_provider_route53::Route53ZoneService;

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy)]
enum ZonectlExitCode {
    /// Change accepted
    Success = 0,
    /// Configuration error or invalid record
    ConfigError = 1,
    /// The provider rejected the change or could not be reached
    RuntimeError = 2,
}

impl From<ZonectlExitCode> for ExitCode {
    fn from(code: ZonectlExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Action requested on the command line environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Create,
    Delete,
}

/// Application configuration
struct Config {
    action: Action,
    record: DeclarativeRecord,
    log_level: Level,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        let action = match env::var("ZONE_ACTION")
            .context("ZONE_ACTION is required (create or delete)")?
            .to_lowercase()
            .as_str()
        {
            "create" => Action::Create,
            "delete" => Action::Delete,
            other => anyhow::bail!("ZONE_ACTION '{}' is not valid. Valid actions: create, delete", other),
        };

        let name = env::var("ZONE_RECORD_NAME").context("ZONE_RECORD_NAME is required")?;
        let record_type = env::var("ZONE_RECORD_TYPE").context("ZONE_RECORD_TYPE is required")?;
        let targets = parse_targets(&env::var("ZONE_RECORD_TARGETS").unwrap_or_default());
        let record = DeclarativeRecord::new(name, record_type.as_str(), targets)?;

        let log_level = parse_log_level(
            &env::var("ZONE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        )?;

        Ok(Self {
            action,
            record,
            log_level,
        })
    }
}

fn parse_targets(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_log_level(raw: &str) -> Result<Level> {
    match raw.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "ZONE_LOG_LEVEL '{}' is not valid. Valid levels: trace, debug, info, warn, error",
            raw
        ),
    }
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return ZonectlExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return ZonectlExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return ZonectlExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        let source = EnvOrFileSource::new();
        let client = match build_client(&source).await {
            Ok(client) => client,
            Err(e) => {
                error!("Configuration error: {}", e);
                return ZonectlExitCode::ConfigError;
            }
        };

        match run(&client, &config).await {
            Ok(()) => ZonectlExitCode::Success,
            Err(e) => {
                error!("Change failed: {:#}", e);
                ZonectlExitCode::RuntimeError
            }
        }
    })
    .into()
}

/// Wire the Route53 service into a client for the configured zone
async fn build_client(source: &EnvOrFileSource) -> zone_core::Result<ZoneClient> {
    let service = Route53ZoneService::from_source(source).await?;
    ZoneClient::from_source(source, Box::new(service))
}

/// Submit the configured change
async fn run(client: &ZoneClient, config: &Config) -> Result<()> {
    let record = &config.record;
    info!(
        "{:?} {} ({}) in zone {}",
        config.action,
        record.name(),
        record.record_type(),
        client.context().zone_id()
    );
    if record.targets().len() > 1 {
        info!("Only the first of {} targets is used", record.targets().len());
    }

    let change = match config.action {
        Action::Create => client.create(record).await?,
        Action::Delete => client.delete(record).await?,
    };

    info!("Change {} submitted, status {}", change.id, change.status);
    Ok(())
}
