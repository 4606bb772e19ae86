// # Route53 Zone Service
//
// This crate provides a Route53 implementation of `zone_core::ZoneService`
// on top of the AWS SDK.
//
// ## Behavior
//
// - One `ChangeResourceRecordSets` call per submitted batch
// - Credentials from the AWS default chain (environment, shared profile,
//   web identity, instance metadata), optionally overridden by static keys
//   from a `KeySource`
// - Operation timeout configured (30 seconds)
// - Route53 error codes and HTTP statuses mapped to `ProviderErrorKind`
// - Dry-run mode for safe testing
// - No retry, backoff, or rate limiting (owned by the caller)
//
// ## Security Requirements
//
// - The secret access key NEVER appears in logs or Debug output
// - Static keys only replace the default chain when both halves are present

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_sdk_route53::config::{Credentials, Region};
use aws_sdk_route53::error::{BuildError, DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_route53::operation::change_resource_record_sets::ChangeResourceRecordSetsError;
use aws_sdk_route53::primitives::DateTime as AwsDateTime;
use aws_sdk_route53::types;
use chrono::{DateTime, Utc};
use std::time::Duration;
use zone_core::config::{KeySource, lookup_optional};
use zone_core::{
    Change, ChangeAction, ChangeInfo, Error, LookupError, ProviderError, ProviderErrorKind,
    ProviderRecordSet, RecordBinding, Result, ZoneService,
};

/// Route53 is a global service signed in us-east-1
const SIGNING_REGION: &str = "us-east-1";

/// Default timeout for one API operation (30 seconds)
const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(30);

const PROVIDER_NAME: &str = "route53";

/// Name reported by credentials built from static keys
const STATIC_CREDENTIALS_PROVIDER: &str = "zone-static-keys";

/// Key holding the access key id
pub const ACCESS_KEY_ID_KEY: &str = "AWS_ACCESS_KEY_ID";

/// Key holding the secret access key
pub const SECRET_ACCESS_KEY_KEY: &str = "AWS_SECRET_ACCESS_KEY";

/// Key holding the session token of temporary credentials
pub const SESSION_TOKEN_KEY: &str = "AWS_SESSION_TOKEN";

/// Key switching the service into dry-run mode when set to `dry-run`
pub const MODE_KEY: &str = "ZONE_MODE";

/// Static credentials from `source`, if any are configured
///
/// Returns `None` when neither key is present, leaving the default chain in
/// charge. A lone access key or secret key is a configuration error naming
/// the missing half. The session token is optional, but an unreadable token
/// secret is an error.
pub fn static_credentials(source: &dyn KeySource) -> Result<Option<Credentials>> {
    let access_key_id = lookup_optional(source, ACCESS_KEY_ID_KEY, "AWS access key ID")?;
    let secret_access_key =
        lookup_optional(source, SECRET_ACCESS_KEY_KEY, "AWS secret access key")?;

    let (access_key_id, secret_access_key) = match (access_key_id, secret_access_key) {
        (None, None) => return Ok(None),
        (Some(id), Some(secret)) => (id, secret),
        (Some(_), None) => return Err(missing(SECRET_ACCESS_KEY_KEY, "AWS secret access key")),
        (None, Some(_)) => return Err(missing(ACCESS_KEY_ID_KEY, "AWS access key ID")),
    };
    let session_token = lookup_optional(source, SESSION_TOKEN_KEY, "AWS session token")?;

    Ok(Some(Credentials::new(
        access_key_id,
        secret_access_key,
        session_token,
        None,
        STATIC_CREDENTIALS_PROVIDER,
    )))
}

fn missing(key: &'static str, what: &'static str) -> Error {
    Error::ConfigurationMissing {
        key,
        what,
        source: LookupError::not_found(key),
    }
}

/// Route53 zone service
///
/// # Dry-Run Mode
///
/// When `dry_run` is true the change batch is built and logged but never
/// sent, and a synthetic `ChangeInfo` with status `DRY-RUN` is returned.
#[derive(Debug)]
pub struct Route53ZoneService {
    client: aws_sdk_route53::Client,
    dry_run: bool,
}

impl Route53ZoneService {
    /// Wrap an already configured SDK client
    pub fn new(client: aws_sdk_route53::Client, dry_run: bool) -> Self {
        Self { client, dry_run }
    }

    /// Load the AWS configuration and the mode from `source`
    ///
    /// Static keys found in `source` take precedence; otherwise the SDK's
    /// default credential chain is used.
    pub async fn from_source(source: &dyn KeySource) -> Result<Self> {
        let dry_run = source
            .lookup(MODE_KEY)
            .map(|mode| mode.eq_ignore_ascii_case("dry-run"))
            .unwrap_or(false);

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::from_static(SIGNING_REGION))
            .retry_config(RetryConfig::disabled())
            .timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(DEFAULT_OPERATION_TIMEOUT)
                    .build(),
            );

        match static_credentials(source)? {
            Some(credentials) => {
                tracing::debug!("Using static AWS credentials");
                loader = loader.credentials_provider(credentials);
            }
            None => tracing::debug!("Using the default AWS credential chain"),
        }

        if dry_run {
            tracing::warn!("Route53 zone service running in DRY-RUN mode - no changes will be made");
        }

        let config = loader.load().await;
        Ok(Self::new(aws_sdk_route53::Client::new(&config), dry_run))
    }

    /// Whether changes are only logged
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

/// Strip the `/hostedzone/` prefix Route53 puts on zone ids
pub fn normalize_zone_id(zone_id: &str) -> &str {
    zone_id.trim_start_matches("/hostedzone/")
}

/// Classify a failed response by Route53 error code, then HTTP status
pub fn classify(status: u16, code: Option<&str>) -> ProviderErrorKind {
    match code {
        Some("InvalidChangeBatch") | Some("InvalidInput") => ProviderErrorKind::InvalidChangeBatch,
        Some("NoSuchHostedZone") | Some("NoSuchHealthCheck") => ProviderErrorKind::NotFound,
        Some("PriorRequestNotComplete") => ProviderErrorKind::Conflict,
        Some("Throttling") | Some("ThrottlingException") => ProviderErrorKind::RateLimited,
        Some("AccessDenied")
        | Some("InvalidClientTokenId")
        | Some("SignatureDoesNotMatch")
        | Some("ExpiredToken") => ProviderErrorKind::Authentication,
        _ => match status {
            401 | 403 => ProviderErrorKind::Authentication,
            404 => ProviderErrorKind::NotFound,
            409 => ProviderErrorKind::Conflict,
            429 => ProviderErrorKind::RateLimited,
            400 => ProviderErrorKind::InvalidChangeBatch,
            500..=599 => ProviderErrorKind::Server,
            _ => ProviderErrorKind::Other,
        },
    }
}

/// Translate an SDK failure into a provider error
///
/// Requests that never produced a response (timeouts, connection and
/// credential failures) are transport errors. Anything with a response is
/// classified by code and status.
pub fn classify_sdk_error(err: &SdkError<ChangeResourceRecordSetsError>) -> ProviderError {
    let code = err.code().map(str::to_string);

    let kind = match err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => ProviderErrorKind::Transport,
        SdkError::ConstructionFailure(_) => ProviderErrorKind::Other,
        _ => match err.raw_response() {
            Some(response) => classify(response.status().as_u16(), code.as_deref()),
            None => classify(0, code.as_deref()),
        },
    };

    let message = match (err.raw_response(), err.message()) {
        (Some(response), Some(message)) => format!("{} - {}", response.status().as_u16(), message),
        (Some(response), None) => format!(
            "{} - {}",
            response.status().as_u16(),
            DisplayErrorContext(err)
        ),
        (None, _) => DisplayErrorContext(err).to_string(),
    };

    let provider_err = ProviderError::new(PROVIDER_NAME, kind, message);
    match code {
        Some(code) => provider_err.with_code(code),
        None => provider_err,
    }
}

fn build_error(err: BuildError) -> ProviderError {
    ProviderError::new(
        PROVIDER_NAME,
        ProviderErrorKind::InvalidChangeBatch,
        format!("Failed to build change batch: {}", err),
    )
}

fn to_sdk_record_set(
    record_set: &ProviderRecordSet,
) -> std::result::Result<types::ResourceRecordSet, BuildError> {
    let builder = types::ResourceRecordSet::builder()
        .name(record_set.name.as_str())
        .r#type(types::RrType::from(record_set.record_type.as_str()));

    let builder = match &record_set.binding {
        RecordBinding::Alias(alias) => builder.alias_target(
            types::AliasTarget::builder()
                .dns_name(alias.dns_name.as_str())
                .hosted_zone_id(alias.hosted_zone_id.as_str())
                .evaluate_target_health(false)
                .build()?,
        ),
        RecordBinding::Literal { value, ttl } => builder
            .ttl(i64::from(*ttl))
            .resource_records(types::ResourceRecord::builder().value(value.as_str()).build()?),
    };

    builder.build()
}

/// Build the SDK change batch for `changes`
pub fn to_change_batch(changes: &[Change]) -> std::result::Result<types::ChangeBatch, BuildError> {
    let mut batch = types::ChangeBatch::builder();
    for change in changes {
        let action = match change.action {
            ChangeAction::Create => types::ChangeAction::Create,
            ChangeAction::Delete => types::ChangeAction::Delete,
        };
        batch = batch.changes(
            types::Change::builder()
                .action(action)
                .resource_record_set(to_sdk_record_set(&change.record_set)?)
                .build()?,
        );
    }
    batch.build()
}

fn to_chrono(value: &AwsDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(value.secs(), value.subsec_nanos())
}

#[async_trait]
impl ZoneService for Route53ZoneService {
    async fn submit_change_batch(
        &self,
        zone_id: &str,
        changes: &[Change],
    ) -> std::result::Result<ChangeInfo, ProviderError> {
        let zone_id = normalize_zone_id(zone_id);
        let batch = to_change_batch(changes).map_err(build_error)?;

        tracing::info!(
            "Submitting {} change(s) to Route53 zone {} [mode: {}]",
            changes.len(),
            zone_id,
            if self.dry_run { "DRY-RUN" } else { "LIVE" }
        );

        if self.dry_run {
            tracing::info!("[DRY-RUN] Would submit change batch: {:?}", batch);
            return Ok(ChangeInfo {
                id: "dry-run".to_string(),
                status: "DRY-RUN".to_string(),
                submitted_at: Some(Utc::now()),
            });
        }

        let output = self
            .client
            .change_resource_record_sets()
            .hosted_zone_id(zone_id)
            .change_batch(batch)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))?;

        let info = output.change_info().ok_or_else(|| {
            ProviderError::new(
                PROVIDER_NAME,
                ProviderErrorKind::Other,
                "Route53 response has no ChangeInfo",
            )
        })?;

        tracing::info!(
            "Route53 accepted change {} with status {}",
            info.id(),
            info.status().as_str()
        );

        Ok(ChangeInfo {
            id: info.id().to_string(),
            status: info.status().as_str().to_string(),
            submitted_at: to_chrono(info.submitted_at()),
        })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
