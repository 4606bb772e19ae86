// # Zone Service Trait
//
// The narrow interface through which change batches reach a DNS provider.
//
// ## Implementations
//
// - Route53: `zone-provider-route53` crate
//
// ## Usage
//
// ```rust,ignore
// use zone_core::traits::{Change, ChangeAction, ZoneService};
//
// let changes = [Change::new(ChangeAction::Create, record_set)];
// let info = service.submit_change_batch("Z1", &changes).await?;
// ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::convert::ProviderRecordSet;
use crate::error::ProviderError;

/// Operation applied to a record set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    /// Create the record set
    Create,
    /// Delete the record set
    Delete,
}

impl ChangeAction {
    /// Wire name of the action
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a change batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    /// What to do with the record set
    pub action: ChangeAction,
    /// The record set to act on
    pub record_set: ProviderRecordSet,
}

impl Change {
    /// Create a change entry
    pub fn new(action: ChangeAction, record_set: ProviderRecordSet) -> Self {
        Self { action, record_set }
    }
}

/// Acknowledgement of a submitted change batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeInfo {
    /// Provider assigned change identifier
    pub id: String,
    /// Provider reported status (e.g. "PENDING")
    pub status: String,
    /// When the provider accepted the batch, if reported
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Trait for zone service implementations
///
/// A zone service owns the provider wire protocol and authentication. The
/// core hands it a zone identifier and the changes to apply and forwards
/// whatever it returns.
///
/// # Contract
///
/// - One call is one provider round trip
/// - No retry or backoff; failures are returned to the caller
/// - Conflict and not-found semantics are the provider's; nothing is
///   checked before submission
///
/// # Thread Safety
///
/// Implementations must be usable from concurrent tasks.
#[async_trait]
pub trait ZoneService: Send + Sync {
    /// Submit `changes` to the zone `zone_id` as a single batch
    ///
    /// # Returns
    ///
    /// - `Ok(ChangeInfo)`: The provider accepted the batch
    /// - `Err(ProviderError)`: The provider rejected it or could not be reached
    async fn submit_change_batch(
        &self,
        zone_id: &str,
        changes: &[Change],
    ) -> Result<ChangeInfo, ProviderError>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
