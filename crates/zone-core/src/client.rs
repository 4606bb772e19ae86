//! Zone client
//!
//! [`ZoneClient`] turns one declarative record into a one-entry change batch
//! and submits it through its [`ZoneService`]. It holds no mutable state, so
//! a single client can be shared across tasks.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use zone_core::{EnvOrFileSource, ZoneClient};
//!
//! let client = ZoneClient::from_source(&EnvOrFileSource::new(), Box::new(service))?;
//! client.create(&record).await?;
//! ```

use crate::config::{KeySource, ZoneContext};
use crate::convert::to_record_set;
use crate::error::Result;
use crate::record::DeclarativeRecord;
use crate::traits::{Change, ChangeAction, ChangeInfo, ZoneService};

/// Applies record creations and deletions to a single zone
pub struct ZoneClient {
    context: ZoneContext,
    service: Box<dyn ZoneService>,
}

impl std::fmt::Debug for ZoneClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoneClient")
            .field("context", &self.context)
            .field("service", &self.service.provider_name())
            .finish()
    }
}

impl ZoneClient {
    /// Create a client for an already resolved zone
    pub fn new(context: ZoneContext, service: Box<dyn ZoneService>) -> Self {
        Self { context, service }
    }

    /// Resolve the zone context from `source` and create a client
    ///
    /// Fails with [`Error::ConfigurationMissing`](crate::Error::ConfigurationMissing)
    /// if any identifier is absent.
    pub fn from_source(source: &dyn KeySource, service: Box<dyn ZoneService>) -> Result<Self> {
        let context = ZoneContext::resolve(source)?;
        Ok(Self::new(context, service))
    }

    /// The zone this client mutates
    pub fn context(&self) -> &ZoneContext {
        &self.context
    }

    /// Submit a CREATE for `record`
    ///
    /// An already existing record is not checked for; the provider decides.
    pub async fn create(&self, record: &DeclarativeRecord) -> Result<ChangeInfo> {
        self.submit(ChangeAction::Create, record).await
    }

    /// Submit a DELETE for `record`
    ///
    /// A missing record is not checked for; the provider decides.
    pub async fn delete(&self, record: &DeclarativeRecord) -> Result<ChangeInfo> {
        self.submit(ChangeAction::Delete, record).await
    }

    async fn submit(&self, action: ChangeAction, record: &DeclarativeRecord) -> Result<ChangeInfo> {
        let change = Change::new(action, to_record_set(record, &self.context));

        tracing::debug!(
            "Submitting {} {} ({}) to zone {} via {}",
            action,
            record.name(),
            record.record_type(),
            self.context.zone_id(),
            self.service.provider_name()
        );

        let info = self
            .service
            .submit_change_batch(self.context.zone_id(), std::slice::from_ref(&change))
            .await?;

        tracing::debug!("Change {} accepted with status {}", info.id, info.status);
        Ok(info)
    }
}
