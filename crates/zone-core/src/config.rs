//! Zone configuration resolution
//!
//! Configuration values are read through a [`KeySource`] handed in by the
//! caller. The core never touches the process environment on its own;
//! [`EnvOrFileSource`] is the implementation a deployment normally passes.
//!
//! ## Keys
//!
//! - `AWS_ZONE_ID`: zone receiving the changes
//! - `AWS_HOSTED_ZONE_ID`: hosted zone owning alias targets
//! - `AWS_LOAD_BALANCER_HOST`: load balancer host available to callers
//!
//! Each key is looked up in the environment first, then as a file of the
//! same name under the secrets directory (a mounted Kubernetes secret).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, LookupError, Result};

/// Key holding the zone to mutate
pub const ZONE_ID_KEY: &str = "AWS_ZONE_ID";

/// Key holding the hosted zone that owns alias targets
pub const HOSTED_ZONE_ID_KEY: &str = "AWS_HOSTED_ZONE_ID";

/// Key holding the load balancer alias host
pub const LOAD_BALANCER_HOST_KEY: &str = "AWS_LOAD_BALANCER_HOST";

/// Environment variable overriding the secrets directory
pub const SECRETS_DIR_ENV: &str = "ZONE_SECRETS_DIR";

/// Default directory searched for secret files
pub const DEFAULT_SECRETS_DIR: &str = "/var/run/secrets/zone";

/// Key to string lookup capability
pub trait KeySource: Send + Sync {
    /// Resolve `key` to its value
    fn lookup(&self, key: &str) -> std::result::Result<String, LookupError>;
}

impl KeySource for HashMap<String, String> {
    fn lookup(&self, key: &str) -> std::result::Result<String, LookupError> {
        self.get(key)
            .cloned()
            .ok_or_else(|| LookupError::not_found(key))
    }
}

/// Looks a key up in the environment, then in a secret file
///
/// Empty values count as absent. File contents are trimmed.
#[derive(Debug, Clone)]
pub struct EnvOrFileSource {
    secrets_dir: PathBuf,
}

impl EnvOrFileSource {
    /// Use `ZONE_SECRETS_DIR` if set, otherwise [`DEFAULT_SECRETS_DIR`]
    pub fn new() -> Self {
        let dir = std::env::var(SECRETS_DIR_ENV)
            .ok()
            .filter(|dir| !dir.is_empty())
            .unwrap_or_else(|| DEFAULT_SECRETS_DIR.to_string());
        Self::with_secrets_dir(dir)
    }

    /// Read secret files from `dir`
    pub fn with_secrets_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            secrets_dir: dir.into(),
        }
    }

    /// Directory searched for secret files
    pub fn secrets_dir(&self) -> &Path {
        &self.secrets_dir
    }

    fn read_secret_file(&self, key: &str) -> std::result::Result<String, LookupError> {
        let path = self.secrets_dir.join(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let value = contents.trim();
                if value.is_empty() {
                    Err(LookupError::not_found(key))
                } else {
                    tracing::debug!("Resolved {} from {}", key, path.display());
                    Ok(value.to_string())
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(LookupError::not_found(key))
            }
            Err(e) => Err(LookupError::Unreadable {
                key: key.to_string(),
                source: e,
            }),
        }
    }
}

impl Default for EnvOrFileSource {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySource for EnvOrFileSource {
    fn lookup(&self, key: &str) -> std::result::Result<String, LookupError> {
        match std::env::var(key) {
            Ok(value) if !value.is_empty() => {
                tracing::debug!("Resolved {} from environment", key);
                Ok(value)
            }
            _ => self.read_secret_file(key),
        }
    }
}

/// Resolve one required key, attributing a failure to it
pub fn require(source: &dyn KeySource, key: &'static str, what: &'static str) -> Result<String> {
    source
        .lookup(key)
        .map_err(|source| Error::ConfigurationMissing { key, what, source })
}

/// Resolve one optional key
///
/// Only an absent value yields `None`; an unreadable secret file is still an
/// error attributed to `key`.
pub fn lookup_optional(
    source: &dyn KeySource,
    key: &'static str,
    what: &'static str,
) -> Result<Option<String>> {
    match source.lookup(key) {
        Ok(value) => Ok(Some(value)),
        Err(LookupError::NotFound { .. }) => Ok(None),
        Err(source) => Err(Error::ConfigurationMissing { key, what, source }),
    }
}

/// Identifiers of the zone a client mutates
///
/// Resolved once and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneContext {
    zone_id: String,
    alias_hosted_zone_id: String,
    load_balancer_host: String,
}

impl ZoneContext {
    /// Build a context from already known values
    pub fn new(
        zone_id: impl Into<String>,
        alias_hosted_zone_id: impl Into<String>,
        load_balancer_host: impl Into<String>,
    ) -> Self {
        Self {
            zone_id: zone_id.into(),
            alias_hosted_zone_id: alias_hosted_zone_id.into(),
            load_balancer_host: load_balancer_host.into(),
        }
    }

    /// Resolve all three identifiers, failing on the first missing one
    pub fn resolve(source: &dyn KeySource) -> Result<Self> {
        let zone_id = require(source, ZONE_ID_KEY, "Zone ID")?;
        let alias_hosted_zone_id = require(source, HOSTED_ZONE_ID_KEY, "Hosted Zone ID")?;
        let load_balancer_host = require(source, LOAD_BALANCER_HOST_KEY, "Load balancer host")?;

        Ok(Self {
            zone_id,
            alias_hosted_zone_id,
            load_balancer_host,
        })
    }

    /// Zone receiving change batches
    pub fn zone_id(&self) -> &str {
        &self.zone_id
    }

    /// Hosted zone that owns alias targets
    pub fn alias_hosted_zone_id(&self) -> &str {
        &self.alias_hosted_zone_id
    }

    /// Load balancer host, for callers building alias records
    pub fn load_balancer_host(&self) -> &str {
        &self.load_balancer_host
    }
}
