// # zone-core
//
// Core library turning declarative DNS records into zone change batches.
//
// ## Architecture Overview
//
// - **KeySource / ZoneContext**: Resolve the zone identifiers once, at construction
// - **Record Converter**: Pure mapping from a declarative record to a provider record set
// - **ZoneService**: Trait for submitting change batches to a provider
// - **ZoneClient**: Wraps one record into a CREATE or DELETE batch and submits it
//
// ## Design Principles
//
// 1. **Injected configuration**: No implicit reads of global state
// 2. **Narrow provider seam**: The core only needs `submit_change_batch`
// 3. **Caller decides**: No diffing, retry, or backoff in the core
// 4. **Errors pass through**: Provider failures reach the caller unmodified

pub mod client;
pub mod config;
pub mod convert;
pub mod error;
pub mod record;
pub mod traits;

// Re-export core types for convenience
pub use client::ZoneClient;
pub use config::{EnvOrFileSource, KeySource, ZoneContext, lookup_optional, require};
pub use convert::{AliasTarget, ProviderRecordSet, RecordBinding, DEFAULT_TTL, to_record_set};
pub use error::{Error, LookupError, ProviderError, ProviderErrorKind, Result};
pub use record::{DeclarativeRecord, RecordType};
pub use traits::{Change, ChangeAction, ChangeInfo, ZoneService};
