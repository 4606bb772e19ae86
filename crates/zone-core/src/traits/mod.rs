//! Capabilities the core consumes
//!
//! - [`ZoneService`]: Submit change batches to a DNS zone

pub mod zone_service;

pub use zone_service::{Change, ChangeAction, ChangeInfo, ZoneService};
