//! Test doubles and common utilities for zone client contract tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use zone_core::config::{HOSTED_ZONE_ID_KEY, LOAD_BALANCER_HOST_KEY, ZONE_ID_KEY};
use zone_core::{
    Change, ChangeInfo, DeclarativeRecord, ProviderError, RecordType, ZoneContext, ZoneService,
};

/// A batch as the zone service received it
#[derive(Debug, Clone)]
pub struct SubmittedBatch {
    pub zone_id: String,
    pub changes: Vec<Change>,
}

/// A zone service that records every batch and answers from a script
pub struct RecordingZoneService {
    submitted: Arc<Mutex<Vec<SubmittedBatch>>>,
    call_count: Arc<AtomicUsize>,
    failure: Option<ProviderError>,
}

impl RecordingZoneService {
    /// Accept every batch
    pub fn new() -> Self {
        Self {
            submitted: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(AtomicUsize::new(0)),
            failure: None,
        }
    }

    /// Reject every batch with `err`
    pub fn failing(err: ProviderError) -> Self {
        Self {
            failure: Some(err),
            ..Self::new()
        }
    }

    /// A second handle observing the same recorded batches
    pub fn sharing_log_with(other: &Self) -> Self {
        Self {
            submitted: Arc::clone(&other.submitted),
            call_count: Arc::clone(&other.call_count),
            failure: other.failure.clone(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn submitted(&self) -> Vec<SubmittedBatch> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ZoneService for RecordingZoneService {
    async fn submit_change_batch(
        &self,
        zone_id: &str,
        changes: &[Change],
    ) -> Result<ChangeInfo, ProviderError> {
        let n = self.call_count.fetch_add(1, Ordering::SeqCst);
        self.submitted.lock().unwrap().push(SubmittedBatch {
            zone_id: zone_id.to_string(),
            changes: changes.to_vec(),
        });

        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(ChangeInfo {
                id: format!("/change/C{}", n),
                status: "PENDING".to_string(),
                submitted_at: None,
            }),
        }
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}

/// Key source with all three zone identifiers present
pub fn full_keys() -> HashMap<String, String> {
    [
        (ZONE_ID_KEY, "Z1"),
        (HOSTED_ZONE_ID_KEY, "Z123"),
        (LOAD_BALANCER_HOST_KEY, "lb.example.com"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

pub fn context() -> ZoneContext {
    ZoneContext::new("Z1", "Z123", "lb.example.com")
}

pub fn alias_record() -> DeclarativeRecord {
    DeclarativeRecord::new("www.example.com", RecordType::A, vec!["lb.example.com".to_string()])
        .expect("valid record")
}

pub fn txt_record() -> DeclarativeRecord {
    DeclarativeRecord::new("txt.example.com", RecordType::Txt, vec!["v=spf1 -all".to_string()])
        .expect("valid record")
}
