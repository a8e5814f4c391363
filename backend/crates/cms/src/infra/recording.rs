//! In-process adapters for blob storage, mail and remote files
//!
//! They record what was asked of them so tests can assert on side effects,
//! and can be told to fail for chosen inputs.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use axum::body::Body;

use crate::domain::services::{
    BlobStore, BlobUpload, FetchError, FileFetcher, Mailer, OutgoingMail, RemoteFile,
    ServiceError, StoredBlob,
};

fn poisoned() -> ServiceError {
    ServiceError::Transport("recorder lock poisoned".to_string())
}

// ============================================================================
// Blob store
// ============================================================================

#[derive(Default)]
struct BlobLog {
    uploads: Vec<BlobUpload>,
    destroyed: Vec<String>,
    failing: HashSet<String>,
}

#[derive(Clone, Default)]
pub struct InMemoryBlobStore {
    log: Arc<Mutex<BlobLog>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `destroy` fail for this public id
    pub fn fail_destroy(&self, public_id: &str) {
        if let Ok(mut log) = self.log.lock() {
            log.failing.insert(public_id.to_string());
        }
    }

    pub fn destroyed(&self) -> Vec<String> {
        self.log.lock().map(|l| l.destroyed.clone()).unwrap_or_default()
    }

    pub fn uploads(&self) -> Vec<BlobUpload> {
        self.log.lock().map(|l| l.uploads.clone()).unwrap_or_default()
    }
}

impl BlobStore for InMemoryBlobStore {
    async fn upload(&self, upload: BlobUpload) -> Result<StoredBlob, ServiceError> {
        let mut log = self.log.lock().map_err(|_| poisoned())?;
        let public_id = format!("{}/blob-{}", upload.folder, log.uploads.len() + 1);
        let blob = StoredBlob {
            url: format!(
                "https://blobs.test/{}/{public_id}",
                upload.kind.resource_type()
            ),
            public_id,
        };
        log.uploads.push(upload);
        Ok(blob)
    }

    async fn destroy(&self, public_id: &str) -> Result<(), ServiceError> {
        let mut log = self.log.lock().map_err(|_| poisoned())?;
        if log.failing.contains(public_id) {
            return Err(ServiceError::Rejected {
                status: 500,
                message: format!("cannot destroy {public_id}"),
            });
        }
        log.destroyed.push(public_id.to_string());
        Ok(())
    }
}

// ============================================================================
// Mailer
// ============================================================================

#[derive(Default)]
struct MailLog {
    sent: Vec<OutgoingMail>,
    attempts: HashMap<String, u32>,
    /// Recipient -> number of attempts that fail before one succeeds
    failures: HashMap<String, u32>,
}

#[derive(Clone, Default)]
pub struct RecordingMailer {
    log: Arc<Mutex<MailLog>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every attempt for `to`
    pub fn fail_always(&self, to: &str) {
        self.fail_times(to, u32::MAX);
    }

    /// Fail the first `times` attempts for `to`
    pub fn fail_times(&self, to: &str, times: u32) {
        if let Ok(mut log) = self.log.lock() {
            log.failures.insert(to.to_string(), times);
        }
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.log.lock().map(|l| l.sent.clone()).unwrap_or_default()
    }

    pub fn attempts(&self, to: &str) -> u32 {
        self.log
            .lock()
            .map(|l| l.attempts.get(to).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

impl Mailer for RecordingMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<String, ServiceError> {
        let mut log = self.log.lock().map_err(|_| poisoned())?;
        let attempt = log.attempts.entry(mail.to.clone()).or_insert(0);
        *attempt += 1;
        let attempt = *attempt;

        if log.failures.get(&mail.to).is_some_and(|&n| attempt <= n) {
            return Err(ServiceError::Transport(format!("mailbox {} unavailable", mail.to)));
        }

        log.sent.push(mail.clone());
        Ok(format!("<{}@recording.test>", log.sent.len()))
    }
}

// ============================================================================
// Remote files
// ============================================================================

/// Serves fixed bodies by URL; unknown URLs answer 404
#[derive(Clone, Default)]
pub struct StaticFileFetcher {
    files: Arc<Mutex<HashMap<String, Result<Vec<u8>, u16>>>>,
}

impl StaticFileFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(&self, url: &str, body: impl Into<Vec<u8>>) {
        if let Ok(mut files) = self.files.lock() {
            files.insert(url.to_string(), Ok(body.into()));
        }
    }

    pub fn fail(&self, url: &str, status: u16) {
        if let Ok(mut files) = self.files.lock() {
            files.insert(url.to_string(), Err(status));
        }
    }
}

impl FileFetcher for StaticFileFetcher {
    async fn fetch(&self, url: &str) -> Result<RemoteFile, FetchError> {
        let entry = self
            .files
            .lock()
            .map_err(|_| FetchError {
                status: None,
                message: "fetcher lock poisoned".to_string(),
            })?
            .get(url)
            .cloned()
            .unwrap_or(Err(404));

        match entry {
            Ok(bytes) => Ok(RemoteFile {
                content_length: Some(bytes.len() as u64),
                body: Body::from(bytes),
            }),
            Err(status) => Err(FetchError {
                status: Some(status),
                message: format!("upstream answered {status}"),
            }),
        }
    }
}
