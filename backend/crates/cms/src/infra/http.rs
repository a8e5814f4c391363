//! Remote file fetcher backed by `reqwest`

use std::time::Duration;

use axum::body::Body;

use crate::domain::services::{FetchError, FileFetcher, RemoteFile};

#[derive(Clone)]
pub struct HttpFileFetcher {
    client: reqwest::Client,
}

impl HttpFileFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| FetchError {
                status: None,
                message: e.to_string(),
            })?;
        Ok(Self { client })
    }
}

impl FileFetcher for HttpFileFetcher {
    /// The body is streamed through without buffering
    async fn fetch(&self, url: &str) -> Result<RemoteFile, FetchError> {
        let response = self.client.get(url).send().await.map_err(|e| FetchError {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError {
                status: Some(status.as_u16()),
                message: format!("upstream answered {status}"),
            });
        }

        Ok(RemoteFile {
            content_length: response.content_length(),
            body: Body::from_stream(response.bytes_stream()),
        })
    }
}
