//! Cloudinary blob store
//!
//! Signed uploads and deletes against the Cloudinary REST API. Requests are
//! signed with SHA-1 over the alphabetically sorted parameters followed by
//! the API secret.

use std::time::Duration;

use chrono::Utc;
use platform::crypto::{sha1_hex, to_base64};
use serde::Deserialize;

use crate::application::config::BlobConfig;
use crate::domain::services::{BlobKind, BlobStore, BlobUpload, ServiceError, StoredBlob};

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

#[derive(Clone)]
pub struct CloudinaryBlobStore {
    client: reqwest::Client,
    config: BlobConfig,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorMessage,
}

#[derive(Deserialize)]
struct ErrorMessage {
    message: String,
}

impl CloudinaryBlobStore {
    pub fn new(config: BlobConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn ensure_configured(&self) -> Result<(), ServiceError> {
        if self.config.cloud_name.is_empty()
            || self.config.api_key.is_empty()
            || self.config.api_secret.is_empty()
        {
            return Err(ServiceError::NotConfigured("cloudinary"));
        }
        Ok(())
    }

    fn endpoint(&self, kind: BlobKind, action: &str) -> String {
        format!(
            "{API_BASE}/{}/{}/{action}",
            self.config.cloud_name,
            kind.resource_type()
        )
    }

    /// Sorted `key=value` pairs joined by `&`, then the secret
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let mut sorted = params.to_vec();
        sorted.sort_by_key(|(k, _)| *k);
        let joined = sorted
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        sha1_hex(format!("{joined}{}", self.config.api_secret.expose()).as_bytes())
    }

    async fn post_form<T>(&self, url: String, form: Vec<(&str, String)>) -> Result<T, ServiceError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .client
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorResponse>().await {
                Ok(body) => body.error.message,
                Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
            };
            return Err(ServiceError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))
    }

    async fn destroy_as(&self, kind: BlobKind, public_id: &str) -> Result<bool, ServiceError> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = self.sign(&[("public_id", public_id), ("timestamp", &timestamp)]);

        let response: DestroyResponse = self
            .post_form(
                self.endpoint(kind, "destroy"),
                vec![
                    ("public_id", public_id.to_string()),
                    ("timestamp", timestamp),
                    ("api_key", self.config.api_key.clone()),
                    ("signature", signature),
                ],
            )
            .await?;

        match response.result.as_str() {
            "ok" => Ok(true),
            "not found" => Ok(false),
            other => Err(ServiceError::Rejected {
                status: 200,
                message: format!("unexpected destroy result: {other}"),
            }),
        }
    }
}

impl BlobStore for CloudinaryBlobStore {
    async fn upload(&self, upload: BlobUpload) -> Result<StoredBlob, ServiceError> {
        self.ensure_configured()?;

        let timestamp = Utc::now().timestamp().to_string();
        let signature = self.sign(&[("folder", &upload.folder), ("timestamp", &timestamp)]);
        let file = format!("data:{};base64,{}", upload.mime, to_base64(&upload.bytes));

        let response: UploadResponse = self
            .post_form(
                self.endpoint(upload.kind, "upload"),
                vec![
                    ("file", file),
                    ("folder", upload.folder),
                    ("timestamp", timestamp),
                    ("api_key", self.config.api_key.clone()),
                    ("signature", signature),
                ],
            )
            .await?;

        Ok(StoredBlob {
            url: response.secure_url,
            public_id: response.public_id,
        })
    }

    /// Public ids do not record their resource type; images are tried first,
    /// then raw files.
    async fn destroy(&self, public_id: &str) -> Result<(), ServiceError> {
        self.ensure_configured()?;

        if !self.destroy_as(BlobKind::Image, public_id).await?
            && !self.destroy_as(BlobKind::Raw, public_id).await?
        {
            tracing::debug!(public_id = %public_id, "Blob already absent");
        }
        Ok(())
    }
}
