//! Upload Use Case
//!
//! Images and PDFs pushed to blob storage from the admin editor.

use std::sync::Arc;

use crate::domain::services::{BlobKind, BlobStore, BlobUpload, StoredBlob, classify_upload};
use crate::error::{CmsError, CmsResult};

pub struct UploadFile {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub file_name: String,
}

pub struct UploadOutput {
    pub blob: StoredBlob,
    pub kind: BlobKind,
}

pub struct UploadUseCase<S>
where
    S: BlobStore,
{
    blobs: Arc<S>,
    folder: String,
}

impl<S> UploadUseCase<S>
where
    S: BlobStore,
{
    pub fn new(blobs: Arc<S>, folder: impl Into<String>) -> Self {
        Self {
            blobs,
            folder: folder.into(),
        }
    }

    pub async fn upload(&self, file: UploadFile) -> CmsResult<UploadOutput> {
        let kind = classify_upload(&file.content_type, &file.file_name)
            .ok_or_else(|| CmsError::validation("Only image and PDF files are allowed"))?;

        let mime = match kind {
            BlobKind::Raw => "application/pdf".to_string(),
            BlobKind::Image => file.content_type,
        };
        let size = file.bytes.len();

        let blob = self
            .blobs
            .upload(BlobUpload {
                bytes: file.bytes,
                mime,
                kind,
                folder: self.folder.clone(),
            })
            .await
            .map_err(CmsError::Storage)?;

        tracing::info!(public_id = %blob.public_id, kind = kind.file_type(), size, "File uploaded");
        Ok(UploadOutput { blob, kind })
    }

    pub async fn delete(&self, public_id: &str) -> CmsResult<()> {
        let public_id = public_id.trim();
        if public_id.is_empty() {
            return Err(CmsError::validation("publicId is required"));
        }

        self.blobs.destroy(public_id).await.map_err(CmsError::Storage)?;
        tracing::info!(public_id = %public_id, "File deleted");
        Ok(())
    }
}
