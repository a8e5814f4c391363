//! Report PDF Use Case
//!
//! Report metadata plus the proxied PDF download.

use std::sync::Arc;

use kernel::StoreError;

use crate::application::albums::trimmed;
use crate::domain::entities::{ReportPdf, ReportPdfDraft};
use crate::domain::repository::ReportPdfRepository;
use crate::domain::services::{FileFetcher, RemoteFile, pdf_file_name};
use crate::error::{CmsError, CmsResult};

const NOT_FOUND: &str = "Report PDF not found";
const DUPLICATE: &str = "Report PDF with this title already exists";

#[derive(Debug, Default)]
pub struct ReportPdfInput {
    pub title: Option<String>,
    pub cover_url: Option<String>,
    pub pdf_url: Option<String>,
    pub description: Option<String>,
}

impl ReportPdfInput {
    fn into_draft(self) -> CmsResult<ReportPdfDraft> {
        let title = trimmed(self.title).ok_or_else(|| CmsError::validation("Title is required"))?;
        let pdf_url =
            trimmed(self.pdf_url).ok_or_else(|| CmsError::validation("PDF URL is required"))?;

        Ok(ReportPdfDraft {
            title,
            cover_url: trimmed(self.cover_url),
            pdf_url,
            description: trimmed(self.description),
        })
    }
}

/// Upstream PDF ready to stream to the client
pub struct PdfDownload {
    pub file_name: String,
    pub file: RemoteFile,
}

pub struct ReportPdfUseCase<R, F>
where
    R: ReportPdfRepository,
    F: FileFetcher,
{
    repo: Arc<R>,
    files: Arc<F>,
}

impl<R, F> ReportPdfUseCase<R, F>
where
    R: ReportPdfRepository,
    F: FileFetcher,
{
    pub fn new(repo: Arc<R>, files: Arc<F>) -> Self {
        Self { repo, files }
    }

    pub async fn list(&self) -> CmsResult<Vec<ReportPdf>> {
        Ok(self.repo.list_reports().await?)
    }

    pub async fn get(&self, id: i32) -> CmsResult<ReportPdf> {
        self.repo
            .find_report(id)
            .await?
            .ok_or(CmsError::NotFound(NOT_FOUND))
    }

    pub async fn create(&self, input: ReportPdfInput) -> CmsResult<ReportPdf> {
        let report = self
            .repo
            .create_report(input.into_draft()?)
            .await
            .map_err(store_error)?;

        tracing::info!(report_id = report.id, "Report PDF created");
        Ok(report)
    }

    pub async fn update(&self, id: i32, input: ReportPdfInput) -> CmsResult<ReportPdf> {
        let report = self
            .repo
            .update_report(id, input.into_draft()?)
            .await
            .map_err(store_error)?;

        tracing::info!(report_id = id, "Report PDF updated");
        Ok(report)
    }

    pub async fn delete(&self, id: i32) -> CmsResult<()> {
        self.repo.delete_report(id).await.map_err(store_error)?;
        tracing::info!(report_id = id, "Report PDF deleted");
        Ok(())
    }

    pub async fn download(&self, id: i32) -> CmsResult<PdfDownload> {
        let report = self.get(id).await?;

        let file = self.files.fetch(&report.pdf_url).await.map_err(|e| {
            tracing::warn!(report_id = id, error = %e, "Report PDF fetch failed");
            CmsError::Upstream { status: e.status }
        })?;

        Ok(PdfDownload {
            file_name: pdf_file_name(&report.title, report.id),
            file,
        })
    }
}

fn store_error(e: StoreError) -> CmsError {
    match e {
        StoreError::NotFound => CmsError::NotFound(NOT_FOUND),
        StoreError::Conflict(_) => CmsError::DuplicateTitle(DUPLICATE),
        other => CmsError::Store(other),
    }
}
