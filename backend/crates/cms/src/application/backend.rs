//! Adapter set behind the CMS router

use crate::domain::repository::{
    AlbumRepository, NewsRepository, NewsletterRepository, ReportPdfRepository,
    ShortVideoRepository, TeamRepository,
};
use crate::domain::services::{BlobStore, FileFetcher, Mailer};

/// Store and adapters the CMS handlers run against.
///
/// One repository type implements every content trait so handlers need a
/// single handle for all resources.
pub trait CmsBackend: Send + Sync + 'static {
    type Repo: NewsRepository
        + AlbumRepository
        + TeamRepository
        + ReportPdfRepository
        + ShortVideoRepository
        + NewsletterRepository
        + Send
        + Sync
        + 'static;
    type Blobs: BlobStore + Send + Sync + 'static;
    type Mailer: Mailer + Send + Sync + 'static;
    type Files: FileFetcher + Send + Sync + 'static;
}
