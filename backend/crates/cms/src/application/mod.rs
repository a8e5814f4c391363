//! Application Layer
//!
//! Configuration, pagination and one use case per content resource.

pub mod albums;
pub mod backend;
pub mod blobs;
pub mod config;
pub mod mailing;
pub mod news;
pub mod newsletter;
pub mod pagination;
pub mod reports;
pub mod short_videos;
pub mod team;
pub mod uploads;

// Re-exports
pub use albums::{AlbumInput, AlbumUseCase};
pub use backend::CmsBackend;
pub use config::{BlobConfig, CmsConfig, DonationInfo, MailerConfig};
pub use mailing::{BulkPolicy, BulkReport, FailedRecipient, MailingUseCase};
pub use news::{NewsInput, NewsUseCase};
pub use newsletter::{NewsletterUseCase, SubscriberPage, Subscription};
pub use pagination::{Listing, PageQuery, PageRequest, Pagination};
pub use reports::{PdfDownload, ReportPdfInput, ReportPdfUseCase};
pub use short_videos::{ShortVideoInput, ShortVideoUseCase};
pub use team::{TeamMemberInput, TeamUseCase};
pub use uploads::{UploadFile, UploadOutput, UploadUseCase};
