//! CMS Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Content entities, repository traits, service ports
//! - `application/` - Configuration, pagination, one use case per resource
//! - `infra/` - PostgreSQL and in-memory stores, Cloudinary, SMTP, HTTP
//! - `presentation/` - Handlers, DTOs, router
//!
//! ## Resources
//! News with image galleries, photo albums, team members, report PDFs,
//! short videos, newsletter subscribers, outgoing mail, uploads and
//! donation details.
//!
//! Every write goes through the route guard from the `auth` crate:
//! content writes need `admin` or `editor`, mail and short-video deletion
//! need `admin`.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::backend::CmsBackend;
pub use application::config::{BlobConfig, CmsConfig, ConfigError, DonationInfo, MailerConfig};
pub use application::mailing::BulkPolicy;
pub use error::{CmsError, CmsResult};
pub use infra::{CloudinaryBlobStore, HttpFileFetcher, PgCmsRepository, SmtpMailer};
pub use presentation::router::{CmsServices, ProductionBackend, cms_router, cms_router_generic};
