//! Infrastructure Layer
//!
//! Repository implementations and adapters for blob storage, SMTP and
//! remote files.

pub mod cloudinary;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod recording;
pub mod smtp;

pub use cloudinary::CloudinaryBlobStore;
pub use self::http::HttpFileFetcher;
pub use memory::InMemoryCmsRepository;
pub use postgres::PgCmsRepository;
pub use recording::{InMemoryBlobStore, RecordingMailer, StaticFileFetcher};
pub use smtp::SmtpMailer;
