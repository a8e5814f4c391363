//! Domain Services
//!
//! Ports to blob storage, SMTP and remote files, plus the pure text rules
//! the content endpoints share.

use axum::body::Body;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Failure of an external service call
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Service not configured (missing credentials)
    #[error("service not configured: {0}")]
    NotConfigured(&'static str),

    /// Request could not be sent or the response could not be read
    #[error("request failed: {0}")]
    Transport(String),

    /// Service answered with an error
    #[error("rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
}

// ============================================================================
// Blob storage
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobKind {
    Image,
    /// Stored as-is (PDFs)
    Raw,
}

impl BlobKind {
    pub fn resource_type(&self) -> &'static str {
        match self {
            BlobKind::Image => "image",
            BlobKind::Raw => "raw",
        }
    }

    /// `fileType` reported to the uploader
    pub fn file_type(&self) -> &'static str {
        match self {
            BlobKind::Image => "image",
            BlobKind::Raw => "pdf",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BlobUpload {
    pub bytes: Vec<u8>,
    pub mime: String,
    pub kind: BlobKind,
    pub folder: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub url: String,
    pub public_id: String,
}

#[trait_variant::make(BlobStore: Send)]
pub trait LocalBlobStore {
    async fn upload(&self, upload: BlobUpload) -> Result<StoredBlob, ServiceError>;

    async fn destroy(&self, public_id: &str) -> Result<(), ServiceError>;
}

// ============================================================================
// Mail
// ============================================================================

#[derive(Debug, Clone)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

impl OutgoingMail {
    /// Mail whose plain-text part is `html` without tags
    pub fn from_html(to: impl Into<String>, subject: impl Into<String>, html: impl Into<String>) -> Self {
        let html = html.into();
        Self {
            to: to.into(),
            subject: subject.into(),
            text: strip_tags(&html),
            html,
        }
    }
}

#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    /// Returns the message id
    async fn send(&self, mail: &OutgoingMail) -> Result<String, ServiceError>;
}

// ============================================================================
// Remote files
// ============================================================================

pub struct RemoteFile {
    pub content_length: Option<u64>,
    pub body: Body,
}

#[derive(Debug, Error)]
#[error("fetch failed (status {status:?}): {message}")]
pub struct FetchError {
    /// Upstream status, when the upstream answered at all
    pub status: Option<u16>,
    pub message: String,
}

#[trait_variant::make(FileFetcher: Send)]
pub trait LocalFileFetcher {
    async fn fetch(&self, url: &str) -> Result<RemoteFile, FetchError>;
}

// ============================================================================
// Text rules
// ============================================================================

/// Remove every `<...>` tag. An unclosed `<` and what follows are kept.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        match rest[start..].find('>') {
            Some(len) => {
                out.push_str(&rest[..start]);
                rest = &rest[start + len + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Download name for a report: NFKD, ASCII word chars, dashes for spaces,
/// lowercase. Falls back to `report-<id>`.
pub fn pdf_file_name(title: &str, id: i32) -> String {
    let kept: String = title
        .nfkd()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ' '))
        .collect();

    let slug = kept
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();

    let base = if slug.is_empty() { format!("report-{id}") } else { slug };
    format!("{base}.pdf")
}

/// Storage class for an upload, or `None` when the file type is refused.
pub fn classify_upload(content_type: &str, file_name: &str) -> Option<BlobKind> {
    let is_pdf = content_type.contains("pdf") || file_name.to_lowercase().ends_with(".pdf");
    if is_pdf {
        Some(BlobKind::Raw)
    } else if content_type.starts_with("image/") {
        Some(BlobKind::Image)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<p>Hello <b>world</b></p>"), "Hello world");
        assert_eq!(strip_tags("no markup"), "no markup");
        assert_eq!(strip_tags("a < b"), "a < b");
        assert_eq!(strip_tags("<br/>line<br>"), "line");
    }

    #[test]
    fn test_pdf_file_name() {
        assert_eq!(pdf_file_name("Annual Report 2024", 1), "annual-report-2024.pdf");
        assert_eq!(pdf_file_name("  Café   Révision ", 2), "cafe-revision.pdf");
        assert_eq!(pdf_file_name("Q1/Q2: finances!", 3), "q1q2-finances.pdf");
        assert_eq!(pdf_file_name("???", 7), "report-7.pdf");
        assert_eq!(pdf_file_name("", 8), "report-8.pdf");
    }

    #[test]
    fn test_classify_upload() {
        assert_eq!(classify_upload("application/pdf", "x.bin"), Some(BlobKind::Raw));
        assert_eq!(classify_upload("", "Report.PDF"), Some(BlobKind::Raw));
        assert_eq!(classify_upload("image/png", "a.png"), Some(BlobKind::Image));
        assert_eq!(classify_upload("text/plain", "a.txt"), None);
        assert_eq!(classify_upload("", "noext"), None);
    }

    #[test]
    fn test_mail_text_fallback() {
        let mail = OutgoingMail::from_html("a@b.org", "Hi", "<h1>Title</h1><p>Body</p>");
        assert_eq!(mail.text, "TitleBody");
        assert_eq!(mail.html, "<h1>Title</h1><p>Body</p>");
    }
}
