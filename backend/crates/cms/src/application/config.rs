//! Application Configuration
//!
//! Content defaults, donation details, SMTP and blob storage settings.

use std::env;
use std::fmt;
use std::time::Duration;

use serde::Serialize;

pub use auth::config::ConfigError;

/// CMS application configuration
#[derive(Debug, Clone)]
pub struct CmsConfig {
    pub news_page_size: i64,
    pub team_page_size: i64,
    pub newsletter_page_size: i64,
    /// Blob storage folder for uploads
    pub upload_folder: String,
    /// Request body limit for `POST /api/upload`
    pub max_upload_bytes: usize,
    pub donation: DonationInfo,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            news_page_size: 6,
            team_page_size: 6,
            newsletter_page_size: 50,
            upload_folder: "nho-news".to_string(),
            max_upload_bytes: 20 * 1024 * 1024,
            donation: DonationInfo::default(),
        }
    }
}

impl CmsConfig {
    pub fn development() -> Self {
        Self::default()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self {
            donation: DonationInfo::from_env(),
            ..Self::default()
        };

        if let Some(folder) = non_empty_var("UPLOAD_FOLDER") {
            config.upload_folder = folder;
        }
        config.news_page_size = parse_var("NEWS_PAGE_SIZE", config.news_page_size)?;
        config.team_page_size = parse_var("TEAM_PAGE_SIZE", config.team_page_size)?;
        config.newsletter_page_size =
            parse_var("NEWSLETTER_PAGE_SIZE", config.newsletter_page_size)?;
        config.max_upload_bytes = parse_var("UPLOAD_MAX_BYTES", config.max_upload_bytes)?;

        Ok(config)
    }
}

// ============================================================================
// Donation info
// ============================================================================

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankingInfo {
    pub bank_name: String,
    pub bank_address: String,
    pub telephone: String,
    pub swift: String,
    pub beneficiary_name: String,
    pub account_number: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IntermediaryBank {
    pub name: String,
    pub address: String,
    pub swift: String,
    pub chips: String,
    pub fed: String,
}

/// Served verbatim by `GET /api/donation-info`. Unset values are empty.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationInfo {
    pub banking_info: BankingInfo,
    pub intermediary_banks: [IntermediaryBank; 3],
}

impl DonationInfo {
    pub fn from_env() -> Self {
        let var = |name: &str| env::var(name).unwrap_or_default();

        let bank = |n: u8| IntermediaryBank {
            name: var(&format!("INTER_BANK_{n}_NAME")),
            address: var(&format!("INTER_BANK_{n}_ADDRESS")),
            swift: var(&format!("INTER_BANK_{n}_SWIFT")),
            chips: var(&format!("INTER_BANK_{n}_CHIPS")),
            fed: var(&format!("INTER_BANK_{n}_FED")),
        };

        Self {
            banking_info: BankingInfo {
                bank_name: var("DONATION_BANK_NAME"),
                bank_address: var("DONATION_BANK_ADDRESS"),
                telephone: var("DONATION_TELEPHONE"),
                swift: var("DONATION_SWIFT"),
                beneficiary_name: var("DONATION_BENEFICIARY_NAME"),
                account_number: var("DONATION_ACCOUNT_NUMBER"),
            },
            intermediary_banks: [bank(1), bank(2), bank(3)],
        }
    }
}

// ============================================================================
// SMTP
// ============================================================================

/// Secret string with redacted Debug output
#[derive(Clone, Default)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Secret").field(&"[REDACTED]").finish()
    }
}

#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub host: String,
    pub port: u16,
    /// Implicit TLS (port 465). Otherwise STARTTLS is required.
    pub secure: bool,
    pub user: String,
    pub password: Secret,
    /// Sender address; falls back to `user`
    pub from: String,
    /// Parallel SMTP sends during a bulk mailing
    pub bulk_concurrency: usize,
    /// Extra attempts per recipient after the first failure
    pub bulk_retries: u32,
    /// Delay before the first retry; doubles on each further attempt
    pub retry_backoff: Duration,
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            secure: false,
            user: String::new(),
            password: Secret::default(),
            from: String::new(),
            bulk_concurrency: 4,
            bulk_retries: 2,
            retry_backoff: Duration::from_millis(500),
        }
    }
}

impl MailerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let user = env::var("SMTP_USER").unwrap_or_default();
        let from = non_empty_var("SMTP_FROM").unwrap_or_else(|| user.clone());

        Ok(Self {
            host: non_empty_var("SMTP_HOST").unwrap_or(defaults.host),
            port: parse_var("SMTP_PORT", defaults.port)?,
            secure: env::var("SMTP_SECURE").map(|v| v == "true").unwrap_or(false),
            user,
            password: Secret::new(env::var("SMTP_PASS").unwrap_or_default()),
            from,
            bulk_concurrency: parse_var("MAIL_BULK_CONCURRENCY", defaults.bulk_concurrency)?.max(1),
            bulk_retries: parse_var("MAIL_BULK_RETRIES", defaults.bulk_retries)?,
            retry_backoff: Duration::from_millis(parse_var(
                "MAIL_RETRY_BACKOFF_MS",
                defaults.retry_backoff.as_millis() as u64,
            )?),
        })
    }
}

// ============================================================================
// Blob storage
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct BlobConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: Secret,
}

impl BlobConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let cloud_name = non_empty_var("CLOUDINARY_CLOUD_NAME");
        let api_key = non_empty_var("CLOUDINARY_API_KEY");
        let api_secret = non_empty_var("CLOUDINARY_API_SECRET");

        match (cloud_name, api_key, api_secret) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Ok(Self {
                cloud_name,
                api_key,
                api_secret: Secret::new(api_secret),
            }),
            _ if cfg!(debug_assertions) => {
                tracing::warn!("Cloudinary credentials not set, uploads will fail");
                Ok(Self::default())
            }
            (None, _, _) => Err(ConfigError::Missing("CLOUDINARY_CLOUD_NAME")),
            (_, None, _) => Err(ConfigError::Missing("CLOUDINARY_API_KEY")),
            (_, _, None) => Err(ConfigError::Missing("CLOUDINARY_API_SECRET")),
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match non_empty_var(name) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            reason: format!("could not parse {raw:?}"),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CmsConfig::default();
        assert_eq!(config.news_page_size, 6);
        assert_eq!(config.newsletter_page_size, 50);
        assert_eq!(config.upload_folder, "nho-news");

        let mailer = MailerConfig::default();
        assert_eq!(mailer.host, "smtp.gmail.com");
        assert_eq!(mailer.port, 587);
        assert_eq!(mailer.bulk_concurrency, 4);
    }

    #[test]
    fn test_donation_info_shape() {
        let json = serde_json::to_value(DonationInfo::default()).unwrap();
        assert_eq!(json["bankingInfo"]["bankName"], "");
        assert_eq!(json["bankingInfo"]["accountNumber"], "");
        assert_eq!(json["intermediaryBanks"].as_array().unwrap().len(), 3);
        assert_eq!(json["intermediaryBanks"][2]["chips"], "");
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret = Secret::new("hunter2");
        assert!(!format!("{secret:?}").contains("hunter2"));
        assert_eq!(secret.expose(), "hunter2");
    }
}
