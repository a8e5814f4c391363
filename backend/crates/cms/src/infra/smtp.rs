//! SMTP mailer backed by `lettre`

use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::application::config::MailerConfig;
use crate::domain::services::{Mailer, OutgoingMail, ServiceError};

#[derive(Clone)]
struct Relay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    domain: String,
}

/// Without credentials the mailer is built disabled and every send fails
/// with `NotConfigured`.
#[derive(Clone)]
pub struct SmtpMailer {
    relay: Option<Relay>,
}

impl SmtpMailer {
    pub fn new(config: &MailerConfig) -> Result<Self, ServiceError> {
        if config.user.is_empty() || config.password.is_empty() {
            tracing::warn!("SMTP credentials not set, email sending is disabled");
            return Ok(Self { relay: None });
        }

        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| ServiceError::Transport(format!("invalid sender address: {e}")))?;
        let domain = from.email.domain().to_string();

        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.user.clone(),
                config.password.expose().to_string(),
            ))
            .build();

        Ok(Self {
            relay: Some(Relay {
                transport,
                from,
                domain,
            }),
        })
    }

    fn relay(&self) -> Result<&Relay, ServiceError> {
        self.relay.as_ref().ok_or(ServiceError::NotConfigured("smtp"))
    }

    /// Open a connection and authenticate
    pub async fn verify(&self) -> Result<(), ServiceError> {
        match self.relay()?.transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(ServiceError::Transport(
                "SMTP server refused the connection".to_string(),
            )),
            Err(e) => Err(ServiceError::Transport(e.to_string())),
        }
    }

    fn build(&self, mail: &OutgoingMail, message_id: &str) -> Result<Message, ServiceError> {
        let relay = self.relay()?;
        let to: Mailbox = mail
            .to
            .parse()
            .map_err(|e| ServiceError::Rejected {
                status: 400,
                message: format!("invalid recipient address: {e}"),
            })?;

        Message::builder()
            .from(relay.from.clone())
            .to(to)
            .subject(mail.subject.as_str())
            .message_id(Some(message_id.to_string()))
            .multipart(MultiPart::alternative_plain_html(
                mail.text.clone(),
                mail.html.clone(),
            ))
            .map_err(|e| ServiceError::Transport(e.to_string()))
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<String, ServiceError> {
        let message_id = format!("<{}@{}>", uuid::Uuid::new_v4(), self.relay()?.domain);
        let message = self.build(mail, &message_id)?;

        let response = self
            .relay()?
            .transport
            .send(message)
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        if !response.is_positive() {
            return Err(ServiceError::Rejected {
                status: u16::from(response.code()),
                message: response
                    .message()
                    .map(|line| line.to_string())
                    .collect::<Vec<_>>()
                    .join(" "),
            });
        }
        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::Secret;

    fn config() -> MailerConfig {
        MailerConfig {
            user: "news@example.org".to_string(),
            password: Secret::new("app-password"),
            from: "Example NGO <news@example.org>".to_string(),
            ..MailerConfig::default()
        }
    }

    #[tokio::test]
    async fn test_disabled_without_credentials() {
        let mailer = SmtpMailer::new(&MailerConfig::default()).unwrap();
        let mail = OutgoingMail::from_html("reader@example.com", "Hello", "<p>Hi</p>");

        let err = mailer.send(&mail).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotConfigured("smtp")));
    }

    #[tokio::test]
    async fn test_builds_alternative_message() {
        let mailer = SmtpMailer::new(&config()).unwrap();
        let mail = OutgoingMail::from_html("reader@example.com", "Hello", "<p>Hi <b>there</b></p>");

        let message = mailer.build(&mail, "<id@example.org>").unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("Subject: Hello"));
        assert!(raw.contains("<id@example.org>"));
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("Hi there"));
    }

    #[tokio::test]
    async fn test_rejects_bad_recipient() {
        let mailer = SmtpMailer::new(&config()).unwrap();
        let mail = OutgoingMail::from_html("not an address", "Hello", "<p>Hi</p>");

        assert!(matches!(
            mailer.build(&mail, "<id@example.org>"),
            Err(ServiceError::Rejected { status: 400, .. })
        ));
    }
}
