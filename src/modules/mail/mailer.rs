use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::core::config::MailConfig;
use crate::core::error::{AppError, Result};

/// Outbound delivery of contact-form notifications
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_contact_notification(
        &self,
        name: &str,
        email: &str,
        subject: Option<&str>,
        message: &str,
    ) -> Result<()>;
}

/// Sends through an SMTP relay. Builds a fresh transport per message to
/// avoid connection pooling issues; the blocking send runs on the blocking
/// thread pool.
pub struct SmtpMailer {
    host: String,
    port: u16,
    credentials: Credentials,
    from: String,
    receiver: String,
}

impl SmtpMailer {
    /// Build from config. Returns `None` unless every SMTP setting is
    /// present, in which case the caller falls back to [`NoopMailer`].
    pub fn from_config(config: &MailConfig) -> Option<Self> {
        let host = config.smtp_host.clone()?;
        let username = config.smtp_username.clone()?;
        let password = config.smtp_password.clone()?;
        let receiver = config.receiver.clone()?;

        let from = format!("\"GoWithGuide Contact\" <{}>", username);
        Some(Self {
            host,
            port: config.smtp_port,
            credentials: Credentials::new(username, password),
            from,
            receiver,
        })
    }

    fn build_transport(&self) -> Result<SmtpTransport> {
        Ok(SmtpTransport::relay(&self.host)
            .map_err(|e| AppError::Internal(format!("SMTP relay error: {}", e)))?
            .port(self.port)
            .credentials(self.credentials.clone())
            .build())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_contact_notification(
        &self,
        name: &str,
        email: &str,
        subject: Option<&str>,
        message: &str,
    ) -> Result<()> {
        let html_body = format!(
            r#"
      <h3>มีข้อความติดต่อใหม่</h3>
      <p><strong>ชื่อ:</strong> {}</p>
      <p><strong>อีเมลลูกค้า:</strong> {}</p>
      <p><strong>หัวข้อ:</strong> {}</p>
      <p><strong>ข้อความ:</strong></p>
      <p>{}</p>
    "#,
            name,
            email,
            subject.unwrap_or("-"),
            message
        );

        let mail = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| AppError::Internal(format!("Invalid from address: {}", e)))?,
            )
            .to(self
                .receiver
                .parse()
                .map_err(|e| AppError::Internal(format!("Invalid receiver address: {}", e)))?)
            .reply_to(
                email
                    .parse()
                    .map_err(|e| AppError::Internal(format!("Invalid reply-to address: {}", e)))?,
            )
            .subject(subject.unwrap_or("มีข้อความติดต่อใหม่"))
            .header(ContentType::TEXT_HTML)
            .body(html_body)
            .map_err(|e| AppError::Internal(format!("Failed to build email: {}", e)))?;

        let transport = self.build_transport()?;
        tokio::task::spawn_blocking(move || {
            transport
                .send(&mail)
                .map_err(|e| AppError::Internal(format!("Failed to send email: {}", e)))
        })
        .await
        .map_err(|e| AppError::Internal(format!("Email task failed: {}", e)))?
        .map(|_| ())
    }
}

/// Stands in when SMTP is not configured: the contact row is still stored,
/// the notification is only logged.
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send_contact_notification(
        &self,
        name: &str,
        email: &str,
        _subject: Option<&str>,
        _message: &str,
    ) -> Result<()> {
        tracing::info!(
            "SMTP not configured, skipping contact notification from {} <{}>",
            name,
            email
        );
        Ok(())
    }
}
