use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("email request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("email provider returned status {0}")]
    Provider(u16),
}

/// Outbound email side channel. OTP delivery is awaited in the request path
/// (a failed send must not report success to the caller); welcome and
/// acknowledgement mail is fire-and-forget.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_otp(&self, to: &str, name: &str, code: &str) -> Result<(), MailerError>;
    async fn send_welcome(&self, to: &str, name: &str) -> Result<(), MailerError>;
    async fn send_inquiry_ack(
        &self,
        to: &str,
        name: &str,
        product_name: &str,
        message: &str,
    ) -> Result<(), MailerError>;
}

#[derive(Serialize)]
struct OutboundMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: String,
}

/// Delivers mail through an HTTP email provider API.
pub struct HttpMailer {
    client: Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpMailer {
    pub fn new(api_url: String, api_key: String, from: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_url,
            api_key,
            from,
        }
    }

    async fn deliver(&self, to: &str, subject: &str, html: String) -> Result<(), MailerError> {
        let message = OutboundMessage {
            from: &self.from,
            to,
            subject,
            html,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&message)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MailerError::Provider(response.status().as_u16()));
        }

        tracing::debug!(to, subject, "email delivered");
        Ok(())
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send_otp(&self, to: &str, name: &str, code: &str) -> Result<(), MailerError> {
        let html = format!(
            "<p>Hello {name},</p>\
             <p>Your verification code is:</p>\
             <h1 style=\"letter-spacing: 5px;\">{code}</h1>\
             <p>This code is valid for 10 minutes. Please do not share it with anyone.</p>\
             <p>If you didn't request this code, please ignore this email.</p>"
        );
        self.deliver(to, "Your verification code", html).await
    }

    async fn send_welcome(&self, to: &str, name: &str) -> Result<(), MailerError> {
        let html = format!(
            "<p>Dear {name},</p>\
             <p>Thank you for joining us! Explore our collection of sarees, lehengas, \
             kurtas and dupattas, and visit the store to find the perfect outfit for \
             your special occasions.</p>\
             <p>Happy shopping!</p>"
        );
        self.deliver(to, "Welcome to the boutique!", html).await
    }

    async fn send_inquiry_ack(
        &self,
        to: &str,
        name: &str,
        product_name: &str,
        message: &str,
    ) -> Result<(), MailerError> {
        let html = format!(
            "<p>Dear {name},</p>\
             <p>Thank you for your interest in <strong>{product_name}</strong>. \
             We have received your message and will get back to you within 24 hours.</p>\
             <blockquote>{message}</blockquote>"
        );
        self.deliver(to, "Thank you for your inquiry", html).await
    }
}

/// Development transport: logs instead of sending. Used when no email
/// provider is configured, and by the test suites.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_otp(&self, to: &str, _name: &str, code: &str) -> Result<(), MailerError> {
        tracing::info!(to, code, "otp email (log transport)");
        Ok(())
    }

    async fn send_welcome(&self, to: &str, _name: &str) -> Result<(), MailerError> {
        tracing::info!(to, "welcome email (log transport)");
        Ok(())
    }

    async fn send_inquiry_ack(
        &self,
        to: &str,
        _name: &str,
        product_name: &str,
        _message: &str,
    ) -> Result<(), MailerError> {
        tracing::info!(to, product_name, "inquiry ack email (log transport)");
        Ok(())
    }
}
