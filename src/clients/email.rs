//! Outbound email through the Resend HTTP API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::EmailConfig;
use crate::constants::api::USER_AGENT;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Unsupported email provider: {0}")]
    UnsupportedProvider(String),

    #[error("Email API key is not configured")]
    MissingApiKey,

    #[error("Email sender is not configured")]
    MissingSender,

    #[error("Email request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Email provider rejected message (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError>;
}

#[derive(Serialize)]
struct ResendPayload<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
}

#[derive(Clone)]
pub struct ResendMailer {
    client: Client,
    config: EmailConfig,
}

impl ResendMailer {
    pub fn new(config: &EmailConfig) -> Result<Self, EmailError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(u64::from(
                config.request_timeout_seconds.max(1),
            )))
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Configuration problems surface on send, so the service still starts
    /// without email credentials.
    fn check_config(&self) -> Result<(), EmailError> {
        if !self.config.provider.eq_ignore_ascii_case("resend") {
            return Err(EmailError::UnsupportedProvider(self.config.provider.clone()));
        }
        if self.config.api_key.trim().is_empty() {
            return Err(EmailError::MissingApiKey);
        }
        if self.config.from.trim().is_empty() {
            return Err(EmailError::MissingSender);
        }
        Ok(())
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        self.check_config()?;

        let url = format!("{}/emails", self.config.base_url.trim_end_matches('/'));
        let payload = ResendPayload {
            from: &self.config.from,
            to: [to],
            subject,
            text: body,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(EmailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(to, subject, "Email accepted by provider");
        Ok(())
    }
}
