pub mod error;
pub mod types;

pub use error::{Result, SendGridError};
pub use types::MailSendRequest;

use tracing::debug;

const BASE_URL: &str = "https://api.sendgrid.com/v3";

pub struct SendGridClient {
    client: reqwest::Client,
    api_key: String,
}

impl SendGridClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    /// Send one mail. SendGrid answers 202 Accepted on success with an
    /// empty body.
    pub async fn send(&self, mail: &MailSendRequest) -> Result<()> {
        let url = format!("{}/mail/send", BASE_URL);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(mail)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SendGridError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        debug!(subject = %mail.subject, "Mail accepted by SendGrid");
        Ok(())
    }
}
