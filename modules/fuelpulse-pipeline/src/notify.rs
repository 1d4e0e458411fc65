//! Notification routing — multi-channel lead alerts.
//!
//! Transports sit behind `MessageSender`/`EmailSender` traits so tests run
//! against recording mocks. Each channel is `Option`al: missing credentials
//! disable the channel for the whole run, logged once at construction.
//! Dispatch is best-effort, at-most-once per (subscriber, channel, lead);
//! transport failures are logged and never propagate.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use fuelpulse_common::{FuelPulseError, NotificationTarget};

/// Message template rendered for push alerts.
pub const LEAD_ALERT_TEMPLATE: &str = "new_lead_alert";

// ---------------------------------------------------------------------------
// Transport traits
// ---------------------------------------------------------------------------

#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Dispatch a templated message to a phone number.
    async fn send_message(&self, phone: &str, template: &str, params: &[String]) -> Result<()>;
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Dispatch a plain-text email.
    async fn send_email(&self, email: &str, subject: &str, body: &str) -> Result<()>;
}

#[async_trait]
impl MessageSender for twilio::TwilioService {
    async fn send_message(&self, phone: &str, template: &str, params: &[String]) -> Result<()> {
        self.send_template(phone, template, params)
            .await
            .map(|_| ())
            .map_err(|e| FuelPulseError::Transport(e.to_string()).into())
    }
}

/// SendGrid client plus the configured sender address.
pub struct SendGridMailer {
    client: sendgrid_client::SendGridClient,
    from: String,
}

impl SendGridMailer {
    pub fn new(api_key: String, from: String) -> Self {
        Self {
            client: sendgrid_client::SendGridClient::new(api_key),
            from,
        }
    }
}

#[async_trait]
impl EmailSender for SendGridMailer {
    async fn send_email(&self, email: &str, subject: &str, body: &str) -> Result<()> {
        let mail = sendgrid_client::MailSendRequest::plain_text(&self.from, email, subject, body);
        self.client
            .send(&mail)
            .await
            .map_err(|e| FuelPulseError::Transport(e.to_string()))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// What subscribers see about a lead.
#[derive(Debug, Clone)]
pub struct LeadSummary {
    pub company_name: String,
    pub confidence: f64,
    pub signal_type: String,
    pub products: Vec<String>,
    pub source_name: String,
}

pub struct NotificationRouter {
    messenger: Option<Arc<dyn MessageSender>>,
    mailer: Option<Arc<dyn EmailSender>>,
}

impl NotificationRouter {
    pub fn new(
        messenger: Option<Arc<dyn MessageSender>>,
        mailer: Option<Arc<dyn EmailSender>>,
    ) -> Self {
        if messenger.is_none() {
            warn!("Message transport not configured; push channel disabled");
        }
        if mailer.is_none() {
            warn!("Email transport not configured; email channel disabled");
        }
        Self { messenger, mailer }
    }

    /// Route one lead to every subscriber's enabled channels. A subscriber
    /// missing the contact info for a channel silently skips it. Returns
    /// the number of successful dispatches.
    pub async fn notify(&self, lead: &LeadSummary, subscribers: &[NotificationTarget]) -> usize {
        let mut dispatched = 0;

        for sub in subscribers {
            if sub.push_enabled {
                if let (Some(messenger), Some(phone)) = (&self.messenger, &sub.phone) {
                    match messenger
                        .send_message(phone, LEAD_ALERT_TEMPLATE, &template_params(lead))
                        .await
                    {
                        Ok(()) => {
                            info!(phone = %phone, company = %lead.company_name, "Push alert sent");
                            dispatched += 1;
                        }
                        Err(e) => {
                            warn!(error = %e, phone = %phone, "Failed to send push alert");
                        }
                    }
                }
            }

            if sub.email_enabled {
                if let (Some(mailer), Some(email)) = (&self.mailer, &sub.email) {
                    match mailer
                        .send_email(email, &email_subject(lead), &email_body(lead))
                        .await
                    {
                        Ok(()) => {
                            info!(email = %email, company = %lead.company_name, "Email alert sent");
                            dispatched += 1;
                        }
                        Err(e) => {
                            warn!(error = %e, email = %email, "Failed to send email alert");
                        }
                    }
                }
            }
        }

        dispatched
    }
}

fn template_params(lead: &LeadSummary) -> Vec<String> {
    vec![
        lead.company_name.clone(),
        format!("{:.2}", lead.confidence),
        lead.signal_type.clone(),
    ]
}

fn email_subject(lead: &LeadSummary) -> String {
    format!("New Lead: {}", lead.company_name)
}

fn email_body(lead: &LeadSummary) -> String {
    let products = if lead.products.is_empty() {
        "none inferred".to_string()
    } else {
        lead.products.join(", ")
    };
    format!(
        "Company: {}\nScore: {:.2}\nSignal type: {}\nProducts: {}\nSource: {}\n",
        lead.company_name, lead.confidence, lead.signal_type, products, lead.source_name
    )
}
