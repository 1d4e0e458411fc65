//! Test mocks for the transport trait boundaries.
//!
//! - `RecordingMessenger` / `RecordingMailer` — capture every dispatch.
//! - `FailingMessenger` / `FailingMailer` — always error, for the
//!   best-effort dispatch paths.

use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::notify::{EmailSender, MessageSender};

/// Records `(phone, template, params)` per dispatched message.
#[derive(Default)]
pub struct RecordingMessenger {
    calls: Mutex<Vec<(String, String, Vec<String>)>>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<(String, String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSender for RecordingMessenger {
    async fn send_message(&self, phone: &str, template: &str, params: &[String]) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((phone.to_string(), template.to_string(), params.to_vec()));
        Ok(())
    }
}

/// Records `(email, subject, body)` per dispatched mail.
#[derive(Default)]
pub struct RecordingMailer {
    calls: Mutex<Vec<(String, String, String)>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for RecordingMailer {
    async fn send_email(&self, email: &str, subject: &str, body: &str) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((email.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

pub struct FailingMessenger;

#[async_trait]
impl MessageSender for FailingMessenger {
    async fn send_message(&self, _phone: &str, _template: &str, _params: &[String]) -> Result<()> {
        bail!("message transport down")
    }
}

pub struct FailingMailer;

#[async_trait]
impl EmailSender for FailingMailer {
    async fn send_email(&self, _email: &str, _subject: &str, _body: &str) -> Result<()> {
        bail!("mail transport down")
    }
}
