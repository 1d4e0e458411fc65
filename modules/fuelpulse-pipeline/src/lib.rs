//! The lead intelligence pipeline.
//!
//! One entry point, [`pipeline::LeadPipeline::process`], invoked once per
//! extracted signal: resolve the company, infer products, score, persist a
//! lead, and — above the notification threshold — alert subscribed sales
//! officers. Strictly sequential; only storage failures abort a signal.

pub mod catalog;
pub mod inference;
pub mod notify;
pub mod pipeline;
pub mod resolver;
pub mod scoring;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use inference::InferenceEngine;
pub use notify::{EmailSender, LeadSummary, MessageSender, NotificationRouter};
pub use pipeline::{LeadPipeline, NOTIFY_THRESHOLD};
pub use resolver::{normalize, EntityResolver};
pub use scoring::ScoringEngine;
