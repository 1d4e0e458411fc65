//! End-to-end orchestrator tests: MemoryStore + recording transports,
//! no network, no database.

use std::sync::Arc;

use chrono::{Duration, Utc};

use fuelpulse_common::{FuelPulseError, NotificationTarget, Signal};
use fuelpulse_pipeline::testing::{RecordingMailer, RecordingMessenger};
use fuelpulse_pipeline::{LeadPipeline, NotificationRouter};
use fuelpulse_store::MemoryStore;

fn signal(company: &str, text: &str, signal_type: &str, captured_at: String) -> Signal {
    Signal {
        company_name: company.to_string(),
        text: text.to_string(),
        signal_type: signal_type.to_string(),
        source_name: "CPP Portal".to_string(),
        source_url: "https://eprocure.gov.in/tender/123".to_string(),
        industry: Some("Power".to_string()),
        location: None,
        captured_at,
    }
}

fn subscriber(phone: Option<&str>, email: Option<&str>) -> NotificationTarget {
    NotificationTarget {
        phone: phone.map(str::to_string),
        email: email.map(str::to_string),
        push_enabled: true,
        email_enabled: true,
        territory: None,
        product_codes: vec![],
    }
}

struct Harness {
    store: Arc<MemoryStore>,
    messenger: Arc<RecordingMessenger>,
    mailer: Arc<RecordingMailer>,
    pipeline: LeadPipeline,
}

fn harness(store: MemoryStore) -> Harness {
    let store = Arc::new(store);
    let messenger = Arc::new(RecordingMessenger::new());
    let mailer = Arc::new(RecordingMailer::new());
    let router = NotificationRouter::new(Some(messenger.clone()), Some(mailer.clone()));
    let pipeline = LeadPipeline::new(store.clone(), router);
    Harness {
        store,
        messenger,
        mailer,
        pipeline,
    }
}

#[tokio::test]
async fn tender_signal_becomes_scored_lead_and_notifies() {
    let h = harness(
        MemoryStore::new().with_subscriber(subscriber(Some("+911234567890"), Some("so@hpcl.in"))),
    );

    let (lead_id, products) = h
        .pipeline
        .process(&signal(
            "Tata Power Company Limited",
            "Tender for Furnace Oil for boiler heating",
            "tender",
            Utc::now().to_rfc3339(),
        ))
        .await
        .unwrap();

    let leads = h.store.leads();
    assert_eq!(leads.len(), 1);
    let lead = &leads[0];
    assert_eq!(lead.id, lead_id);
    assert_eq!(lead.confidence, 0.79);
    assert_eq!(lead.breakdown.intent, 1.0);
    assert_eq!(lead.breakdown.freshness, 1.0);
    assert_eq!(lead.breakdown.size, 0.2);
    assert_eq!(lead.breakdown.geography, 0.5);
    assert_eq!(lead.products_mentioned, vec!["FO".to_string()]);

    assert_eq!(products[0].code, "FO");
    assert_eq!(products[0].confidence, 0.9);

    // 0.79 >= 0.7: both channels fired for the one subscriber.
    assert_eq!(h.messenger.calls().len(), 1);
    assert_eq!(h.mailer.calls().len(), 1);
    assert_eq!(h.messenger.calls()[0].2[0], "Tata Power Company Limited");
}

#[tokio::test]
async fn sub_threshold_lead_never_reaches_the_router() {
    let h = harness(
        MemoryStore::new().with_subscriber(subscriber(Some("+911234567890"), Some("so@hpcl.in"))),
    );

    let month_old = (Utc::now() - Duration::days(30)).to_rfc3339();
    let (lead_id, _) = h
        .pipeline
        .process(&signal(
            "Smalltown Traders",
            "directory listing for industrial suppliers",
            "directory",
            month_old,
        ))
        .await
        .unwrap();

    // Lead persisted, but the gate was never crossed: no subscriber fetch,
    // no transport traffic.
    assert_eq!(h.store.leads().len(), 1);
    assert_eq!(h.store.leads()[0].id, lead_id);
    assert!(h.store.leads()[0].confidence < 0.7);
    assert_eq!(h.store.subscriber_queries(), 0);
    assert!(h.messenger.calls().is_empty());
    assert!(h.mailer.calls().is_empty());
}

#[tokio::test]
async fn contactless_subscriber_dispatches_nothing_but_lead_survives() {
    let h = harness(MemoryStore::new().with_subscriber(subscriber(None, None)));

    let (lead_id, _) = h
        .pipeline
        .process(&signal(
            "Tata Power",
            "Tender for Furnace Oil for boiler heating",
            "tender",
            Utc::now().to_rfc3339(),
        ))
        .await
        .unwrap();

    // The gate was crossed, the subscriber just had nowhere to be reached.
    assert_eq!(h.store.subscriber_queries(), 1);
    assert!(h.messenger.calls().is_empty());
    assert!(h.mailer.calls().is_empty());
    assert_eq!(h.store.leads()[0].id, lead_id);
}

#[tokio::test]
async fn name_variants_share_one_company_across_signals() {
    let h = harness(MemoryStore::new());

    h.pipeline
        .process(&signal(
            "Tata Power Ltd",
            "Tender for Furnace Oil",
            "tender",
            Utc::now().to_rfc3339(),
        ))
        .await
        .unwrap();
    h.pipeline
        .process(&signal(
            "Tata Power Company Limited",
            "diesel genset procurement",
            "news",
            Utc::now().to_rfc3339(),
        ))
        .await
        .unwrap();

    assert_eq!(h.store.companies().len(), 1);
    let leads = h.store.leads();
    assert_eq!(leads.len(), 2);
    assert_eq!(leads[0].company_id, leads[1].company_id);
}

#[tokio::test]
async fn storage_failure_aborts_the_signal() {
    let h = harness(MemoryStore::new().with_failing_writes());

    let err = h
        .pipeline
        .process(&signal(
            "Vedanta Ltd",
            "Tender for Furnace Oil",
            "tender",
            Utc::now().to_rfc3339(),
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, FuelPulseError::Storage(_)));
    assert!(h.store.leads().is_empty());
}
