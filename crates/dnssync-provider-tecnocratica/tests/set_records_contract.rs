//! Contract Test: Set Replacement
//!
//! For every `(name, type)` pair in the input, after `set_records` the zone
//! holds exactly the input records for that pair.
//!
//! Constraints verified:
//! - Existing record ids are reused by position before anything is created
//! - Surplus existing records are deleted, missing ones created
//! - Pairs absent from the input are never touched
//! - A failed call aborts the operation, nothing is rolled back

mod common;

use common::*;
use dnssync_core::{Context, RecordProvider};
use dnssync_provider_tecnocratica::TecnocraticaProvider;

#[tokio::test]
async fn one_desired_two_existing_updates_first_deletes_second() {
    let panel = FakePanel::new();
    let first = panel.seed(1, "www", "A", "192.0.2.1", 0);
    let second = panel.seed(1, "www", "A", "192.0.2.2", 0);
    let provider = TecnocraticaProvider::with_api(panel);

    let written = provider
        .set_records(
            &Context::background(),
            "example.com",
            &[record("www.example.com.", "A", "192.0.2.9")],
        )
        .await
        .expect("set succeeds");

    assert_eq!(written.len(), 1);
    assert_eq!(data_of(&written[0]), "192.0.2.9");

    let mutations = provider.api().mutations();
    assert_eq!(mutations.len(), 2);
    assert!(matches!(&mutations[0], Call::Update { record_id, .. } if *record_id == first));
    assert_eq!(
        mutations[1],
        Call::Delete {
            zone_id: 1,
            record_id: second
        }
    );

    let stored = provider.api().records(1);
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, first, "identity of the updated record is preserved");
    assert_eq!(stored[0].content, "192.0.2.9");
}

#[tokio::test]
async fn three_desired_one_existing_updates_and_creates() {
    let panel = FakePanel::new();
    let existing = panel.seed(1, "www", "A", "192.0.2.1", 0);
    let provider = TecnocraticaProvider::with_api(panel);

    let written = provider
        .set_records(
            &Context::background(),
            "example.com",
            &[
                record("www.example.com.", "A", "192.0.2.1"),
                record("www.example.com.", "A", "192.0.2.2"),
                record("www.example.com.", "A", "192.0.2.3"),
            ],
        )
        .await
        .expect("set succeeds");

    let data: Vec<String> = written.iter().map(data_of).collect();
    assert_eq!(data, vec!["192.0.2.1", "192.0.2.2", "192.0.2.3"]);

    let mutations = provider.api().mutations();
    assert_eq!(mutations.len(), 3);
    assert!(matches!(&mutations[0], Call::Update { record_id, .. } if *record_id == existing));
    assert!(matches!(&mutations[1], Call::Create { .. }));
    assert!(matches!(&mutations[2], Call::Create { .. }));
    assert!(!mutations.iter().any(|c| matches!(c, Call::Delete { .. })));

    assert_eq!(provider.api().records(1).len(), 3);
}

#[tokio::test]
async fn other_pairs_are_untouched() {
    let panel = FakePanel::new();
    panel.seed(1, "www", "A", "192.0.2.1", 0);
    let aaaa = panel.seed(1, "www", "AAAA", "2001:db8::1", 0);
    let mail = panel.seed(1, "mail", "A", "192.0.2.25", 0);
    let mx = panel.seed(1, "@", "MX", "mail.example.com", 10);
    let provider = TecnocraticaProvider::with_api(panel);

    provider
        .set_records(
            &Context::background(),
            "example.com",
            &[record("www.example.com.", "A", "192.0.2.9")],
        )
        .await
        .unwrap();

    for call in provider.api().mutations() {
        if let Call::Update { record_id, .. } | Call::Delete { record_id, .. } = call {
            assert!(![aaaa, mail, mx].contains(&record_id), "touched record {}", record_id);
        }
    }

    let stored = provider.api().records(1);
    assert_eq!(stored.len(), 4);
    assert!(stored.iter().any(|r| r.id == mx && r.content == "mail.example.com"));
}

#[tokio::test]
async fn apex_and_priority_records_are_reconciled() {
    let panel = FakePanel::new();
    let mx = panel.seed(1, "@", "MX", "old-mail.example.com", 20);
    let provider = TecnocraticaProvider::with_api(panel);

    let written = provider
        .set_records(
            &Context::background(),
            "example.com.",
            &[
                record("example.com.", "MX", "10 mail.example.com."),
                record("example.com.", "MX", "20 backup.example.com."),
            ],
        )
        .await
        .unwrap();

    let data: Vec<String> = written.iter().map(data_of).collect();
    assert_eq!(data, vec!["10 mail.example.com.", "20 backup.example.com."]);
    assert!(written.iter().all(|r| r.name == "example.com."));

    let stored = provider.api().records(1);
    assert_eq!(stored[0].id, mx);
    assert_eq!(stored[0].priority, 10);
    assert_eq!(stored[1].priority, 20);
}

#[tokio::test]
async fn empty_input_changes_nothing() {
    let panel = FakePanel::new();
    panel.seed(1, "www", "A", "192.0.2.1", 0);
    let provider = TecnocraticaProvider::with_api(panel);

    let written = provider
        .set_records(&Context::background(), "example.com", &[])
        .await
        .unwrap();

    assert!(written.is_empty());
    assert!(provider.api().mutations().is_empty());
    assert_eq!(provider.api().records(1).len(), 1);
}

#[tokio::test]
async fn failure_aborts_without_rollback() {
    let panel = FakePanel::new();
    let first = panel.seed(1, "www", "A", "192.0.2.1", 0);
    panel.fail_mutation(2);
    let provider = TecnocraticaProvider::with_api(panel);

    let err = provider
        .set_records(
            &Context::background(),
            "example.com",
            &[
                record("www.example.com.", "A", "192.0.2.7"),
                record("www.example.com.", "A", "192.0.2.8"),
                record("www.example.com.", "A", "192.0.2.9"),
            ],
        )
        .await
        .expect_err("create fails");

    assert_eq!(err.status(), Some(500));

    // The update before the failure stays applied, the last create never ran
    let stored = provider.api().records(1);
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, first);
    assert_eq!(stored[0].content, "192.0.2.7");
    assert_eq!(provider.api().mutations().len(), 2);
}
