use nvsync_client::{LoadOutcome, LoadTicket};
use nvsync_shared::{Attributes, CollectionKind, Instant, ObjectSource};
use nvsync_test::{init_logger, TestHarness, TestRenderer};

fn url(name: &str) -> ObjectSource {
    ObjectSource::Url {
        url: format!("https://example.org/{}.nii.gz", name),
    }
}

fn deferred_harness() -> TestHarness {
    let mut renderer = TestRenderer::new();
    renderer.defer_url_loads(true);
    TestHarness::with_renderer(renderer)
}

#[test]
fn later_pass_adopts_running_load() {
    init_logger();
    let mut harness = deferred_harness();
    harness
        .host
        .add(CollectionKind::Volume, url("a"), "a", Attributes::new())
        .unwrap();
    harness.exchange();
    assert_eq!(harness.renderer().deferred_loads(), 1);

    harness
        .host
        .add(CollectionKind::Volume, url("b"), "b", Attributes::new())
        .unwrap();
    harness.exchange();

    // A's load is reused, only B starts a new one
    assert_eq!(harness.renderer().deferred_loads(), 2);
    let report = harness.reports.last().unwrap();
    assert_eq!(report.pending_loads.len(), 2);
    assert!(harness.live_ids(CollectionKind::Volume).is_empty());

    harness.renderer_mut().finish_loads();
    harness.update(&Instant::now());

    assert_eq!(
        harness.renderer().names(CollectionKind::Volume),
        vec!["a.nii.gz".to_string(), "b.nii.gz".to_string()]
    );
    assert_eq!(
        harness.host_ids(CollectionKind::Volume),
        harness.live_ids(CollectionKind::Volume)
    );
    assert_eq!(
        harness
            .session
            .reconciler(CollectionKind::Volume)
            .unwrap()
            .loads_in_flight(),
        0
    );
}

#[test]
fn load_for_removed_record_is_superseded() {
    init_logger();
    let mut harness = deferred_harness();
    let handle = harness
        .host
        .add(CollectionKind::Volume, url("a"), "a", Attributes::new())
        .unwrap();
    harness.exchange();
    let ticket = harness.reports.last().unwrap().pending_loads[0];

    harness.host.remove_record(&handle).unwrap();
    harness.exchange();

    let (kind, result) = harness.renderer_mut().take_deferred(ticket).unwrap();
    let outcome = harness.session.complete_load(kind, ticket, result);

    assert_eq!(outcome, LoadOutcome::Superseded);
    assert!(harness.live_ids(CollectionKind::Volume).is_empty());
    assert!(harness.session.bindings().is_empty());
}

#[test]
fn unknown_ticket_is_ignored() {
    init_logger();
    let mut harness = deferred_harness();
    let outcome = harness.session.complete_load(
        CollectionKind::Mesh,
        LoadTicket(999),
        Err(nvsync_client::RendererError::ObjectNotFound {
            kind: CollectionKind::Mesh,
            id: "nothing".to_string(),
        }),
    );
    assert_eq!(outcome, LoadOutcome::Unknown);
}

#[test]
fn failed_load_is_reported_for_its_record_only() {
    init_logger();
    let mut harness = deferred_harness();
    let handle = harness
        .host
        .add(CollectionKind::Volume, url("a"), "a", Attributes::new())
        .unwrap();
    harness.exchange();
    let ticket = harness.reports.last().unwrap().pending_loads[0];
    let (kind, _) = harness.renderer_mut().take_deferred(ticket).unwrap();

    let outcome = harness.session.complete_load(
        kind,
        ticket,
        Err(nvsync_client::RendererError::LoadFailed {
            kind,
            name: "a.nii.gz".to_string(),
            reason: "404".to_string(),
        }),
    );

    match outcome {
        LoadOutcome::Failed(failure) => assert_eq!(failure.handle, handle),
        other => panic!("unexpected outcome {:?}", other),
    }
    assert!(harness.live_ids(CollectionKind::Volume).is_empty());
}
