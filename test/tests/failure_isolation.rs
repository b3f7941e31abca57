use nvsync_client::{ReconcileError, RendererError};
use nvsync_shared::{Attributes, CollectionKind, ObjectSource};
use nvsync_test::{init_logger, test_renderer::CORRUPT_DATA, TestHarness};

#[test]
fn bad_records_fail_alone() {
    init_logger();
    let mut harness = TestHarness::new();

    let corrupt = harness
        .host
        .add(
            CollectionKind::Volume,
            ObjectSource::Path {
                name: "broken.nii".to_string(),
                data: CORRUPT_DATA.to_vec(),
            },
            "broken",
            Attributes::new(),
        )
        .unwrap();
    let good = harness
        .host
        .add(
            CollectionKind::Volume,
            ObjectSource::Url {
                url: "https://example.org/mni152.nii.gz".to_string(),
            },
            "mni152",
            Attributes::new(),
        )
        .unwrap();
    let empty = harness
        .host
        .add(
            CollectionKind::Volume,
            ObjectSource::Path {
                name: "empty.nii".to_string(),
                data: Vec::new(),
            },
            "empty",
            Attributes::new(),
        )
        .unwrap();
    harness.exchange();

    let report = harness.reports.last().unwrap();
    assert_eq!(report.failures.len(), 2);
    assert!(!report.is_complete());

    let corrupt_failure = report
        .failures
        .iter()
        .find(|failure| failure.handle == corrupt)
        .unwrap();
    assert!(matches!(
        corrupt_failure.error,
        ReconcileError::Renderer(RendererError::LoadFailed { .. })
    ));
    let empty_failure = report
        .failures
        .iter()
        .find(|failure| failure.handle == empty)
        .unwrap();
    assert!(matches!(
        empty_failure.error,
        ReconcileError::MissingSource { .. }
    ));

    // the good record is live and written back; the others stay unassigned
    let good_id = harness.host.record(&good).unwrap().id().to_string();
    assert!(!good_id.is_empty());
    assert_eq!(harness.live_ids(CollectionKind::Volume), vec![good_id]);
    assert!(harness.host.record(&corrupt).unwrap().id().is_empty());
    assert!(harness.host.record(&empty).unwrap().id().is_empty());
    assert!(harness.client_errors.is_empty());
}

#[test]
fn renderer_only_source_cannot_be_built_from_host() {
    init_logger();
    let mut harness = TestHarness::new();
    harness
        .host
        .add(
            CollectionKind::Mesh,
            ObjectSource::FromRenderer,
            "ghost",
            Attributes::new(),
        )
        .unwrap();
    harness.exchange();

    // a renderer-owned record whose object is gone is simply not shown
    let report = harness.reports.last().unwrap();
    assert!(report.is_complete());
    assert!(harness.live_ids(CollectionKind::Mesh).is_empty());
}
