use nvsync_client::{ClientError, RendererError};
use nvsync_shared::{AttrValue, Attributes, CollectionKind, ObjectSource, RecordHandle, TypedBuffer};
use nvsync_test::{init_logger, test_renderer::READ_ONLY_ATTR, TestHarness};

fn mesh(harness: &mut TestHarness) -> RecordHandle {
    let handle = harness
        .host
        .add(
            CollectionKind::Mesh,
            ObjectSource::Url {
                url: "https://example.org/pial.gii".to_string(),
            },
            "pial",
            Attributes::new(),
        )
        .unwrap();
    harness.exchange();
    handle
}

fn live_property(harness: &TestHarness, handle: &RecordHandle, attr: &str) -> Option<AttrValue> {
    let (kind, id) = harness.session.bindings().lookup(handle)?;
    harness.renderer().object(kind, &id)?.property(attr).cloned()
}

#[test]
fn sparse_update_patches_both_ends() {
    init_logger();
    let mut harness = TestHarness::new();
    let handle = mesh(&mut harness);

    harness
        .host
        .send_buffer_change(&handle, "colors", TypedBuffer::from(vec![0.0f32; 4]))
        .unwrap();
    let applied = harness
        .host
        .send_buffer_update(
            &handle,
            "colors",
            &TypedBuffer::from(vec![1u32, 3]),
            &TypedBuffer::from(vec![7.0f32, 9.0]),
        )
        .unwrap();
    assert!(applied);

    let redraws_before = harness.renderer().redraws;
    harness.exchange();

    let expected = AttrValue::Buffer(TypedBuffer::from(vec![0.0f32, 7.0, 0.0, 9.0]));
    assert_eq!(live_property(&harness, &handle, "colors"), Some(expected.clone()));
    assert_eq!(
        harness.session.records(CollectionKind::Mesh)[0].attribute("colors"),
        Some(&expected)
    );
    assert_eq!(harness.renderer().redraws, redraws_before + 2);
    assert!(harness.client_errors.is_empty());
}

#[test]
fn update_to_missing_buffer_is_ignored() {
    init_logger();
    let mut harness = TestHarness::new();
    let handle = mesh(&mut harness);

    let applied = harness
        .host
        .send_buffer_update(
            &handle,
            "normals",
            &TypedBuffer::from(vec![0u16]),
            &TypedBuffer::from(vec![1.0f32]),
        )
        .unwrap();
    assert!(!applied);

    let redraws_before = harness.renderer().redraws;
    harness.exchange();

    assert!(harness.client_errors.is_empty());
    assert_eq!(live_property(&harness, &handle, "normals"), None);
    assert_eq!(harness.renderer().redraws, redraws_before);
}

#[test]
fn attribute_changes_reach_the_bound_object() {
    init_logger();
    let mut harness = TestHarness::new();
    let handle = mesh(&mut harness);

    harness.host.set_attribute(&handle, "opacity", 0.25).unwrap();
    harness.host.set_attribute(&handle, "visible", false).unwrap();
    harness.exchange();

    assert_eq!(
        live_property(&harness, &handle, "opacity"),
        Some(AttrValue::Number(0.25))
    );
    assert_eq!(
        live_property(&harness, &handle, "visible"),
        Some(AttrValue::Bool(false))
    );
}

#[test]
fn rejected_property_is_reported_not_fatal() {
    init_logger();
    let mut harness = TestHarness::new();
    let handle = mesh(&mut harness);

    harness.host.set_attribute(&handle, READ_ONLY_ATTR, 1.0).unwrap();
    harness.host.set_attribute(&handle, "opacity", 0.5).unwrap();
    harness.exchange();

    assert_eq!(harness.client_errors.len(), 1);
    assert!(matches!(
        harness.client_errors[0],
        ClientError::Renderer(RendererError::InvalidProperty { .. })
    ));
    assert_eq!(
        live_property(&harness, &handle, "opacity"),
        Some(AttrValue::Number(0.5))
    );
}

#[test]
fn patch_for_unknown_record_is_an_error() {
    init_logger();
    let mut harness = TestHarness::new();
    mesh(&mut harness);

    let error = harness
        .host
        .set_attribute(&RecordHandle::new("missing"), "opacity", 1.0)
        .unwrap_err();
    assert!(error.to_string().contains("missing"));
}
