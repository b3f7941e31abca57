use nvsync_shared::{
    AttrValue, Attributes, CollectionKind, HostMessage, ObjectSource, RendererMessage,
};
use nvsync_test::{init_logger, TestHarness};

/// Every message a real exchange produces survives its JSON form
#[test]
fn exchanged_messages_survive_json() {
    init_logger();
    let mut harness = TestHarness::new();
    let mut attributes = Attributes::new();
    attributes.insert("opacity".to_string(), AttrValue::Number(0.8));
    attributes.insert("colormap".to_string(), AttrValue::Text("gray".to_string()));
    harness
        .host
        .add(
            CollectionKind::Volume,
            ObjectSource::Url {
                url: "https://example.org/mni152.nii.gz".to_string(),
            },
            "mni152",
            attributes,
        )
        .unwrap();

    let to_renderer = harness.intercept_to_renderer();
    assert_eq!(to_renderer.len(), 1);
    for message in to_renderer {
        let text = message.to_json().unwrap();
        let decoded = HostMessage::from_json(&text).unwrap();
        assert_eq!(decoded, message);
        harness.session.receive_message(decoded).unwrap();
    }

    let to_host = harness.intercept_to_host();
    assert_eq!(to_host.len(), 1);
    for message in to_host {
        let text = message.to_json().unwrap();
        let decoded = RendererMessage::from_json(&text).unwrap();
        assert_eq!(decoded, message);
        harness.host.receive_message(decoded).unwrap();
    }

    assert_eq!(
        harness.host_ids(CollectionKind::Volume),
        harness.live_ids(CollectionKind::Volume)
    );
}
