use std::cell::Cell;

use nvsync_client::{ClientConfig, RendererSession, SessionRegistry};
use nvsync_shared::{
    CollectionKind, HostMessage, ManagedRecord, ObjectSource, RecordHandle, RendererMessage,
};
use nvsync_test::{init_logger, local_channel, LinkControl, LocalChannel, TestRenderer};

type Registry = SessionRegistry<TestRenderer, LocalChannel<RendererMessage>>;

fn new_session(link: &LinkControl) -> RendererSession<TestRenderer, LocalChannel<RendererMessage>> {
    let (channel, _inbox) = local_channel(link);
    RendererSession::new(ClientConfig::default(), TestRenderer::new(), channel)
}

#[test]
fn acquire_creates_once_per_widget() {
    init_logger();
    let link = LinkControl::new();
    let created = Cell::new(0);
    let mut registry = Registry::new();

    for _ in 0..3 {
        registry.acquire("widget-1", || {
            created.set(created.get() + 1);
            new_session(&link)
        });
    }
    registry.acquire("widget-2", || {
        created.set(created.get() + 1);
        new_session(&link)
    });

    assert_eq!(created.get(), 2);
    assert_eq!(registry.len(), 2);
    assert!(registry.contains("widget-1"));
}

#[test]
fn release_tears_down_the_session() {
    init_logger();
    let link = LinkControl::new();
    let mut registry = Registry::new();

    let session = registry.acquire("widget-1", || new_session(&link));
    session
        .receive_message(HostMessage::CollectionChanged {
            collection: CollectionKind::Volume,
            records: vec![ManagedRecord::new(
                RecordHandle::new("h"),
                Some(ObjectSource::Url {
                    url: "https://example.org/a.nii.gz".to_string(),
                }),
            )],
        })
        .unwrap();
    assert_eq!(registry.get("widget-1").unwrap().bindings().len(), 1);

    assert!(registry.release("widget-1"));
    assert!(!registry.release("widget-1"));
    assert!(registry.is_empty());

    // a released widget gets a fresh session
    let session = registry.acquire("widget-1", || new_session(&link));
    assert!(session.bindings().is_empty());
    assert!(session.records(CollectionKind::Volume).is_empty());
}

#[test]
fn release_all_empties_the_registry() {
    let link = LinkControl::new();
    let mut registry = Registry::new();
    registry.acquire("a", || new_session(&link));
    registry.acquire("b", || new_session(&link));

    assert_eq!(registry.release_all(), 2);
    assert!(registry.is_empty());
    assert!(registry.get_mut("a").is_none());
}
