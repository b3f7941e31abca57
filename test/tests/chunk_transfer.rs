use std::time::Duration;

use nvsync_client::ClientConfig;
use nvsync_host::{HostConfig, HostEvent, TransferStatus};
use nvsync_shared::{
    AttrValue, Attributes, ChunkConfig, CollectionKind, Instant, ObjectSource, RecordHandle,
    TypedBuffer,
};
use nvsync_test::{init_logger, TestHarness, TestRenderer};

fn overlay() -> TypedBuffer {
    TypedBuffer::from((0..10).map(|value| value as f32 * 0.5).collect::<Vec<f32>>())
}

fn harness_with_chunks(chunk: ChunkConfig) -> (TestHarness, RecordHandle) {
    let mut harness = TestHarness::with_config(
        HostConfig { chunk },
        ClientConfig::default(),
        TestRenderer::new(),
    );
    let mut attributes = Attributes::new();
    attributes.insert("overlay".to_string(), AttrValue::Buffer(overlay()));
    let handle = harness
        .host
        .add(
            CollectionKind::Volume,
            ObjectSource::Url {
                url: "https://example.org/t1.nii.gz".to_string(),
            },
            "t1",
            attributes,
        )
        .unwrap();
    harness.exchange();
    (harness, handle)
}

fn live_overlay(harness: &TestHarness, handle: &RecordHandle) -> Option<TypedBuffer> {
    let (kind, id) = harness.session.bindings().lookup(handle)?;
    harness
        .renderer()
        .object(kind, &id)?
        .property("overlay")
        .and_then(AttrValue::as_buffer)
        .cloned()
}

#[test]
fn buffer_survives_any_chunk_size() {
    init_logger();
    // 40 bytes: one byte per chunk, half the buffer, more than the buffer
    for (chunk_size, expected_chunks) in [(1, 40), (20, 2), (41, 1)] {
        let (mut harness, handle) = harness_with_chunks(ChunkConfig {
            chunk_size,
            ..Default::default()
        });

        let total = harness.host.send_buffer_chunked(&handle, "overlay").unwrap();
        assert_eq!(total, expected_chunks);

        let now = Instant::now();
        harness.update(&now);

        assert_eq!(live_overlay(&harness, &handle), Some(overlay()));
        let record = &harness.session.records(CollectionKind::Volume)[0];
        assert_eq!(
            record.attribute("overlay").and_then(AttrValue::as_buffer),
            Some(&overlay())
        );
        assert!(harness.client_errors.is_empty());
    }
}

#[test]
fn text_transport_sends_base64_chunks() {
    init_logger();
    let (mut harness, handle) = harness_with_chunks(ChunkConfig {
        chunk_size: 64,
        text_chunk_size_cap: 16,
        ..Default::default()
    });
    harness.link().set_binary(false);

    let total = harness.host.send_buffer_chunked(&handle, "overlay").unwrap();
    assert_eq!(total, 3);

    harness.update(&Instant::now());
    assert_eq!(live_overlay(&harness, &handle), Some(overlay()));
}

#[test]
fn delayed_transfer_aborts_when_channel_goes_down() {
    init_logger();
    let (mut harness, handle) = harness_with_chunks(ChunkConfig {
        chunk_size: 8,
        inter_chunk_delay: Duration::from_millis(10),
        ..Default::default()
    });
    assert_eq!(harness.host.send_buffer_chunked(&handle, "overlay").unwrap(), 5);

    let mut now = Instant::now();
    assert!(harness.host.update(&now).is_empty());
    assert_eq!(harness.pending_to_renderer(), 1);

    harness.link().set_live(false);
    now.add_millis(10);
    let outcomes = harness.host.update(&now);

    assert_eq!(outcomes.len(), 1);
    assert_eq!(
        outcomes[0].status,
        TransferStatus::Aborted {
            sent: 1,
            total_chunks: 5
        }
    );
    assert_eq!(harness.host.pending_transfers(), 0);

    // the renderer never sees a partial buffer
    harness.exchange();
    assert_eq!(live_overlay(&harness, &handle), None);
}

#[test]
fn derived_buffers_flow_back_to_the_host() {
    init_logger();
    let mut harness = TestHarness::new();
    let handle = harness
        .host
        .add(
            CollectionKind::Volume,
            ObjectSource::Path {
                name: "brain.nii".to_string(),
                data: vec![3, 1, 4, 1, 5, 9, 2, 6],
            },
            "brain",
            Attributes::new(),
        )
        .unwrap();
    harness.exchange();
    harness.host.take_events();

    harness.update(&Instant::now());

    let buffer = harness
        .host
        .record(&handle)
        .and_then(|record| record.attribute("img"))
        .and_then(AttrValue::as_buffer)
        .cloned();
    assert_eq!(
        buffer,
        Some(TypedBuffer::from(vec![3u8, 1, 4, 1, 5, 9, 2, 6]))
    );
    assert!(harness.host.take_events().contains(&HostEvent::BufferReceived {
        handle,
        attr: "img".to_string(),
    }));
}
