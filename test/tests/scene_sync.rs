use nvsync_host::HostEvent;
use nvsync_shared::{Instant, SceneSnapshot};
use nvsync_test::{init_logger, TestHarness};

fn after(start: &Instant, millis: u32) -> Instant {
    let mut now = *start;
    now.add_millis(millis);
    now
}

#[test]
fn changed_fields_reach_the_host_on_each_tick() {
    init_logger();
    let mut harness = TestHarness::new();
    let start = Instant::now();
    harness.session.start(&start);
    assert!(harness.session.is_syncing_scene());

    harness.renderer_mut().scene.render_azimuth = 45.0;
    harness.renderer_mut().scene.crosshair_pos = vec![0.1, 0.2, 0.3];

    // not due yet
    harness.update(&after(&start, 10));
    assert_eq!(harness.host.scene(), &SceneSnapshot::default());

    harness.update(&after(&start, 30));
    assert_eq!(harness.host.scene().render_azimuth, 45.0);
    assert_eq!(harness.host.scene().crosshair_pos, vec![0.1, 0.2, 0.3]);
    assert_eq!(
        harness.host.take_events(),
        vec![HostEvent::SceneChanged {
            fields: vec!["renderAzimuth", "crosshairPos"]
        }]
    );

    // nothing changed since the last send
    harness.update(&after(&start, 60));
    assert!(harness.host.take_events().is_empty());

    harness.renderer_mut().scene.gamma = 1.5;
    harness.update(&after(&start, 90));
    assert_eq!(harness.host.scene().gamma, 1.5);
    assert_eq!(harness.host.scene().render_azimuth, 45.0);
}

#[test]
fn unfocused_renderer_holds_its_changes() {
    init_logger();
    let mut harness = TestHarness::new();
    let start = Instant::now();
    harness.session.start(&start);

    harness.renderer_mut().focused = false;
    harness.renderer_mut().scene.render_elevation = -20.0;
    harness.update(&after(&start, 30));
    assert_eq!(harness.host.scene().render_elevation, 10.0);

    harness.renderer_mut().focused = true;
    harness.update(&after(&start, 60));
    assert_eq!(harness.host.scene().render_elevation, -20.0);
}

#[test]
fn teardown_stops_the_loop() {
    init_logger();
    let mut harness = TestHarness::new();
    let start = Instant::now();
    harness.session.start(&start);
    harness.session.teardown();

    harness.renderer_mut().scene.gamma = 3.0;
    harness.update(&after(&start, 30));
    assert_eq!(harness.host.scene().gamma, 1.0);
}
