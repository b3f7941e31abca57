/// Connects a Host and a RendererSession through in-memory channels and
/// pumps messages between them
use log::warn;

use nvsync_client::{ClientConfig, ClientError, ReconcileReport, RendererSession};
use nvsync_host::{Host, HostConfig, HostError};
use nvsync_shared::{CollectionKind, HostMessage, Instant, RendererMessage};

use crate::{
    local_channel::{local_channel, LinkControl, LocalChannel, LocalInbox},
    test_renderer::TestRenderer,
};

// Upper bound on delivery rounds in one exchange, so a feedback loop fails
// the test instead of hanging it
const MAX_EXCHANGE_ROUNDS: usize = 1000;

/// Installs `env_logger` for test output. Safe to call from every test.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub type TestSession = RendererSession<TestRenderer, LocalChannel<RendererMessage>>;
pub type TestHost = Host<LocalChannel<HostMessage>>;

pub struct TestHarness {
    pub host: TestHost,
    pub session: TestSession,
    to_renderer: LocalInbox<HostMessage>,
    to_host: LocalInbox<RendererMessage>,
    link: LinkControl,
    /// Reports of every pass triggered by a delivered message
    pub reports: Vec<ReconcileReport>,
    pub client_errors: Vec<ClientError>,
    pub host_errors: Vec<HostError>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(
            HostConfig::default(),
            ClientConfig::default(),
            TestRenderer::new(),
        )
    }

    pub fn with_renderer(renderer: TestRenderer) -> Self {
        Self::with_config(HostConfig::default(), ClientConfig::default(), renderer)
    }

    pub fn with_config(
        host_config: HostConfig,
        client_config: ClientConfig,
        renderer: TestRenderer,
    ) -> Self {
        let link = LinkControl::new();
        let (host_channel, to_renderer) = local_channel::<HostMessage>(&link);
        let (renderer_channel, to_host) = local_channel::<RendererMessage>(&link);

        Self {
            host: Host::new(host_config, host_channel),
            session: RendererSession::new(client_config, renderer, renderer_channel),
            to_renderer,
            to_host,
            link,
            reports: Vec::new(),
            client_errors: Vec::new(),
            host_errors: Vec::new(),
        }
    }

    pub fn link(&self) -> &LinkControl {
        &self.link
    }

    pub fn renderer(&self) -> &TestRenderer {
        self.session.renderer()
    }

    pub fn renderer_mut(&mut self) -> &mut TestRenderer {
        self.session.renderer_mut()
    }

    /// Delivers queued messages in both directions until neither side has
    /// anything left to say. Returns the number of messages delivered.
    pub fn exchange(&mut self) -> usize {
        let mut delivered = 0;
        for _ in 0..MAX_EXCHANGE_ROUNDS {
            if self.to_renderer.is_empty() && self.to_host.is_empty() {
                return delivered;
            }
            delivered += self.deliver_to_renderer();
            delivered += self.deliver_to_host();
        }
        panic!(
            "messages still flowing after {} exchange rounds",
            MAX_EXCHANGE_ROUNDS
        );
    }

    /// Delivers only what the host has sent so far
    pub fn deliver_to_renderer(&mut self) -> usize {
        let messages = self.to_renderer.drain();
        let count = messages.len();
        for message in messages {
            match self.session.receive_message(message) {
                Ok(Some(report)) => self.reports.push(report),
                Ok(None) => {}
                Err(error) => {
                    warn!("renderer rejected message: {}", error);
                    self.client_errors.push(error);
                }
            }
        }
        count
    }

    /// Delivers only what the renderer has sent so far
    pub fn deliver_to_host(&mut self) -> usize {
        let messages = self.to_host.drain();
        let count = messages.len();
        for message in messages {
            if let Err(error) = self.host.receive_message(message) {
                warn!("host rejected message: {}", error);
                self.host_errors.push(error);
            }
        }
        count
    }

    /// Drives both ends once at `now`, then exchanges
    pub fn update(&mut self, now: &Instant) -> usize {
        self.host.update(now);
        self.session.update(now);
        self.exchange()
    }

    /// Messages the host sent that the renderer has not received yet
    pub fn pending_to_renderer(&self) -> usize {
        self.to_renderer.len()
    }

    pub fn pending_to_host(&self) -> usize {
        self.to_host.len()
    }

    /// Takes undelivered renderer messages without delivering them
    pub fn intercept_to_host(&mut self) -> Vec<RendererMessage> {
        self.to_host.drain()
    }

    pub fn intercept_to_renderer(&mut self) -> Vec<HostMessage> {
        self.to_renderer.drain()
    }

    pub fn host_names(&self, kind: CollectionKind) -> Vec<String> {
        self.host
            .collection(kind)
            .iter()
            .map(|record| record.name().to_string())
            .collect()
    }

    pub fn host_ids(&self, kind: CollectionKind) -> Vec<String> {
        self.host
            .collection(kind)
            .iter()
            .map(|record| record.id().to_string())
            .collect()
    }

    pub fn live_ids(&self, kind: CollectionKind) -> Vec<String> {
        self.renderer().ids(kind)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
