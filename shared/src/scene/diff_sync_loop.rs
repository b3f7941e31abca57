use std::time::Duration;

use log::{info, warn};

use crate::{
    backends::{Instant, Timer},
    channel::Channel,
    config::SceneSyncConfig,
};

use super::snapshot::{diff, SceneDelta, SceneSnapshot};

/// Read access to the live scene state
pub trait SceneSource {
    /// Whether the user is currently interacting with the renderer
    fn has_focus(&self) -> bool;
    fn scene_snapshot(&self) -> SceneSnapshot;
}

/// Mirrors scene state to the peer on a fixed cadence, sending only the
/// fields that changed since the last successful send
pub struct DiffSyncLoop {
    interval: Duration,
    timer: Option<Timer>,
    last_sent: SceneSnapshot,
}

impl DiffSyncLoop {
    pub fn new(config: &SceneSyncConfig) -> Self {
        Self {
            interval: config.interval,
            timer: None,
            last_sent: SceneSnapshot::default(),
        }
    }

    /// Starts (or restarts) the loop from `baseline`. At most one timer is
    /// ever running.
    pub fn start(&mut self, now: &Instant, baseline: SceneSnapshot) {
        if self.timer.is_some() {
            info!("Scene sync restarted");
        }
        self.timer = Some(Timer::new(self.interval, now));
        self.last_sent = baseline;
    }

    pub fn stop(&mut self) {
        self.timer = None;
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn last_sent(&self) -> &SceneSnapshot {
        &self.last_sent
    }

    /// Runs one tick if the interval has elapsed. Several elapsed intervals
    /// collapse into a single tick. Returns the delta that was sent.
    pub fn poll<S, M, C>(&mut self, now: &Instant, source: &S, channel: &mut C) -> Option<SceneDelta>
    where
        S: SceneSource + ?Sized,
        M: From<SceneDelta>,
        C: Channel<M> + ?Sized,
    {
        let timer = self.timer.as_mut()?;
        if !timer.ringing(now) {
            return None;
        }
        timer.reset(now);

        if !source.has_focus() || !channel.is_live() {
            return None;
        }

        let current = source.scene_snapshot();
        let delta = diff(&self.last_sent, &current);
        if delta.is_empty() {
            return None;
        }
        if let Err(error) = channel.send(M::from(delta.clone())) {
            warn!("Scene delta not sent: {}", error);
            return None;
        }
        // only what was sent; fields held back stay at the peer's value
        self.last_sent.apply(&delta);
        Some(delta)
    }
}
