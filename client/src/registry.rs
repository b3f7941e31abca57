use std::collections::HashMap;

use log::info;

use nvsync_shared::{Channel, RendererMessage};

use crate::{renderer::Renderer, session::RendererSession};

/// Renderer sessions keyed by widget id, each created on first use and torn
/// down on release
pub struct SessionRegistry<R: Renderer, C: Channel<RendererMessage>> {
    sessions: HashMap<String, RendererSession<R, C>>,
}

impl<R: Renderer, C: Channel<RendererMessage>> Default for SessionRegistry<R, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Renderer, C: Channel<RendererMessage>> SessionRegistry<R, C> {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// The session of `widget_id`, created with `factory` if there is none
    pub fn acquire<F>(&mut self, widget_id: &str, factory: F) -> &mut RendererSession<R, C>
    where
        F: FnOnce() -> RendererSession<R, C>,
    {
        self.sessions
            .entry(widget_id.to_string())
            .or_insert_with(|| {
                info!("Creating renderer session for widget {}", widget_id);
                factory()
            })
    }

    pub fn get(&self, widget_id: &str) -> Option<&RendererSession<R, C>> {
        self.sessions.get(widget_id)
    }

    pub fn get_mut(&mut self, widget_id: &str) -> Option<&mut RendererSession<R, C>> {
        self.sessions.get_mut(widget_id)
    }

    pub fn contains(&self, widget_id: &str) -> bool {
        self.sessions.contains_key(widget_id)
    }

    /// Tears down and drops the session of `widget_id`
    pub fn release(&mut self, widget_id: &str) -> bool {
        let Some(mut session) = self.sessions.remove(widget_id) else {
            return false;
        };
        session.teardown();
        info!("Released renderer session for widget {}", widget_id);
        true
    }

    /// Tears down every session. Returns how many were released.
    pub fn release_all(&mut self) -> usize {
        let count = self.sessions.len();
        for (_, mut session) in self.sessions.drain() {
            session.teardown();
        }
        count
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
