/// In-memory channel for E2E testing
/// Routes messages between host and renderer without a transport
use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
};

use nvsync_shared::{Channel, ChannelError};

/// Link state shared by both directions of a connection
#[derive(Clone)]
pub struct LinkControl {
    live: Rc<Cell<bool>>,
    binary: Rc<Cell<bool>>,
}

impl LinkControl {
    pub fn new() -> Self {
        Self {
            live: Rc::new(Cell::new(true)),
            binary: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_live(&self) -> bool {
        self.live.get()
    }

    pub fn set_live(&self, live: bool) {
        self.live.set(live);
    }

    /// When `false`, senders must fall back to text payloads
    pub fn set_binary(&self, binary: bool) {
        self.binary.set(binary);
    }
}

impl Default for LinkControl {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending end of a one-way in-memory channel
pub struct LocalChannel<M> {
    queue: Rc<RefCell<VecDeque<M>>>,
    link: LinkControl,
    sent: usize,
}

impl<M> LocalChannel<M> {
    /// Messages accepted since the channel was created
    pub fn sent(&self) -> usize {
        self.sent
    }
}

impl<M> Channel<M> for LocalChannel<M> {
    fn is_live(&self) -> bool {
        self.link.is_live()
    }

    fn supports_binary(&self) -> bool {
        self.link.binary.get()
    }

    fn send(&mut self, message: M) -> Result<(), ChannelError> {
        if !self.link.is_live() {
            return Err(ChannelError::NotLive);
        }
        self.queue.borrow_mut().push_back(message);
        self.sent += 1;
        Ok(())
    }
}

/// Receiving end of a one-way in-memory channel
pub struct LocalInbox<M> {
    queue: Rc<RefCell<VecDeque<M>>>,
}

impl<M> LocalInbox<M> {
    pub fn receive(&self) -> Option<M> {
        self.queue.borrow_mut().pop_front()
    }

    pub fn drain(&self) -> Vec<M> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

pub fn local_channel<M>(link: &LinkControl) -> (LocalChannel<M>, LocalInbox<M>) {
    let queue = Rc::new(RefCell::new(VecDeque::new()));
    let channel = LocalChannel {
        queue: queue.clone(),
        link: link.clone(),
        sent: 0,
    };
    (channel, LocalInbox { queue })
}
