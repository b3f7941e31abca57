use indexmap::IndexMap;
use log::info;

/// Cleanup callback stored in a [`Disposer`]
pub type DisposeFn = Box<dyn FnOnce()>;

/// Keyed registry of cleanup callbacks.
///
/// Each live object gets at most one callback, keyed by the object's id.
/// Callbacks run exactly once: either when their key is disposed, when they
/// are replaced by a newer registration, or on [`Disposer::dispose_all`].
/// Callbacks receive no access to the registry, so they cannot re-enter it.
#[derive(Default)]
pub struct Disposer {
    disposers: IndexMap<String, DisposeFn>,
}

impl Disposer {
    pub fn new() -> Self {
        Self {
            disposers: IndexMap::new(),
        }
    }

    /// Registers `dispose` under `key`.
    ///
    /// A callback already registered under `key` is run before it is
    /// replaced, so re-binding an object never leaks its previous cleanup.
    /// Returns `true` if a previous callback was replaced.
    pub fn register<F>(&mut self, key: impl Into<String>, dispose: F) -> bool
    where
        F: FnOnce() + 'static,
    {
        let key = key.into();
        let previous = self.disposers.insert(key, Box::new(dispose));
        match previous {
            Some(previous) => {
                previous();
                true
            }
            None => false,
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.disposers.contains_key(key)
    }

    /// Runs and removes the callback registered under `key`.
    ///
    /// Returns `false` (and does nothing) if there is no such callback, which
    /// makes repeated disposal of the same key a no-op.
    pub fn dispose(&mut self, key: &str) -> bool {
        let Some(dispose) = self.disposers.shift_remove(key) else {
            return false;
        };
        dispose();
        true
    }

    /// Runs every registered callback in registration order and clears the
    /// registry. Returns how many callbacks ran.
    pub fn dispose_all(&mut self) -> usize {
        let count = self.disposers.len();
        for (_, dispose) in self.disposers.drain(..) {
            dispose();
        }
        if count > 0 {
            info!("Disposer: disposed {} registered callbacks", count);
        }
        count
    }

    pub fn len(&self) -> usize {
        self.disposers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disposers.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.disposers.keys().map(String::as_str)
    }
}
