//! Listener registry and dispatch.

use std::fmt;

use strand_core::GraphListener;

/// Registered graph listeners, notified in registration order.
#[derive(Default)]
pub(crate) struct Listeners {
    entries: Vec<Box<dyn GraphListener>>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Box<dyn GraphListener>) {
        self.entries.push(listener);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Call `f` on every listener.
    #[inline]
    pub(crate) fn emit(&mut self, mut f: impl FnMut(&mut dyn GraphListener)) {
        for listener in &mut self.entries {
            f(listener.as_mut());
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
