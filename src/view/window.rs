use super::ViewId;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::trace;

/// Events that can be observed on the window, outside of any node view.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Pointer movement
    MouseMove,
    /// Pointer release
    MouseUp,
}

#[derive(Debug)]
struct Listener {
    key: u64,
    owner: ViewId,
    kind: ListenerKind,
}

type Listeners = RefCell<Vec<Listener>>;

/// The window-level listener registry. Cloning gives another handle to the same registry.
#[derive(Debug, Clone, Default)]
pub struct Window {
    listeners: Rc<Listeners>,
    next_key: Rc<Cell<u64>>,
}

impl Window {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `owner` for the given kinds of window events. The registration lasts as long as
    /// the returned guard.
    pub fn listen(&self, owner: ViewId, kinds: &[ListenerKind]) -> ListenerGuard {
        let mut keys = Vec::with_capacity(kinds.len());
        let mut listeners = self.listeners.borrow_mut();
        for &kind in kinds {
            let key = self.next_key.get();
            self.next_key.set(key + 1);
            listeners.push(Listener { key, owner, kind });
            keys.push(key);
        }
        trace!(?owner, ?kinds, "window listeners added");
        ListenerGuard {
            registry: Rc::downgrade(&self.listeners),
            keys,
        }
    }

    /// The views listening for the given kind, in registration order.
    pub fn owners(&self, kind: ListenerKind) -> Vec<ViewId> {
        let mut owners: Vec<ViewId> = Vec::new();
        for listener in self.listeners.borrow().iter() {
            if listener.kind == kind && !owners.contains(&listener.owner) {
                owners.push(listener.owner);
            }
        }
        owners
    }

    /// The number of active registrations.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

/// Keeps window listeners registered; dropping it removes them.
pub struct ListenerGuard {
    registry: Weak<Listeners>,
    keys: Vec<u64>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(listeners) = self.registry.upgrade() {
            listeners
                .borrow_mut()
                .retain(|listener| !self.keys.contains(&listener.key));
            trace!(keys = ?self.keys, "window listeners removed");
        }
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("keys", &self.keys)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{ListenerKind, Window};
    use crate::view::ViewId;

    #[test]
    fn test_guard_releases_listeners() {
        let window = Window::new();
        let a = window.listen(ViewId(1), &[ListenerKind::MouseMove, ListenerKind::MouseUp]);
        let b = window.listen(ViewId(2), &[ListenerKind::MouseUp]);
        assert_eq!(window.listener_count(), 3);
        assert_eq!(window.owners(ListenerKind::MouseUp), vec![ViewId(1), ViewId(2)]);
        assert_eq!(window.owners(ListenerKind::MouseMove), vec![ViewId(1)]);

        drop(a);
        assert_eq!(window.listener_count(), 1);
        assert_eq!(window.owners(ListenerKind::MouseMove), vec![]);
        drop(b);
        assert_eq!(window.listener_count(), 0);
    }

    #[test]
    fn test_guard_outlives_window() {
        let window = Window::new();
        let guard = window.listen(ViewId(1), &[ListenerKind::MouseUp]);
        drop(window);
        drop(guard);
    }
}
