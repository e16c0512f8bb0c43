//! Synchronous observer lists.
//!
//! A [`Signal`] owns the callbacks connected to it and invokes all of them,
//! in connection order, from inside [`Signal::emit`]. Everything runs on the
//! caller's thread before `emit` returns.

use std::fmt;

/// Handle returned by [`Signal::connect`], used to disconnect later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

type Slot<T> = Box<dyn FnMut(&T)>;

/// A list of callbacks notified with a `&T` payload.
pub struct Signal<T> {
    slots: Vec<(ConnectionId, Slot<T>)>,
    next_id: u64,
}

impl<T> Signal<T> {
    /// Create a signal with no connections.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            next_id: 1,
        }
    }

    /// Connect a callback. It runs on every subsequent [`emit`](Self::emit).
    pub fn connect(&mut self, slot: impl FnMut(&T) + 'static) -> ConnectionId {
        let id = ConnectionId(self.next_id);
        self.next_id += 1;
        self.slots.push((id, Box::new(slot)));
        id
    }

    /// Remove a callback.
    ///
    /// Returns `true` if the connection existed.
    pub fn disconnect(&mut self, id: ConnectionId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|(slot_id, _)| *slot_id != id);
        self.slots.len() != before
    }

    /// Invoke every connected callback with `payload`.
    pub fn emit(&mut self, payload: &T) {
        for (_, slot) in &mut self.slots {
            slot(payload);
        }
    }

    /// Number of connected callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if nothing is connected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Disconnect every callback.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.slots.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_emit_reaches_every_slot_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut signal = Signal::<i32>::new();
        for tag in ["a", "b"] {
            let log = Rc::clone(&log);
            signal.connect(move |value| log.borrow_mut().push(format!("{tag}{value}")));
        }
        signal.emit(&7);
        assert_eq!(*log.borrow(), vec!["a7".to_string(), "b7".to_string()]);
    }

    #[test]
    fn test_disconnect() {
        let count = Rc::new(RefCell::new(0));
        let mut signal = Signal::<()>::new();
        let id = {
            let count = Rc::clone(&count);
            signal.connect(move |_| *count.borrow_mut() += 1)
        };
        signal.emit(&());
        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        signal.emit(&());
        assert_eq!(*count.borrow(), 1);
        assert!(signal.is_empty());
    }
}
