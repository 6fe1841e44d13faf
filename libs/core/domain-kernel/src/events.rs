//! Pending domain events
//!
//! Each aggregate owns one [`EventBuffer`]. Operations append to it; the
//! application service drains it after the aggregate has been persisted.

/// Ordered buffer of events recorded since the last drain.
#[derive(Debug, Clone, PartialEq)]
pub struct EventBuffer<E> {
    pending: Vec<E>,
}

impl<E> Default for EventBuffer<E> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<E> EventBuffer<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event at the end of the buffer
    pub fn record(&mut self, event: E) {
        self.pending.push(event);
    }

    /// Events recorded since the last drain, oldest first
    pub fn events(&self) -> &[E] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Read every pending event and leave the buffer empty
    pub fn drain(&mut self) -> Vec<E> {
        std::mem::take(&mut self.pending)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Mutable access, used to back-fill ids assigned by the store
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, E> {
        self.pending.iter_mut()
    }
}
