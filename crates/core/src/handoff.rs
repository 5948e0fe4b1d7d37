//! Handoff storage between extraction and rendering.
//!
//! The print page runs in a different context from the extractor, so the
//! extracted article travels through a small keyed store instead of being
//! passed directly. [`Mailbox`] models that store as a single slot with
//! read-once semantics: a successful take clears the slot, so a reloaded
//! print page cannot render stale data.

use std::sync::Mutex;
use std::sync::PoisonError;

/// Single-slot, read-once store.
#[derive(Debug, Default)]
pub struct Mailbox<T> {
    slot: Mutex<Option<T>>,
}

impl<T> Mailbox<T> {
    pub fn new() -> Self {
        Self { slot: Mutex::new(None) }
    }

    /// Stores a value, replacing any previous one.
    pub fn put(&self, value: T) {
        *self.lock() = Some(value);
    }

    /// Takes the stored value, leaving the slot empty.
    pub fn take(&self) -> Option<T> {
        self.lock().take()
    }

    /// Empties the slot without returning the value.
    pub fn clear(&self) {
        *self.lock() = None;
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_none()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<T>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
