//! Per-slot exclusivity for interactive sessions.
//!
//! A slot is whatever the caller generates into (a worksheet tab, a
//! student's board). Only one generation may run per slot; a second request
//! is refused until the first permit is dropped.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Set of busy slots.
#[derive(Debug, Clone, Default)]
pub struct SessionSlots {
    busy: Arc<Mutex<HashSet<String>>>,
}

impl SessionSlots {
    /// No busy slots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `slot`, or `None` while another permit holds it.
    pub fn try_acquire(&self, slot: impl Into<String>) -> Option<SlotPermit> {
        let slot = slot.into();
        if !self.lock().insert(slot.clone()) {
            debug!(slot = %slot, "Slot busy");
            return None;
        }
        debug!(slot = %slot, "Slot acquired");
        Some(SlotPermit {
            slot,
            busy: Arc::clone(&self.busy),
        })
    }

    /// Whether a permit currently holds `slot`.
    pub fn is_busy(&self, slot: &str) -> bool {
        self.lock().contains(slot)
    }

    /// Number of held slots.
    pub fn busy_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        lock_set(&self.busy)
    }
}

fn lock_set(set: &Mutex<HashSet<String>>) -> MutexGuard<'_, HashSet<String>> {
    match set.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Holds a slot until dropped.
#[derive(Debug)]
pub struct SlotPermit {
    slot: String,
    busy: Arc<Mutex<HashSet<String>>>,
}

impl SlotPermit {
    /// The held slot.
    pub fn slot(&self) -> &str {
        &self.slot
    }
}

impl Drop for SlotPermit {
    fn drop(&mut self) {
        lock_set(&self.busy).remove(&self.slot);
        debug!(slot = %self.slot, "Slot released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_slot_is_refused_until_released() {
        let slots = SessionSlots::new();
        let permit = slots.try_acquire("sheet-1").unwrap();
        assert!(slots.try_acquire("sheet-1").is_none());
        assert!(slots.try_acquire("sheet-2").is_some());
        assert!(slots.is_busy("sheet-1"));

        drop(permit);
        assert!(!slots.is_busy("sheet-1"));
        assert!(slots.try_acquire("sheet-1").is_some());
    }

    #[test]
    fn clones_share_state() {
        let slots = SessionSlots::new();
        let other = slots.clone();
        let _permit = slots.try_acquire("a").unwrap();
        assert!(other.try_acquire("a").is_none());
        assert_eq!(other.busy_count(), 1);
    }
}
