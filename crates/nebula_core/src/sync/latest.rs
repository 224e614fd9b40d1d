//! # Latest-Value Slot
//!
//! One value, overwritten by the producer, copied out by the consumer.
//!
//! ## Architecture
//!
//! ```text
//!                    ┌─────────────────────────────┐
//!                    │        LatestSlot<T>        │
//!                    │                             │
//!                    │  ┌───────────────────────┐  │
//!                    │  │   RwLock<T>  (value)  │  │
//!                    │  └───────────────────────┘  │
//!                    │  ┌───────────────────────┐  │
//!                    │  │ AtomicU64 (generation)│  │
//!                    │  └───────────────────────┘  │
//!                    └─────────────────────────────┘
//!                              │
//!              ┌───────────────┴───────────────┐
//!              ▼                               ▼
//!      ┌──────────────┐                ┌──────────────┐
//!      │  SlotWriter  │                │  SlotReader  │
//!      │  (tracking)  │                │ (frame loop) │
//!      └──────────────┘                └──────────────┘
//! ```
//!
//! ## Thread Safety
//!
//! - `publish` takes the write lock only for the duration of a move
//! - `latest` takes the read lock only for the duration of a clone
//! - the generation counter lets readers detect changes without locking

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

/// Single-slot overwrite channel.
///
/// ## Usage
///
/// ```rust,ignore
/// let slot = LatestSlot::new(SceneConfig::default());
///
/// // UI thread: replace wholesale
/// slot.publish(new_config);
///
/// // Frame loop: only act on change
/// if let Some(config) = reader.read_if_changed() {
///     integrator.apply_config(&config);
/// }
/// ```
pub struct LatestSlot<T> {
    /// The current value.
    value: RwLock<T>,
    /// Number of publications so far.
    generation: AtomicU64,
}

impl<T: Clone> LatestSlot<T> {
    /// Creates a slot holding `initial` at generation 0.
    #[must_use]
    pub fn new(initial: T) -> Arc<Self> {
        Arc::new(Self {
            value: RwLock::new(initial),
            generation: AtomicU64::new(0),
        })
    }

    /// Overwrites the current value. Never blocks on readers for longer than a clone.
    pub fn publish(&self, value: T) {
        *self.value.write() = value;
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Returns a copy of the current value.
    #[must_use]
    pub fn latest(&self) -> T {
        self.value.read().clone()
    }

    /// Number of publications so far.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Gets a writer handle for the producer side.
    #[must_use]
    pub fn writer(self: &Arc<Self>) -> SlotWriter<T> {
        SlotWriter {
            slot: Arc::clone(self),
        }
    }

    /// Gets a reader handle for the consumer side.
    ///
    /// The reader starts "caught up": the initial value does not count as a change.
    #[must_use]
    pub fn reader(self: &Arc<Self>) -> SlotReader<T> {
        SlotReader {
            slot: Arc::clone(self),
            seen: self.generation(),
            dropped: 0,
        }
    }
}

/// Producer handle. Cheap to clone; any number of producers may overwrite.
pub struct SlotWriter<T> {
    slot: Arc<LatestSlot<T>>,
}

impl<T: Clone> SlotWriter<T> {
    /// Overwrites the slot.
    #[inline]
    pub fn publish(&self, value: T) {
        self.slot.publish(value);
    }
}

impl<T> Clone for SlotWriter<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

/// Consumer handle. Tracks which generation it last observed.
pub struct SlotReader<T> {
    slot: Arc<LatestSlot<T>>,
    /// Generation observed by the last read.
    seen: u64,
    /// Publications overwritten before this reader saw them.
    dropped: u64,
}

impl<T: Clone> SlotReader<T> {
    /// Reads the latest value unconditionally.
    pub fn read(&mut self) -> T {
        let generation = self.slot.generation();
        let value = self.slot.latest();
        self.observe(generation);
        value
    }

    /// Reads the latest value only if something was published since the last read.
    pub fn read_if_changed(&mut self) -> Option<T> {
        let generation = self.slot.generation();
        if generation == self.seen {
            return None;
        }
        let value = self.slot.latest();
        self.observe(generation);
        Some(value)
    }

    /// True if something was published since the last read.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.slot.generation() != self.seen
    }

    /// Total publications this reader never observed.
    #[inline]
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    fn observe(&mut self, generation: u64) {
        if generation > self.seen {
            self.dropped += generation - self.seen - 1;
            self.seen = generation;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_creation() {
        let slot = LatestSlot::new(7_u32);
        assert_eq!(slot.latest(), 7);
        assert_eq!(slot.generation(), 0);
    }

    #[test]
    fn test_latest_value_wins() {
        let slot = LatestSlot::new(0_u32);
        let writer = slot.writer();
        let mut reader = slot.reader();

        writer.publish(1);
        writer.publish(2);
        writer.publish(3);

        assert_eq!(reader.read(), 3);
        // 1 and 2 were overwritten before the reader looked
        assert_eq!(reader.dropped(), 2);
    }

    #[test]
    fn test_read_if_changed() {
        let slot = LatestSlot::new(String::from("a"));
        let mut reader = slot.reader();

        assert!(!reader.has_changed());
        assert_eq!(reader.read_if_changed(), None);

        slot.publish(String::from("b"));
        assert!(reader.has_changed());
        assert_eq!(reader.read_if_changed().as_deref(), Some("b"));
        assert_eq!(reader.read_if_changed(), None);
        assert_eq!(reader.dropped(), 0);
    }

    #[test]
    fn test_stale_read_is_allowed() {
        let slot = LatestSlot::new(5_i32);
        let mut reader = slot.reader();

        // Nothing new: the same value is simply read again
        assert_eq!(reader.read(), 5);
        assert_eq!(reader.read(), 5);
        assert_eq!(reader.dropped(), 0);
    }

    #[test]
    fn test_cross_thread_publish() {
        let slot = LatestSlot::new(0_u64);
        let writer = slot.writer();
        let mut reader = slot.reader();

        let producer = std::thread::spawn(move || {
            for i in 1..=1000 {
                writer.publish(i);
            }
        });
        producer.join().unwrap();

        assert_eq!(reader.read(), 1000);
        assert_eq!(reader.dropped(), 999);
    }
}
