//! # NEBULA Core
//!
//! Plumbing between the asynchronous hand-tracking producer and the
//! frame-clocked render loop.
//!
//! ## Architecture Rules
//!
//! 1. **Latest value wins** - the producer overwrites, the consumer reads
//!    whatever is current. No queue, no back-pressure.
//! 2. **Never block the frame** - reads are a short read-lock + copy.
//! 3. **Dropped updates are counted, not prevented**
//!
//! ## Example
//!
//! ```rust,ignore
//! use nebula_core::LatestSlot;
//!
//! let slot = LatestSlot::new(HandSignal::ABSENT);
//! let writer = slot.writer();
//! let mut reader = slot.reader();
//!
//! writer.publish(signal);          // tracking thread
//! let latest = reader.read();      // render thread, once per tick
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod clock;
pub mod sync;

pub use clock::{FrameClock, FrameTime};
pub use sync::{LatestSlot, SlotReader, SlotWriter};
