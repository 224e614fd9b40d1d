//! # Synchronization Primitives for the Producer/Render Split
//!
//! ## The Problem
//!
//! ```text
//! Thread 1 (Tracking, ~30 Hz, jittered):  WRITE hand signal
//! Thread 2 (Render, display refresh):     READ hand signal
//!
//! With a queue:  render falls behind a fast producer, or replays stale poses
//! With nothing:  data race
//! ```
//!
//! ## The Solution: A Single Overwrite Slot
//!
//! ```text
//! Producer:  publish(A)  publish(B)  publish(C)
//! Consumer:        read → A                read → C   (B dropped, counted)
//! ```
//!
//! The signal is a continuously-varying control value, not an event stream.
//! Stale reads and dropped updates are both acceptable.

mod latest;

pub use latest::{LatestSlot, SlotReader, SlotWriter};
