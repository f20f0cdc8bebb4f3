//! Anillo Core - ring buffer and tone synthesis primitives
//!
//! This crate provides the lock-agnostic core of the anillo tone streamer:
//! a fixed-capacity byte ring buffer with wraparound-aware cursor arithmetic,
//! and the waveform generators that feed it. It is designed for real-time
//! audio with zero allocation after construction.
//!
//! # Core Abstractions
//!
//! - [`RingBuffer`] - fixed-capacity byte ring with independent read/write
//!   cursors, a producer-side [`RingBuffer::fill`] and a consumer-side
//!   [`RingBuffer::drain`] / [`RingBuffer::drain_samples`]
//! - [`Region`] / [`wrap_regions`] - decomposition of a possibly wrapping
//!   byte range into at most two contiguous slices
//! - [`ToneConfig`] - frequency, amplitude and sample-index state for one tone
//! - [`Waveform`] - square/sine generation strategy, selected at runtime
//!
//! # Synchronization
//!
//! The buffer itself is single-threaded; callers that share it between a
//! producer and a hardware callback wrap it in their own mutual exclusion
//! (see `anillo-io`). Fill and drain complete in bounded time and never
//! allocate, so they are safe to run under a lock held inside an audio
//! callback.
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! anillo-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use anillo_core::{RingBuffer, ToneConfig, Waveform};
//!
//! let mut ring = RingBuffer::for_sample_rate(44_800);
//! let mut tone = ToneConfig::new(44_800, 256, 3000);
//!
//! // Producer cycle: synthesize into all currently free space.
//! ring.fill(&mut tone, Waveform::Square);
//!
//! // Consumer callback: always yields exactly the requested bytes.
//! let mut out = [0u8; 4096];
//! ring.drain(&mut out);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod ring;
pub mod tone;

pub use ring::{BYTES_PER_SAMPLE, CHANNELS, Region, RingBuffer, wrap_regions};
pub use tone::{ToneConfig, Waveform};
