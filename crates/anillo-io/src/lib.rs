//! Audio device and playback layer for the anillo tone streamer.
//!
//! This crate wires the lock-agnostic core (`anillo-core`) to a real output
//! device via [cpal](https://crates.io/crates/cpal):
//!
//! - **Device open**: [`TonePlayer::start`] opens the default output device,
//!   requires interleaved stereo signed 16-bit at the configured sample rate,
//!   and registers the drain callback. A format the platform will not honor
//!   is a fatal configuration error ([`Error::FormatRejected`]).
//! - **Shared ring**: the ring buffer lives behind one `Arc<Mutex<_>>`
//!   ([`SharedRing`]); the producer and the hardware callback both take that
//!   lock around cursor reads and writes.
//! - **Producer shapes**: fill inline from your own loop via
//!   [`TonePlayer::fill`], or hand the ring to a dedicated thread with
//!   [`spawn_producer`] and a shared running flag.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use anillo_core::{ToneConfig, Waveform};
//! use anillo_io::{PlayerConfig, TonePlayer};
//!
//! let config = PlayerConfig::default();
//! let player = TonePlayer::start(&config)?;
//! let mut tone = ToneConfig::new(player.sample_rate(), 256, 3000);
//!
//! loop {
//!     player.fill(&mut tone, Waveform::Square);
//!     std::thread::sleep(std::time::Duration::from_millis(1));
//! }
//! ```

mod device;
mod playback;
mod producer;

pub use device::{OutputDevice, default_output_device, list_output_devices};
pub use playback::{PlayerConfig, SharedRing, TonePlayer, fill_once, shared_ring};
pub use producer::spawn_producer;

/// Error types for device setup and streaming.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No audio output device available on the system.
    #[error("No audio output device available")]
    NoDevice,

    /// The platform will not honor the fixed stream format (stereo signed
    /// 16-bit at the requested rate). Unrecoverable; no playback is
    /// attempted.
    #[error("Output device rejected stereo i16 at {sample_rate} Hz")]
    FormatRejected {
        /// The sample rate that was requested.
        sample_rate: u32,
    },

    /// Stream construction or runtime error.
    #[error("Audio stream error: {0}")]
    Stream(String),
}

/// Convenience result type for device and playback operations.
pub type Result<T> = std::result::Result<T, Error>;
