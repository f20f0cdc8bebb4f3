//! Playback session: shared ring, output stream, and the drain callback.

use std::sync::{Arc, Mutex, PoisonError};

use anillo_core::{CHANNELS, RingBuffer, ToneConfig, Waveform};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, Stream};

use crate::device::select_output_config;
use crate::{Error, Result};

/// The ring buffer as shared between the producer and the audio callback.
///
/// One mutex guards both cursors together with the buffer contents; each
/// side acquires it once per cycle and releases it on every exit path via
/// the guard.
pub type SharedRing = Arc<Mutex<RingBuffer>>;

/// Allocate a shared one-second ring for the given sample rate.
pub fn shared_ring(sample_rate: u32) -> SharedRing {
    Arc::new(Mutex::new(RingBuffer::for_sample_rate(sample_rate)))
}

/// One producer fill cycle under the shared lock.
///
/// Locks once, synthesizes into all free space, unlocks. A lock poisoned by
/// a panicking peer is recovered into its inner guard: the cursor state is
/// plain integers and stays coherent.
pub fn fill_once(shared: &SharedRing, tone: &mut ToneConfig, waveform: Waveform) -> usize {
    let mut ring = shared.lock().unwrap_or_else(PoisonError::into_inner);
    ring.fill(tone, waveform)
}

/// Stream configuration for [`TonePlayer::start`].
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// Sample rate in Hz. The device must honor it exactly.
    pub sample_rate: u32,
    /// Device buffer size hint in frames.
    pub buffer_frames: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_800,
            buffer_frames: 4096,
        }
    }
}

/// A running tone playback session.
///
/// Owns the output stream and the shared ring. The stream plays from
/// construction; dropping the player stops and closes the device. Callers
/// that run a dedicated producer thread must join it before dropping the
/// player, so no fill is in flight during teardown.
pub struct TonePlayer {
    shared: SharedRing,
    sample_rate: u32,
    _stream: Stream,
}

impl TonePlayer {
    /// Open the default output device, verify the fixed format, register the
    /// drain callback, and start playback.
    ///
    /// Fails with [`Error::NoDevice`] when no output device exists and with
    /// [`Error::FormatRejected`] when the platform will not honor stereo
    /// signed 16-bit at the configured rate.
    pub fn start(config: &PlayerConfig) -> Result<Self> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(Error::NoDevice)?;

        // Fatal unless the fixed format is honored; no renegotiation.
        let supported = select_output_config(&device, config.sample_rate)?;

        let stream_config = cpal::StreamConfig {
            channels: CHANNELS as u16,
            sample_rate: config.sample_rate,
            buffer_size: BufferSize::Fixed(config.buffer_frames),
        };

        let shared = shared_ring(config.sample_rate);
        let ring = Arc::clone(&shared);

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                    // Same lock as the producer. No allocation, no logging,
                    // no blocking I/O here; the drain copies at most one
                    // device block and returns.
                    let mut guard = ring.lock().unwrap_or_else(PoisonError::into_inner);
                    guard.drain_samples(data);
                },
                move |err| {
                    tracing::error!(%err, "output stream error");
                },
                None,
            )
            .map_err(|e| Error::Stream(e.to_string()))?;

        // Unpause; the platform starts invoking the callback.
        stream.play().map_err(|e| Error::Stream(e.to_string()))?;

        tracing::info!(
            sample_rate = config.sample_rate,
            channels = CHANNELS,
            sample_format = %supported.sample_format(),
            buffer_frames = config.buffer_frames,
            "tone stream started"
        );

        Ok(Self {
            shared,
            sample_rate: config.sample_rate,
            _stream: stream,
        })
    }

    /// The honored sample rate.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Handle to the shared ring, for a dedicated producer thread.
    pub fn ring(&self) -> SharedRing {
        Arc::clone(&self.shared)
    }

    /// Run one inline producer cycle (main-loop shape).
    pub fn fill(&self, tone: &mut ToneConfig, waveform: Waveform) -> usize {
        fill_once(&self.shared, tone, waveform)
    }
}
