//! Tone parameters and waveform generation.
//!
//! A [`ToneConfig`] carries the frequency/amplitude state for one synthesized
//! tone; a [`Waveform`] maps that state to a signed 16-bit amplitude. The
//! generator is pure: the caller (the ring buffer fill path) advances the
//! sample index exactly once per sample it writes.

use core::f32::consts::TAU;
use libm::sinf;

/// Waveform generation strategy, selected at runtime.
///
/// A tagged variant rather than a function pointer: the fill path matches on
/// it per sample, which the optimizer hoists out of the loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Waveform {
    /// Alternates between `+volume` and `-volume` every half period.
    #[default]
    Square,
    /// `volume * sin(2π * index / (wave_period / 2))`.
    ///
    /// The divisor is the half period, so the audible pitch is twice the
    /// nominal `tone_hz`. This matches the square generator's half-period
    /// stepping and is kept as-is.
    Sine,
}

/// Parameters and running state for one synthesized tone.
///
/// Mutated exclusively by the producer; the sample index is a monotonic
/// counter that wraps only via integer overflow and is never reset.
#[derive(Clone, Copy, Debug)]
pub struct ToneConfig {
    /// Target frequency in Hz.
    pub tone_hz: u32,
    /// Peak amplitude.
    pub volume: i16,
    /// Samples per full cycle (`sample_rate / tone_hz`).
    pub wave_period: u32,
    /// Monotonic sample counter.
    pub sample_index: u32,
}

impl ToneConfig {
    /// Create a tone for the given output sample rate.
    ///
    /// # Panics
    ///
    /// Panics if `tone_hz` is 0 or exceeds `sample_rate`.
    pub fn new(sample_rate: u32, tone_hz: u32, volume: i16) -> Self {
        assert!(tone_hz > 0, "tone frequency must be > 0");
        assert!(tone_hz <= sample_rate, "tone frequency above sample rate");

        Self {
            tone_hz,
            volume,
            wave_period: sample_rate / tone_hz,
            sample_index: 0,
        }
    }

    /// Advance the sample counter by one.
    ///
    /// Called once per sample written, after the amplitude is taken.
    #[inline]
    pub fn advance(&mut self) {
        self.sample_index = self.sample_index.wrapping_add(1);
    }
}

impl Waveform {
    /// Amplitude for the tone's current sample index.
    ///
    /// Pure with respect to the tone: repeated calls at the same index
    /// return the same value.
    #[inline]
    pub fn sample(self, tone: &ToneConfig) -> i16 {
        // Half period of 0 would divide by zero for tones near the sample
        // rate; clamp to one sample per half cycle.
        let half_period = (tone.wave_period / 2).max(1);

        match self {
            Waveform::Square => {
                if (tone.sample_index / half_period) % 2 == 0 {
                    tone.volume
                } else {
                    -tone.volume
                }
            }
            Waveform::Sine => {
                let phase = TAU * tone.sample_index as f32 / half_period as f32;
                (tone.volume as f32 * sinf(phase)) as i16
            }
        }
    }
}
