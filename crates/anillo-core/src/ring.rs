//! Fixed-capacity byte ring buffer with producer/consumer cursors.
//!
//! The buffer is a contiguous byte region reused cyclically: a write cursor
//! marks where the producer synthesizes the next sample, a read cursor marks
//! where the hardware callback copies out the next byte. Both wrap modulo the
//! capacity. All cursor arithmetic funnels through [`wrap_regions`], which
//! decomposes a possibly wrapping byte range into at most two contiguous
//! slices.
//!
//! # Memory
//!
//! The buffer is heap-allocated during construction but never reallocates.
//! No allocations occur in [`RingBuffer::fill`] or the drain operations, and
//! both complete in time proportional to the bytes moved — they are safe to
//! run under a lock shared with a real-time audio callback.
//!
//! # Underrun and overrun
//!
//! A drain always yields exactly the requested length; when the producer has
//! fallen behind it replays whatever bytes occupy the range (silence or a
//! stale tone). That is deliberate policy, not a fault: the consumer never
//! blocks and never returns partial data. Overrun is impossible by
//! construction — a fill only ever writes into the gap from the write cursor
//! forward to the read cursor.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

use crate::tone::{ToneConfig, Waveform};

/// Output channel count. One mono signal is duplicated to both.
pub const CHANNELS: usize = 2;

/// Size in bytes of one interleaved stereo sample pair (two `i16`s).
pub const BYTES_PER_SAMPLE: usize = CHANNELS * core::mem::size_of::<i16>();

/// One contiguous slice of the ring, as a byte offset and length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    /// Byte offset into the ring.
    pub offset: usize,
    /// Length in bytes. May be zero.
    pub len: usize,
}

/// Split a byte range starting at `start` into at most two contiguous
/// regions that never cross the end of a buffer of size `capacity`.
///
/// The first region runs from `start` toward the buffer end; the second is
/// empty unless the range wraps, in which case it covers the remainder from
/// offset 0.
#[inline]
pub fn wrap_regions(start: usize, len: usize, capacity: usize) -> [Region; 2] {
    debug_assert!(start < capacity);
    debug_assert!(len <= capacity);

    if start + len <= capacity {
        [
            Region { offset: start, len },
            Region { offset: 0, len: 0 },
        ]
    } else {
        let first = capacity - start;
        [
            Region { offset: start, len: first },
            Region { offset: 0, len: len - first },
        ]
    }
}

/// Fixed-capacity byte ring shared between a tone producer and an audio
/// callback.
///
/// Capacity, cursors and lengths are all in bytes, not samples. The write
/// cursor starts one sample pair ahead of the read cursor so the buffer is
/// seen as non-empty immediately and the first producer cycle fills it.
///
/// # Example
///
/// ```rust
/// use anillo_core::{RingBuffer, ToneConfig, Waveform};
///
/// let mut ring = RingBuffer::for_sample_rate(44_800);
/// let mut tone = ToneConfig::new(44_800, 256, 3000);
///
/// let written = ring.fill(&mut tone, Waveform::Sine);
/// assert_eq!(written, ring.capacity() - anillo_core::BYTES_PER_SAMPLE);
/// ```
#[derive(Clone, Debug)]
pub struct RingBuffer {
    /// Ring storage, zero-filled at construction (zero bytes decode as
    /// silence).
    buffer: Vec<u8>,
    /// Offset of the next byte the consumer will copy out.
    read_cursor: usize,
    /// Offset of the next byte the producer will synthesize.
    write_cursor: usize,
    /// Size of one interleaved sample pair.
    bytes_per_sample: usize,
}

impl RingBuffer {
    /// Create a ring of `capacity` bytes holding interleaved sample pairs of
    /// `bytes_per_sample` bytes each.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is not a positive multiple of `bytes_per_sample`
    /// or holds fewer than two sample pairs.
    pub fn new(capacity: usize, bytes_per_sample: usize) -> Self {
        assert!(bytes_per_sample > 0, "sample size must be > 0");
        assert!(
            capacity % bytes_per_sample == 0,
            "capacity must be a whole number of sample pairs"
        );
        assert!(
            capacity >= 2 * bytes_per_sample,
            "capacity must hold at least two sample pairs"
        );

        Self {
            buffer: vec![0; capacity],
            read_cursor: 0,
            // One sample pair ahead of the read cursor, so the buffer is
            // non-empty from the start and the first fill tops it up.
            write_cursor: bytes_per_sample,
            bytes_per_sample,
        }
    }

    /// Create a ring holding one second of interleaved stereo `i16` audio at
    /// the given sample rate.
    pub fn for_sample_rate(sample_rate: u32) -> Self {
        Self::new(sample_rate as usize * BYTES_PER_SAMPLE, BYTES_PER_SAMPLE)
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Size of one interleaved sample pair in bytes.
    pub fn bytes_per_sample(&self) -> usize {
        self.bytes_per_sample
    }

    /// Offset of the next byte to be consumed.
    pub fn read_cursor(&self) -> usize {
        self.read_cursor
    }

    /// Offset of the next byte to be produced.
    pub fn write_cursor(&self) -> usize {
        self.write_cursor
    }

    /// Bytes a fill may write: the forward gap from the write cursor to the
    /// read cursor.
    ///
    /// When the cursors coincide the whole capacity is reported free; the
    /// cursors only meet transiently (right after a complete fill), and the
    /// data a subsequent fill would overwrite is a seamless continuation of
    /// the same tone.
    pub fn free_bytes(&self) -> usize {
        if self.write_cursor < self.read_cursor {
            self.read_cursor - self.write_cursor
        } else {
            self.capacity() - self.write_cursor + self.read_cursor
        }
    }

    /// Bytes a drain may copy without replaying: the forward gap from the
    /// read cursor to the write cursor.
    pub fn available_bytes(&self) -> usize {
        if self.read_cursor <= self.write_cursor {
            self.write_cursor - self.read_cursor
        } else {
            self.capacity() - self.read_cursor + self.write_cursor
        }
    }

    /// Producer side: synthesize samples into all currently free space.
    ///
    /// Writes the same amplitude to both stereo channel slots (little
    /// endian), advancing the tone's sample index once per sample pair, then
    /// advances the write cursor up to (never past) the read cursor. Returns
    /// the number of bytes the write cursor advanced.
    ///
    /// Call this under the same lock the drain side uses.
    pub fn fill(&mut self, tone: &mut ToneConfig, waveform: Waveform) -> usize {
        // Synthesis emits interleaved stereo i16 pairs; the ring must be
        // sized in the same units.
        debug_assert!(self.bytes_per_sample == BYTES_PER_SAMPLE);

        let free = self.free_bytes();
        let regions = wrap_regions(self.write_cursor, free, self.capacity());

        // End-of-buffer region first, then the wrapped start-of-buffer
        // region, so sample indices stay contiguous in playback order.
        for region in regions {
            let samples = region.len / self.bytes_per_sample;
            let mut offset = region.offset;

            for _ in 0..samples {
                let amplitude = waveform.sample(tone).to_le_bytes();
                tone.advance();

                for _ in 0..CHANNELS {
                    self.buffer[offset] = amplitude[0];
                    self.buffer[offset + 1] = amplitude[1];
                    offset += 2;
                }
            }
        }

        self.write_cursor = (self.write_cursor + free) % self.capacity();
        free
    }

    /// Consumer side: copy exactly `dst.len()` bytes out of the ring,
    /// starting at the read cursor, and advance it.
    ///
    /// The copy splits into two regions when the range wraps past the buffer
    /// end. Never blocks, never returns short.
    ///
    /// # Panics
    ///
    /// Panics if `dst` is longer than the ring capacity.
    pub fn drain(&mut self, dst: &mut [u8]) {
        let [first, second] = wrap_regions(self.read_cursor, dst.len(), self.capacity());

        dst[..first.len].copy_from_slice(&self.buffer[first.offset..first.offset + first.len]);
        dst[first.len..].copy_from_slice(&self.buffer[second.offset..second.offset + second.len]);

        self.read_cursor = (self.read_cursor + dst.len()) % self.capacity();
    }

    /// Consumer side: drain directly into an interleaved `i16` slice.
    ///
    /// Same region arithmetic as [`RingBuffer::drain`], decoding each
    /// little-endian byte pair in place of an intermediate byte buffer, so
    /// an `&mut [i16]` audio callback needs no allocation or copy staging.
    pub fn drain_samples(&mut self, dst: &mut [i16]) {
        let byte_len = dst.len() * core::mem::size_of::<i16>();
        debug_assert!(self.read_cursor % 2 == 0);

        let regions = wrap_regions(self.read_cursor, byte_len, self.capacity());

        let mut slot = 0;
        for region in regions {
            let bytes = &self.buffer[region.offset..region.offset + region.len];
            for pair in bytes.chunks_exact(2) {
                dst[slot] = i16::from_le_bytes([pair[0], pair[1]]);
                slot += 1;
            }
        }

        self.read_cursor = (self.read_cursor + byte_len) % self.capacity();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_regions_without_wrap() {
        let [first, second] = wrap_regions(2, 4, 8);
        assert_eq!(first, Region { offset: 2, len: 4 });
        assert_eq!(second.len, 0);
    }

    #[test]
    fn wrap_regions_exact_to_end() {
        let [first, second] = wrap_regions(4, 4, 8);
        assert_eq!(first, Region { offset: 4, len: 4 });
        assert_eq!(second.len, 0);
    }

    #[test]
    fn wrap_regions_wrapping() {
        let [first, second] = wrap_regions(6, 4, 8);
        assert_eq!(first, Region { offset: 6, len: 2 });
        assert_eq!(second, Region { offset: 0, len: 2 });
    }

    #[test]
    fn new_ring_is_zeroed_one_pair_ahead() {
        let ring = RingBuffer::for_sample_rate(44_800);
        assert_eq!(ring.capacity(), 44_800 * BYTES_PER_SAMPLE);
        assert_eq!(ring.read_cursor(), 0);
        assert_eq!(ring.write_cursor(), BYTES_PER_SAMPLE);
        assert!(ring.buffer.iter().all(|&b| b == 0));
        assert_eq!(ring.available_bytes(), BYTES_PER_SAMPLE);
    }

    #[test]
    fn free_plus_available_is_capacity() {
        let mut ring = RingBuffer::new(64, 4);
        let mut tone = ToneConfig::new(64 / 4, 4, 3000);

        // Walk the cursors through several unequal configurations.
        for _ in 0..10 {
            let mut out = [0u8; 12];
            ring.drain(&mut out);
            assert_eq!(ring.free_bytes() + ring.available_bytes(), 64);

            ring.fill(&mut tone, Waveform::Square);
            assert_eq!(ring.free_bytes() + ring.available_bytes(), 64);
        }
    }

    #[test]
    fn fill_one_pair_then_wrap_to_read_cursor() {
        // Capacity 8, one pair ahead: exactly one free sample pair at 4..8.
        let mut ring = RingBuffer::new(8, BYTES_PER_SAMPLE);
        let mut tone = ToneConfig::new(100, 1, 3000);

        let written = ring.fill(&mut tone, Waveform::Square);

        assert_eq!(written, 4);
        assert_eq!(tone.sample_index, 1);
        // One +3000 amplitude, duplicated to both channels, little endian.
        let amp = 3000i16.to_le_bytes();
        assert_eq!(&ring.buffer[4..8], &[amp[0], amp[1], amp[0], amp[1]]);
        // Initial silence before the write cursor was left untouched.
        assert_eq!(&ring.buffer[0..4], &[0, 0, 0, 0]);
        // Write cursor wrapped onto the read cursor: the ring is full.
        assert_eq!(ring.write_cursor(), 0);
        assert_eq!(ring.write_cursor(), ring.read_cursor());
    }

    #[test]
    fn fill_splits_free_space_across_the_end() {
        let mut ring = RingBuffer::new(16, 4);
        // Move the read cursor to 8 so free space is 12..16 plus 0..8.
        let mut out = [0u8; 8];
        ring.drain(&mut out);
        assert_eq!(ring.read_cursor(), 8);

        let mut tone = ToneConfig::new(4, 1, 2000);
        // Skip the initial pair already counted as available.
        ring.write_cursor = 12;
        let written = ring.fill(&mut tone, Waveform::Square);

        assert_eq!(written, 12);
        assert_eq!(tone.sample_index, 3);
        assert_eq!(ring.write_cursor(), 8);
        // All three pairs carry the +2000 amplitude.
        let amp = 2000i16.to_le_bytes();
        for pair_offset in [12, 0, 4] {
            assert_eq!(
                &ring.buffer[pair_offset..pair_offset + 4],
                &[amp[0], amp[1], amp[0], amp[1]],
                "pair at {pair_offset}"
            );
        }
    }

    #[test]
    fn fill_never_writes_past_read_cursor() {
        let mut ring = RingBuffer::new(32, 4);
        let mut tone = ToneConfig::new(8, 1, 3000);

        // Park the read cursor mid-buffer and mark the unconsumed span.
        let mut out = [0u8; 12];
        ring.drain(&mut out);
        let read = ring.read_cursor();
        ring.buffer[read..read + 4].copy_from_slice(&[0xAA; 4]);

        ring.fill(&mut tone, Waveform::Square);

        // The write cursor stopped exactly on the read cursor and the
        // unconsumed bytes survived.
        assert_eq!(ring.write_cursor(), read);
        assert_eq!(&ring.buffer[read..read + 4], &[0xAA; 4]);
    }

    #[test]
    fn drain_splits_across_the_end_in_order() {
        let mut ring = RingBuffer::new(8, 4);
        ring.buffer.copy_from_slice(&[10, 11, 12, 13, 14, 15, 16, 17]);
        ring.read_cursor = 4;

        let mut out = [0u8; 8];
        ring.drain(&mut out);

        // Region 1 = offsets 4..8, region 2 = offsets 0..4, in that order.
        assert_eq!(out, [14, 15, 16, 17, 10, 11, 12, 13]);
        // 4 + 8 = 12 mod 8.
        assert_eq!(ring.read_cursor(), 4);
    }

    #[test]
    fn drain_in_two_parts_matches_single_drain() {
        let mut ring = RingBuffer::new(64, 4);
        let mut tone = ToneConfig::new(16, 1, 3000);
        ring.fill(&mut tone, Waveform::Sine);

        let mut split_ring = ring.clone();

        let mut whole = [0u8; 40];
        ring.drain(&mut whole);

        let mut parts = [0u8; 40];
        let (first, second) = parts.split_at_mut(24);
        split_ring.drain(first);
        split_ring.drain(second);

        assert_eq!(whole, parts);
        assert_eq!(ring.read_cursor(), split_ring.read_cursor());
    }

    #[test]
    fn drain_replays_stale_bytes_on_underrun() {
        let mut ring = RingBuffer::new(16, 4);
        let mut tone = ToneConfig::new(4, 1, 1234);
        ring.fill(&mut tone, Waveform::Square);

        // Drain a full lap and then some: the second lap replays the same
        // contents instead of blocking or returning short.
        let mut first_lap = [0u8; 16];
        ring.drain(&mut first_lap);
        let mut second_lap = [0u8; 16];
        ring.drain(&mut second_lap);

        assert_eq!(first_lap, second_lap);
    }

    #[test]
    fn drain_samples_decodes_interleaved_pairs() {
        let mut ring = RingBuffer::new(16, 4);
        let mut tone = ToneConfig::new(4, 1, 3000);
        ring.fill(&mut tone, Waveform::Square);

        let mut bytes_ring = ring.clone();

        let mut samples = [0i16; 6];
        ring.drain_samples(&mut samples);

        let mut bytes = [0u8; 12];
        bytes_ring.drain(&mut bytes);

        for (i, sample) in samples.iter().enumerate() {
            let expected = i16::from_le_bytes([bytes[2 * i], bytes[2 * i + 1]]);
            assert_eq!(*sample, expected, "sample {i}");
        }
        assert_eq!(ring.read_cursor(), bytes_ring.read_cursor());
    }

    #[test]
    fn drain_samples_wraps_like_byte_drain() {
        let mut ring = RingBuffer::new(8, 4);
        ring.buffer.copy_from_slice(&[1, 0, 2, 0, 3, 0, 4, 0]);
        ring.read_cursor = 4;

        let mut samples = [0i16; 4];
        ring.drain_samples(&mut samples);

        assert_eq!(samples, [3, 4, 1, 2]);
        assert_eq!(ring.read_cursor(), 4);
    }

    #[test]
    #[should_panic]
    fn misaligned_capacity_panics() {
        let _ring = RingBuffer::new(10, 4);
    }
}
