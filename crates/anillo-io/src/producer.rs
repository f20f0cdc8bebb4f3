//! Dedicated producer thread (the second concurrency shape).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use anillo_core::{ToneConfig, Waveform};

use crate::playback::{SharedRing, fill_once};

/// Spawn a thread that keeps the shared ring topped up while `running` is
/// set.
///
/// Each cycle locks once, fills all free space, unlocks, then sleeps briefly
/// — the ring holds a full second of audio, so the callback is never waiting
/// on this thread. Cancellation is cooperative: clear the flag and join the
/// handle before tearing down the stream, so no fill is in flight when the
/// buffer goes away.
pub fn spawn_producer(
    shared: SharedRing,
    mut tone: ToneConfig,
    waveform: Waveform,
    running: Arc<AtomicBool>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        while running.load(Ordering::SeqCst) {
            fill_once(&shared, &mut tone, waveform);
            std::thread::sleep(Duration::from_millis(1));
        }
    })
}
