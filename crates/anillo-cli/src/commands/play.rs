//! Tone playback command.
//!
//! Opens the device, then runs one of the two producer shapes: the default
//! inline loop (fill once per main-loop iteration) or a dedicated producer
//! thread with `--threaded`. Either way the hardware callback drains the
//! same shared ring on its own thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use anillo_core::{ToneConfig, Waveform};
use anillo_io::{PlayerConfig, TonePlayer, spawn_producer};
use clap::{Args, ValueEnum};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WaveArg {
    /// Square wave
    Square,
    /// Sine wave (plays at twice the nominal frequency)
    Sine,
}

impl From<WaveArg> for Waveform {
    fn from(arg: WaveArg) -> Self {
        match arg {
            WaveArg::Square => Waveform::Square,
            WaveArg::Sine => Waveform::Sine,
        }
    }
}

#[derive(Args)]
pub struct PlayArgs {
    /// Waveform to synthesize
    #[arg(short, long, value_enum, default_value = "square")]
    wave: WaveArg,

    /// Tone frequency in Hz
    #[arg(short, long, default_value_t = 256)]
    tone_hz: u32,

    /// Peak amplitude
    #[arg(short, long, default_value_t = 3000)]
    volume: i16,

    /// Output sample rate in Hz (the device must honor it exactly)
    #[arg(short, long, default_value_t = 44_800)]
    sample_rate: u32,

    /// Stop after this many seconds (runs until Ctrl+C when omitted)
    #[arg(short, long)]
    duration: Option<f32>,

    /// Run the producer on a dedicated thread instead of the main loop
    #[arg(long)]
    threaded: bool,

    /// Device buffer size hint in frames
    #[arg(long, default_value_t = 4096)]
    buffer_frames: u32,
}

pub fn run(args: PlayArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.tone_hz > 0, "tone frequency must be > 0");
    if let Some(seconds) = args.duration {
        anyhow::ensure!(seconds >= 0.0, "duration must be non-negative");
    }
    anyhow::ensure!(
        args.tone_hz <= args.sample_rate,
        "tone frequency {} Hz exceeds sample rate {} Hz",
        args.tone_hz,
        args.sample_rate
    );

    let config = PlayerConfig {
        sample_rate: args.sample_rate,
        buffer_frames: args.buffer_frames,
    };

    // A rejected format is fatal: the error propagates and the process
    // exits non-zero without attempting playback.
    let player = TonePlayer::start(&config)?;

    let waveform = Waveform::from(args.wave);
    let tone = ToneConfig::new(args.sample_rate, args.tone_hz, args.volume);
    tracing::info!(
        wave_period = tone.wave_period,
        threaded = args.threaded,
        "tone configured"
    );

    println!(
        "Playing {:?} at {} Hz, volume {}, {} Hz stereo i16{}",
        waveform,
        args.tone_hz,
        args.volume,
        args.sample_rate,
        if args.threaded { " (threaded producer)" } else { "" }
    );
    println!("Press Ctrl+C to stop.\n");

    // Quit signal: Ctrl+C clears the running flag observed by both shapes.
    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        println!("\nStopping...");
        r.store(false, Ordering::SeqCst);
    })?;

    let deadline = args
        .duration
        .map(|seconds| Instant::now() + Duration::from_secs_f32(seconds));
    let expired = |deadline: Option<Instant>| deadline.is_some_and(|d| Instant::now() >= d);

    if args.threaded {
        let handle = spawn_producer(
            player.ring(),
            tone,
            waveform,
            Arc::clone(&running),
        );

        // Main loop only watches for the quit signal.
        while running.load(Ordering::SeqCst) && !expired(deadline) {
            std::thread::sleep(Duration::from_millis(10));
        }

        // Teardown ordering: stop the producer and join it before the
        // player (and with it the device and the ring) goes away.
        running.store(false, Ordering::SeqCst);
        handle
            .join()
            .map_err(|_| anyhow::anyhow!("producer thread panicked"))?;
    } else {
        let mut tone = tone;
        // Inline shape: one fill per loop iteration, interleaved with the
        // quit checks the original main loop would do.
        while running.load(Ordering::SeqCst) && !expired(deadline) {
            player.fill(&mut tone, waveform);
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    drop(player);
    println!("Done.");
    Ok(())
}
