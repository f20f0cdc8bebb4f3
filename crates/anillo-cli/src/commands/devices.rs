//! Audio output device listing command.

use anillo_io::{default_output_device, list_output_devices};
use clap::Args;

#[derive(Args)]
pub struct DevicesArgs {
    /// Only show the default output device
    #[arg(long)]
    default: bool,
}

pub fn run(args: DevicesArgs) -> anyhow::Result<()> {
    if args.default {
        match default_output_device()? {
            Some(device) => {
                println!("Default Output Device");
                println!("=====================\n");
                println!("  Name: {}", device.name);
                println!("  Sample Rate: {} Hz", device.default_sample_rate);
                println!(
                    "  Stereo i16: {}",
                    if device.supports_stereo_i16 { "yes" } else { "no" }
                );
            }
            None => println!("No default output device."),
        }
        return Ok(());
    }

    let devices = list_output_devices()?;

    if devices.is_empty() {
        println!("No audio output devices found.");
        return Ok(());
    }

    println!("Available Output Devices");
    println!("========================\n");

    for (idx, device) in devices.iter().enumerate() {
        let format_note = if device.supports_stereo_i16 {
            ""
        } else {
            " (no stereo i16 — play will refuse it)"
        };
        println!(
            "  [{}] {} ({} Hz){}",
            idx, device.name, device.default_sample_rate, format_note
        );
    }

    println!("\nTotal: {} output(s)", devices.len());

    Ok(())
}
