//! Output device enumeration and format selection via cpal.

use crate::{Error, Result};
use anillo_core::CHANNELS;
use cpal::traits::{DeviceTrait, HostTrait};
use cpal::{Device, SampleFormat, SupportedStreamConfig};

/// Extract device name via `description()` (cpal 0.17+).
pub(crate) fn device_name(device: &Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// Audio output device information.
#[derive(Debug, Clone)]
pub struct OutputDevice {
    /// Human-readable device name.
    pub name: String,
    /// Default sample rate in Hz.
    pub default_sample_rate: u32,
    /// Whether the device advertises the fixed stream format the player
    /// requires (interleaved stereo signed 16-bit).
    pub supports_stereo_i16: bool,
}

/// Whether the device advertises any stereo i16 output config.
fn advertises_stereo_i16(device: &Device) -> bool {
    device
        .supported_output_configs()
        .map(|mut ranges| {
            ranges.any(|r| {
                r.sample_format() == SampleFormat::I16 && usize::from(r.channels()) == CHANNELS
            })
        })
        .unwrap_or(false)
}

/// List all available audio output devices.
pub fn list_output_devices() -> Result<Vec<OutputDevice>> {
    let host = cpal::default_host();
    let mut devices = Vec::new();

    let outputs = host
        .output_devices()
        .map_err(|e| Error::Stream(e.to_string()))?;

    for device in outputs {
        if let Ok(name) = device_name(&device) {
            let sample_rate = device
                .default_output_config()
                .map(|c| c.sample_rate())
                .unwrap_or(48000);

            devices.push(OutputDevice {
                name,
                default_sample_rate: sample_rate,
                supports_stereo_i16: advertises_stereo_i16(&device),
            });
        }
    }

    Ok(devices)
}

/// Get the default output device info, if any.
pub fn default_output_device() -> Result<Option<OutputDevice>> {
    let host = cpal::default_host();

    Ok(host.default_output_device().and_then(|d| {
        device_name(&d).ok().map(|name| OutputDevice {
            name,
            default_sample_rate: d
                .default_output_config()
                .map(|c| c.sample_rate())
                .unwrap_or(48000),
            supports_stereo_i16: advertises_stereo_i16(&d),
        })
    }))
}

/// Select a supported output config for stereo i16 at the exact sample rate.
///
/// Anything short of the fixed format is surfaced as
/// [`Error::FormatRejected`]: there is no fallback negotiation, the caller
/// treats it as fatal.
pub(crate) fn select_output_config(
    device: &Device,
    sample_rate: u32,
) -> Result<SupportedStreamConfig> {
    let ranges = device
        .supported_output_configs()
        .map_err(|e| Error::Stream(e.to_string()))?;

    ranges
        .filter(|r| {
            r.sample_format() == SampleFormat::I16 && usize::from(r.channels()) == CHANNELS
        })
        .find_map(|r| r.try_with_sample_rate(sample_rate))
        .ok_or(Error::FormatRejected { sample_rate })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_output_devices_does_not_fail() {
        // Device availability depends on the system; the call itself must
        // not error out or panic.
        let result = list_output_devices();
        assert!(result.is_ok());
    }

    #[test]
    fn default_output_device_does_not_fail() {
        let result = default_output_device();
        assert!(result.is_ok());
    }
}
