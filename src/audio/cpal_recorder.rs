//! Microphone capture using cpal

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Host, SampleFormat, SampleRate, StreamConfig, SupportedStreamConfig};
use tracing::{debug, error, info, warn};

use super::interface::{AudioError, AudioRecorder};
use super::wav;
use crate::config_manager::audio::AudioConfig;

type SharedSamples = Arc<Mutex<Vec<f32>>>;
type SharedFailure = Arc<Mutex<Option<String>>>;

/// Records from the configured (or default) input device
pub struct CpalRecorder {
    config: AudioConfig,
}

impl CpalRecorder {
    pub fn new(config: AudioConfig) -> Self {
        Self { config }
    }

    /// Names of the host's input devices
    pub fn list_devices(host: &Host) -> Result<Vec<String>, AudioError> {
        let devices = host
            .input_devices()
            .map_err(|e| AudioError::DeviceConfig(e.to_string()))?;
        Ok(devices.filter_map(|d| d.name().ok()).collect())
    }

    fn select_device(&self, host: &Host) -> Result<Device, AudioError> {
        match &self.config.device {
            Some(name) => {
                let mut devices = host
                    .input_devices()
                    .map_err(|e| AudioError::DeviceConfig(e.to_string()))?;
                if let Some(device) =
                    devices.find(|d| d.name().map(|n| &n == name).unwrap_or(false))
                {
                    return Ok(device);
                }
                match Self::list_devices(host) {
                    Ok(available) => {
                        warn!("Input device {:?} not found; available: {:?}", name, available)
                    }
                    Err(e) => warn!("Input device {:?} not found; listing failed: {}", name, e),
                }
                Err(AudioError::DeviceNotFound(name.clone()))
            }
            None => host.default_input_device().ok_or(AudioError::NoInputDevice),
        }
    }

    /// Prefer the requested channel count at the requested rate, else the
    /// device's max rate for that channel count, else its default config.
    fn select_config(&self, device: &Device) -> Result<SupportedStreamConfig, AudioError> {
        let target_rate = SampleRate(self.config.sample_rate);
        let supported = device
            .supported_input_configs()
            .map_err(|e| AudioError::DeviceConfig(e.to_string()))?;

        let mut fallback = None;
        for cfg in supported {
            debug!(
                "Supported config: channels={}, sample_rate={:?}-{:?}, format={:?}",
                cfg.channels(),
                cfg.min_sample_rate(),
                cfg.max_sample_rate(),
                cfg.sample_format()
            );
            if cfg.channels() != self.config.channels {
                continue;
            }
            if cfg.min_sample_rate() <= target_rate && target_rate <= cfg.max_sample_rate() {
                return Ok(cfg.with_sample_rate(target_rate));
            }
            if fallback.is_none() {
                fallback = Some(cfg.with_max_sample_rate());
            }
        }

        match fallback {
            Some(cfg) => Ok(cfg),
            None => device
                .default_input_config()
                .map_err(|e| AudioError::DeviceConfig(e.to_string())),
        }
    }

    fn build_stream<T>(
        device: &Device,
        config: &StreamConfig,
        (samples, failure): (SharedSamples, SharedFailure),
    ) -> Result<cpal::Stream, AudioError>
    where
        T: cpal::Sample + cpal::SizedSample + Send + 'static,
        f32: cpal::FromSample<T>,
    {
        let channels = config.channels as usize;

        device
            .build_input_stream(
                config,
                move |data: &[T], _: &cpal::InputCallbackInfo| {
                    if let Ok(mut buffer) = samples.lock() {
                        // Down-mix to mono
                        for frame in data.chunks(channels) {
                            let sum: f32 = frame
                                .iter()
                                .map(|&s| <f32 as cpal::Sample>::from_sample(s))
                                .sum();
                            buffer.push(sum / frame.len() as f32);
                        }
                    }
                },
                move |err| {
                    error!("Audio stream error: {}", err);
                    if let Ok(mut slot) = failure.lock() {
                        slot.get_or_insert_with(|| err.to_string());
                    }
                },
                None,
            )
            .map_err(|e| AudioError::StreamBuild(e.to_string()))
    }
}

impl AudioRecorder for CpalRecorder {
    fn record(&self, path: &Path, duration: Duration) -> Result<(), AudioError> {
        let host = cpal::default_host();
        let device = self.select_device(&host)?;
        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());

        let supported = self.select_config(&device)?;
        let sample_format = supported.sample_format();
        let stream_config: StreamConfig = supported.config();
        let sample_rate = stream_config.sample_rate.0;
        info!(
            "Recording {:.1}s from {} ({} ch @ {} Hz, {:?})",
            duration.as_secs_f32(),
            device_name,
            stream_config.channels,
            sample_rate,
            sample_format
        );

        let expected = (duration.as_secs_f64() * sample_rate as f64).ceil() as usize;
        let samples: SharedSamples = Arc::new(Mutex::new(Vec::with_capacity(expected)));
        let failure: SharedFailure = Arc::new(Mutex::new(None));

        let sink = (samples.clone(), failure.clone());
        let stream = match sample_format {
            SampleFormat::F32 => Self::build_stream::<f32>(&device, &stream_config, sink)?,
            SampleFormat::I16 => Self::build_stream::<i16>(&device, &stream_config, sink)?,
            SampleFormat::U16 => Self::build_stream::<u16>(&device, &stream_config, sink)?,
            other => return Err(AudioError::UnsupportedFormat(format!("{:?}", other))),
        };

        stream
            .play()
            .map_err(|e| AudioError::StreamPlay(e.to_string()))?;
        std::thread::sleep(duration);
        drop(stream);

        if let Some(reason) = failure.lock().ok().and_then(|mut f| f.take()) {
            return Err(AudioError::StreamFailed(reason));
        }

        let mut captured = samples
            .lock()
            .map(|mut buf| std::mem::take(&mut *buf))
            .map_err(|e| AudioError::Buffer(e.to_string()))?;
        if captured.is_empty() {
            return Err(AudioError::Empty);
        }
        captured.truncate(expected);

        wav::write_pcm16_wav(path, &captured, sample_rate)?;
        info!("Recording saved to: {}", path.display());
        Ok(())
    }
}
