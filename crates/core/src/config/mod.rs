use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{audio::StreamSpec, geometry::Size, Result, WaveviewError};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub audio: AudioConfig,
}

impl AppConfig {
    pub fn live_defaults() -> Self {
        Self::default()
    }

    /// Reads a JSON configuration file. Missing fields fall back to defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.window.validate()?;
        self.audio.validate()
    }
}

/// Initial window geometry in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1250.0,
            height: 750.0,
        }
    }
}

impl WindowConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(WaveviewError::Config(format!(
                    "window {name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Configuration specific to the audio subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub sample_rate: u32,
    pub channels: u16,
    /// Interleaved samples delivered per blocking read. Fixed for a session.
    pub buffer_len: usize,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            channels: 2,
            buffer_len: 2048,
        }
    }
}

impl AudioConfig {
    pub fn spec(&self) -> StreamSpec {
        StreamSpec {
            sample_rate: self.sample_rate,
            channels: self.channels,
        }
    }

    /// Wall time covered by one buffer at the configured rate.
    pub fn buffer_duration(&self) -> Duration {
        self.spec().duration_of(self.buffer_len)
    }

    fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(WaveviewError::Config("sample rate must be non-zero".into()));
        }
        if self.channels == 0 {
            return Err(WaveviewError::Config("channel count must be non-zero".into()));
        }
        if self.buffer_len == 0 {
            return Err(WaveviewError::Config("buffer length must be non-zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_session() {
        let config = AppConfig::live_defaults();
        assert_eq!(config.audio.sample_rate, 44_100);
        assert_eq!(config.audio.channels, 2);
        assert_eq!(config.audio.buffer_len, 2048);
        assert_eq!(config.window.size(), Size::new(1250.0, 750.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "audio": { "buffer_len": 512 } }"#).unwrap();
        assert_eq!(config.audio.buffer_len, 512);
        assert_eq!(config.audio.sample_rate, 44_100);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn rejects_empty_buffers_and_bad_windows() {
        let mut config = AppConfig::default();
        config.audio.buffer_len = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("buffer length"));

        let mut config = AppConfig::default();
        config.window.height = f64::NAN;
        assert!(matches!(config.validate(), Err(WaveviewError::Config(_))));
    }

    #[test]
    fn buffer_duration_uses_interleaved_frames() {
        let audio = AudioConfig {
            sample_rate: 1000,
            channels: 2,
            buffer_len: 200,
        };
        assert_eq!(audio.buffer_duration(), Duration::from_millis(100));
    }
}
