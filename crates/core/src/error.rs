use std::io;

/// Result alias that carries the custom [`WaveviewError`] type.
pub type Result<T> = std::result::Result<T, WaveviewError>;

/// Common error type for the core crate.
///
/// Only fatal conditions are modelled. Drawing and click handling are total
/// and never produce one of these.
#[derive(Debug, thiserror::Error)]
pub enum WaveviewError {
    /// An audio device or stream call failed. The session cannot continue
    /// because skipping a buffer would desynchronise the live view.
    #[error("{operation} failed: {source}")]
    Audio {
        operation: &'static str,
        #[source]
        source: io::Error,
    },
    /// The configuration could not be accepted.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// The scene registry was populated inconsistently.
    #[error("invalid scene: {0}")]
    Scene(String),
    /// Wrapper around JSON (de)serialisation errors.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] io::Error),
    /// Free-form message for the application layer.
    #[error("{0}")]
    Message(String),
}

impl WaveviewError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    /// Wraps an IO error raised by the audio collaborator.
    pub fn audio(operation: &'static str, source: io::Error) -> Self {
        Self::Audio { operation, source }
    }
}

impl From<&str> for WaveviewError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for WaveviewError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
