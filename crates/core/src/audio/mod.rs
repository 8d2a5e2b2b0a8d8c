use std::{
    f64::consts::TAU,
    io::{self, Read, Write},
    thread,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};

use crate::{Result, WaveviewError};

/// Full-scale magnitude of a signed 16-bit sample (2^15). Every widget
/// normalises samples into `[-1, 1]` with this divisor.
pub const FULL_SCALE: f64 = 32768.0;

/// Format negotiated with the audio collaborator. Samples are always signed
/// 16-bit, interleaved across `channels`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSpec {
    pub sample_rate: u32,
    pub channels: u16,
}

impl StreamSpec {
    /// Wall time covered by `samples` interleaved samples.
    pub fn duration_of(&self, samples: usize) -> Duration {
        let frames = samples as u64 / u64::from(self.channels.max(1));
        Duration::from_nanos(frames * 1_000_000_000 / u64::from(self.sample_rate.max(1)))
    }
}

/// Blocking source of captured audio.
pub trait AudioCapture {
    /// Fills the whole of `buf`, blocking until enough audio is available.
    fn read(&mut self, buf: &mut [i16]) -> Result<()>;
}

impl<T: AudioCapture + ?Sized> AudioCapture for Box<T> {
    fn read(&mut self, buf: &mut [i16]) -> Result<()> {
        (**self).read(buf)
    }
}

/// Sink used for offline playback of a recorded clip.
pub trait AudioPlayback {
    fn write(&mut self, samples: &[i16]) -> Result<()>;
    /// Blocks until everything written so far has been played.
    fn drain(&mut self) -> Result<()>;
}

/// The buffer refreshed in place once per frame. Its length is fixed when it
/// is created; only the contents change.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<i16>,
}

impl SampleBuffer {
    pub fn new(len: usize) -> Self {
        Self {
            samples: vec![0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[i16] {
        &self.samples
    }

    /// Replaces the contents with the next buffer from `source`.
    pub fn refill(&mut self, source: &mut dyn AudioCapture) -> Result<()> {
        source.read(&mut self.samples)
    }
}

/// Capture from a raw signed 16-bit little-endian byte stream, e.g. stdin
/// piped from a system recorder.
#[derive(Debug)]
pub struct PcmReader<R> {
    inner: R,
    bytes: Vec<u8>,
}

impl<R: Read> PcmReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            bytes: Vec::new(),
        }
    }
}

impl<R: Read> AudioCapture for PcmReader<R> {
    fn read(&mut self, buf: &mut [i16]) -> Result<()> {
        self.bytes.resize(buf.len() * 2, 0);
        self.inner
            .read_exact(&mut self.bytes)
            .map_err(|err| WaveviewError::audio("read capture", err))?;
        for (sample, pair) in buf.iter_mut().zip(self.bytes.chunks_exact(2)) {
            *sample = i16::from_le_bytes([pair[0], pair[1]]);
        }
        Ok(())
    }
}

/// Playback into a raw signed 16-bit little-endian byte stream.
#[derive(Debug)]
pub struct PcmWriter<W> {
    inner: W,
    bytes: Vec<u8>,
}

impl<W: Write> PcmWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            bytes: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> AudioPlayback for PcmWriter<W> {
    fn write(&mut self, samples: &[i16]) -> Result<()> {
        self.bytes.clear();
        self.bytes
            .extend(samples.iter().flat_map(|sample| sample.to_le_bytes()));
        self.inner
            .write_all(&self.bytes)
            .map_err(|err| WaveviewError::audio("write playback", err))
    }

    fn drain(&mut self) -> Result<()> {
        self.inner
            .flush()
            .map_err(|err| WaveviewError::audio("drain playback", err))
    }
}

/// Deterministic sine source standing in for a capture device.
///
/// Every channel of a frame carries the same value. With pacing enabled a
/// read blocks for the wall time the buffer represents, so the frame loop
/// runs at the cadence a real device would impose.
#[derive(Debug)]
pub struct ToneGenerator {
    spec: StreamSpec,
    frequency: f64,
    amplitude: f64,
    position: u64,
    deadline: Option<Instant>,
}

impl ToneGenerator {
    pub fn new(spec: StreamSpec, frequency: f64) -> Self {
        Self {
            spec,
            frequency,
            amplitude: 0.8,
            position: 0,
            deadline: None,
        }
    }

    /// Peak level as a fraction of full scale, clamped to `[0, 1]`.
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude.clamp(0.0, 1.0);
        self
    }

    pub fn paced(mut self) -> Self {
        self.deadline = Some(Instant::now());
        self
    }

    fn sample_at(&self, frame: u64) -> i16 {
        let t = frame as f64 / f64::from(self.spec.sample_rate.max(1));
        let value = (TAU * self.frequency * t).sin() * self.amplitude * (FULL_SCALE - 1.0);
        value.round() as i16
    }
}

impl AudioCapture for ToneGenerator {
    fn read(&mut self, buf: &mut [i16]) -> Result<()> {
        let channels = u64::from(self.spec.channels.max(1));
        for slot in buf.iter_mut() {
            *slot = self.sample_at(self.position / channels);
            self.position += 1;
        }

        if let Some(deadline) = self.deadline.as_mut() {
            *deadline += self.spec.duration_of(buf.len());
            let now = Instant::now();
            if *deadline > now {
                thread::sleep(*deadline - now);
            }
        }
        Ok(())
    }
}

/// Capture whose stream is already closed. Every read fails.
#[derive(Debug, Default)]
pub struct ClosedCapture;

impl AudioCapture for ClosedCapture {
    fn read(&mut self, _buf: &mut [i16]) -> Result<()> {
        Err(WaveviewError::audio(
            "read capture",
            io::Error::new(io::ErrorKind::BrokenPipe, "capture stream is closed"),
        ))
    }
}
