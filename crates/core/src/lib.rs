//! Core library for the Waveview live audio surface.
//!
//! A small retained-mode scene of rectangular widgets is driven by a frame
//! loop with three redraw paths: live widgets are redrawn every frame,
//! widgets that changed state are redrawn once through a pending-redraw
//! queue, and a resize or expose repaints the whole surface. Audio capture,
//! the painter and the window system sit behind the traits in [`audio`],
//! [`canvas`] and [`platform`].

pub mod audio;
pub mod canvas;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod platform;
pub mod scene;
pub mod widget;

pub use audio::{
    AudioCapture, AudioPlayback, PcmReader, PcmWriter, SampleBuffer, StreamSpec, ToneGenerator,
    FULL_SCALE,
};
pub use canvas::{Canvas, Color, DisplayList, DrawCommand};
pub use config::{AppConfig, AudioConfig, WindowConfig};
pub use context::{DrawContext, EngineContext, RedrawQueue};
pub use dispatch::Dispatch;
pub use engine::{Engine, FrameReport};
pub use error::{Result, WaveviewError};
pub use geometry::{Anchor, Placement, Point, Rectangle, Size};
pub use platform::{Platform, PlatformEvent, ScriptedEvent, ScriptedPlatform};
pub use scene::{Roles, Scene, SceneBuilder};
pub use widget::{
    AudioClip, Clickable, Drawable, Live, Recorder, ToggleButton, WaveformViewer, Widget, WidgetId,
};
