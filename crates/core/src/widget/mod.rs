//! Widget capabilities and the stock widget set.
//!
//! A widget is a positioned rectangle that may additionally be drawable,
//! clickable, live (reading the shared sample buffer at draw time) or a
//! recorder (accumulating captured audio). Each capability is a separate
//! trait; [`Widget`] exposes whichever ones a concrete type implements so the
//! scene registry can file it under the matching roles.

mod button;
mod clip;
mod waveform;

pub use button::ToggleButton;
pub use clip::AudioClip;
pub use waveform::WaveformViewer;

use serde::{Deserialize, Serialize};

use crate::{
    canvas::Canvas,
    context::{DrawContext, EngineContext},
    geometry::{Rectangle, Size},
};

/// Index of a widget in its scene, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WidgetId(pub usize);

/// Renders onto the canvas.
pub trait Drawable {
    /// Draws the widget. Repeated calls with unchanged inputs give the same
    /// picture.
    fn draw(&mut self, canvas: &mut dyn Canvas, frame: &DrawContext<'_>);

    /// Forgets any incremental drawing progress so the next `draw` renders
    /// everything again.
    fn invalidate(&mut self) {}
}

/// Receives pointer clicks that land inside the widget's bounds.
pub trait Clickable {
    fn on_click(&mut self, id: WidgetId, ctx: &mut EngineContext);
}

/// Marker for drawables whose content comes from the shared sample buffer and
/// therefore changes every frame.
pub trait Live: Drawable {}

/// Accumulates captured audio while recording is active.
pub trait Recorder {
    /// Appends the current buffer contents to the history.
    fn record(&mut self, samples: &[i16]);

    fn history(&self) -> &[i16];
}

/// A positioned element of the scene.
pub trait Widget {
    fn name(&self) -> &str;

    fn bounds(&self) -> Rectangle;

    /// Re-solves the widget's rectangle after the window was resized.
    fn layout(&mut self, _window: Size) {}

    fn as_drawable_mut(&mut self) -> Option<&mut dyn Drawable> {
        None
    }

    fn as_clickable_mut(&mut self) -> Option<&mut dyn Clickable> {
        None
    }

    fn as_live_mut(&mut self) -> Option<&mut dyn Live> {
        None
    }

    fn as_recorder(&self) -> Option<&dyn Recorder> {
        None
    }

    fn as_recorder_mut(&mut self) -> Option<&mut dyn Recorder> {
        None
    }
}

/// Maps a sample to a y coordinate inside `rect`, with zero on the centre line
/// and full scale half the height away from it.
pub(crate) fn sample_to_y(rect: Rectangle, sample: i16) -> f64 {
    rect.center_y() + f64::from(sample) / crate::audio::FULL_SCALE * (rect.h / 2.0)
}
