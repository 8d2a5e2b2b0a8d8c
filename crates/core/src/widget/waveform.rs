use crate::{
    canvas::{palette, Canvas},
    context::DrawContext,
    geometry::{Placement, Rectangle, Size},
};

use super::{sample_to_y, Drawable, Live, Widget};

/// Oscilloscope-style view of the shared sample buffer, redrawn every frame.
///
/// Pixel column `i` shows sample `floor(i * len / width)`: plain
/// nearest-neighbour decimation, one sample per column, no averaging or peak
/// detection. Buffers much longer than the widget is wide will alias.
#[derive(Debug, Clone)]
pub struct WaveformViewer {
    name: String,
    placement: Placement,
    column_step: usize,
}

impl WaveformViewer {
    pub fn new(name: impl Into<String>, placement: Placement) -> Self {
        Self {
            name: name.into(),
            placement,
            column_step: 1,
        }
    }

    /// Plots only every `step`-th pixel column.
    pub fn with_column_step(mut self, step: usize) -> Self {
        self.column_step = step.max(1);
        self
    }

    /// Points of the polyline for `samples`, in drawing order.
    pub fn trace(&self, samples: &[i16]) -> Vec<(f64, f64)> {
        let rect = self.placement.rect();
        if samples.is_empty() || rect.w <= 0.0 {
            return Vec::new();
        }

        let len = samples.len();
        (0_usize..)
            .step_by(self.column_step)
            .map(|i| i as f64)
            .take_while(|i| *i < rect.w)
            .map(|i| {
                let index = ((i * len as f64 / rect.w).floor() as usize).min(len - 1);
                (rect.x + i, sample_to_y(rect, samples[index]))
            })
            .collect()
    }
}

impl Drawable for WaveformViewer {
    fn draw(&mut self, canvas: &mut dyn Canvas, frame: &DrawContext<'_>) {
        let rect = self.placement.rect();
        canvas.set_color(palette::SCOPE_BACKGROUND);
        canvas.fill_rect(rect.x, rect.y, rect.w, rect.h);

        let points = self.trace(frame.samples);
        let Some((&(x0, y0), rest)) = points.split_first() else {
            return;
        };
        canvas.set_color(palette::SCOPE_TRACE);
        canvas.move_to(x0, y0);
        for &(x, y) in rest {
            canvas.line_to(x, y);
        }
        canvas.stroke();
    }
}

impl Live for WaveformViewer {}

impl Widget for WaveformViewer {
    fn name(&self) -> &str {
        &self.name
    }

    fn bounds(&self) -> Rectangle {
        self.placement.rect()
    }

    fn layout(&mut self, window: Size) {
        self.placement.resolve(window);
    }

    fn as_drawable_mut(&mut self) -> Option<&mut dyn Drawable> {
        Some(self)
    }

    fn as_live_mut(&mut self) -> Option<&mut dyn Live> {
        Some(self)
    }
}
