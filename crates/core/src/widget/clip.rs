use crate::{
    canvas::{palette, Canvas},
    context::DrawContext,
    geometry::{Placement, Rectangle, Size},
};

use super::{sample_to_y, Drawable, Live, Recorder, Widget};

/// Strip chart of everything recorded so far.
///
/// The history grows by one buffer per recording tick. Each buffer-sized
/// chunk becomes one pixel column showing the chunk's min..max range. Columns
/// are painted once; `draw` only renders chunks past the drawn cursor, so the
/// per-frame cost depends on new audio, not on the length of the history.
/// Chunks that would land beyond the widget's right edge are kept in the
/// history but not drawn.
#[derive(Debug, Clone)]
pub struct AudioClip {
    name: String,
    placement: Placement,
    chunk_len: usize,
    history: Vec<i16>,
    drawn: usize,
}

impl AudioClip {
    /// `chunk_len` is the length of the shared buffer feeding the clip.
    pub fn new(name: impl Into<String>, placement: Placement, chunk_len: usize) -> Self {
        Self {
            name: name.into(),
            placement,
            chunk_len: chunk_len.max(1),
            history: Vec::new(),
            drawn: 0,
        }
    }

    /// Chunks completely present in the history.
    pub fn complete_chunks(&self) -> usize {
        self.history.len() / self.chunk_len
    }

    /// Columns painted since the last full repaint.
    pub fn drawn_columns(&self) -> usize {
        self.drawn
    }

    /// Index of the most recently painted column.
    pub fn last_drawn_column(&self) -> Option<usize> {
        self.drawn.checked_sub(1)
    }

    fn column_capacity(&self) -> usize {
        self.placement.rect().w.max(0.0).floor() as usize
    }

    fn draw_column(&self, canvas: &mut dyn Canvas, rect: Rectangle, column: usize) {
        let start = column * self.chunk_len;
        let chunk = &self.history[start..start + self.chunk_len];
        let (low, high) = chunk
            .iter()
            .fold((i16::MAX, i16::MIN), |(lo, hi), s| (lo.min(*s), hi.max(*s)));

        let x = rect.x + column as f64;
        canvas.set_color(palette::STRIP_BACKGROUND);
        canvas.fill_rect(x, rect.y, 1.0, rect.h);
        canvas.set_color(palette::STRIP_TRACE);
        canvas.move_to(x + 0.5, sample_to_y(rect, high));
        canvas.line_to(x + 0.5, sample_to_y(rect, low));
        canvas.stroke();
    }
}

impl Recorder for AudioClip {
    fn record(&mut self, samples: &[i16]) {
        self.history.extend_from_slice(samples);
    }

    fn history(&self) -> &[i16] {
        &self.history
    }
}

impl Drawable for AudioClip {
    fn draw(&mut self, canvas: &mut dyn Canvas, _frame: &DrawContext<'_>) {
        let rect = self.placement.rect();
        let target = self.complete_chunks().min(self.column_capacity());
        while self.drawn < target {
            self.draw_column(canvas, rect, self.drawn);
            self.drawn += 1;
        }
    }

    fn invalidate(&mut self) {
        self.drawn = 0;
    }
}

impl Live for AudioClip {}

impl Widget for AudioClip {
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

    fn as_recorder(&self) -> Option<&dyn Recorder> {
        Some(self)
    }

    fn as_recorder_mut(&mut self) -> Option<&mut dyn Recorder> {
        Some(self)
    }
}
