use std::collections::VecDeque;

use crate::widget::WidgetId;

/// FIFO of widgets waiting for a one-shot redraw.
///
/// A widget queued twice before a drain is simply drawn twice; ordering of
/// the other entries is unaffected.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RedrawQueue {
    pending: VecDeque<WidgetId>,
}

impl RedrawQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: WidgetId) {
        self.pending.push_back(id);
    }

    pub fn pop(&mut self) -> Option<WidgetId> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of times `id` is currently queued.
    pub fn count(&self, id: WidgetId) -> usize {
        self.pending.iter().filter(|queued| **queued == id).count()
    }
}

/// Mutable state shared between widgets: the recording flag and the
/// pending-redraw queue. Click handlers receive it explicitly.
#[derive(Debug, Default)]
pub struct EngineContext {
    recording: bool,
    redraw: RedrawQueue,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Flips the recording flag and returns the new value.
    pub fn toggle_recording(&mut self) -> bool {
        self.recording = !self.recording;
        self.recording
    }

    pub fn set_recording(&mut self, recording: bool) {
        self.recording = recording;
    }

    pub fn request_redraw(&mut self, id: WidgetId) {
        self.redraw.push(id);
    }

    pub fn redraw_queue(&self) -> &RedrawQueue {
        &self.redraw
    }

    pub(crate) fn next_redraw(&mut self) -> Option<WidgetId> {
        self.redraw.pop()
    }
}

/// Read-only view handed to widgets while they draw.
#[derive(Debug, Clone, Copy)]
pub struct DrawContext<'a> {
    /// Current contents of the shared sample buffer.
    pub samples: &'a [i16],
    pub recording: bool,
}

impl<'a> DrawContext<'a> {
    pub fn new(samples: &'a [i16], recording: bool) -> Self {
        Self { samples, recording }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_is_fifo_and_tolerates_duplicates() {
        let mut queue = RedrawQueue::new();
        queue.push(WidgetId(2));
        queue.push(WidgetId(0));
        queue.push(WidgetId(2));
        assert_eq!(queue.count(WidgetId(2)), 2);

        let drained: Vec<_> = std::iter::from_fn(|| queue.pop()).collect();
        assert_eq!(drained, vec![WidgetId(2), WidgetId(0), WidgetId(2)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn toggling_twice_restores_the_flag() {
        let mut ctx = EngineContext::new();
        assert!(ctx.toggle_recording());
        assert!(!ctx.toggle_recording());
        assert!(!ctx.is_recording());
    }
}
