use serde::Serialize;

use crate::{
    audio::{AudioCapture, SampleBuffer},
    canvas::Canvas,
    context::{DrawContext, EngineContext},
    dispatch::{self, Dispatch},
    geometry::Size,
    platform::{Platform, PlatformEvent},
    scene::Scene,
    widget::WidgetId,
    Result,
};

/// Summary of one frame-loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameReport {
    pub frame: u64,
    /// Whether the recorders were fed this frame's buffer.
    pub recorded: bool,
    pub live_draws: usize,
    pub queued_draws: usize,
    pub event: Option<PlatformEvent>,
    pub dispatch: Option<Dispatch>,
}

/// The per-frame driver.
///
/// Each iteration blocks on the capture for one buffer, feeds the recorders
/// while recording, redraws every live widget, drains the pending-redraw
/// queue, and finally dispatches at most one platform event. The capture's
/// delivery rate is the only clock.
pub struct Engine<A, P, C> {
    scene: Scene,
    ctx: EngineContext,
    samples: SampleBuffer,
    capture: A,
    platform: P,
    canvas: C,
    window: Size,
    frames: u64,
}

impl<A, P, C> Engine<A, P, C>
where
    A: AudioCapture,
    P: Platform,
    C: Canvas,
{
    /// `buffer_len` fixes the length of the shared sample buffer for the
    /// whole session.
    pub fn new(scene: Scene, buffer_len: usize, capture: A, platform: P, canvas: C) -> Self {
        let window = platform.size();
        Self {
            scene,
            ctx: EngineContext::new(),
            samples: SampleBuffer::new(buffer_len),
            capture,
            platform,
            canvas,
            window,
            frames: 0,
        }
    }

    /// Starts with recording already on.
    pub fn recording(mut self, recording: bool) -> Self {
        self.ctx.set_recording(recording);
        self
    }

    /// Runs until an error occurs. Every error is fatal.
    pub fn run(&mut self) -> Result<()> {
        tracing::info!(
            widgets = self.scene.len(),
            buffer_len = self.samples.len(),
            "frame loop started"
        );
        loop {
            self.tick()?;
        }
    }

    /// Runs a bounded session of `frames` iterations.
    pub fn run_frames(&mut self, frames: u64) -> Result<()> {
        tracing::info!(
            widgets = self.scene.len(),
            buffer_len = self.samples.len(),
            frames,
            "frame loop started"
        );
        for _ in 0..frames {
            self.tick()?;
        }
        Ok(())
    }

    /// Performs one iteration of the frame loop.
    pub fn tick(&mut self) -> Result<FrameReport> {
        self.samples.refill(&mut self.capture)?;

        let recorded = self.ctx.is_recording();
        if recorded {
            for index in 0..self.scene.recorders().len() {
                let id = self.scene.recorders()[index];
                let recorder = self
                    .scene
                    .widget_mut(id)
                    .and_then(|widget| widget.as_recorder_mut());
                if let Some(recorder) = recorder {
                    recorder.record(self.samples.as_slice());
                }
            }
        }

        let live_draws = self.draw_live();
        let queued_draws = self.drain_redraws();

        let event = self.platform.poll_event();
        let outcome = event.map(|event| self.handle_event(event));

        let report = FrameReport {
            frame: self.frames,
            recorded,
            live_draws,
            queued_draws,
            event,
            dispatch: outcome,
        };
        self.frames += 1;
        tracing::trace!(?report, "frame");
        Ok(report)
    }

    /// Applies a platform event as if it had just been polled.
    pub fn handle_event(&mut self, event: PlatformEvent) -> Dispatch {
        dispatch::dispatch(
            event,
            &mut self.scene,
            &mut self.ctx,
            &mut self.canvas,
            &mut self.window,
            self.samples.as_slice(),
        )
    }

    fn draw_live(&mut self) -> usize {
        let frame = DrawContext::new(self.samples.as_slice(), self.ctx.is_recording());
        let mut draws = 0;
        for index in 0..self.scene.live().len() {
            let id = self.scene.live()[index];
            draws += usize::from(draw_widget(&mut self.scene, id, &mut self.canvas, &frame));
        }
        draws
    }

    fn drain_redraws(&mut self) -> usize {
        let mut draws = 0;
        while let Some(id) = self.ctx.next_redraw() {
            let frame = DrawContext::new(self.samples.as_slice(), self.ctx.is_recording());
            draws += usize::from(draw_widget(&mut self.scene, id, &mut self.canvas, &frame));
        }
        draws
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn samples(&self) -> &[i16] {
        self.samples.as_slice()
    }

    pub fn window(&self) -> Size {
        self.window
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    /// History of the first recorder in the scene.
    pub fn clip_history(&self) -> Option<&[i16]> {
        let id = *self.scene.recorders().first()?;
        self.scene
            .widget(id)
            .and_then(|widget| widget.as_recorder())
            .map(|recorder| recorder.history())
    }
}

fn draw_widget(
    scene: &mut Scene,
    id: WidgetId,
    canvas: &mut dyn Canvas,
    frame: &DrawContext<'_>,
) -> bool {
    match scene.widget_mut(id).and_then(|widget| widget.as_drawable_mut()) {
        Some(drawable) => {
            drawable.draw(canvas, frame);
            true
        }
        None => false,
    }
}
