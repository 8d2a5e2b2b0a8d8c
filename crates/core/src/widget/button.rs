use crate::{
    canvas::{palette, Canvas},
    context::{DrawContext, EngineContext},
    geometry::{Placement, Rectangle, Size},
};

use super::{Clickable, Drawable, Widget, WidgetId};

/// Record toggle. Its only state is its placement; the on/off state lives in
/// the engine context's recording flag.
#[derive(Debug, Clone)]
pub struct ToggleButton {
    name: String,
    placement: Placement,
}

impl ToggleButton {
    pub fn new(name: impl Into<String>, placement: Placement) -> Self {
        Self {
            name: name.into(),
            placement,
        }
    }
}

impl Clickable for ToggleButton {
    fn on_click(&mut self, id: WidgetId, ctx: &mut EngineContext) {
        let recording = ctx.toggle_recording();
        tracing::debug!(button = %self.name, recording, "recording toggled");
        ctx.request_redraw(id);
    }
}

impl Drawable for ToggleButton {
    fn draw(&mut self, canvas: &mut dyn Canvas, frame: &DrawContext<'_>) {
        let rect = self.placement.rect();
        canvas.set_color(if frame.recording {
            palette::BUTTON_ACTIVE
        } else {
            palette::BUTTON_INACTIVE
        });
        canvas.fill_rect(rect.x, rect.y, rect.w, rect.h);
    }
}

impl Widget for ToggleButton {
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

    fn as_clickable_mut(&mut self) -> Option<&mut dyn Clickable> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DisplayList, DrawCommand};

    fn button() -> ToggleButton {
        ToggleButton::new(
            "record",
            Placement::fixed(Rectangle::new(10.0, 10.0, 20.0, 20.0)),
        )
    }

    #[test]
    fn click_flips_flag_and_queues_itself_once() {
        let mut ctx = EngineContext::new();
        let mut button = button();

        button.on_click(WidgetId(3), &mut ctx);
        assert!(ctx.is_recording());
        assert_eq!(ctx.redraw_queue().count(WidgetId(3)), 1);
        assert_eq!(ctx.redraw_queue().len(), 1);
    }

    #[test]
    fn two_clicks_restore_the_flag() {
        let mut ctx = EngineContext::new();
        let mut button = button();
        button.on_click(WidgetId(0), &mut ctx);
        button.on_click(WidgetId(0), &mut ctx);
        assert!(!ctx.is_recording());
    }

    #[test]
    fn fill_colour_follows_the_flag() {
        let mut button = button();
        let mut canvas = DisplayList::new();

        button.draw(&mut canvas, &DrawContext::new(&[], false));
        assert_eq!(canvas.color(), Some(palette::BUTTON_INACTIVE));
        button.draw(&mut canvas, &DrawContext::new(&[], true));
        assert_eq!(canvas.color(), Some(palette::BUTTON_ACTIVE));
        assert_eq!(
            canvas.commands().last(),
            Some(&DrawCommand::FillRect {
                x: 10.0,
                y: 10.0,
                w: 20.0,
                h: 20.0
            })
        );
    }
}
