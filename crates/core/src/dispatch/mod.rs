//! Routing of platform events onto the scene.

use serde::Serialize;

use crate::{
    canvas::{palette, Canvas},
    context::{DrawContext, EngineContext},
    geometry::{Point, Size},
    platform::PlatformEvent,
    scene::Scene,
};

/// What handling one event amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dispatch {
    /// Pointer-down delivered to `hits` clickable widgets.
    Clicked { hits: usize },
    Repainted,
    Ignored,
}

/// Delivers a pointer-down to every clickable widget containing `point`, in
/// registration order. Overlapping widgets all receive the click.
pub fn pointer_down(scene: &mut Scene, ctx: &mut EngineContext, point: Point) -> usize {
    let mut hits = 0;
    for index in 0..scene.clickable().len() {
        let id = scene.clickable()[index];
        let Some(widget) = scene.widget_mut(id) else {
            continue;
        };
        if !widget.bounds().contains(point) {
            continue;
        }
        if let Some(clickable) = widget.as_clickable_mut() {
            clickable.on_click(id, ctx);
            hits += 1;
        }
    }
    tracing::debug!(x = point.x, y = point.y, hits, "pointer down");
    hits
}

/// Clears the whole surface, re-lays out every widget for `window`, resets
/// incremental drawing state and draws the visible set in registration order.
pub fn full_repaint(
    scene: &mut Scene,
    canvas: &mut dyn Canvas,
    window: Size,
    frame: &DrawContext<'_>,
) {
    canvas.set_color(palette::BACKGROUND);
    canvas.fill_rect(0.0, 0.0, window.width, window.height);

    for widget in scene.widgets_mut() {
        widget.layout(window);
        if let Some(drawable) = widget.as_drawable_mut() {
            drawable.invalidate();
        }
    }

    for index in 0..scene.visible().len() {
        let id = scene.visible()[index];
        if let Some(drawable) = scene.widget_mut(id).and_then(|w| w.as_drawable_mut()) {
            drawable.draw(canvas, frame);
        }
    }
    tracing::info!(width = window.width, height = window.height, "full repaint");
}

/// Applies one platform event. `window` is updated on resize.
pub fn dispatch(
    event: PlatformEvent,
    scene: &mut Scene,
    ctx: &mut EngineContext,
    canvas: &mut dyn Canvas,
    window: &mut Size,
    samples: &[i16],
) -> Dispatch {
    match event {
        PlatformEvent::PointerDown { x, y } => Dispatch::Clicked {
            hits: pointer_down(scene, ctx, Point::new(x, y)),
        },
        PlatformEvent::Resize { width, height } => {
            *window = Size::new(width, height);
            let frame = DrawContext::new(samples, ctx.is_recording());
            full_repaint(scene, canvas, *window, &frame);
            Dispatch::Repainted
        }
        PlatformEvent::Other => Dispatch::Ignored,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{
        canvas::DisplayList,
        geometry::{Placement, Rectangle},
        scene::{Roles, SceneBuilder},
        widget::{AudioClip, Clickable, Widget, WidgetId},
    };

    /// Clickable that logs its name on every click.
    pub(crate) struct ClickLog {
        name: String,
        bounds: Rectangle,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl ClickLog {
        pub(crate) fn new(name: &str, bounds: Rectangle, log: &Rc<RefCell<Vec<String>>>) -> Self {
            Self {
                name: name.to_owned(),
                bounds,
                log: Rc::clone(log),
            }
        }
    }

    impl Clickable for ClickLog {
        fn on_click(&mut self, _id: WidgetId, _ctx: &mut EngineContext) {
            self.log.borrow_mut().push(self.name.clone());
        }
    }

    impl Widget for ClickLog {
        fn name(&self) -> &str {
            &self.name
        }

        fn bounds(&self) -> Rectangle {
            self.bounds
        }

        fn as_clickable_mut(&mut self) -> Option<&mut dyn Clickable> {
            Some(self)
        }
    }

    fn clicks(scene: &mut Scene, point: Point) -> usize {
        pointer_down(scene, &mut EngineContext::new(), point)
    }

    #[test]
    fn only_the_widget_under_the_pointer_fires() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut builder = SceneBuilder::new();
        builder.add(
            ClickLog::new("button", Rectangle::new(10.0, 10.0, 20.0, 20.0), &log),
            Roles::CLICKABLE,
        );
        builder.add(
            ClickLog::new("far", Rectangle::new(100.0, 100.0, 10.0, 10.0), &log),
            Roles::CLICKABLE,
        );
        let mut scene = builder.build().unwrap();

        assert_eq!(clicks(&mut scene, Point::new(15.0, 15.0)), 1);
        assert_eq!(*log.borrow(), vec!["button".to_string()]);
    }

    #[test]
    fn overlapping_widgets_all_fire_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut builder = SceneBuilder::new();
        builder.add(
            ClickLog::new("second", Rectangle::new(0.0, 0.0, 10.0, 10.0), &log),
            Roles::CLICKABLE,
        );
        builder.add(
            ClickLog::new("first", Rectangle::new(5.0, 5.0, 10.0, 10.0), &log),
            Roles::CLICKABLE,
        );
        let mut scene = builder.build().unwrap();

        assert_eq!(clicks(&mut scene, Point::new(5.0, 5.0)), 2);
        assert_eq!(*log.borrow(), vec!["second".to_string(), "first".to_string()]);
    }

    #[test]
    fn widgets_outside_the_clickable_set_are_not_hit() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut builder = SceneBuilder::new();
        builder.add(
            ClickLog::new("inert", Rectangle::new(0.0, 0.0, 10.0, 10.0), &log),
            Roles::NONE,
        );
        let mut scene = builder.build().unwrap();
        assert_eq!(clicks(&mut scene, Point::new(1.0, 1.0)), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn resize_resets_cursors_and_redraws_visible_widgets() {
        let mut builder = SceneBuilder::new();
        let clip = builder.add(
            AudioClip::new(
                "clip",
                Placement::fixed(Rectangle::new(0.0, 0.0, 50.0, 10.0)),
                2,
            ),
            Roles::LIVE | Roles::VISIBLE | Roles::RECORDER,
        );
        let mut scene = builder.build().unwrap();
        let mut ctx = EngineContext::new();
        let mut canvas = DisplayList::new();
        let mut window = Size::new(50.0, 10.0);

        {
            let widget = scene.widget_mut(clip).unwrap();
            for _ in 0..4 {
                widget.as_recorder_mut().unwrap().record(&[1, -1]);
            }
            widget
                .as_drawable_mut()
                .unwrap()
                .draw(&mut canvas, &DrawContext::new(&[], false));
        }
        canvas.drain();
        canvas.reset_counters();

        let outcome = dispatch(
            PlatformEvent::Resize {
                width: 80.0,
                height: 40.0,
            },
            &mut scene,
            &mut ctx,
            &mut canvas,
            &mut window,
            &[],
        );

        assert_eq!(outcome, Dispatch::Repainted);
        assert_eq!(window, Size::new(80.0, 40.0));
        // Background plus one fill per redrawn column.
        assert_eq!(canvas.fills(), 5);
        assert_eq!(canvas.strokes(), 4);
        assert_eq!(
            canvas.commands()[1],
            crate::canvas::DrawCommand::FillRect {
                x: 0.0,
                y: 0.0,
                w: 80.0,
                h: 40.0
            }
        );
    }

    #[test]
    fn other_events_are_ignored() {
        let mut scene = SceneBuilder::new().build().unwrap();
        let mut canvas = DisplayList::new();
        let mut window = Size::new(1.0, 1.0);
        let outcome = dispatch(
            PlatformEvent::Other,
            &mut scene,
            &mut EngineContext::new(),
            &mut canvas,
            &mut window,
            &[],
        );
        assert_eq!(outcome, Dispatch::Ignored);
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn repaint_draws_in_registration_order() {
        let mut builder = SceneBuilder::new();
        builder.add(
            crate::widget::ToggleButton::new(
                "a",
                Placement::fixed(Rectangle::new(1.0, 0.0, 1.0, 1.0)),
            ),
            Roles::VISIBLE,
        );
        builder.add(
            crate::widget::ToggleButton::new(
                "b",
                Placement::fixed(Rectangle::new(2.0, 0.0, 1.0, 1.0)),
            ),
            Roles::VISIBLE,
        );
        let mut scene = builder.build().unwrap();
        let mut canvas = DisplayList::new();
        full_repaint(
            &mut scene,
            &mut canvas,
            Size::new(10.0, 10.0),
            &DrawContext::new(&[], false),
        );
        let xs: Vec<f64> = canvas
            .commands()
            .iter()
            .filter_map(|command| match command {
                crate::canvas::DrawCommand::FillRect { x, .. } => Some(*x),
                _ => None,
            })
            .collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
    }
}
