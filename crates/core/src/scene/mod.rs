use std::fmt;

use crate::{
    config::AppConfig,
    geometry::{Anchor, Placement, Rectangle},
    widget::{AudioClip, ToggleButton, WaveformViewer, Widget, WidgetId},
    Result, WaveviewError,
};

/// Role collections a widget can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Roles {
    /// Redrawn unconditionally every frame.
    pub live: bool,
    /// Hit-tested on pointer-down.
    pub clickable: bool,
    /// Redrawn on a full-surface repaint.
    pub visible: bool,
    /// Fed the shared buffer every frame while recording is active.
    pub recorder: bool,
}

impl Roles {
    pub const NONE: Roles = Roles {
        live: false,
        clickable: false,
        visible: false,
        recorder: false,
    };
    pub const LIVE: Roles = Roles {
        live: true,
        ..Roles::NONE
    };
    pub const CLICKABLE: Roles = Roles {
        clickable: true,
        ..Roles::NONE
    };
    pub const VISIBLE: Roles = Roles {
        visible: true,
        ..Roles::NONE
    };
    pub const RECORDER: Roles = Roles {
        recorder: true,
        ..Roles::NONE
    };

    pub const fn with(self, other: Roles) -> Roles {
        Roles {
            live: self.live || other.live,
            clickable: self.clickable || other.clickable,
            visible: self.visible || other.visible,
            recorder: self.recorder || other.recorder,
        }
    }
}

impl std::ops::BitOr for Roles {
    type Output = Roles;

    fn bitor(self, rhs: Roles) -> Roles {
        self.with(rhs)
    }
}

/// Collects widgets and their roles before the scene is frozen.
#[derive(Default)]
pub struct SceneBuilder {
    widgets: Vec<Box<dyn Widget>>,
    roles: Vec<Roles>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a widget. Registration order is the order of every role
    /// collection it ends up in.
    pub fn add(&mut self, widget: impl Widget + 'static, roles: Roles) -> WidgetId {
        self.add_boxed(Box::new(widget), roles)
    }

    pub fn add_boxed(&mut self, widget: Box<dyn Widget>, roles: Roles) -> WidgetId {
        let id = WidgetId(self.widgets.len());
        self.widgets.push(widget);
        self.roles.push(roles);
        id
    }

    /// Checks that every widget offers the capabilities its roles need and
    /// freezes the registry.
    pub fn build(self) -> Result<Scene> {
        let mut scene = Scene {
            widgets: Vec::with_capacity(self.widgets.len()),
            live: Vec::new(),
            clickable: Vec::new(),
            visible: Vec::new(),
            recorders: Vec::new(),
        };

        for (index, (mut widget, roles)) in self.widgets.into_iter().zip(self.roles).enumerate() {
            let id = WidgetId(index);
            let name = widget.name().to_owned();
            let missing = |capability: &str| {
                WaveviewError::Scene(format!(
                    "widget `{name}` is registered as {capability} but does not implement it"
                ))
            };
            if roles.live && widget.as_live_mut().is_none() {
                return Err(missing("live"));
            }
            if roles.clickable && widget.as_clickable_mut().is_none() {
                return Err(missing("clickable"));
            }
            if roles.visible && widget.as_drawable_mut().is_none() {
                return Err(missing("visible"));
            }
            if roles.recorder && widget.as_recorder_mut().is_none() {
                return Err(missing("a recorder"));
            }

            if roles.live {
                scene.live.push(id);
            }
            if roles.clickable {
                scene.clickable.push(id);
            }
            if roles.visible {
                scene.visible.push(id);
            }
            if roles.recorder {
                scene.recorders.push(id);
            }
            scene.widgets.push(widget);
        }

        Ok(scene)
    }
}

/// Immutable registry of widgets and the role collections built over them.
pub struct Scene {
    widgets: Vec<Box<dyn Widget>>,
    live: Vec<WidgetId>,
    clickable: Vec<WidgetId>,
    visible: Vec<WidgetId>,
    recorders: Vec<WidgetId>,
}

impl Scene {
    /// The record button, a live waveform viewer filling the window, and a
    /// strip-chart clip along the bottom edge.
    pub fn standard(config: &AppConfig) -> Result<Self> {
        let window = config.window.size();
        let clip_height = (window.height * 0.2).floor();
        let clip_top = window.height - clip_height;
        let scope_top = 60.0;

        let mut builder = SceneBuilder::new();
        builder.add(
            WaveformViewer::new(
                "scope",
                Placement::anchored(
                    Rectangle::new(0.0, scope_top, window.width, clip_top - scope_top - 10.0),
                    Anchor::Both,
                    window,
                ),
            ),
            Roles::LIVE | Roles::VISIBLE,
        );
        builder.add(
            AudioClip::new(
                "clip",
                Placement::anchored(
                    Rectangle::new(0.0, clip_top, window.width, clip_height),
                    Anchor::BottomWidth,
                    window,
                ),
                config.audio.buffer_len,
            ),
            Roles::LIVE | Roles::VISIBLE | Roles::RECORDER,
        );
        builder.add(
            ToggleButton::new(
                "record",
                Placement::fixed(Rectangle::new(10.0, 10.0, 40.0, 40.0)),
            ),
            Roles::CLICKABLE | Roles::VISIBLE,
        );
        builder.build()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn widget(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.widgets.get(id.0).map(|widget| widget.as_ref())
    }

    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut (dyn Widget + 'static)> {
        self.widgets.get_mut(id.0).map(|widget| widget.as_mut())
    }

    pub fn widgets_mut(&mut self) -> impl Iterator<Item = &mut (dyn Widget + 'static)> + '_ {
        self.widgets.iter_mut().map(|widget| widget.as_mut())
    }

    pub fn live(&self) -> &[WidgetId] {
        &self.live
    }

    pub fn clickable(&self) -> &[WidgetId] {
        &self.clickable
    }

    pub fn visible(&self) -> &[WidgetId] {
        &self.visible
    }

    pub fn recorders(&self) -> &[WidgetId] {
        &self.recorders
    }

    /// Finds a widget by name.
    pub fn find(&self, name: &str) -> Option<WidgetId> {
        self.widgets
            .iter()
            .position(|widget| widget.name() == name)
            .map(WidgetId)
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.widgets.iter().map(|widget| widget.name()).collect();
        f.debug_struct("Scene")
            .field("widgets", &names)
            .field("live", &self.live)
            .field("clickable", &self.clickable)
            .field("visible", &self.visible)
            .field("recorders", &self.recorders)
            .finish()
    }
}
