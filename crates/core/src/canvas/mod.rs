use serde::{Deserialize, Serialize};

/// RGB colour with every channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// Colours used by the stock widgets and the full-surface repaint.
pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const BUTTON_ACTIVE: Color = Color::rgb(0.85, 0.1, 0.1);
    pub const BUTTON_INACTIVE: Color = Color::rgb(0.3, 0.3, 0.3);
    pub const SCOPE_BACKGROUND: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const SCOPE_TRACE: Color = Color::rgb(0.0, 1.0, 0.5);
    pub const STRIP_BACKGROUND: Color = Color::rgb(0.0, 0.0, 0.5);
    pub const STRIP_TRACE: Color = Color::rgb(1.0, 1.0, 1.0);
}

/// Immediate-mode 2-D painter the engine renders into.
///
/// Paths are built with `move_to`/`line_to` and committed with `stroke`.
/// There is no alpha, no transform stack and no clipping.
pub trait Canvas {
    fn set_color(&mut self, color: Color);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn stroke(&mut self);
}

/// One recorded canvas call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawCommand {
    SetColor(Color),
    FillRect { x: f64, y: f64, w: f64, h: f64 },
    Stroke { points: Vec<(f64, f64)> },
}

/// Canvas that records what was drawn instead of rasterising it.
///
/// Pending path points are folded into a single [`DrawCommand::Stroke`]
/// when the path is stroked, so a polyline shows up as one command.
#[derive(Debug, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
    path: Vec<(f64, f64)>,
    color: Option<Color>,
    fills: usize,
    strokes: usize,
    segments: usize,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Removes and returns the commands recorded so far. Counters and the
    /// current colour are kept.
    pub fn drain(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Colour most recently selected with [`Canvas::set_color`].
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn fills(&self) -> usize {
        self.fills
    }

    pub fn strokes(&self) -> usize {
        self.strokes
    }

    /// Straight segments committed by all strokes so far.
    pub fn segments(&self) -> usize {
        self.segments
    }

    pub fn reset_counters(&mut self) {
        self.fills = 0;
        self.strokes = 0;
        self.segments = 0;
    }

    /// Point lists of every recorded stroke, in drawing order.
    pub fn stroked_paths(&self) -> impl Iterator<Item = &[(f64, f64)]> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Stroke { points } => Some(points.as_slice()),
            _ => None,
        })
    }
}

impl Canvas for DisplayList {
    fn set_color(&mut self, color: Color) {
        self.color = Some(color);
        self.commands.push(DrawCommand::SetColor(color));
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.fills += 1;
        self.commands.push(DrawCommand::FillRect { x, y, w, h });
    }

    fn move_to(&mut self, x: f64, y: f64) {
        // A move starts a new subpath; an unstroked previous one is dropped.
        self.path.clear();
        self.path.push((x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        // Without a current point this acts as a move_to.
        self.path.push((x, y));
    }

    fn stroke(&mut self) {
        let points = std::mem::take(&mut self.path);
        if points.is_empty() {
            return;
        }
        self.strokes += 1;
        self.segments += points.len().saturating_sub(1);
        self.commands.push(DrawCommand::Stroke { points });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strokes_collect_the_pending_path() {
        let mut canvas = DisplayList::new();
        canvas.set_color(palette::SCOPE_TRACE);
        canvas.move_to(0.0, 1.0);
        canvas.line_to(1.0, 2.0);
        canvas.line_to(2.0, 3.0);
        canvas.stroke();
        canvas.stroke();

        assert_eq!(canvas.strokes(), 1);
        assert_eq!(canvas.segments(), 2);
        assert_eq!(canvas.color(), Some(palette::SCOPE_TRACE));
        let paths: Vec<_> = canvas.stroked_paths().collect();
        assert_eq!(paths, vec![&[(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)][..]]);
    }

    #[test]
    fn drain_keeps_counters() {
        let mut canvas = DisplayList::new();
        canvas.fill_rect(0.0, 0.0, 1.0, 1.0);
        assert_eq!(canvas.drain().len(), 1);
        assert!(canvas.commands().is_empty());
        assert_eq!(canvas.fills(), 1);
        canvas.reset_counters();
        assert_eq!(canvas.fills(), 0);
    }

    #[test]
    fn commands_serialise_as_tagged_json() {
        let command = DrawCommand::FillRect {
            x: 1.0,
            y: 2.0,
            w: 3.0,
            h: 4.0,
        };
        let json = serde_json::to_string(&command).unwrap();
        assert_eq!(json, r#"{"fill_rect":{"x":1.0,"y":2.0,"w":3.0,"h":4.0}}"#);
    }
}
