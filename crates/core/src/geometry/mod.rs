use serde::{Deserialize, Serialize};

/// A position on the drawing surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Logical size of the window surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle. Width and height are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w: w.max(0.0),
            h: h.max(0.0),
        }
    }

    /// Closed-interval containment: points on any edge are inside.
    pub fn contains(&self, p: Point) -> bool {
        self.x <= p.x && p.x <= self.x + self.w && self.y <= p.y && p.y <= self.y + self.h
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Vertical centre line, the zero level of a waveform drawn in here.
    pub fn center_y(&self) -> f64 {
        self.y + self.h / 2.0
    }
}

/// Which extents of a widget follow the window when it is resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Anchor {
    #[default]
    Fixed,
    Width,
    Both,
    /// Stretches the width and keeps the distance to the bottom edge, moving
    /// the rectangle instead of resizing its height.
    BottomWidth,
}

/// A widget's rectangle together with the rule that re-solves it on resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    rect: Rectangle,
    anchor: Anchor,
    right_margin: f64,
    bottom_margin: f64,
}

impl Placement {
    pub fn fixed(rect: Rectangle) -> Self {
        Self {
            rect,
            anchor: Anchor::Fixed,
            right_margin: 0.0,
            bottom_margin: 0.0,
        }
    }

    /// Anchors `rect` inside a window of size `window`, keeping the current
    /// distance to the right (and, for [`Anchor::Both`], bottom) edge.
    pub fn anchored(rect: Rectangle, anchor: Anchor, window: Size) -> Self {
        Self {
            rect,
            anchor,
            right_margin: window.width - rect.right(),
            bottom_margin: window.height - rect.bottom(),
        }
    }

    pub fn rect(&self) -> Rectangle {
        self.rect
    }

    /// Re-solves the rectangle for a new window size.
    pub fn resolve(&mut self, window: Size) {
        let stretch_w = !matches!(self.anchor, Anchor::Fixed);
        if stretch_w {
            self.rect.w = (window.width - self.right_margin - self.rect.x).max(0.0);
        }
        match self.anchor {
            Anchor::Both => {
                self.rect.h = (window.height - self.bottom_margin - self.rect.y).max(0.0);
            }
            Anchor::BottomWidth => {
                self.rect.y = (window.height - self.bottom_margin - self.rect.h).max(0.0);
            }
            Anchor::Fixed | Anchor::Width => {}
        }
    }
}
