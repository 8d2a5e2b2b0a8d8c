use std::{collections::VecDeque, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Point, Size},
    Result,
};

/// Events the windowing collaborator can hand to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformEvent {
    PointerDown { x: f64, y: f64 },
    /// The window was resized or exposed and must be repainted in full.
    Resize { width: f64, height: f64 },
    /// Anything else the window system reports; ignored by the engine.
    Other,
}

impl PlatformEvent {
    pub fn pointer_down(point: Point) -> Self {
        Self::PointerDown {
            x: point.x,
            y: point.y,
        }
    }

    pub fn resize(size: Size) -> Self {
        Self::Resize {
            width: size.width,
            height: size.height,
        }
    }
}

/// Window-system collaborator.
pub trait Platform {
    /// Current logical window size.
    fn size(&self) -> Size;

    /// Returns the next pending event without blocking, if there is one.
    fn poll_event(&mut self) -> Option<PlatformEvent>;
}

/// An event scheduled for delivery no earlier than poll number `frame`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    pub frame: u64,
    pub event: PlatformEvent,
}

/// Headless window that replays a script of events.
///
/// Creating the window queues a `Resize` with its initial size, the expose
/// a freshly mapped window receives. Polls are counted; an event becomes
/// pending once the poll counter reaches its frame, and at most one event is
/// returned per poll, so bursts spill over into later polls.
#[derive(Debug)]
pub struct ScriptedPlatform {
    size: Size,
    polls: u64,
    script: VecDeque<ScriptedEvent>,
}

impl ScriptedPlatform {
    pub fn create_window(width: f64, height: f64) -> Self {
        let size = Size::new(width, height);
        let mut script = VecDeque::new();
        script.push_back(ScriptedEvent {
            frame: 0,
            event: PlatformEvent::resize(size),
        });
        Self {
            size,
            polls: 0,
            script,
        }
    }

    /// Appends events, keeping the script ordered by frame. Events scheduled
    /// for the same frame keep their relative order.
    pub fn with_script(mut self, events: impl IntoIterator<Item = ScriptedEvent>) -> Self {
        let mut pending: Vec<_> = self.script.drain(..).chain(events).collect();
        pending.sort_by_key(|scripted| scripted.frame);
        self.script = pending.into();
        self
    }

    /// Loads a JSON array of [`ScriptedEvent`]s.
    pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<ScriptedEvent>> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Queues an event for the next poll.
    pub fn push(&mut self, event: PlatformEvent) {
        let frame = self.polls;
        let at = self
            .script
            .iter()
            .position(|scripted| scripted.frame > frame)
            .unwrap_or(self.script.len());
        self.script.insert(at, ScriptedEvent { frame, event });
    }
}

impl Platform for ScriptedPlatform {
    fn size(&self) -> Size {
        self.size
    }

    fn poll_event(&mut self) -> Option<PlatformEvent> {
        let now = self.polls;
        self.polls += 1;
        let due = self.script.front().is_some_and(|next| next.frame <= now);
        if !due {
            return None;
        }
        let scripted = self.script.pop_front()?;
        if let PlatformEvent::Resize { width, height } = scripted.event {
            self.size = Size::new(width, height);
        }
        Some(scripted.event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_window_reports_an_initial_expose() {
        let mut platform = ScriptedPlatform::create_window(640.0, 480.0);
        assert_eq!(
            platform.poll_event(),
            Some(PlatformEvent::Resize {
                width: 640.0,
                height: 480.0
            })
        );
        assert_eq!(platform.poll_event(), None);
    }

    #[test]
    fn releases_one_event_per_poll_once_due() {
        let mut platform = ScriptedPlatform::create_window(10.0, 10.0).with_script([
            ScriptedEvent {
                frame: 2,
                event: PlatformEvent::PointerDown { x: 1.0, y: 1.0 },
            },
            ScriptedEvent {
                frame: 2,
                event: PlatformEvent::Other,
            },
        ]);

        assert!(matches!(platform.poll_event(), Some(PlatformEvent::Resize { .. })));
        assert_eq!(platform.poll_event(), None);
        assert_eq!(
            platform.poll_event(),
            Some(PlatformEvent::PointerDown { x: 1.0, y: 1.0 })
        );
        assert_eq!(platform.poll_event(), Some(PlatformEvent::Other));
        assert_eq!(platform.poll_event(), None);
    }

    #[test]
    fn resize_updates_the_window_size() {
        let mut platform = ScriptedPlatform::create_window(10.0, 10.0);
        platform.poll_event();
        platform.push(PlatformEvent::resize(Size::new(30.0, 40.0)));
        assert_eq!(platform.size(), Size::new(10.0, 10.0));
        platform.poll_event();
        assert_eq!(platform.size(), Size::new(30.0, 40.0));
    }

    #[test]
    fn scripts_parse_from_json() {
        let json = r#"[
            { "frame": 5, "event": { "pointer_down": { "x": 15.0, "y": 15.0 } } },
            { "frame": 9, "event": { "resize": { "width": 800.0, "height": 600.0 } } },
            { "frame": 9, "event": "other" }
        ]"#;
        let events: Vec<ScriptedEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].event, PlatformEvent::PointerDown { x: 15.0, y: 15.0 });
        assert_eq!(events[2].event, PlatformEvent::Other);
    }
}
