//! Input events and surface-local coordinates
//!
//! Pointer and touch events arrive in client (viewport) coordinates. Each event
//! is mapped into surface coordinates against the surface rectangle supplied with
//! it, since the surface may have moved or scrolled since the previous event.

use serde::{Deserialize, Serialize};

/// A position on the drawing surface, in surface-local units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfacePoint {
    pub x: f32,
    pub y: f32,
}

impl SurfacePoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: SurfacePoint) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// On-screen placement of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
}

impl SurfaceRect {
    pub fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }

    /// Maps a client coordinate into surface-local coordinates.
    pub fn to_surface(&self, client_x: f32, client_y: f32) -> SurfacePoint {
        SurfacePoint::new(client_x - self.left, client_y - self.top)
    }
}

/// Phase of a mouse/pen pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// The pointer left the surface.
    Leave,
}

/// Phase of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// A single touch contact in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchContact {
    pub client_x: f32,
    pub client_y: f32,
}

/// What a stroke should do in response to an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeAction {
    Begin(SurfacePoint),
    Extend(SurfacePoint),
    End,
    /// The event carries nothing usable (e.g. a touch move without contacts).
    Ignore,
}

/// An input event from either a pointer or a touch screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum InputEvent {
    Pointer {
        phase: PointerPhase,
        client_x: f32,
        client_y: f32,
    },
    Touch {
        phase: TouchPhase,
        /// Active contacts; only the first one draws.
        touches: Vec<TouchContact>,
    },
}

impl InputEvent {
    pub fn pointer(phase: PointerPhase, client_x: f32, client_y: f32) -> Self {
        InputEvent::Pointer {
            phase,
            client_x,
            client_y,
        }
    }

    /// A touch event with a single contact.
    pub fn touch(phase: TouchPhase, client_x: f32, client_y: f32) -> Self {
        InputEvent::Touch {
            phase,
            touches: vec![TouchContact { client_x, client_y }],
        }
    }

    /// A touch event without contacts, as delivered on touch end.
    pub fn touch_released(phase: TouchPhase) -> Self {
        InputEvent::Touch {
            phase,
            touches: Vec::new(),
        }
    }

    /// Returns the event position in surface coordinates, if it carries a
    /// finite one.
    pub fn surface_position(&self, rect: &SurfaceRect) -> Option<SurfacePoint> {
        let position = match self {
            InputEvent::Pointer {
                client_x, client_y, ..
            } => Some(rect.to_surface(*client_x, *client_y)),
            InputEvent::Touch { touches, .. } => touches
                .first()
                .map(|touch| rect.to_surface(touch.client_x, touch.client_y)),
        };
        position.filter(SurfacePoint::is_finite)
    }

    /// Resolves the event into a source-independent stroke action.
    pub fn stroke_action(&self, rect: &SurfaceRect) -> StrokeAction {
        let position = self.surface_position(rect);
        let (begins, extends) = match self {
            InputEvent::Pointer { phase, .. } => match phase {
                PointerPhase::Down => (true, false),
                PointerPhase::Move => (false, true),
                PointerPhase::Up | PointerPhase::Leave => return StrokeAction::End,
            },
            InputEvent::Touch { phase, .. } => match phase {
                TouchPhase::Start => (true, false),
                TouchPhase::Move => (false, true),
                TouchPhase::End | TouchPhase::Cancel => return StrokeAction::End,
            },
        };
        match position {
            Some(point) if begins => StrokeAction::Begin(point),
            Some(point) if extends => StrokeAction::Extend(point),
            _ => StrokeAction::Ignore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_coordinates_subtract_offset() {
        let rect = SurfaceRect::new(100.0, 40.0);
        let event = InputEvent::pointer(PointerPhase::Down, 130.0, 90.0);
        assert_eq!(
            event.stroke_action(&rect),
            StrokeAction::Begin(SurfacePoint::new(30.0, 50.0))
        );
    }

    #[test]
    fn test_touch_uses_first_contact() {
        let rect = SurfaceRect::new(10.0, 10.0);
        let event = InputEvent::Touch {
            phase: TouchPhase::Move,
            touches: vec![
                TouchContact {
                    client_x: 20.0,
                    client_y: 25.0,
                },
                TouchContact {
                    client_x: 200.0,
                    client_y: 200.0,
                },
            ],
        };
        assert_eq!(
            event.stroke_action(&rect),
            StrokeAction::Extend(SurfacePoint::new(10.0, 15.0))
        );
    }

    #[test]
    fn test_mapping_is_recomputed_per_event() {
        let event = InputEvent::pointer(PointerPhase::Move, 50.0, 50.0);
        let before = event.surface_position(&SurfaceRect::new(0.0, 0.0));
        let after = event.surface_position(&SurfaceRect::new(0.0, 30.0));
        assert_eq!(before, Some(SurfacePoint::new(50.0, 50.0)));
        assert_eq!(after, Some(SurfacePoint::new(50.0, 20.0)));
    }

    #[test]
    fn test_release_phases_end_stroke() {
        let rect = SurfaceRect::default();
        assert_eq!(
            InputEvent::pointer(PointerPhase::Up, 1.0, 1.0).stroke_action(&rect),
            StrokeAction::End
        );
        assert_eq!(
            InputEvent::pointer(PointerPhase::Leave, 1.0, 1.0).stroke_action(&rect),
            StrokeAction::End
        );
        assert_eq!(
            InputEvent::touch_released(TouchPhase::End).stroke_action(&rect),
            StrokeAction::End
        );
        assert_eq!(
            InputEvent::touch_released(TouchPhase::Cancel).stroke_action(&rect),
            StrokeAction::End
        );
    }

    #[test]
    fn test_touch_without_contacts_is_ignored() {
        let rect = SurfaceRect::default();
        assert_eq!(
            InputEvent::touch_released(TouchPhase::Start).stroke_action(&rect),
            StrokeAction::Ignore
        );
        assert_eq!(
            InputEvent::touch_released(TouchPhase::Move).stroke_action(&rect),
            StrokeAction::Ignore
        );
    }

    #[test]
    fn test_non_finite_positions_are_ignored() {
        let rect = SurfaceRect::default();
        assert_eq!(
            InputEvent::pointer(PointerPhase::Move, f32::INFINITY, 0.0).stroke_action(&rect),
            StrokeAction::Ignore
        );
        assert_eq!(
            InputEvent::touch(TouchPhase::Start, 10.0, f32::NAN).stroke_action(&rect),
            StrokeAction::Ignore
        );
        let overflowing = SurfaceRect::new(f32::MAX, 0.0);
        assert_eq!(
            InputEvent::pointer(PointerPhase::Down, -f32::MAX, 0.0).surface_position(&overflowing),
            None
        );
    }

    #[test]
    fn test_event_json_is_tagged_by_source() {
        let event: InputEvent = serde_json::from_str(
            r#"{"source": "touch", "phase": "Start", "touches": [{"client_x": 3.0, "client_y": 4.0}]}"#,
        )
        .unwrap();
        assert_eq!(event, InputEvent::touch(TouchPhase::Start, 3.0, 4.0));
    }
}
