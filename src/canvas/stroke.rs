//! Stroke capture.
//!
//! Turns press-move-release sequences into connected segments on a [`Surface`].
//! Only the current pen position is retained between events; a finished stroke
//! survives only as pixels.

use super::surface::Surface;
use crate::core::config::StrokeStyle;
use crate::domain::{InputEvent, StrokeAction, SurfacePoint, SurfaceRect};
use tracing::trace;

/// Tracks the active stroke and renders its segments.
#[derive(Debug, Clone, Default)]
pub struct StrokeCapture {
    style: StrokeStyle,
    current: Option<SurfacePoint>,
    segments: usize,
}

impl StrokeCapture {
    pub fn new(style: StrokeStyle) -> Self {
        Self {
            style,
            current: None,
            segments: 0,
        }
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Returns true between `begin` and `end`.
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Current pen position of the active stroke.
    pub fn current_position(&self) -> Option<SurfacePoint> {
        self.current
    }

    /// Number of segments drawn by the active stroke so far.
    pub fn segment_count(&self) -> usize {
        self.segments
    }

    /// Starts a new stroke at `point`. Nothing is drawn until the first `extend`.
    pub fn begin(&mut self, point: SurfacePoint) {
        trace!(x = point.x, y = point.y, "stroke begin");
        self.current = Some(point);
        self.segments = 0;
    }

    /// Draws a segment from the current position to `point` and moves there.
    ///
    /// Returns whether a segment was drawn; without an active stroke the call
    /// leaves the surface untouched.
    pub fn extend(&mut self, surface: &mut Surface, point: SurfacePoint) -> bool {
        let Some(from) = self.current else {
            return false;
        };
        surface.draw_segment(from, point, &self.style);
        self.current = Some(point);
        self.segments += 1;
        true
    }

    /// Terminates the active stroke.
    pub fn end(&mut self) {
        if self.current.take().is_some() {
            trace!(segments = self.segments, "stroke end");
        }
    }

    /// Drops any in-progress stroke without touching the surface.
    pub fn discard(&mut self) {
        self.current = None;
        self.segments = 0;
    }

    /// Applies a pointer or touch event, mapping it through `rect`.
    ///
    /// Returns whether the surface was modified.
    pub fn handle(
        &mut self,
        surface: &mut Surface,
        event: &InputEvent,
        rect: &SurfaceRect,
    ) -> bool {
        match event.stroke_action(rect) {
            StrokeAction::Begin(point) => {
                self.begin(point);
                false
            }
            StrokeAction::Extend(point) => self.extend(surface, point),
            StrokeAction::End => {
                self.end();
                false
            }
            StrokeAction::Ignore => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PointerPhase, TouchPhase};

    #[test]
    fn test_extend_without_begin_is_noop() {
        let mut surface = Surface::default();
        let mut capture = StrokeCapture::default();
        assert!(!capture.extend(&mut surface, SurfacePoint::new(10.0, 10.0)));
        assert!(surface.is_blank());
        assert!(!capture.is_active());
    }

    #[test]
    fn test_begin_alone_draws_nothing() {
        let mut surface = Surface::default();
        let mut capture = StrokeCapture::default();
        capture.begin(SurfacePoint::new(50.0, 50.0));
        assert!(capture.is_active());
        assert!(surface.is_blank());
        capture.end();
        assert!(!capture.extend(&mut surface, SurfacePoint::new(60.0, 60.0)));
        assert!(surface.is_blank());
    }

    #[test]
    fn test_polyline_is_connected() {
        let mut surface = Surface::default();
        let mut capture = StrokeCapture::default();
        let points = [
            SurfacePoint::new(30.0, 30.0),
            SurfacePoint::new(120.0, 40.0),
            SurfacePoint::new(140.0, 180.0),
            SurfacePoint::new(60.0, 200.0),
        ];
        capture.begin(points[0]);
        for point in &points[1..] {
            assert!(capture.extend(&mut surface, *point));
        }
        capture.end();
        assert_eq!(capture.segment_count(), 3);

        let white = image::Rgba([255, 255, 255, 255]);
        for pair in points.windows(2) {
            for step in 0..=50 {
                let t = step as f32 / 50.0;
                let x = pair[0].x + (pair[1].x - pair[0].x) * t;
                let y = pair[0].y + (pair[1].y - pair[0].y) * t;
                assert_eq!(*surface.pixels().get_pixel(x as u32, y as u32), white);
            }
        }
    }

    #[test]
    fn test_end_stops_drawing_until_next_begin() {
        let mut surface = Surface::default();
        let mut capture = StrokeCapture::default();
        capture.begin(SurfacePoint::new(20.0, 20.0));
        capture.extend(&mut surface, SurfacePoint::new(40.0, 20.0));
        capture.end();
        let snapshot = surface.clone();
        assert!(!capture.extend(&mut surface, SurfacePoint::new(200.0, 200.0)));
        assert_eq!(surface, snapshot);
    }

    #[test]
    fn test_pointer_and_touch_follow_same_contract() {
        let rect = SurfaceRect::new(5.0, 5.0);
        let pointer_events = [
            InputEvent::pointer(PointerPhase::Down, 25.0, 25.0),
            InputEvent::pointer(PointerPhase::Move, 105.0, 65.0),
            InputEvent::pointer(PointerPhase::Up, 105.0, 65.0),
        ];
        let touch_events = [
            InputEvent::touch(TouchPhase::Start, 25.0, 25.0),
            InputEvent::touch(TouchPhase::Move, 105.0, 65.0),
            InputEvent::touch_released(TouchPhase::End),
        ];

        let mut by_pointer = Surface::default();
        let mut capture = StrokeCapture::default();
        let drawn: Vec<bool> = pointer_events
            .iter()
            .map(|e| capture.handle(&mut by_pointer, e, &rect))
            .collect();
        assert_eq!(drawn, vec![false, true, false]);

        let mut by_touch = Surface::default();
        let mut capture = StrokeCapture::default();
        for event in &touch_events {
            capture.handle(&mut by_touch, event, &rect);
        }
        assert_eq!(by_pointer, by_touch);
        assert!(!by_touch.is_blank());
    }

    #[test]
    fn test_leave_ends_stroke() {
        let rect = SurfaceRect::default();
        let mut surface = Surface::default();
        let mut capture = StrokeCapture::default();
        let down = InputEvent::pointer(PointerPhase::Down, 10.0, 10.0);
        let leave = InputEvent::pointer(PointerPhase::Leave, 0.0, 0.0);
        capture.handle(&mut surface, &down, &rect);
        capture.handle(&mut surface, &leave, &rect);
        assert!(!capture.is_active());
    }

    #[test]
    fn test_discard_drops_active_stroke() {
        let mut capture = StrokeCapture::default();
        capture.begin(SurfacePoint::new(1.0, 1.0));
        capture.discard();
        assert!(!capture.is_active());
        assert_eq!(capture.segment_count(), 0);
    }
}
