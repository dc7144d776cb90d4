//! Normalized pointer position used to steer the camera.

use crate::viewport::Viewport;

/// Pointer position in normalized device coordinates.
///
/// Both axes span [-1, 1] with the origin at the viewport center; `y` grows
/// upwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

/// Holds the last known pointer position.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    state: PointerState,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps raw pixel coordinates to normalized coordinates and stores them.
    ///
    /// Positions outside the viewport are clamped to the edge. An empty
    /// viewport leaves the previous state untouched.
    pub fn update(&mut self, raw_x: f64, raw_y: f64, viewport: Viewport) -> PointerState {
        if viewport.is_empty() {
            return self.state;
        }

        let x = (raw_x / viewport.width as f64) * 2.0 - 1.0;
        let y = -(raw_y / viewport.height as f64) * 2.0 + 1.0;

        self.state = PointerState {
            x: x.clamp(-1.0, 1.0) as f32,
            y: y.clamp(-1.0, 1.0) as f32,
        };
        self.state
    }

    #[inline]
    pub fn state(&self) -> PointerState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport::new(800, 600);

    #[test]
    fn test_top_left_maps_to_minus_one_one() {
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.update(0.0, 0.0, VP), PointerState { x: -1.0, y: 1.0 });
    }

    #[test]
    fn test_bottom_right_maps_to_one_minus_one() {
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.update(800.0, 600.0, VP), PointerState { x: 1.0, y: -1.0 });
    }

    #[test]
    fn test_center_maps_to_origin() {
        let mut tracker = PointerTracker::new();
        let (cx, cy) = VP.center();
        assert_eq!(tracker.update(cx, cy, VP), PointerState { x: 0.0, y: 0.0 });
    }

    #[test]
    fn test_outside_positions_are_clamped() {
        let mut tracker = PointerTracker::new();
        let state = tracker.update(-400.0, 1200.0, VP);
        assert_eq!(state, PointerState { x: -1.0, y: -1.0 });
    }

    #[test]
    fn test_empty_viewport_keeps_previous_state() {
        let mut tracker = PointerTracker::new();
        tracker.update(800.0, 0.0, VP);
        let state = tracker.update(10.0, 10.0, Viewport::new(0, 0));
        assert_eq!(state, PointerState { x: 1.0, y: 1.0 });
        assert_eq!(tracker.state(), state);
    }
}
