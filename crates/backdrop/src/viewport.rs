//! Host surface size.

/// Current size of the host surface in device-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height. A zero height is treated as one pixel.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// True when either dimension is zero (e.g. a minimized window).
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Center point in pixels.
    pub fn center(&self) -> (f64, f64) {
        (self.width as f64 * 0.5, self.height as f64 * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio() {
        let vp = Viewport::new(1920, 1080);
        assert!((vp.aspect() - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_height_does_not_divide_by_zero() {
        let vp = Viewport::new(640, 0);
        assert!(vp.is_empty());
        assert_eq!(vp.aspect(), 640.0);
    }
}
