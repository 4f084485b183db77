use crate::geo::{self, Position};

// Canvas projection centered on the player; the map follows the player every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pixels_per_meter: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, pixels_per_meter: f64) -> Self {
        Self {
            width,
            height,
            pixels_per_meter,
        }
    }

    /// Canvas pixel of `target` with `center` in the middle of the canvas. North is up.
    pub fn project(&self, center: Position, target: Position) -> (f64, f64) {
        let (dx, dy) = geo::local_offset(center, target);
        (
            self.width * 0.5 + dx * self.pixels_per_meter,
            self.height * 0.5 - dy * self.pixels_per_meter,
        )
    }

    pub fn contains(&self, x: f64, y: f64, margin: f64) -> bool {
        x >= -margin && y >= -margin && x <= self.width + margin && y <= self.height + margin
    }

    /// Half extents of the visible area in meters.
    pub fn half_extent_meters(&self) -> (f64, f64) {
        (
            self.width * 0.5 / self.pixels_per_meter,
            self.height * 0.5 / self.pixels_per_meter,
        )
    }
}
