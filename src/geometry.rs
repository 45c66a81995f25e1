use egui::{Pos2, Rect, Vec2, pos2};
use serde::{Deserialize, Serialize};

/// Smallest zoom factor the canvas allows.
pub const MIN_ZOOM: f32 = 0.1;
/// Largest zoom factor the canvas allows.
pub const MAX_ZOOM: f32 = 10.0;

/// Slack for `log10` of quanta that are exact powers of ten but not exactly
/// representable as `f32` (`0.01f32` is `0.0099999998`).
const EXPONENT_EPSILON: f64 = 1e-6;

/// Rounding grid derived from the size of one screen pixel on the canvas.
///
/// Coordinates are snapped to the nearest multiple of the largest power of ten
/// that does not exceed the quantum, so a quantum of `0.25` rounds to tenths
/// and a quantum of `1.0` rounds to whole units. Halves round toward +∞.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    quantum: f32,
    step: f64,
}

impl Grid {
    /// Create a grid for the given quantum. The quantum must be finite and > 0.
    pub fn new(quantum: f32) -> Self {
        debug_assert!(quantum.is_finite() && quantum > 0.0, "grid quantum must be > 0");
        let exponent = (f64::from(quantum).log10() + EXPONENT_EPSILON).floor() as i32;
        Self {
            quantum,
            step: 10f64.powi(exponent),
        }
    }

    /// The canvas-space size of one screen pixel this grid was built from.
    pub fn quantum(&self) -> f32 {
        self.quantum
    }

    /// The decimal step coordinates are rounded to.
    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn round(&self, value: f32) -> f32 {
        ((f64::from(value) / self.step + 0.5).floor() * self.step) as f32
    }

    pub fn round_point(&self, point: Pos2) -> Pos2 {
        pos2(self.round(point.x), self.round(point.y))
    }
}

/// Zoom and pan of the canvas relative to the screen.
///
/// `screen = canvas * zoom + offset`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    zoom: f32,
    pub offset: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset: Vec2::ZERO,
        }
    }
}

impl Viewport {
    pub fn new(zoom: f32, offset: Vec2) -> Self {
        Self {
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            offset,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set the zoom factor, clamped to [`MIN_ZOOM`, `MAX_ZOOM`].
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// How large one screen pixel is in canvas units at the current zoom.
    pub fn size_of_pixel_on_canvas(&self) -> f32 {
        1.0 / self.zoom
    }

    pub fn screen_to_canvas(&self, point: Pos2) -> Pos2 {
        pos2(
            (point.x - self.offset.x) / self.zoom,
            (point.y - self.offset.y) / self.zoom,
        )
    }

    pub fn canvas_to_screen(&self, point: Pos2) -> Pos2 {
        pos2(
            point.x * self.zoom + self.offset.x,
            point.y * self.zoom + self.offset.y,
        )
    }

    pub fn canvas_rect_to_screen(&self, rect: Rect) -> Rect {
        Rect::from_min_max(self.canvas_to_screen(rect.min), self.canvas_to_screen(rect.max))
    }
}

/// Point on the quadratic curve `start -> control -> end` at parameter `t`.
pub fn quadratic_point(start: Pos2, control: Pos2, end: Pos2, t: f32) -> Pos2 {
    let mt = 1.0 - t;
    let a = mt * mt;
    let b = 2.0 * mt * t;
    let c = t * t;
    pos2(
        a * start.x + b * control.x + c * end.x,
        a * start.y + b * control.y + c * end.y,
    )
}

/// Tight bounding box of a quadratic curve, including its interior extrema.
pub fn quadratic_bounds(start: Pos2, control: Pos2, end: Pos2) -> Rect {
    let mut rect = Rect::from_two_pos(start, end);

    let extremum = |p0: f32, p1: f32, p2: f32| -> Option<f32> {
        let denom = p0 - 2.0 * p1 + p2;
        if denom.abs() <= f32::EPSILON {
            return None;
        }
        let t = (p0 - p1) / denom;
        (t > 0.0 && t < 1.0).then_some(t)
    };

    for t in [
        extremum(start.x, control.x, end.x),
        extremum(start.y, control.y, end.y),
    ]
    .into_iter()
    .flatten()
    {
        rect.extend_with(quadratic_point(start, control, end, t));
    }

    rect
}
