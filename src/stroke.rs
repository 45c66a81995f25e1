use egui::epaint::QuadraticBezierShape;
use egui::{Color32, Painter, Pos2, Rect, Shape, Stroke as EguiStroke};
use std::sync::Arc;

use crate::geometry::{Viewport, quadratic_bounds};

/// Per-segment rendering style. Every segment owns its own copy so the width
/// can change along the stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentStyle {
    pub color: Color32,
    pub width: f32,
}

impl SegmentStyle {
    pub fn new(color: Color32, width: f32) -> Self {
        Self { color, width }
    }
}

/// Geometry of a single segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentPath {
    /// Zero-length anchor at the start of a stroke.
    Point(Pos2),
    /// Quadratic curve from `start` through `control` to `end`.
    Quadratic { start: Pos2, control: Pos2, end: Pos2 },
}

impl SegmentPath {
    pub fn bounding_rect(&self) -> Rect {
        match *self {
            Self::Point(p) => Rect::from_min_max(p, p),
            Self::Quadratic {
                start,
                control,
                end,
            } => quadratic_bounds(start, control, end),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub path: SegmentPath,
    pub style: SegmentStyle,
}

impl Segment {
    pub fn anchor(point: Pos2, style: SegmentStyle) -> Self {
        Self {
            path: SegmentPath::Point(point),
            style,
        }
    }

    pub fn quadratic(start: Pos2, control: Pos2, end: Pos2, style: SegmentStyle) -> Self {
        Self {
            path: SegmentPath::Quadratic {
                start,
                control,
                end,
            },
            style,
        }
    }

    pub fn bounding_rect(&self) -> Rect {
        self.path.bounding_rect()
    }

    /// Convert to an egui shape. `to_screen` maps canvas positions and `scale`
    /// multiplies the stroke width (the viewport zoom).
    pub fn to_shape(&self, to_screen: impl Fn(Pos2) -> Pos2, scale: f32) -> Shape {
        let width = self.style.width * scale;
        match self.path {
            SegmentPath::Point(p) => {
                if width > 0.0 {
                    Shape::circle_filled(to_screen(p), width * 0.5, self.style.color)
                } else {
                    Shape::Noop
                }
            }
            SegmentPath::Quadratic {
                start,
                control,
                end,
            } => Shape::QuadraticBezier(QuadraticBezierShape::from_points_stroke(
                [to_screen(start), to_screen(control), to_screen(end)],
                false,
                Color32::TRANSPARENT,
                EguiStroke::new(width, self.style.color),
            )),
        }
    }
}

/// Something a finished or in-progress stroke can be drawn into.
pub trait RenderTarget {
    fn draw_segment(&mut self, segment: &Segment);
}

/// Collects shapes in canvas space, without any viewport mapping.
impl RenderTarget for Vec<Shape> {
    fn draw_segment(&mut self, segment: &Segment) {
        let shape = segment.to_shape(|p| p, 1.0);
        if !matches!(shape, Shape::Noop) {
            self.push(shape);
        }
    }
}

/// Draws segments onto an egui painter through a viewport.
pub struct CanvasPainter<'a> {
    painter: &'a Painter,
    viewport: Viewport,
}

impl<'a> CanvasPainter<'a> {
    pub fn new(painter: &'a Painter, viewport: Viewport) -> Self {
        Self { painter, viewport }
    }
}

impl RenderTarget for CanvasPainter<'_> {
    fn draw_segment(&mut self, segment: &Segment) {
        let viewport = self.viewport;
        let shape = segment.to_shape(|p| viewport.canvas_to_screen(p), viewport.zoom());
        if !matches!(shape, Shape::Noop) {
            self.painter.add(shape);
        }
    }
}

/// Immutable snapshot of a stroke's segments, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableStroke {
    segments: Vec<Segment>,
}

pub type StrokeRef = Arc<RenderableStroke>;

impl RenderableStroke {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn into_ref(self) -> StrokeRef {
        Arc::new(self)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Union of all segment bounds, or [`Rect::NOTHING`] for an empty stroke.
    pub fn bounding_rect(&self) -> Rect {
        self.segments
            .iter()
            .fold(Rect::NOTHING, |rect, segment| rect.union(segment.bounding_rect()))
    }

    pub fn render(&self, target: &mut dyn RenderTarget) {
        for segment in &self.segments {
            target.draw_segment(segment);
        }
    }

    /// Canvas-space egui shapes, one per visible segment.
    pub fn to_shapes(&self) -> Vec<Shape> {
        let mut shapes = Vec::with_capacity(self.segments.len());
        self.render(&mut shapes);
        shapes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn sample_stroke() -> RenderableStroke {
        let style = SegmentStyle::new(Color32::RED, 2.0);
        RenderableStroke::new(vec![
            Segment::anchor(pos2(0.0, 0.0), style),
            Segment::quadratic(pos2(0.0, 0.0), pos2(0.0, 0.0), pos2(5.0, 0.0), style),
            Segment::quadratic(pos2(5.0, 0.0), pos2(10.0, 0.0), pos2(10.0, 5.0), style),
        ])
    }

    #[test]
    fn test_bounding_rect_unions_segments() {
        let rect = sample_stroke().bounding_rect();
        assert_eq!(rect.min, pos2(0.0, 0.0));
        assert!(rect.max.x <= 10.0 && rect.max.x > 9.0);
        assert_eq!(rect.max.y, 5.0);
    }

    #[test]
    fn test_empty_stroke_has_no_bounds() {
        let stroke = RenderableStroke::new(Vec::new());
        assert!(stroke.is_empty());
        assert!(!stroke.bounding_rect().is_positive());
    }

    #[test]
    fn test_zero_width_anchor_is_not_drawn() {
        let stroke = RenderableStroke::new(vec![Segment::anchor(
            pos2(1.0, 1.0),
            SegmentStyle::new(Color32::BLACK, 0.0),
        )]);
        assert!(stroke.to_shapes().is_empty());
    }

    #[test]
    fn test_to_shapes_keeps_per_segment_width() {
        let mut stroke = sample_stroke();
        stroke.segments[2].style.width = 7.0;
        let shapes = stroke.to_shapes();
        assert_eq!(shapes.len(), 3);
        match &shapes[2] {
            Shape::QuadraticBezier(curve) => {
                assert_eq!(curve.points[2], pos2(10.0, 5.0));
            }
            other => panic!("expected a quadratic curve, got {other:?}"),
        }
    }

    #[test]
    fn test_render_to_painter() {
        let ctx = egui::Context::default();
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        let painter = Painter::new(ctx, egui::LayerId::background(), rect);
        let viewport = Viewport::new(2.0, vec2(10.0, 10.0));

        sample_stroke().render(&mut CanvasPainter::new(&painter, viewport));
    }
}
