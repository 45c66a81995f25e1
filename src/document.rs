use egui::Rect;

use crate::stroke::{RenderableStroke, StrokeRef};

/// Finished strokes on the canvas, in drawing order.
#[derive(Debug, Clone, Default)]
pub struct Document {
    strokes: Vec<StrokeRef>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_stroke(&mut self, stroke: RenderableStroke) {
        self.strokes.push(stroke.into_ref());
    }

    pub fn strokes(&self) -> &[StrokeRef] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn clear(&mut self) {
        log::info!("Clearing {} strokes", self.strokes.len());
        self.strokes.clear();
    }

    /// Union of all stroke bounds, or [`Rect::NOTHING`] when empty.
    pub fn bounding_rect(&self) -> Rect {
        self.strokes
            .iter()
            .fold(Rect::NOTHING, |rect, stroke| rect.union(stroke.bounding_rect()))
    }
}
