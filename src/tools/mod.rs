use egui::Rect;

use crate::builder::WavyPenBuilder;
use crate::config::WavyPenConfig;
use crate::geometry::Viewport;
use crate::sample::InputSample;
use crate::stroke::{RenderTarget, RenderableStroke};

/// Incremental stroke construction as seen by a drawing tool.
pub trait StrokeBuilder {
    /// Feed the next sample of the stroke.
    fn add_point(&mut self, sample: InputSample);

    /// Region covered by everything committed so far.
    fn bounding_box(&self) -> Rect;

    /// Snapshot the stroke. May be called any number of times.
    fn build(&self) -> RenderableStroke;

    /// Draw the current state of the stroke, for live feedback.
    fn preview(&self, target: &mut dyn RenderTarget) {
        self.build().render(target);
    }
}

impl StrokeBuilder for WavyPenBuilder {
    fn add_point(&mut self, sample: InputSample) {
        WavyPenBuilder::add_point(self, sample);
    }

    fn bounding_box(&self) -> Rect {
        WavyPenBuilder::bounding_box(self)
    }

    fn build(&self) -> RenderableStroke {
        WavyPenBuilder::build(self)
    }

    fn preview(&self, target: &mut dyn RenderTarget) {
        WavyPenBuilder::preview(self, target);
    }
}

/// Creates the builder for a new stroke from its first sample.
pub type BuilderFactory = fn(InputSample, &Viewport, &WavyPenConfig) -> Box<dyn StrokeBuilder>;

/// Factory for the wavy pen. The config is copied, so later changes to the
/// controls leave this stroke alone.
pub fn make_wavy_pen_builder(
    initial: InputSample,
    viewport: &Viewport,
    config: &WavyPenConfig,
) -> Box<dyn StrokeBuilder> {
    Box::new(WavyPenBuilder::new(
        initial,
        viewport.size_of_pixel_on_canvas(),
        *config,
    ))
}

mod pen_tool;
pub use pen_tool::PenTool;
