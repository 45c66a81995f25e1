use egui::Rect;

use super::{BuilderFactory, StrokeBuilder, make_wavy_pen_builder};
use crate::config::PenSettings;
use crate::geometry::Viewport;
use crate::input::{PointerEvent, PointerState};
use crate::sample::InputSample;
use crate::stroke::{RenderTarget, RenderableStroke};

/// Drives one stroke builder per pointer-down .. pointer-up.
pub struct PenTool {
    factory: BuilderFactory,
    // Transient state: the stroke being drawn (if any)
    current_stroke: Option<Box<dyn StrokeBuilder>>,
}

impl Default for PenTool {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PenTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PenTool")
            .field("drawing", &self.is_drawing())
            .finish()
    }
}

impl PenTool {
    pub fn new() -> Self {
        Self::with_factory(make_wavy_pen_builder)
    }

    pub fn with_factory(factory: BuilderFactory) -> Self {
        Self {
            factory,
            current_stroke: None,
        }
    }

    pub fn name(&self) -> &'static str {
        "Wavy"
    }

    pub fn is_drawing(&self) -> bool {
        self.current_stroke.is_some()
    }

    /// Handle one pointer event. Returns the finished stroke on pointer-up.
    pub fn handle_event(
        &mut self,
        event: &PointerEvent,
        settings: &PenSettings,
        viewport: &Viewport,
    ) -> Option<RenderableStroke> {
        match *event {
            PointerEvent::Down(state) => {
                self.on_pointer_down(sample_for(&state, settings), settings, viewport);
                None
            }
            PointerEvent::Move(state) => {
                self.on_pointer_move(sample_for(&state, settings));
                None
            }
            PointerEvent::Up(state) => self.on_pointer_up(sample_for(&state, settings)),
        }
    }

    /// Start a new stroke. The wave settings are read now and stay fixed
    /// for this stroke.
    pub fn on_pointer_down(
        &mut self,
        sample: InputSample,
        settings: &PenSettings,
        viewport: &Viewport,
    ) {
        if self.current_stroke.is_some() {
            log::warn!("Pointer down while a stroke is in progress; discarding it");
        }
        log::debug!(
            "Starting stroke at {:?} (pixel size {})",
            sample.pos,
            viewport.size_of_pixel_on_canvas()
        );
        self.current_stroke = Some((self.factory)(sample, viewport, &settings.wave));
    }

    pub fn on_pointer_move(&mut self, sample: InputSample) {
        if let Some(stroke) = &mut self.current_stroke {
            stroke.add_point(sample);
        }
    }

    /// Finish the stroke with the release sample and hand it over.
    pub fn on_pointer_up(&mut self, sample: InputSample) -> Option<RenderableStroke> {
        let mut stroke = self.current_stroke.take()?;
        stroke.add_point(sample);
        let finished = stroke.build();
        log::debug!("Finished stroke with {} segments", finished.len());
        Some(finished)
    }

    /// Abandon the stroke in progress, if any.
    pub fn cancel(&mut self) {
        if self.current_stroke.take().is_some() {
            log::debug!("Stroke cancelled");
        }
    }

    /// Canvas region the in-progress stroke covers.
    pub fn preview_bounds(&self) -> Option<Rect> {
        self.current_stroke.as_ref().map(|stroke| stroke.bounding_box())
    }

    pub fn update_preview(&self, target: &mut dyn RenderTarget) {
        if let Some(stroke) = &self.current_stroke {
            stroke.preview(target);
        }
    }
}

/// Build the sample the stroke builder sees from a pointer state.
fn sample_for(state: &PointerState, settings: &PenSettings) -> InputSample {
    InputSample::new(
        state.pos,
        settings.width_for_pressure(state.pressure),
        settings.color,
        state.time_ms,
    )
}
