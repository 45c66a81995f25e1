// src/renderer.rs
use egui::{Color32, Painter, Rect, Stroke as EguiStroke};

use crate::document::Document;
use crate::geometry::Viewport;
use crate::stroke::CanvasPainter;
use crate::tools::PenTool;

#[derive(Debug, Clone)]
pub struct Renderer {
    background: Color32,
    // Outline the live stroke's bounding box (the region that needs repainting)
    show_dirty_rect: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            background: Color32::from_gray(250),
            show_dirty_rect: false,
        }
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_dirty_rect(&self) -> bool {
        self.show_dirty_rect
    }

    pub fn set_show_dirty_rect(&mut self, show: bool) {
        self.show_dirty_rect = show;
    }

    /// Renders the finished strokes and the live preview
    ///
    /// Args:
    ///     painter (egui::Painter): The painter to draw with
    ///     rect (egui::Rect): The screen rectangle of the canvas
    ///     viewport (Viewport): Canvas to screen mapping
    pub fn render(
        &self,
        painter: &Painter,
        rect: Rect,
        viewport: &Viewport,
        document: &Document,
        tool: &PenTool,
    ) {
        painter.rect_filled(rect, 0.0, self.background);

        let painter = painter.with_clip_rect(rect);
        let mut target = CanvasPainter::new(&painter, *viewport);

        for stroke in document.strokes() {
            stroke.render(&mut target);
        }

        tool.update_preview(&mut target);

        if self.show_dirty_rect {
            if let Some(bounds) = tool.preview_bounds() {
                painter.rect_stroke(
                    viewport.canvas_rect_to_screen(bounds),
                    0.0,
                    EguiStroke::new(1.0, Color32::from_rgb(220, 60, 60)),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PenSettings;
    use crate::input::{PointerEvent, PointerState};
    use egui::{pos2, vec2};

    #[test]
    fn test_render_basics() {
        let mut renderer = Renderer::new();
        renderer.set_show_dirty_rect(true);

        let ctx = egui::Context::default();
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        let painter = Painter::new(ctx, egui::LayerId::background(), rect);

        let mut tool = PenTool::new();
        let settings = PenSettings::default();
        let viewport = Viewport::default();
        let down = PointerState {
            pos: pos2(10.0, 10.0),
            pressure: 1.0,
            time_ms: 0.0,
        };
        tool.handle_event(&PointerEvent::Down(down), &settings, &viewport);
        tool.handle_event(
            &PointerEvent::Move(PointerState {
                pos: pos2(40.0, 30.0),
                ..down
            }),
            &settings,
            &viewport,
        );

        renderer.render(&painter, rect, &viewport, &Document::new(), &tool);
    }
}
