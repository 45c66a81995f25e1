use egui::{Context, Pos2, Rect, TouchPhase};

use crate::geometry::Viewport;

/// Pointer state in canvas space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    /// Position in canvas coordinates
    pub pos: Pos2,
    /// Pressure in `[0, 1]`; 1.0 when the device does not report force
    pub pressure: f32,
    /// Milliseconds since the app started
    pub time_ms: f64,
}

/// Stroke-relevant pointer events, in the order they should be handled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button went down inside the canvas
    Down(PointerState),
    /// Pointer moved while the stroke is active
    Move(PointerState),
    /// Primary button released; the stroke is finished
    Up(PointerState),
}

/// Raw pointer input for one frame, in screen coordinates
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerFrame {
    pub pos: Option<Pos2>,
    pub pressed: bool,
    pub down: bool,
    pub released: bool,
    /// Seconds, as reported by egui
    pub time: f64,
    /// Touch or stylus force, if the platform reports it this frame
    pub force: Option<f32>,
    pub touch_ended: bool,
}

impl PointerFrame {
    /// Gather this frame's pointer input from egui
    pub fn from_context(ctx: &Context) -> Self {
        ctx.input(|input| {
            let mut frame = Self {
                pos: input.pointer.interact_pos().or(input.pointer.latest_pos()),
                pressed: input.pointer.primary_pressed(),
                down: input.pointer.primary_down(),
                released: input.pointer.primary_released(),
                time: input.time,
                force: None,
                touch_ended: false,
            };

            for event in &input.raw.events {
                if let egui::Event::Touch { phase, force, .. } = event {
                    if let Some(force) = force {
                        frame.force = Some(*force);
                    }
                    if matches!(phase, TouchPhase::End | TouchPhase::Cancel) {
                        frame.touch_ended = true;
                    }
                }
            }

            frame
        })
    }
}

/// Converts raw egui pointer input into [`PointerEvent`]s for the pen tool
#[derive(Debug)]
pub struct InputHandler {
    drawing: bool,
    last_pos: Option<Pos2>,
    pressure: f32,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            drawing: false,
            last_pos: None,
            pressure: 1.0,
        }
    }

    /// Whether a stroke is in progress
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Process egui input for this frame
    pub fn process_input(
        &mut self,
        ctx: &Context,
        canvas_rect: Rect,
        viewport: &Viewport,
    ) -> Vec<PointerEvent> {
        self.process_frame(PointerFrame::from_context(ctx), canvas_rect, viewport)
    }

    /// Turn one frame of raw pointer input into events
    pub fn process_frame(
        &mut self,
        frame: PointerFrame,
        canvas_rect: Rect,
        viewport: &Viewport,
    ) -> Vec<PointerEvent> {
        let mut events = Vec::new();

        if let Some(force) = frame.force {
            self.pressure = force.clamp(0.0, 1.0);
        }

        let time_ms = frame.time * 1000.0;
        let state_at = |pos: Pos2, pressure: f32| PointerState {
            pos: viewport.screen_to_canvas(pos),
            pressure,
            time_ms,
        };

        if frame.pressed && !self.drawing {
            if let Some(pos) = frame.pos.filter(|pos| canvas_rect.contains(*pos)) {
                events.push(PointerEvent::Down(state_at(pos, self.pressure)));
                self.drawing = true;
                self.last_pos = Some(pos);
            }
        } else if self.drawing && frame.down {
            if let Some(pos) = frame.pos {
                if Some(pos) != self.last_pos {
                    events.push(PointerEvent::Move(state_at(pos, self.pressure)));
                    self.last_pos = Some(pos);
                }
            }
        }

        if self.drawing && (frame.released || !frame.down) {
            if let Some(pos) = frame.pos.or(self.last_pos) {
                events.push(PointerEvent::Up(state_at(pos, self.pressure)));
            }
            self.drawing = false;
            self.last_pos = None;
        }

        if frame.touch_ended {
            self.pressure = 1.0;
        }

        events
    }
}
