use egui::{Color32, Pos2};

/// One reported pointer state, as produced by the host.
///
/// `width` is derived upstream from pressure; anything below the contact
/// epsilon means the stylus is not touching. `time` must increase
/// monotonically within one stroke (the host feeds milliseconds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSample {
    pub pos: Pos2,
    pub width: f32,
    pub color: Color32,
    pub time: f64,
}

impl InputSample {
    pub fn new(pos: Pos2, width: f32, color: Color32, time: f64) -> Self {
        Self {
            pos,
            width,
            color,
            time,
        }
    }
}
