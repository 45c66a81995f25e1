use egui::{Pos2, Rect};

use crate::config::WavyPenConfig;
use crate::geometry::Grid;
use crate::sample::InputSample;
use crate::stroke::{RenderTarget, RenderableStroke, Segment, SegmentStyle};

/// Sample widths below this are treated as "not touching".
pub const CONTACT_EPSILON: f32 = 0.01;
/// Elapsed times at or below this give a speed of zero.
pub const TIME_EPSILON: f64 = 1e-5;
/// Width changes smaller than this do not restyle a merged segment.
pub const WIDTH_TOLERANCE: f32 = 0.001;

/// The last sample the builder processed.
#[derive(Debug, Clone, Copy)]
struct ProcessedSample {
    /// Grid-rounded position; the control point of the next segment.
    pos: Pos2,
    /// Unrounded position; used for speed.
    raw_pos: Pos2,
    time: f64,
}

/// Incrementally turns pointer samples into quadratic segments whose width
/// follows pressure, pointer speed and a sine wave phased by arc length.
///
/// Segments run between midpoints of consecutive samples with the sample
/// itself as control point, which keeps the joined curve tangent-continuous.
#[derive(Debug, Clone)]
pub struct WavyPenBuilder {
    segments: Vec<Segment>,
    last_anchor: Pos2,
    last_sample: ProcessedSample,
    accumulated_arc_length: f64,
    grid: Grid,
    config: WavyPenConfig,
}

impl WavyPenBuilder {
    /// Start a stroke at `initial`. `pixel_size_on_canvas` must be > 0 and is
    /// fixed for the life of the builder.
    pub fn new(initial: InputSample, pixel_size_on_canvas: f32, config: WavyPenConfig) -> Self {
        let grid = Grid::new(pixel_size_on_canvas);
        let start = grid.round_point(initial.pos);

        let width = if initial.width < CONTACT_EPSILON {
            0.0
        } else {
            initial.width.max(config.min_stroke_width)
        };

        Self {
            segments: vec![Segment::anchor(start, SegmentStyle::new(initial.color, width))],
            last_anchor: start,
            last_sample: ProcessedSample {
                pos: start,
                raw_pos: initial.pos,
                time: initial.time,
            },
            accumulated_arc_length: 0.0,
            grid,
            config,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Where the next segment will start.
    pub fn anchor(&self) -> Pos2 {
        self.last_anchor
    }

    /// Sum of committed chord lengths since the stroke started.
    pub fn accumulated_arc_length(&self) -> f64 {
        self.accumulated_arc_length
    }

    /// The sine term at the current arc length.
    pub fn wave_offset(&self) -> f32 {
        let phase = self.accumulated_arc_length * f64::from(self.config.frequency);
        (f64::from(self.config.amplitude) * phase.sin()) as f32
    }

    /// Width after pressure and speed taper, before the wave is applied.
    pub fn envelope_width(&self, raw_width: f32, speed: f32) -> f32 {
        if raw_width < CONTACT_EPSILON {
            return 0.0;
        }
        let capped = speed.min(self.config.max_speed_for_tapering);
        let tapered = raw_width / (1.0 + capped * self.config.speed_reduction_factor);
        tapered.max(self.config.min_stroke_width)
    }

    fn speed_to(&self, sample: &InputSample) -> f32 {
        let elapsed = sample.time - self.last_sample.time;
        if elapsed <= TIME_EPSILON {
            return 0.0;
        }
        let moved = f64::from(sample.pos.distance(self.last_sample.raw_pos));
        (moved / elapsed) as f32
    }

    /// Feed the next pointer sample.
    pub fn add_point(&mut self, sample: InputSample) {
        let control = self.last_sample.pos;
        let input_pos = self.grid.round_point(sample.pos);
        let end = self.grid.round_point(control.lerp(input_pos, 0.5));

        let chord = end.distance(self.last_anchor);
        self.accumulated_arc_length += f64::from(chord);

        let envelope = self.envelope_width(sample.width, self.speed_to(&sample));
        let width = (envelope + self.wave_offset()).max(0.0);
        let style = SegmentStyle::new(sample.color, width);

        if end == self.last_anchor || chord < self.grid.quantum() * 0.5 {
            self.restyle_last(style);
        } else {
            self.segments
                .push(Segment::quadratic(self.last_anchor, control, end, style));
            self.last_anchor = end;
        }

        self.last_sample = ProcessedSample {
            pos: input_pos,
            raw_pos: sample.pos,
            time: sample.time,
        };
    }

    /// Negligible movement: keep the geometry and only update the tip's style.
    fn restyle_last(&mut self, style: SegmentStyle) {
        let Some(index) = self.segments.len().checked_sub(1) else {
            return;
        };
        let last = &mut self.segments[index].style;
        if (last.width - style.width).abs() > WIDTH_TOLERANCE || last.color != style.color {
            log::trace!(
                "restyling segment {index}: width {} -> {}",
                last.width,
                style.width
            );
            *last = style;
        }
    }

    /// Union of all committed segments' bounds.
    pub fn bounding_box(&self) -> Rect {
        if self.segments.is_empty() {
            return Rect::from_min_max(self.last_anchor, self.last_anchor);
        }
        self.segments
            .iter()
            .fold(Rect::NOTHING, |rect, segment| rect.union(segment.bounding_rect()))
    }

    /// Snapshot the current segments. Does not change the builder.
    pub fn build(&self) -> RenderableStroke {
        RenderableStroke::new(self.segments.clone())
    }

    pub fn preview(&self, target: &mut dyn RenderTarget) {
        self.build().render(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::SegmentPath;
    use egui::{Color32, pos2};

    fn sample(x: f32, y: f32, width: f32, time: f64) -> InputSample {
        InputSample::new(pos2(x, y), width, Color32::BLACK, time)
    }

    #[test]
    fn test_new_builder_has_anchor() {
        let builder = WavyPenBuilder::new(sample(1.4, 2.6, 3.0, 0.0), 1.0, WavyPenConfig::flat());
        assert_eq!(builder.segments().len(), 1);
        assert_eq!(builder.anchor(), pos2(1.0, 3.0));
        assert_eq!(builder.segments()[0].path, SegmentPath::Point(pos2(1.0, 3.0)));
        assert_eq!(builder.segments()[0].style.width, 3.0);
        assert_eq!(builder.accumulated_arc_length(), 0.0);
    }

    #[test]
    fn test_initial_width_below_contact_is_zero() {
        let builder = WavyPenBuilder::new(sample(0.0, 0.0, 0.005, 0.0), 1.0, WavyPenConfig::flat());
        assert_eq!(builder.segments()[0].style.width, 0.0);
    }

    #[test]
    fn test_initial_width_respects_floor() {
        let config = WavyPenConfig {
            min_stroke_width: 2.0,
            ..WavyPenConfig::flat()
        };
        let builder = WavyPenBuilder::new(sample(0.0, 0.0, 0.5, 0.0), 1.0, config);
        assert_eq!(builder.segments()[0].style.width, 2.0);
    }

    #[test]
    fn test_segment_ends_at_midpoint() {
        let mut builder =
            WavyPenBuilder::new(sample(0.0, 0.0, 1.0, 0.0), 1.0, WavyPenConfig::flat());
        builder.add_point(sample(10.0, 0.0, 1.0, 1.0));
        builder.add_point(sample(10.0, 10.0, 1.0, 2.0));

        let segments = builder.segments();
        assert_eq!(segments.len(), 3);
        assert_eq!(
            segments[1].path,
            SegmentPath::Quadratic {
                start: pos2(0.0, 0.0),
                control: pos2(0.0, 0.0),
                end: pos2(5.0, 0.0),
            }
        );
        assert_eq!(
            segments[2].path,
            SegmentPath::Quadratic {
                start: pos2(5.0, 0.0),
                control: pos2(10.0, 0.0),
                end: pos2(10.0, 5.0),
            }
        );
        assert_eq!(builder.anchor(), pos2(10.0, 5.0));
    }

    #[test]
    fn test_speed_thins_envelope() {
        let config = WavyPenConfig {
            speed_reduction_factor: 0.1,
            max_speed_for_tapering: 1000.0,
            ..WavyPenConfig::flat()
        };
        let mut builder = WavyPenBuilder::new(sample(0.0, 0.0, 4.0, 0.0), 1.0, config);
        // 10 units over 1 time unit: speed 10, width 4 / (1 + 10 * 0.1) = 2
        builder.add_point(sample(10.0, 0.0, 4.0, 1.0));
        assert!((builder.segments()[1].style.width - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_speed_is_capped() {
        let config = WavyPenConfig {
            speed_reduction_factor: 0.1,
            max_speed_for_tapering: 10.0,
            ..WavyPenConfig::flat()
        };
        let builder = WavyPenBuilder::new(sample(0.0, 0.0, 4.0, 0.0), 1.0, config);
        assert_eq!(builder.envelope_width(4.0, 10.0), builder.envelope_width(4.0, 1.0e6));
    }

    #[test]
    fn test_zero_elapsed_time_means_zero_speed() {
        let config = WavyPenConfig {
            speed_reduction_factor: 1.0,
            ..WavyPenConfig::flat()
        };
        let mut builder = WavyPenBuilder::new(sample(0.0, 0.0, 3.0, 5.0), 1.0, config);
        builder.add_point(sample(20.0, 0.0, 3.0, 5.0));
        assert_eq!(builder.segments()[1].style.width, 3.0);
    }

    #[test]
    fn test_stationary_point_restyles_last_segment() {
        let mut builder =
            WavyPenBuilder::new(sample(0.0, 0.0, 1.0, 0.0), 1.0, WavyPenConfig::flat());
        builder.add_point(sample(0.2, 0.1, 6.0, 1.0));

        assert_eq!(builder.segments().len(), 1);
        assert_eq!(builder.segments()[0].style.width, 6.0);
        assert_eq!(builder.segments()[0].path, SegmentPath::Point(pos2(0.0, 0.0)));
    }

    #[test]
    fn test_short_chord_merges_without_moving_anchor() {
        // Pixel size 0.5 rounds to tenths; a 0.2 chord is under half a pixel
        let mut builder =
            WavyPenBuilder::new(sample(0.0, 0.0, 1.0, 0.0), 0.5, WavyPenConfig::flat());
        builder.add_point(sample(0.4, 0.0, 2.0, 1.0));

        assert_eq!(builder.segments().len(), 1);
        assert_eq!(builder.anchor(), pos2(0.0, 0.0));
        assert!((builder.accumulated_arc_length() - 0.2).abs() < 1e-6);
        assert_eq!(builder.segments()[0].style.width, 2.0);

        builder.add_point(sample(3.0, 0.0, 2.0, 2.0));
        assert_eq!(builder.segments().len(), 2);
        match builder.segments()[1].path {
            SegmentPath::Quadratic { start, control, end } => {
                assert_eq!(start, pos2(0.0, 0.0));
                assert!((control.x - 0.4).abs() < 1e-6);
                assert!((end.x - 1.7).abs() < 1e-6);
            }
            other => panic!("expected a quadratic segment, got {other:?}"),
        }
        assert!((builder.accumulated_arc_length() - 1.9).abs() < 1e-5);
    }

    #[test]
    fn test_negative_midpoint_rounds_up() {
        let mut builder =
            WavyPenBuilder::new(sample(0.0, 0.0, 1.0, 0.0), 1.0, WavyPenConfig::flat());
        builder.add_point(sample(0.0, -5.0, 1.0, 1.0));

        assert_eq!(builder.anchor(), pos2(0.0, -2.0));
        assert_eq!(builder.accumulated_arc_length(), 2.0);
    }

    #[test]
    fn test_small_width_change_is_ignored() {
        let mut builder =
            WavyPenBuilder::new(sample(0.0, 0.0, 1.0, 0.0), 1.0, WavyPenConfig::flat());
        builder.add_point(sample(0.0, 0.0, 1.0005, 1.0));
        assert_eq!(builder.segments()[0].style.width, 1.0);
    }

    #[test]
    fn test_color_change_restyles() {
        let mut builder =
            WavyPenBuilder::new(sample(0.0, 0.0, 1.0, 0.0), 1.0, WavyPenConfig::flat());
        builder.add_point(InputSample::new(pos2(0.0, 0.0), 1.0, Color32::RED, 1.0));
        assert_eq!(builder.segments().last().unwrap().style.color, Color32::RED);
    }

    #[test]
    fn test_build_is_repeatable() {
        let mut builder =
            WavyPenBuilder::new(sample(0.0, 0.0, 1.0, 0.0), 1.0, WavyPenConfig::default());
        builder.add_point(sample(8.0, 3.0, 1.0, 16.0));
        let first = builder.build();
        let second = builder.build();
        assert_eq!(first, second);

        builder.add_point(sample(20.0, 9.0, 1.0, 32.0));
        assert_eq!(builder.build().len(), first.len() + 1);
    }
}
