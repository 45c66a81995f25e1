#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod builder;
pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod sample;
pub mod stroke;
pub mod tools;

pub use app::WavyPenApp;
pub use builder::WavyPenBuilder;
pub use config::{PenSettings, WavyPenConfig};
pub use document::Document;
pub use error::{ConfigError, ConfigResult};
pub use geometry::{Grid, Viewport};
pub use input::{InputHandler, PointerEvent, PointerState};
pub use renderer::Renderer;
pub use sample::InputSample;
pub use stroke::{RenderTarget, RenderableStroke, Segment, SegmentPath, SegmentStyle, StrokeRef};
pub use tools::{BuilderFactory, PenTool, StrokeBuilder, make_wavy_pen_builder};
