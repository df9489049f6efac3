//! Flowgram renders vertical process-flow infographics.
//!
//! A diagram is a stack of step cards joined by arrows, framed by a title band and a footer. The
//! crate produces two artifacts from one [`DiagramConfig`]:
//!
//! - a static PNG of the fully revealed diagram
//! - a looping animated GIF that reveals the cards one at a time
//!
//! Frames are drawn with a CPU rasterizer at an oversampled working resolution and downsampled
//! with a Lanczos3 filter. The usual entry point is [`generate`]; [`FrameComposer`] renders
//! single frames, and [`assemble`] plus an [`AnimationSink`] give control over the animation.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod encode;
pub(crate) mod layout;
pub(crate) mod render;
pub(crate) mod session;
pub(crate) mod text;

pub use crate::foundation::core::{Canvas, Point, Rect, Rgb8, Vec2};
pub use crate::foundation::error::{FlowgramError, FlowgramResult};

pub use crate::animation::timeline::{
    Animation, AnimationFrame, Phase, TimelineStep, assemble, plan_timeline, timeline_len,
};
pub use crate::config::model::{
    Bands, CardMetrics, DiagramConfig, EncodingOpts, FontFaces, FontRole, FontRoleSpec,
    FontWeight, FooterText, IconKind, NodeSpec, Palette, Timing, TitleText, Typography, phase,
};
pub use crate::encode::gif::{GifSink, GifSinkOpts};
pub use crate::encode::png::write_png;
pub use crate::encode::sink::{AnimationSink, InMemorySink, SinkConfig};
pub use crate::layout::solver::{StackLayout, StackParams, solve_stack};
pub use crate::render::connector::{ConnectorGeometry, connector_geometry};
pub use crate::render::frame::{FrameComposer, FramePlan, FrameRGB, downsample};
pub use crate::session::generator::{
    DEFAULT_PREFIX, GenerationReport, OutputPaths, generate, generate_with,
};
pub use crate::text::engine::{LoadedFace, TextEngine, TextExtent, center_start};
