use std::path::{Path, PathBuf};

use crate::animation::timeline::{Animation, assemble};
use crate::config::model::DiagramConfig;
use crate::encode::gif::{GifSink, GifSinkOpts};
use crate::encode::png::write_png;
use crate::foundation::core::Canvas;
use crate::foundation::error::{FlowgramError, FlowgramResult};
use crate::render::frame::FrameComposer;

/// Default artifact name prefix.
pub const DEFAULT_PREFIX: &str = "process_flow";

/// Paths and statistics for one generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationReport {
    pub gif_path: PathBuf,
    pub png_path: PathBuf,
    pub gif_bytes: u64,
    pub png_bytes: u64,
    /// Timeline entries (one per displayed frame, before coalescing).
    pub frame_count: usize,
    /// Frames actually stored in the GIF.
    pub gif_frames: usize,
    /// Distinct frames that had to be rendered.
    pub rendered_frames: usize,
    pub total_duration_ms: u64,
    pub working: Canvas,
    pub output: Canvas,
}

/// Output locations derived from a directory and a name prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPaths {
    pub gif: PathBuf,
    pub png: PathBuf,
}

impl OutputPaths {
    /// `<dir>/<prefix>.gif` and `<dir>/<prefix>-static.png`.
    pub fn new(out_dir: &Path, prefix: &str) -> FlowgramResult<Self> {
        if prefix.is_empty() || prefix.contains(['/', '\\']) {
            return Err(FlowgramError::validation(format!(
                "output prefix '{prefix}' must be a non-empty file name"
            )));
        }
        Ok(Self {
            gif: out_dir.join(format!("{prefix}.gif")),
            png: out_dir.join(format!("{prefix}-static.png")),
        })
    }
}

/// Render the diagram described by `cfg` into an animated GIF and a static PNG.
///
/// `out_dir` must already exist. Both artifacts are written or the call fails.
#[tracing::instrument(skip(cfg), fields(nodes = cfg.nodes.len(), scale = cfg.scale))]
pub fn generate(
    cfg: DiagramConfig,
    out_dir: &Path,
    prefix: &str,
) -> FlowgramResult<GenerationReport> {
    let paths = OutputPaths::new(out_dir, prefix)?;
    let mut composer = FrameComposer::from_config(cfg)?;
    generate_with(&mut composer, &paths)
}

/// Same as [`generate`] with an already constructed composer.
pub fn generate_with(
    composer: &mut FrameComposer,
    paths: &OutputPaths,
) -> FlowgramResult<GenerationReport> {
    let animation = assemble(composer)?;
    let encoding = composer.config().encoding;

    let mut opts = GifSinkOpts::new(&paths.gif);
    opts.speed = encoding.gif_speed;
    opts.coalesce = encoding.coalesce_holds;
    let mut sink = GifSink::new(opts);
    animation.stream_into(&mut sink)?;
    let gif_bytes = file_len(&paths.gif)?;
    tracing::info!(
        path = %paths.gif.display(),
        bytes = gif_bytes,
        frames = sink.frames_written(),
        "wrote animated gif"
    );
    if let Some(budget) = encoding.max_gif_bytes
        && gif_bytes > budget
    {
        tracing::warn!(
            bytes = gif_bytes,
            budget,
            "gif exceeds the configured size budget; consider coalesce_holds or a smaller canvas"
        );
    }

    let png_bytes = write_static(&animation, &paths.png)?;
    tracing::info!(path = %paths.png.display(), bytes = png_bytes, "wrote static png");

    Ok(GenerationReport {
        gif_path: paths.gif.clone(),
        png_path: paths.png.clone(),
        gif_bytes,
        png_bytes,
        frame_count: animation.len(),
        gif_frames: sink.frames_written(),
        rendered_frames: animation.distinct_frames(),
        total_duration_ms: animation.total_duration_ms(),
        working: composer.working_canvas(),
        output: composer.config().canvas,
    })
}

fn write_static(animation: &Animation, path: &Path) -> FlowgramResult<u64> {
    let last = animation
        .last_frame()
        .ok_or_else(|| FlowgramError::validation("animation has no frames"))?;
    write_png(last, path)?;
    file_len(path)
}

fn file_len(path: &Path) -> FlowgramResult<u64> {
    std::fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| FlowgramError::io(path, e))
}

#[cfg(test)]
#[path = "../../tests/unit/session/generator.rs"]
mod tests;
