use crate::foundation::error::{FlowgramError, FlowgramResult};
use crate::render::frame::FrameRGB;

/// Configuration provided to an [`AnimationSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

/// Consumer of animation frames in timeline order.
///
/// `begin` is called once, then `push_frame` once per timeline entry, then `end` once. Frames
/// must match the dimensions announced in `begin`.
pub trait AnimationSink {
    fn begin(&mut self, cfg: SinkConfig) -> FlowgramResult<()>;
    /// Push one frame that stays on screen for `duration_ms`.
    fn push_frame(&mut self, frame: &FrameRGB, duration_ms: u16) -> FlowgramResult<()>;
    fn end(&mut self) -> FlowgramResult<()>;
}

pub(crate) fn check_frame_size(cfg: Option<SinkConfig>, frame: &FrameRGB) -> FlowgramResult<()> {
    let Some(cfg) = cfg else {
        return Err(FlowgramError::validation("push_frame called before begin"));
    };
    if (frame.width, frame.height) != (cfg.width, cfg.height) {
        return Err(FlowgramError::validation(format!(
            "frame is {}x{} but the sink expects {}x{}",
            frame.width, frame.height, cfg.width, cfg.height
        )));
    }
    Ok(())
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameRGB, u16)>,
    finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Captured frames with their durations, in push order.
    pub fn frames(&self) -> &[(FrameRGB, u16)] {
        &self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl AnimationSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> FlowgramResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, frame: &FrameRGB, duration_ms: u16) -> FlowgramResult<()> {
        check_frame_size(self.cfg, frame)?;
        self.frames.push((frame.clone(), duration_ms));
        Ok(())
    }

    fn end(&mut self) -> FlowgramResult<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
