use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};

use crate::encode::sink::{AnimationSink, SinkConfig, check_frame_size};
use crate::foundation::error::{FlowgramError, FlowgramResult};
use crate::render::frame::FrameRGB;

/// Options for [`GifSink`].
#[derive(Clone, Debug)]
pub struct GifSinkOpts {
    /// Output GIF path. The parent directory must exist.
    pub out_path: PathBuf,
    /// Quantizer speed, 1 (best) to 30 (fastest).
    pub speed: i32,
    /// Merge consecutive identical frames into one with the summed delay.
    pub coalesce: bool,
}

impl GifSinkOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            speed: 10,
            coalesce: false,
        }
    }
}

/// Sink writing an infinitely looping animated GIF with per-frame delays.
pub struct GifSink {
    opts: GifSinkOpts,
    encoder: Option<GifEncoder<BufWriter<File>>>,
    cfg: Option<SinkConfig>,
    pending: Option<(FrameRGB, u32)>,
    written: usize,
}

impl GifSink {
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            cfg: None,
            pending: None,
            written: 0,
        }
    }

    pub fn out_path(&self) -> &Path {
        &self.opts.out_path
    }

    /// Physical GIF frames written so far.
    pub fn frames_written(&self) -> usize {
        self.written
    }

    fn write(&mut self, frame: &FrameRGB, duration_ms: u32) -> FlowgramResult<()> {
        let path = &self.opts.out_path;
        let Some(encoder) = self.encoder.as_mut() else {
            return Err(FlowgramError::validation("gif sink is not open"));
        };
        let delay = Delay::from_numer_denom_ms(duration_ms, 1);
        let rgba = frame.to_rgba_image()?;
        encoder
            .encode_frame(Frame::from_parts(rgba, 0, 0, delay))
            .map_err(|e| FlowgramError::encode(path, e))?;
        self.written += 1;
        Ok(())
    }
}

impl AnimationSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> FlowgramResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(FlowgramError::validation(
                "gif sink width/height must be non-zero",
            ));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(FlowgramError::validation(format!(
                "gif frames are limited to 65535px per side, got {}x{}",
                cfg.width, cfg.height
            )));
        }
        if !(1..=30).contains(&self.opts.speed) {
            return Err(FlowgramError::validation(format!(
                "gif speed must be in 1..=30, got {}",
                self.opts.speed
            )));
        }

        let path = self.opts.out_path.clone();
        let file = File::create(&path).map_err(|e| FlowgramError::io(&path, e))?;
        let mut encoder = GifEncoder::new_with_speed(BufWriter::new(file), self.opts.speed);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| FlowgramError::encode(&path, e))?;

        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.pending = None;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, frame: &FrameRGB, duration_ms: u16) -> FlowgramResult<()> {
        check_frame_size(self.cfg, frame)?;
        if !self.opts.coalesce {
            return self.write(frame, u32::from(duration_ms));
        }

        if let Some((held, total)) = self.pending.as_mut()
            && *held == *frame
        {
            *total += u32::from(duration_ms);
            return Ok(());
        }
        if let Some((held, total)) = self.pending.take() {
            self.write(&held, total)?;
        }
        self.pending = Some((frame.clone(), u32::from(duration_ms)));
        Ok(())
    }

    fn end(&mut self) -> FlowgramResult<()> {
        if let Some((held, total)) = self.pending.take() {
            self.write(&held, total)?;
        }
        // Dropping the encoder writes the GIF trailer and flushes the file.
        self.encoder = None;
        tracing::debug!(
            path = %self.opts.out_path.display(),
            frames = self.written,
            "gif finished"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
