use std::path::Path;

use crate::foundation::error::{FlowgramError, FlowgramResult};
use crate::render::frame::FrameRGB;

/// Write `frame` as an 8-bit RGB PNG.
pub fn write_png(frame: &FrameRGB, path: &Path) -> FlowgramResult<()> {
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ExtendedColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .map_err(|e| match e {
        image::ImageError::IoError(source) => FlowgramError::io(path, source),
        other => FlowgramError::encode(path, other),
    })
}
