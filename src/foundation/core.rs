use crate::foundation::error::{FlowgramError, FlowgramResult};

pub use kurbo::{Point, Rect, Vec2};

/// Opaque sRGB color, serialized as `[r, g, b]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8(pub u8, pub u8, pub u8);

impl Rgb8 {
    pub const WHITE: Self = Self(255, 255, 255);

    pub fn to_array(self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }

    /// Straight-alpha RGBA8 with full opacity.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.0, self.1, self.2, 255]
    }
}

/// Raster dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> FlowgramResult<Self> {
        if width == 0 || height == 0 {
            return Err(FlowgramError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Multiply both dimensions by an integer oversampling factor.
    pub fn scaled(self, factor: u32) -> FlowgramResult<Self> {
        let width = self
            .width
            .checked_mul(factor)
            .ok_or_else(|| FlowgramError::validation("scaled canvas width overflows u32"))?;
        let height = self
            .height
            .checked_mul(factor)
            .ok_or_else(|| FlowgramError::validation("scaled canvas height overflows u32"))?;
        Self::new(width, height)
    }

    pub fn pixel_count(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}
