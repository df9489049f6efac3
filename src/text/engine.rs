use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::config::model::{FontFaces, FontRole, FontWeight, Typography};
use crate::foundation::core::Rgb8;
use crate::foundation::error::{FlowgramError, FlowgramResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgb8> for TextBrushRgba8 {
    fn from(c: Rgb8) -> Self {
        Self {
            r: c.0,
            g: c.1,
            b: c.2,
            a: 255,
        }
    }
}

/// Measured size of a shaped string in working pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

/// Start coordinate that centers a span of `extent` on `center`, snapped to whole pixels.
pub fn center_start(center: f64, extent: f64) -> f64 {
    (center - extent / 2.0).round()
}

/// One loaded font face.
#[derive(Clone)]
pub struct LoadedFace {
    path: PathBuf,
    family: String,
    bytes: Vec<u8>,
    font: vello_cpu::peniko::FontData,
}

impl LoadedFace {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Family name reported by the font file.
    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for LoadedFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFace")
            .field("path", &self.path)
            .field("family", &self.family)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A string shaped for one text role, ready to be drawn.
pub struct ShapedText {
    pub(crate) layout: parley::Layout<TextBrushRgba8>,
    pub(crate) font: vello_cpu::peniko::FontData,
}

impl ShapedText {
    /// Advance box of the string; trailing whitespace counts toward the width.
    pub fn extent(&self) -> TextExtent {
        TextExtent {
            width: f64::from(self.layout.full_width()),
            height: f64::from(self.layout.height()),
        }
    }
}

/// Font provider plus Parley shaping contexts.
///
/// Both faces are read once when the engine is built; a missing or unparseable face fails here
/// so that no frame is ever drawn with substitute metrics.
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    bold: LoadedFace,
    medium: LoadedFace,
    typography: Typography,
    scale: f32,
}

impl TextEngine {
    /// Load both faces from disk.
    #[tracing::instrument(skip(typography))]
    pub fn load(faces: &FontFaces, typography: Typography, scale: u32) -> FlowgramResult<Self> {
        let bold = std::fs::read(&faces.bold)
            .map_err(|e| FlowgramError::font(&faces.bold, e.to_string()))?;
        let medium = std::fs::read(&faces.medium)
            .map_err(|e| FlowgramError::font(&faces.medium, e.to_string()))?;
        Self::from_bytes(
            (faces.bold.clone(), bold),
            (faces.medium.clone(), medium),
            typography,
            scale,
        )
    }

    /// Build an engine from in-memory font files; the paths are only used in diagnostics.
    pub fn from_bytes(
        bold: (PathBuf, Vec<u8>),
        medium: (PathBuf, Vec<u8>),
        typography: Typography,
        scale: u32,
    ) -> FlowgramResult<Self> {
        if scale == 0 {
            return Err(FlowgramError::validation("text scale must be > 0"));
        }
        let mut font_ctx = parley::FontContext::default();
        let bold = register_face(&mut font_ctx, bold.0, bold.1)?;
        let medium = register_face(&mut font_ctx, medium.0, medium.1)?;
        tracing::debug!(bold = %bold.family, medium = %medium.family, "fonts registered");

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            bold,
            medium,
            typography,
            scale: scale as f32,
        })
    }

    pub fn face(&self, weight: FontWeight) -> &LoadedFace {
        match weight {
            FontWeight::Bold => &self.bold,
            FontWeight::Medium => &self.medium,
        }
    }

    /// Font size in working pixels for a role.
    pub fn size_px(&self, role: FontRole) -> f32 {
        self.typography.spec(role).size_px * self.scale
    }

    /// Shape a single line of text for `role`.
    pub fn shape(&mut self, text: &str, role: FontRole, color: Rgb8) -> FlowgramResult<ShapedText> {
        let spec = self.typography.spec(role);
        let size_px = spec.size_px * self.scale;
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(FlowgramError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let (family, weight, font) = match spec.weight {
            FontWeight::Bold => (self.bold.family.clone(), 700.0, self.bold.font.clone()),
            FontWeight::Medium => (self.medium.family.clone(), 500.0, self.medium.font.clone()),
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(weight),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrushRgba8::from(
            color,
        )));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        Ok(ShapedText { layout, font })
    }

    /// Shape `text` and return only its extent.
    pub fn measure(&mut self, text: &str, role: FontRole) -> FlowgramResult<TextExtent> {
        Ok(self.shape(text, role, Rgb8(0, 0, 0))?.extent())
    }
}

fn register_face(
    font_ctx: &mut parley::FontContext,
    path: PathBuf,
    bytes: Vec<u8>,
) -> FlowgramResult<LoadedFace> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| FlowgramError::font(&path, "no font families registered from font bytes"))?;
    let family = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| FlowgramError::font(&path, "registered font family has no name"))?
        .to_string();

    let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.clone()), 0);
    Ok(LoadedFace {
        path,
        family,
        bytes,
        font,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
