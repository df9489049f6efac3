use std::path::{Path, PathBuf};

use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{FlowgramError, FlowgramResult};

/// Immutable description of one diagram.
///
/// All lengths are in design pixels (final output resolution). The renderer multiplies them by
/// [`DiagramConfig::scale`] and draws at the oversampled working resolution.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DiagramConfig {
    /// Final output dimensions.
    #[serde(default = "default_canvas")]
    pub canvas: Canvas,
    /// Oversampling factor used for the working canvas.
    #[serde(default = "default_scale")]
    pub scale: u32,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default)]
    pub fonts: FontFaces,
    #[serde(default)]
    pub typography: Typography,
    #[serde(default)]
    pub card: CardMetrics,
    #[serde(default)]
    pub bands: Bands,
    #[serde(default)]
    pub title: TitleText,
    #[serde(default)]
    pub footer: FooterText,
    /// Steps in reveal order (top to bottom).
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub timing: Timing,
    #[serde(default)]
    pub encoding: EncodingOpts,
}

/// One step of the process flow.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeSpec {
    /// Bold card heading.
    pub label: String,
    /// Muted one-line description under the label.
    pub description: String,
    /// Accent strip, badge, and pill fill.
    pub phase_color: Rgb8,
    /// Short tag shown in the pill (e.g. `EXEC`).
    pub phase_tag: String,
    pub icon: IconKind,
}

/// Closed set of card icons.
///
/// The names used by older diagram descriptions are accepted as aliases. Any other name is a
/// deserialization error rather than a silently missing icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconKind {
    /// Orange twelve-ray burst around a center disk.
    #[serde(alias = "claude")]
    Starburst,
    /// Three pink ringed nodes joined by a bent line.
    #[serde(alias = "n8n")]
    LinkedNodes,
    /// Four-color camera body with a play wedge.
    #[serde(alias = "gmeet")]
    Camera,
    /// Generic ruled document, used when a step has no brand icon.
    #[serde(alias = "none")]
    Document,
}

impl IconKind {
    pub const ALL: [IconKind; 4] = [
        IconKind::Starburst,
        IconKind::LinkedNodes,
        IconKind::Camera,
        IconKind::Document,
    ];
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    pub background: Rgb8,
    pub card: Rgb8,
    /// Borders, shadows, arrows, and primary text.
    pub ink: Rgb8,
    /// Second title segment.
    pub accent: Rgb8,
    /// Subtitle, descriptions, and footer text.
    pub muted_text: Rgb8,
    /// Horizontal rules under the title and above the footer.
    pub rule: Rgb8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb8(250, 243, 227),
            card: Rgb8::WHITE,
            ink: Rgb8(2, 3, 9),
            accent: Rgb8(72, 160, 120),
            muted_text: Rgb8(100, 100, 100),
            rule: Rgb8(210, 205, 190),
        }
    }
}

/// Phase colors used by the reference diagram.
pub mod phase {
    use crate::foundation::core::Rgb8;

    pub const INPUT: Rgb8 = Rgb8(253, 238, 196);
    pub const PLAN: Rgb8 = Rgb8(229, 245, 249);
    pub const EXEC: Rgb8 = Rgb8(210, 236, 208);
    pub const DEBUG: Rgb8 = Rgb8(243, 193, 192);
}

/// Font files for the two weights the diagram uses.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FontFaces {
    pub bold: PathBuf,
    pub medium: PathBuf,
}

impl Default for FontFaces {
    fn default() -> Self {
        Self {
            bold: PathBuf::from("/usr/share/fonts/truetype/google-fonts/Poppins-Bold.ttf"),
            medium: PathBuf::from("/usr/share/fonts/truetype/google-fonts/Poppins-Medium.ttf"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Bold,
    Medium,
}

/// Weight and size for one text role.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FontRoleSpec {
    pub weight: FontWeight,
    /// Size in design pixels.
    pub size_px: f32,
}

impl FontRoleSpec {
    const fn bold(size_px: f32) -> Self {
        Self {
            weight: FontWeight::Bold,
            size_px,
        }
    }

    const fn medium(size_px: f32) -> Self {
        Self {
            weight: FontWeight::Medium,
            size_px,
        }
    }
}

/// The eight text roles drawn by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontRole {
    Title,
    TitleAccent,
    Subtitle,
    NodeLabel,
    NodeDesc,
    StepNumber,
    Footer,
    PhaseTag,
}

impl FontRole {
    pub const ALL: [FontRole; 8] = [
        FontRole::Title,
        FontRole::TitleAccent,
        FontRole::Subtitle,
        FontRole::NodeLabel,
        FontRole::NodeDesc,
        FontRole::StepNumber,
        FontRole::Footer,
        FontRole::PhaseTag,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Typography {
    pub title: FontRoleSpec,
    pub title_accent: FontRoleSpec,
    pub subtitle: FontRoleSpec,
    pub node_label: FontRoleSpec,
    pub node_desc: FontRoleSpec,
    pub step_number: FontRoleSpec,
    pub footer: FontRoleSpec,
    pub phase_tag: FontRoleSpec,
}

impl Typography {
    pub fn spec(&self, role: FontRole) -> FontRoleSpec {
        match role {
            FontRole::Title => self.title,
            FontRole::TitleAccent => self.title_accent,
            FontRole::Subtitle => self.subtitle,
            FontRole::NodeLabel => self.node_label,
            FontRole::NodeDesc => self.node_desc,
            FontRole::StepNumber => self.step_number,
            FontRole::Footer => self.footer,
            FontRole::PhaseTag => self.phase_tag,
        }
    }
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            title: FontRoleSpec::bold(36.0),
            title_accent: FontRoleSpec::bold(36.0),
            subtitle: FontRoleSpec::medium(14.0),
            node_label: FontRoleSpec::bold(17.0),
            node_desc: FontRoleSpec::medium(12.0),
            step_number: FontRoleSpec::bold(13.0),
            footer: FontRoleSpec::medium(12.0),
            phase_tag: FontRoleSpec::bold(10.0),
        }
    }
}

/// Card geometry in design pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CardMetrics {
    pub width: u32,
    pub height: u32,
    /// Vertical space between consecutive cards.
    pub gap: u32,
    pub shadow_x: u32,
    pub shadow_y: u32,
    pub border: u32,
    pub corner_radius: u32,
    /// Icon half-extent; the icon layer is twice this wide.
    pub icon_size: u32,
}

impl Default for CardMetrics {
    fn default() -> Self {
        Self {
            width: 520,
            height: 65,
            gap: 28,
            shadow_x: 5,
            shadow_y: 5,
            border: 2,
            corner_radius: 10,
            icon_size: 15,
        }
    }
}

/// Heights reserved for the title block and the footer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Bands {
    pub title_area_height: u32,
    pub footer_height: u32,
}

impl Default for Bands {
    fn default() -> Self {
        Self {
            title_area_height: 130,
            footer_height: 50,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TitleText {
    /// First segment, drawn in ink.
    pub primary: String,
    /// Second segment, drawn in the accent color right after the first.
    pub accent: String,
    pub subtitle: String,
    /// Top of the title line in design pixels.
    #[serde(default = "default_title_top")]
    pub top: f64,
}

fn default_title_top() -> f64 {
    30.0
}

impl Default for TitleText {
    fn default() -> Self {
        Self {
            primary: "Transcript ".to_string(),
            accent: "to n8n Workflow".to_string(),
            subtitle: "How Claude Code builds n8n workflows from a single call".to_string(),
            top: default_title_top(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FooterText {
    pub text: String,
}

impl Default for FooterText {
    fn default() -> Self {
        Self {
            text: "Ben Van Sprundel  |  Founder @ BenAI".to_string(),
        }
    }
}

/// Hold counts and per-frame delays of the three animation phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Timing {
    /// Copies of the title-only frame.
    pub title_hold: u32,
    /// Copies of each reveal frame.
    pub node_hold: u32,
    /// Copies of the fully revealed frame at the end.
    pub final_hold: u32,
    /// Delay of every frame outside the final hold.
    pub frame_duration_ms: u16,
    /// Delay of final-hold frames; must exceed `frame_duration_ms`.
    pub final_duration_ms: u16,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            title_hold: 12,
            node_hold: 7,
            final_hold: 30,
            frame_duration_ms: 100,
            final_duration_ms: 150,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EncodingOpts {
    /// GIF quantizer speed, `1` (best) to `30` (fastest).
    #[serde(default = "default_gif_speed")]
    pub gif_speed: i32,
    /// Merge consecutive identical frames into one GIF frame with the summed delay.
    #[serde(default)]
    pub coalesce_holds: bool,
    /// Warn when the written GIF exceeds this many bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_gif_bytes: Option<u64>,
}

fn default_gif_speed() -> i32 {
    10
}

impl Default for EncodingOpts {
    fn default() -> Self {
        Self {
            gif_speed: default_gif_speed(),
            coalesce_holds: false,
            max_gif_bytes: None,
        }
    }
}

fn default_canvas() -> Canvas {
    Canvas {
        width: 800,
        height: 998,
    }
}

fn default_scale() -> u32 {
    3
}

fn node(
    label: &str,
    description: &str,
    phase_color: Rgb8,
    phase_tag: &str,
    icon: IconKind,
) -> NodeSpec {
    NodeSpec {
        label: label.to_string(),
        description: description.to_string(),
        phase_color,
        phase_tag: phase_tag.to_string(),
        icon,
    }
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            canvas: default_canvas(),
            scale: default_scale(),
            palette: Palette::default(),
            fonts: FontFaces::default(),
            typography: Typography::default(),
            card: CardMetrics::default(),
            bands: Bands::default(),
            title: TitleText::default(),
            footer: FooterText::default(),
            nodes: vec![
                node(
                    "Discovery Call",
                    "Defines the project scope",
                    phase::INPUT,
                    "INPUT",
                    IconKind::Camera,
                ),
                node(
                    "Transcript",
                    "Raw text, ready for analysis",
                    phase::INPUT,
                    "INPUT",
                    IconKind::Document,
                ),
                node(
                    "n8n PRD",
                    "Automation spec from transcript",
                    phase::PLAN,
                    "PLAN",
                    IconKind::LinkedNodes,
                ),
                node(
                    "Claude Code",
                    "Interprets PRD and builds it",
                    phase::PLAN,
                    "ENGINE",
                    IconKind::Starburst,
                ),
                node(
                    "Build",
                    "Constructs workflow node by node",
                    phase::EXEC,
                    "EXEC",
                    IconKind::LinkedNodes,
                ),
                node(
                    "Tests",
                    "Verifies each step works",
                    phase::EXEC,
                    "EXEC",
                    IconKind::Document,
                ),
                node(
                    "Debug",
                    "Fixes issues automatically",
                    phase::DEBUG,
                    "EXEC",
                    IconKind::Starburst,
                ),
                node(
                    "Optimizes",
                    "Refines for production use",
                    phase::EXEC,
                    "EXEC",
                    IconKind::Document,
                ),
            ],
            timing: Timing::default(),
            encoding: EncodingOpts::default(),
        }
    }
}

impl DiagramConfig {
    /// Parse a diagram description from JSON text.
    pub fn from_json_str(s: &str) -> FlowgramResult<Self> {
        serde_json::from_str(s).map_err(|e| FlowgramError::serde(e.to_string()))
    }

    /// Read and parse a diagram description from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> FlowgramResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| FlowgramError::io(path, e))?;
        Self::from_json_str(&text)
            .map_err(|e| FlowgramError::serde(format!("'{}': {e}", path.display())))
    }

    /// Working (oversampled) canvas dimensions.
    pub fn working_canvas(&self) -> FlowgramResult<Canvas> {
        self.canvas.scaled(self.scale)
    }

    /// Multiply a design-pixel length by the oversampling factor.
    pub fn px(&self, design: f64) -> f64 {
        design * f64::from(self.scale)
    }

    /// Validate values that would otherwise produce a broken or empty render.
    ///
    /// Layout fit is checked separately when the layout is solved.
    pub fn validate(&self) -> FlowgramResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(FlowgramError::validation("canvas width/height must be > 0"));
        }
        if self.scale == 0 {
            return Err(FlowgramError::validation("scale must be > 0"));
        }
        let working = self.working_canvas()?;
        if working.width > u32::from(u16::MAX) || working.height > u32::from(u16::MAX) {
            return Err(FlowgramError::validation(format!(
                "working canvas {}x{} exceeds the rasterizer limit of {}",
                working.width,
                working.height,
                u16::MAX
            )));
        }

        if self.nodes.is_empty() {
            return Err(FlowgramError::validation("diagram must have at least one node"));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if node.label.trim().is_empty() {
                return Err(FlowgramError::validation(format!(
                    "node {i} label must be non-empty"
                )));
            }
            if node.phase_tag.trim().is_empty() {
                return Err(FlowgramError::validation(format!(
                    "node {i} ('{}') phase_tag must be non-empty",
                    node.label
                )));
            }
        }

        for role in FontRole::ALL {
            let spec = self.typography.spec(role);
            if !spec.size_px.is_finite() || spec.size_px <= 0.0 {
                return Err(FlowgramError::validation(format!(
                    "font size for {role:?} must be finite and > 0"
                )));
            }
        }

        let c = &self.card;
        if c.width == 0 || c.height == 0 {
            return Err(FlowgramError::validation("card width/height must be > 0"));
        }
        let (w, h) = (u64::from(c.width), u64::from(c.height));
        if u64::from(c.border) * 2 >= h || u64::from(c.border) * 2 >= w {
            return Err(FlowgramError::validation(
                "card border must be thinner than half the card",
            ));
        }
        if u64::from(c.corner_radius) * 2 > h {
            return Err(FlowgramError::validation(
                "card corner_radius must be <= half the card height",
            ));
        }
        if c.icon_size == 0 {
            return Err(FlowgramError::validation("card icon_size must be > 0"));
        }
        if c.icon_size > c.height {
            return Err(FlowgramError::validation(
                "card icon_size must not exceed the card height",
            ));
        }

        if !self.title.top.is_finite() || self.title.top < 0.0 {
            return Err(FlowgramError::validation("title top must be finite and >= 0"));
        }

        self.timing.validate()?;

        if !(1..=30).contains(&self.encoding.gif_speed) {
            return Err(FlowgramError::validation("gif_speed must be in 1..=30"));
        }
        Ok(())
    }
}

impl Timing {
    pub fn validate(&self) -> FlowgramResult<()> {
        if self.final_hold == 0 {
            return Err(FlowgramError::validation("final_hold must be > 0"));
        }
        if self.frame_duration_ms == 0 {
            return Err(FlowgramError::validation("frame_duration_ms must be > 0"));
        }
        if self.final_duration_ms <= self.frame_duration_ms {
            return Err(FlowgramError::validation(
                "final_duration_ms must be greater than frame_duration_ms",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
