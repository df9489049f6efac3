use std::path::PathBuf;

/// Result alias used across the crate.
pub type FlowgramResult<T> = Result<T, FlowgramError>;

/// Errors raised while configuring, rendering, or writing a diagram.
///
/// Every variant aborts generation of both artifacts; nothing is retried.
#[derive(thiserror::Error, Debug)]
pub enum FlowgramError {
    /// Configuration values that cannot be rendered (bad timings, out-of-range indices).
    #[error("validation error: {0}")]
    Validation(String),

    /// Cards do not fit into the content band between title and footer.
    #[error("layout error: {0}")]
    Layout(String),

    /// A font face could not be read or parsed.
    #[error("font error: '{}': {reason}", path.display())]
    Font {
        /// Path of the font file that failed.
        path: PathBuf,
        /// Underlying reason.
        reason: String,
    },

    /// Rasterization failed (surface too large, pixel buffer mismatch).
    #[error("render error: {0}")]
    Render(String),

    /// Writing an output artifact failed.
    #[error("io error: '{}': {source}", path.display())]
    Io {
        /// Output path being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Encoding an output artifact failed.
    #[error("encode error: '{}': {source}", path.display())]
    Encode {
        /// Output path being encoded.
        path: PathBuf,
        /// Underlying codec error.
        #[source]
        source: image::ImageError,
    },

    /// Diagram description could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FlowgramError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    pub fn font(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Font {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn encode(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Encode {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
