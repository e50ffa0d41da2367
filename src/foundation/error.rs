/// Convenience result type used across glyphreel.
pub type GlyphResult<T> = Result<T, GlyphError>;

/// Top-level error taxonomy used by rendering and playback APIs.
#[derive(thiserror::Error, Debug)]
pub enum GlyphError {
    /// A target or source size is zero, negative, or otherwise unusable.
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// A palette was built from zero glyphs.
    #[error("palette must contain at least one glyph")]
    EmptyPalette,

    /// An animation has no frames, so no canvas bounds can be established.
    #[error("animation must contain at least one frame")]
    EmptySequence,

    /// Writing a frame to the output sink failed.
    #[error("sink write error: {0}")]
    SinkWrite(#[source] std::io::Error),

    /// Invalid user-provided configuration or input data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// The source image could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] image::ImageError),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlyphError {
    /// Build a [`GlyphError::InvalidDimension`] value.
    pub fn invalid_dimension(msg: impl Into<String>) -> Self {
        Self::InvalidDimension(msg.into())
    }

    /// Build a [`GlyphError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GlyphError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Returns `true` for configuration errors that are detected before any rendering starts.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimension(_) | Self::EmptyPalette | Self::EmptySequence | Self::Validation(_)
        )
    }

    /// Returns `true` when a sink write failed in a way that makes the sink unusable.
    ///
    /// Transient write failures are skipped by playback; permanent ones end it.
    pub fn is_permanent_sink_failure(&self) -> bool {
        match self {
            Self::SinkWrite(e) => is_permanent_io(e),
            _ => false,
        }
    }
}

pub(crate) fn is_permanent_io(e: &std::io::Error) -> bool {
    use std::io::ErrorKind;
    matches!(
        e.kind(),
        ErrorKind::BrokenPipe
            | ErrorKind::WriteZero
            | ErrorKind::NotConnected
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::UnexpectedEof
    )
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
