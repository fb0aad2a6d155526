use thiserror::Error;

use crate::drawing::Tool;

#[derive(Debug, Error)]
pub enum DrawError {
    #[error("tool `{0}` has no element geometry")]
    UnsupportedKind(Tool),
    #[error("invalid color `{0}`")]
    InvalidColor(String),
    #[error("font could not be parsed")]
    Font(#[from] ab_glyph::InvalidFont),
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
