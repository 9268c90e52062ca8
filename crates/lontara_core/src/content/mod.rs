//! Rich learning-material content.
//!
//! # Responsibility
//! - Model editor documents as blocks instead of live markup.
//! - Render sanitized HTML with media wrapped in sizable frames.
//!
//! # Invariants
//! - Every text and attribute value is escaped on render.
//! - Media sources are restricted to `data:`, `http(s):` and relative URLs.

pub mod document;
mod html;

pub use document::{
    initial_frame_width, AspectRatio, Block, BlockId, DocBlock, Media, MediaFrame, RichDocument,
};
pub use html::{escape_html, has_media_markup, plain_text_of_html};

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    UnknownBlock(BlockId),
    /// Frame operations only apply to images.
    NotAnImage(BlockId),
    UnsafeSource(String),
    InvalidAspectRatio(String),
}

impl Display for ContentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownBlock(id) => write!(f, "content block not found: {id}"),
            Self::NotAnImage(id) => write!(f, "block {id} is not an image; cannot apply frame"),
            Self::UnsafeSource(src) => write!(f, "media source not allowed: `{src}`"),
            Self::InvalidAspectRatio(value) => {
                write!(f, "unsupported aspect ratio `{value}`; expected 16:9|4:3|1:1")
            }
        }
    }
}

impl Error for ContentError {}
