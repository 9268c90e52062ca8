//! Block document produced by the material editor.

use super::html::{escape_html, is_allowed_source};
use super::ContentError;

pub type BlockId = u32;

const MIN_FRAME_WIDTH: u32 = 10;
const MAX_FRAME_WIDTH: u32 = 100;
const FALLBACK_EDITOR_WIDTH_PX: u32 = 500;

/// Frame ratio applied to an image wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    Wide,
    Standard,
    Square,
}

impl AspectRatio {
    /// `(width, height)` ratio terms.
    pub fn terms(self) -> (u32, u32) {
        match self {
            Self::Wide => (16, 9),
            Self::Standard => (4, 3),
            Self::Square => (1, 1),
        }
    }

    /// Parses `16:9`, `4:3` or `1:1`.
    pub fn parse(value: &str) -> Result<Self, ContentError> {
        match value.trim() {
            "16:9" => Ok(Self::Wide),
            "4:3" => Ok(Self::Standard),
            "1:1" => Ok(Self::Square),
            other => Err(ContentError::InvalidAspectRatio(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Media {
    Image { src: String, alt: String },
    Video { src: String },
}

/// Container wrapping one media element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFrame {
    pub media: Media,
    /// Frame width relative to the editor, 10..=100. `None` keeps natural size.
    pub width_percent: Option<u32>,
    /// `None` is the free ratio.
    pub aspect: Option<AspectRatio>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(String),
    Heading { level: u8, text: String },
    Media(MediaFrame),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocBlock {
    pub id: BlockId,
    pub block: Block,
}

/// Ordered editor document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichDocument {
    blocks: Vec<DocBlock>,
    next_id: BlockId,
}

impl RichDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocks(&self) -> &[DocBlock] {
        &self.blocks
    }

    pub fn push_paragraph(&mut self, text: impl Into<String>) -> BlockId {
        self.push(Block::Paragraph(text.into()))
    }

    /// Heading levels are clamped to 1..=6.
    pub fn push_heading(&mut self, level: u8, text: impl Into<String>) -> BlockId {
        self.push(Block::Heading {
            level: level.clamp(1, 6),
            text: text.into(),
        })
    }

    /// Inserts an image inside a frameable wrapper.
    pub fn insert_image(
        &mut self,
        src: impl Into<String>,
        alt: impl Into<String>,
    ) -> Result<BlockId, ContentError> {
        let src = src.into();
        if !is_allowed_source(&src, "data:image/") {
            return Err(ContentError::UnsafeSource(src));
        }
        Ok(self.push(Block::Media(MediaFrame {
            media: Media::Image {
                src,
                alt: alt.into(),
            },
            width_percent: None,
            aspect: None,
        })))
    }

    pub fn insert_video(&mut self, src: impl Into<String>) -> Result<BlockId, ContentError> {
        let src = src.into();
        if !is_allowed_source(&src, "data:video/") {
            return Err(ContentError::UnsafeSource(src));
        }
        Ok(self.push(Block::Media(MediaFrame {
            media: Media::Video { src },
            width_percent: None,
            aspect: None,
        })))
    }

    pub fn remove_block(&mut self, id: BlockId) -> Result<(), ContentError> {
        let index = self
            .blocks
            .iter()
            .position(|block| block.id == id)
            .ok_or(ContentError::UnknownBlock(id))?;
        self.blocks.remove(index);
        Ok(())
    }

    pub fn frame(&self, id: BlockId) -> Option<&MediaFrame> {
        self.blocks.iter().find_map(|block| match &block.block {
            Block::Media(frame) if block.id == id => Some(frame),
            _ => None,
        })
    }

    /// Resizes an image frame and returns the applied width.
    ///
    /// Width is clamped to 10..=100 percent. Free resizing drops any framed
    /// aspect ratio.
    pub fn set_frame_width(&mut self, id: BlockId, percent: u32) -> Result<u32, ContentError> {
        let frame = self.image_frame_mut(id)?;
        let applied = percent.clamp(MIN_FRAME_WIDTH, MAX_FRAME_WIDTH);
        frame.width_percent = Some(applied);
        frame.aspect = None;
        Ok(applied)
    }

    /// Applies a framed ratio, or the free ratio when `aspect` is `None`.
    pub fn set_aspect_ratio(
        &mut self,
        id: BlockId,
        aspect: Option<AspectRatio>,
    ) -> Result<(), ContentError> {
        self.image_frame_mut(id)?.aspect = aspect;
        Ok(())
    }

    /// Visible text, one line per text block. Media contributes nothing.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .filter_map(|block| match &block.block {
                Block::Paragraph(text) | Block::Heading { text, .. } => Some(text.trim()),
                Block::Media(_) => None,
            })
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn has_text(&self) -> bool {
        !self.plain_text().is_empty()
    }

    /// Renders the document as a sanitized HTML fragment.
    pub fn render_html(&self) -> String {
        self.blocks
            .iter()
            .map(|block| render_block(&block.block))
            .collect()
    }

    fn push(&mut self, block: Block) -> BlockId {
        let id = self.next_id;
        self.next_id += 1;
        self.blocks.push(DocBlock { id, block });
        id
    }

    fn image_frame_mut(&mut self, id: BlockId) -> Result<&mut MediaFrame, ContentError> {
        let block = self
            .blocks
            .iter_mut()
            .find(|block| block.id == id)
            .ok_or(ContentError::UnknownBlock(id))?;
        match &mut block.block {
            Block::Media(frame) if matches!(frame.media, Media::Image { .. }) => Ok(frame),
            _ => Err(ContentError::NotAnImage(id)),
        }
    }
}

/// Initial slider value for an unframed image.
///
/// `round(image / editor * 100)` clamped to 10..=100; an unknown or zero
/// editor width falls back to 500 px.
pub fn initial_frame_width(image_px: u32, editor_px: Option<u32>) -> u32 {
    let editor = editor_px
        .filter(|width| *width > 0)
        .unwrap_or(FALLBACK_EDITOR_WIDTH_PX);
    let ratio = (f64::from(image_px) / f64::from(editor) * 100.0).round();
    (ratio.min(f64::from(MAX_FRAME_WIDTH)) as u32).max(MIN_FRAME_WIDTH)
}

fn render_block(block: &Block) -> String {
    match block {
        Block::Paragraph(text) => format!("<p>{}</p>", escape_html(text)),
        Block::Heading { level, text } => format!("<h{level}>{}</h{level}>", escape_html(text)),
        Block::Media(frame) => render_frame(frame),
    }
}

fn render_frame(frame: &MediaFrame) -> String {
    match &frame.media {
        Media::Image { src, alt } => {
            let mut classes = String::from("aspect-ratio-wrapper my-2");
            if let Some(aspect) = frame.aspect {
                let (w, h) = aspect.terms();
                classes.push_str(&format!(" aspect-w-{w} aspect-h-{h}"));
            }

            let mut wrapper_style =
                String::from("display:inline-block; max-width: 100%; position: relative;");
            let mut image_style = String::from("max-width: 100%; border-radius: 8px; cursor: pointer;");
            if let Some(width) = frame.width_percent {
                wrapper_style.push_str(&format!(" width: {width}%;"));
                image_style.push_str(" width: 100%;");
            }
            match frame.aspect {
                Some(_) => image_style.push_str(" height: 100%; object-fit: contain;"),
                None => image_style.push_str(" height: auto;"),
            }

            format!(
                r#"<div class="{classes}" style="{wrapper_style}"><img src="{}" alt="{}" style="{image_style}" /></div>"#,
                escape_html(src),
                escape_html(alt)
            )
        }
        Media::Video { src } => format!(
            r#"<div class="my-2"><video controls src="{}" style="max-width: 100%; border-radius: 8px;"></video></div>"#,
            escape_html(src)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::{initial_frame_width, AspectRatio, RichDocument};
    use crate::content::ContentError;

    #[test]
    fn resizing_clamps_and_resets_aspect() {
        let mut doc = RichDocument::new();
        let image = doc.insert_image("images/tongkonan.jpg", "Tongkonan").unwrap();
        doc.set_aspect_ratio(image, Some(AspectRatio::Wide)).unwrap();

        assert_eq!(doc.set_frame_width(image, 4).unwrap(), 10);
        assert_eq!(doc.set_frame_width(image, 250).unwrap(), 100);
        let frame = doc.frame(image).unwrap();
        assert_eq!(frame.width_percent, Some(100));
        assert_eq!(frame.aspect, None);
    }

    #[test]
    fn aspect_ratio_is_rejected_for_video() {
        let mut doc = RichDocument::new();
        let video = doc.insert_video("data:video/mp4;base64,AAAA").unwrap();
        assert_eq!(
            doc.set_aspect_ratio(video, Some(AspectRatio::Square)),
            Err(ContentError::NotAnImage(video))
        );
        assert_eq!(
            doc.set_frame_width(99, 50),
            Err(ContentError::UnknownBlock(99))
        );
    }

    #[test]
    fn render_escapes_text_and_attributes() {
        let mut doc = RichDocument::new();
        doc.push_heading(9, "Rumah <adat>");
        let image = doc
            .insert_image("a.png\" onerror=\"x", "alt & \"quote\"")
            .unwrap();
        doc.set_frame_width(image, 60).unwrap();
        doc.set_aspect_ratio(image, Some(AspectRatio::Standard)).unwrap();

        let html = doc.render_html();
        assert!(html.starts_with("<h6>Rumah &lt;adat&gt;</h6>"));
        assert!(html.contains(r#"class="aspect-ratio-wrapper my-2 aspect-w-4 aspect-h-3""#));
        assert!(html.contains("width: 60%;"));
        assert!(html.contains("object-fit: contain;"));
        assert!(html.contains(r#"src="a.png&quot; onerror=&quot;x""#));
        assert!(html.contains(r#"alt="alt &amp; &quot;quote&quot;""#));
    }

    #[test]
    fn unsafe_sources_are_refused() {
        let mut doc = RichDocument::new();
        assert!(matches!(
            doc.insert_image("javascript:alert(1)", "x"),
            Err(ContentError::UnsafeSource(_))
        ));
        assert!(matches!(
            doc.insert_video("data:image/png;base64,AAAA"),
            Err(ContentError::UnsafeSource(_))
        ));
    }

    #[test]
    fn plain_text_skips_media() {
        let mut doc = RichDocument::new();
        doc.insert_image("a.png", "a").unwrap();
        assert!(!doc.has_text());
        doc.push_paragraph("  Ma'nene  ");
        assert_eq!(doc.plain_text(), "Ma'nene");
    }

    #[test]
    fn initial_width_uses_editor_ratio() {
        assert_eq!(initial_frame_width(250, Some(1000)), 25);
        assert_eq!(initial_frame_width(250, None), 50);
        assert_eq!(initial_frame_width(10, Some(1000)), 10);
        assert_eq!(initial_frame_width(5000, Some(0)), 100);
    }

    #[test]
    fn aspect_parse_accepts_known_ratios_only() {
        assert_eq!(AspectRatio::parse("16:9"), Ok(AspectRatio::Wide));
        assert!(AspectRatio::parse("21:9").is_err());
    }
}
