//! Image conversion
//!
//! Notion only accepts externally hosted images with a known file extension.
//! Anything else degrades to a paragraph instead of failing the conversion.

use super::rich_text::plain_rich_text;
use crate::block_model::{Block, BlockColor, ExternalFile, ImageBlock, ParagraphBlock};
use crate::element_model::ImageElement;

const SUPPORTED_IMAGE_EXTENSIONS: [&str; 9] = [
    ".bmp", ".gif", ".heic", ".jpeg", ".jpg", ".png", ".svg", ".tif", ".tiff",
];

pub(super) fn convert_image(image: &ImageElement) -> Block {
    if !image.url.starts_with("http") {
        log::warn!("Non-URL image not supported: {}", image.url);
        let label = image
            .caption
            .as_deref()
            .filter(|caption| !caption.is_empty())
            .or(Some(image.url.as_str()).filter(|url| !url.is_empty()))
            .unwrap_or("unknown");
        return Block::Paragraph(ParagraphBlock {
            rich_text: plain_rich_text(&format!("[Image: {}]", label)),
            color: BlockColor::Default,
        });
    }

    if !has_supported_extension(&image.url) {
        log::warn!("Unsupported image URL extension: {}", image.url);
        return Block::Paragraph(ParagraphBlock {
            rich_text: Vec::new(),
            color: BlockColor::Default,
        });
    }

    Block::Image(ImageBlock::External {
        external: ExternalFile {
            url: image.url.clone(),
        },
    })
}

fn has_supported_extension(url: &str) -> bool {
    let url = url.to_lowercase();
    SUPPORTED_IMAGE_EXTENSIONS
        .iter()
        .any(|extension| url.ends_with(extension))
}
