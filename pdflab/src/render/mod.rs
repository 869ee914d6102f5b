//! Generated pages.
//!
//! pdflab draws two kinds of pages itself: index (table of contents) pages
//! and separator (title) pages. Both are plain A4 pages set in the base-14
//! Courier faces, so no font program is embedded and text widths follow
//! directly from the character count.
//!
//! Builders are pure functions from their input to [`RenderedPage`]s and
//! report problems as [`RenderError`]; whether a failure aborts the job is
//! decided by the assembler.

pub mod index;
pub mod separator;
pub mod text;

pub use index::IndexPageBuilder;
pub use separator::SeparatorPageBuilder;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Object, dictionary};

/// A4 width in points.
pub const PAGE_WIDTH: f32 = 595.28;

/// A4 height in points.
pub const PAGE_HEIGHT: f32 = 841.89;

/// Resource name of the regular Courier face.
pub const FONT_REGULAR: &str = "F1";

/// Resource name of the bold Courier face.
pub const FONT_BOLD: &str = "F2";

/// Advance width of every Courier glyph, in text space units per point.
const COURIER_ADVANCE: f32 = 0.6;

/// Errors raised while drawing a generated page.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The title wraps to more lines than fit on one page.
    #[error("title wraps to {lines} lines, more than fit on one page")]
    TitleOverflow {
        /// Number of wrapped lines.
        lines: usize,
    },

    /// The content stream could not be encoded.
    #[error("failed to encode page content: {0}")]
    Content(String),
}

/// A drawn page, ready to be added to an output document.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    /// Encoded content stream.
    pub content: Vec<u8>,
}

impl RenderedPage {
    fn from_operations(operations: Vec<Operation>) -> Result<Self, RenderError> {
        let content = Content { operations }
            .encode()
            .map_err(|e| RenderError::Content(e.to_string()))?;

        Ok(Self { content })
    }

    /// The strings shown on this page, in drawing order.
    pub fn text(&self) -> Vec<String> {
        let Ok(content) = Content::decode(&self.content) else {
            return Vec::new();
        };

        content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(text::decode_win_ansi(bytes)),
                _ => None,
            })
            .collect()
    }

    /// The page's `MediaBox`.
    pub fn media_box() -> Vec<Object> {
        vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()]
    }
}

/// Font resources shared by every generated page.
pub fn font_resources() -> Dictionary {
    dictionary! {
        "Font" => dictionary! {
            FONT_REGULAR => courier("Courier"),
            FONT_BOLD => courier("Courier-Bold"),
        },
    }
}

fn courier(base_font: &str) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Width of `text` set in Courier at `size` points.
pub fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * COURIER_ADVANCE * size
}

/// Operations drawing `text` with its baseline starting at `(x, y)`.
fn show_text(font: &str, size: f32, x: f32, y: f32, text: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![font.into(), size.into()]),
        Operation::new("Td", vec![x.into(), y.into()]),
        Operation::new(
            "Tj",
            vec![Object::string_literal(text::encode_win_ansi(text))],
        ),
        Operation::new("ET", vec![]),
    ]
}

/// Operations filling text in black.
fn black_fill() -> Operation {
    Operation::new("g", vec![0.into()])
}
