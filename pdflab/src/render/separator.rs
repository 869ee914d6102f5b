//! Separator (title) pages.

use lopdf::content::Operation;

use crate::render::text::wrap;
use crate::render::{
    FONT_BOLD, PAGE_HEIGHT, PAGE_WIDTH, RenderError, RenderedPage, black_fill, show_text,
    text_width,
};

/// Maximum characters per title line.
pub const TITLE_WRAP_WIDTH: usize = 45;

/// Most title lines a separator can hold with the rule still on the page.
pub const MAX_TITLE_LINES: usize = 30;

const TITLE_SIZE: f32 = 18.0;
const TITLE_LEADING: f32 = 25.0;
const RULE_GAP: f32 = 10.0;
const RULE_INSET: f32 = 150.0;
const RULE_WIDTH: f32 = 0.5;

/// Renders the title page placed before a document.
pub struct SeparatorPageBuilder;

impl SeparatorPageBuilder {
    /// Render a page with `title` upper-cased, wrapped and centred, and a
    /// rule beneath it.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::TitleOverflow`] when the wrapped title would
    /// run off the page.
    pub fn build(title: &str) -> Result<RenderedPage, RenderError> {
        let lines: Vec<String> = wrap(title, TITLE_WRAP_WIDTH)
            .iter()
            .map(|line| line.to_uppercase())
            .collect();

        if lines.len() > MAX_TITLE_LINES {
            return Err(RenderError::TitleOverflow { lines: lines.len() });
        }

        let block_height = lines.len() as f32 * TITLE_LEADING;
        let top = PAGE_HEIGHT / 2.0 + block_height / 2.0;

        let mut operations: Vec<Operation> = vec![black_fill()];

        for (i, line) in lines.iter().enumerate() {
            let x = (PAGE_WIDTH - text_width(line, TITLE_SIZE)) / 2.0;
            let y = top - i as f32 * TITLE_LEADING;
            operations.extend(show_text(FONT_BOLD, TITLE_SIZE, x, y, line));
        }

        let rule_y = top - block_height - RULE_GAP;
        operations.extend([
            Operation::new("w", vec![RULE_WIDTH.into()]),
            Operation::new("m", vec![RULE_INSET.into(), rule_y.into()]),
            Operation::new("l", vec![(PAGE_WIDTH - RULE_INSET).into(), rule_y.into()]),
            Operation::new("S", vec![]),
        ]);

        RenderedPage::from_operations(operations)
    }
}
