//! Index (table of contents) pages.

use lopdf::content::Operation;

use crate::config::ROWS_PER_INDEX_PAGE;
use crate::plan::IndexEntry;
use crate::render::text::truncate_display_name;
use crate::render::{
    FONT_BOLD, FONT_REGULAR, PAGE_HEIGHT, PAGE_WIDTH, RenderError, RenderedPage, black_fill,
    show_text, text_width,
};

/// Heading printed at the top of every index page.
pub const INDEX_TITLE: &str = "TABLE OF CONTENTS";

const MARGIN_X: f32 = 70.0;
const HEADING_SIZE: f32 = 16.0;
const HEADING_OFFSET: f32 = 60.0;
const ROW_SIZE: f32 = 11.0;
const FIRST_ROW_OFFSET: f32 = 100.0;
const ROW_LEADING: f32 = 20.0;

/// Renders the table of contents.
pub struct IndexPageBuilder;

impl IndexPageBuilder {
    /// Render `entries` as consecutive pages of at most 30 rows.
    ///
    /// Either every page renders or none is returned.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if any page fails to render.
    pub fn build(entries: &[IndexEntry]) -> Result<Vec<RenderedPage>, RenderError> {
        let total = entries.len().div_ceil(ROWS_PER_INDEX_PAGE);

        entries
            .chunks(ROWS_PER_INDEX_PAGE)
            .enumerate()
            .map(|(idx, rows)| Self::build_page(rows, idx + 1, total))
            .collect()
    }

    /// Heading text for page `number` of `total`.
    pub fn heading(number: usize, total: usize) -> String {
        format!("{INDEX_TITLE} (Page {number}/{total})")
    }

    fn build_page(
        rows: &[IndexEntry],
        number: usize,
        total: usize,
    ) -> Result<RenderedPage, RenderError> {
        let mut operations: Vec<Operation> = vec![black_fill()];

        operations.extend(show_text(
            FONT_BOLD,
            HEADING_SIZE,
            MARGIN_X,
            PAGE_HEIGHT - HEADING_OFFSET,
            &Self::heading(number, total),
        ));

        let mut y = PAGE_HEIGHT - FIRST_ROW_OFFSET;
        for row in rows {
            let name = truncate_display_name(&row.display_name);
            let page = row.start_page.to_string();
            let page_x = PAGE_WIDTH - MARGIN_X - text_width(&page, ROW_SIZE);

            operations.extend(show_text(FONT_REGULAR, ROW_SIZE, MARGIN_X, y, &name));
            operations.extend(show_text(FONT_REGULAR, ROW_SIZE, page_x, y, &page));

            y -= ROW_LEADING;
        }

        RenderedPage::from_operations(operations)
    }
}
