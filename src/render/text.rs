//! Plain text outline of a document.

use std::fmt::Write;

use super::visitor::{walk, DefaultVisitor, DocumentVisitor, VisitorAction};
use crate::model::ContentDocument;

/// Render a plain-text outline: the template and grid, then one entry per
/// area with a summary of the block it holds.
pub fn to_text(doc: &ContentDocument) -> String {
    to_text_with_visitor(doc, &mut DefaultVisitor)
}

/// Render the outline, letting `visitor` replace or skip block entries.
pub fn to_text_with_visitor<V: DocumentVisitor + ?Sized>(
    doc: &ContentDocument,
    visitor: &mut V,
) -> String {
    let layout = doc.layout();
    let mut output = format!(
        "{} ({} x {}, {} area{})\n",
        doc.template(),
        layout.columns,
        layout.rows,
        layout.len(),
        if layout.len() == 1 { "" } else { "s" }
    );

    walk(doc, visitor, |area, block, action| {
        let line = match action {
            VisitorAction::Skip => return,
            VisitorAction::Replace(replacement) => replacement,
            VisitorAction::Continue => format!("{}: {}", block.block_type(), block.summary()),
        };
        let _ = writeln!(
            output,
            "\n[{}] column {}, row {}\n  {}",
            area.id, area.grid_column, area.grid_row, line
        );
    });

    output.trim_end().to_string()
}
