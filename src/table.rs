//! Aligning rows of cells into columns.

use textwrap::core::display_width;

/// Spaces between columns.
const GUTTER: usize = 1;

/// Lay out `rows` of cells as whitespace-aligned columns.
///
/// Every column is as wide as its widest cell plus a one-space gutter. The last cell in each row
/// isn't padded, unlike tab-stop alignment which pads every cell, so no line has trailing spaces.
/// Each row ends with a newline.
pub fn align_columns(rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = Vec::new();
    for row in rows {
        for (column, cell) in row.iter().enumerate() {
            let width = display_width(cell);
            match widths.get_mut(column) {
                Some(max) => *max = (*max).max(width),
                None => widths.push(width),
            }
        }
    }

    let mut grid = String::new();
    for row in rows {
        let mut cells = row.iter().zip(&widths).peekable();
        while let Some((cell, width)) = cells.next() {
            grid.push_str(cell);
            if cells.peek().is_some() {
                let padding = width - display_width(cell) + GUTTER;
                grid.extend(std::iter::repeat(' ').take(padding));
            }
        }
        grid.push('\n');
    }
    grid
}
