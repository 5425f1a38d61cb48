//! Minimal column-aligned text table.

/// A plain-text table with a fixed set of columns.
///
/// Widths are measured while rows are added and applied in one rendering
/// pass at the end: every column is as wide as its widest cell or header.
/// Cells are left-aligned and padded with spaces; a single space separates
/// columns, and the last column is never padded so lines carry no trailing
/// whitespace.
#[derive(Debug, Clone)]
pub struct TextTable {
    headers: Vec<String>,
    widths: Vec<usize>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    /// Creates a table whose column count is fixed by the header names.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let widths = headers.iter().map(|h| h.chars().count()).collect();
        Self {
            headers,
            widths,
            rows: Vec::new(),
        }
    }

    /// Appends a row.
    ///
    /// # Panics
    ///
    /// Panics when the cell count does not match the column count. A
    /// mismatched row is a defect in the code building the table, not a
    /// data condition, so it is not recoverable.
    pub fn add_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells: Vec<String> = cells.into_iter().map(Into::into).collect();
        assert_eq!(
            cells.len(),
            self.headers.len(),
            "table row has {} cells, expected {}",
            cells.len(),
            self.headers.len(),
        );
        for (width, cell) in self.widths.iter_mut().zip(&cells) {
            *width = (*width).max(cell.chars().count());
        }
        self.rows.push(cells);
    }

    /// Renders the header and all rows, newline-separated.
    ///
    /// An empty table renders its header line only.
    #[must_use]
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(self.render_line(&self.headers));
        for row in &self.rows {
            lines.push(self.render_line(row));
        }
        lines.join("\n")
    }

    fn render_line(&self, cells: &[String]) -> String {
        let mut line = String::new();
        let last = cells.len().saturating_sub(1);
        for (i, (cell, width)) in cells.iter().zip(&self.widths).enumerate() {
            if i == last {
                line.push_str(cell);
            } else {
                let width = *width;
                line.push_str(&format!("{cell:<width$} "));
            }
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_align_to_widest_cell() {
        let mut table = TextTable::new(["Time", "Task"]);
        table.add_row(["3.00 s", ":app:compileMain"]);
        table.add_row(["1.00 s", ":b"]);

        let expected = concat!(
            "Time   Task\n",
            "3.00 s :app:compileMain\n",
            "1.00 s :b"
        );
        assert_eq!(table.render(), expected);
    }

    #[test]
    fn header_sets_minimum_width() {
        let mut table = TextTable::new(["% of instrumented time", "Task"]);
        table.add_row(["75.0%", ":a"]);

        let expected = concat!(
            "% of instrumented time Task\n",
            "75.0%                  :a"
        );
        assert_eq!(table.render(), expected);
    }

    #[test]
    fn empty_table_renders_header_only() {
        let table = TextTable::new(["Time", "Task"]);
        assert_eq!(table.render(), "Time Task");
    }

    #[test]
    fn last_column_is_not_padded() {
        let mut table = TextTable::new(["A", "B"]);
        table.add_row(["x", "y"]);

        for line in table.render().lines() {
            assert_eq!(line, line.trim_end(), "no trailing whitespace: {line:?}");
        }
    }

    #[test]
    #[should_panic(expected = "table row has 1 cells, expected 2")]
    fn wrong_cell_count_panics() {
        let mut table = TextTable::new(["Time", "Task"]);
        table.add_row([":only-one"]);
    }
}
