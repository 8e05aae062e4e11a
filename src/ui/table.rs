//! Aligned text tables for status output.

use console::measure_text_width;

/// A table of left-aligned columns with a header rule.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Missing cells render empty; extra cells are dropped.
    pub fn push_row<S: AsRef<str>>(&mut self, cells: &[S]) {
        let row = (0..self.headers.len())
            .map(|i| cells.get(i).map(|c| c.as_ref().to_string()).unwrap_or_default())
            .collect();
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .map(|row| measure_text_width(&row[i]))
                    .chain(std::iter::once(measure_text_width(header)))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Render with two spaces between columns and no trailing whitespace.
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let render_line = |cells: &[String]| {
            let line: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| {
                    let pad = width.saturating_sub(measure_text_width(cell));
                    format!("{}{}", cell, " ".repeat(pad))
                })
                .collect();
            line.join("  ").trim_end().to_string()
        };

        let mut lines = vec![render_line(&self.headers)];
        let rule_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        lines.push("─".repeat(rule_width));
        lines.extend(self.rows.iter().map(|row| render_line(row)));
        lines.join("\n")
    }
}
