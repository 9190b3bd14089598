//! Table rendering utilities for CLI outputs.

use regex::Regex;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

static ANSI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("ansi pattern is valid"));

/// Display width ignoring colour escapes.
pub fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(ANSI.replace_all(s, "").as_ref())
}

pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| visible_width(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(visible_width(cell));
            }
        }
        widths
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        let push_row = |out: &mut String, cells: &[String]| {
            let mut line = String::new();
            for (i, w) in widths.iter().enumerate() {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                line.push_str(cell);
                line.push_str(&" ".repeat(w.saturating_sub(visible_width(cell)) + 2));
            }
            out.push_str(line.trim_end());
            out.push('\n');
        };

        push_row(&mut out, &self.headers);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_row(&mut out, &rule);

        for row in &self.rows {
            push_row(&mut out, row);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_align_ignoring_colours() {
        let mut t = Table::new(&["id", "status"]);
        t.add_row(vec!["a1".into(), "\x1b[32mActive\x1b[0m".into()]);
        t.add_row(vec!["b22".into(), "Inactive".into()]);

        let out = t.render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "id   status");
        assert_eq!(lines[1], "---  --------");
        assert!(lines[3].starts_with("b22  Inactive"));
    }
}
