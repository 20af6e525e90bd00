//! Report formatting utilities for terminal output
//!
//! Text helpers shared by the report renderers: section headers, bars for
//! the collection chart, and a tabled wrapper for row tables.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

/// Render rows as a rounded table, right-aligning the given column indexes
pub fn render_table<T, I>(rows: I, numeric_columns: &[usize]) -> String
where
    T: Tabled,
    I: IntoIterator<Item = T>,
{
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    for &col in numeric_columns {
        if col < T::LENGTH {
            table.with(Modify::new(Columns::single(col)).with(Alignment::right()));
        }
    }
    table.to_string()
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a section heading followed by an underline of the same width
pub fn section_header(title: &str) -> String {
    format!("{}\n{}\n", title, separator(title.chars().count()))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Amount")]
        amount: String,
    }

    #[test]
    fn test_render_table() {
        let rows = vec![
            Row {
                name: "Asha".into(),
                amount: "100.00".into(),
            },
            Row {
                name: "Ravi".into(),
                amount: "5.00".into(),
            },
        ];
        let out = render_table(rows, &[1]);
        assert!(out.contains("Name"));
        assert!(out.contains("Amount"));
        assert!(out.contains("Asha"));
        assert!(out.contains("  5.00"));
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(bar.chars().count(), 10);
        assert_eq!(format_bar(0.0, 100.0, 4), "    ");
    }

    #[test]
    fn test_section_header() {
        assert_eq!(section_header("Trend"), "Trend\n─────\n");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Lakshmi Narayanan", 3), "...");
        assert_eq!(truncate("₹₹₹₹₹₹", 5), "₹₹...");
    }
}
