//! Display formatting for terminal output

pub mod report;

pub use report::{double_separator, format_bar, render_table, section_header, separator, truncate};
