//! Titled tables for command output

use console::style;
use prettytable::format::{Alignment, consts::FORMAT_NO_LINESEP_WITH_TITLE};
use prettytable::{Cell, Row, Table};

/// A table of `N` columns printed under a bold heading
///
/// Columns marked numeric are right-aligned.
pub struct Listing<const N: usize> {
    title: &'static str,
    numeric: [bool; N],
    table: Table,
}

impl<const N: usize> Listing<N> {
    /// Create a listing; a header starting with `#` marks a numeric column
    pub fn new(title: &'static str, headers: [&str; N]) -> Self {
        let numeric = headers.map(|h| h.starts_with('#'));

        let mut table = Table::new();
        table.set_format(*FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(Row::new(
            headers
                .iter()
                .map(|h| Cell::new(h.trim_start_matches('#')).style_spec("b"))
                .collect(),
        ));

        Self {
            title,
            numeric,
            table,
        }
    }

    /// Append a row
    pub fn push(&mut self, cells: [String; N]) {
        let row = cells
            .iter()
            .zip(self.numeric)
            .map(|(text, numeric)| {
                let align = if numeric {
                    Alignment::RIGHT
                } else {
                    Alignment::LEFT
                };
                Cell::new_align(text, align)
            })
            .collect();
        self.table.add_row(Row::new(row));
    }

    /// Number of rows pushed so far
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether no rows were pushed
    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// Print the heading and table; empty listings print nothing
    pub fn print(&self) {
        if self.is_empty() {
            return;
        }
        println!();
        println!("{}", style(self.title).bold());
        self.table.printstd();
    }
}
