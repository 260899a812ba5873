//! Text renderings of recognition results, for debugging and demos.
//!
//! Nothing here is needed to obtain a verdict.

use colored::*;

use crate::cyk::{Cell, CykTable};
use crate::regular::RegularRun;
use crate::symbol::Symbol;

fn cell_text(cell: &Cell<'_>) -> String {
    cell.iter().map(|s| s.token()).collect()
}

/// One line per start position, cells separated by tabs.
impl std::fmt::Display for CykTable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let cells: Vec<String> = row.iter().map(cell_text).collect();
            writeln!(f, "{}", cells.join("\t"))?;
        }
        Ok(())
    }
}

/// Like the plain rendering, with cells holding `highlight` in bold green
/// and empty cells dimmed.
pub fn colorize(table: &CykTable<'_>, highlight: Option<&Symbol>) -> String {
    let mut out = String::new();
    for row in table.rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| {
                let text = cell_text(cell);
                if cell.is_empty() {
                    "-".dimmed().to_string()
                } else if highlight.is_some_and(|h| cell.contains(h)) {
                    text.green().bold().to_string()
                } else {
                    text.normal().to_string()
                }
            })
            .collect();
        out += &cells.join("\t");
        out.push('\n');
    }
    out
}

/// One line per position: the grapheme, then the nonterminals deriving the
/// suffix that starts there.
impl std::fmt::Display for RegularRun<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (pos, token) in self.tokens.iter().enumerate() {
            let derivable = self
                .frontiers
                .get(pos)
                .map(|set| {
                    set.iter()
                        .map(|s| s.token())
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .unwrap_or_default();
            writeln!(f, "{}\t{}\t{{{}}}", pos, token, derivable)?;
        }
        write!(f, "accepted: {}", self.accepted)
    }
}
