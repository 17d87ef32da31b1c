//! Single-column CSV with a `name` header.

use crate::namelist::NameList;
use crate::render::Renderer;

pub struct CsvRenderer;

impl Renderer for CsvRenderer {
    fn render(&self, list: &NameList) -> String {
        let mut out = String::from("name\n");
        for name in list {
            out.push_str(&csv_field(name));
            out.push('\n');
        }
        out
    }

    fn file_extension(&self) -> &str {
        "csv"
    }
}

/// Quote a field only when it would otherwise break the row.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_rows() {
        let list = NameList::from_text("ADD\nvadd.vv\n");
        assert_eq!(CsvRenderer.render(&list), "name\nADD\nvadd.vv\n");
    }

    #[test]
    fn quotes_commas() {
        assert_eq!(csv_field("ADD, and more"), "\"ADD, and more\"");
        assert_eq!(csv_field("A\"B"), "\"A\"\"B\"");
        assert_eq!(csv_field("BLX (immediate)"), "BLX (immediate)");
    }
}
