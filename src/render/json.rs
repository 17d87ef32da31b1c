//! JSON name lists for tooling.

use crate::namelist::NameList;
use crate::render::Renderer;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, list: &NameList) -> String {
        let mut out = String::new();
        out.push_str("{\n");
        out.push_str("  \"names\": [");
        if list.is_empty() {
            out.push_str("]\n");
        } else {
            out.push('\n');
            for (i, name) in list.iter().enumerate() {
                let comma = if i < list.len() - 1 { "," } else { "" };
                out.push_str(&format!("    \"{}\"{}", json_escape(name), comma));
                out.push('\n');
            }
            out.push_str("  ]\n");
        }
        out.push_str("}\n");
        out
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

fn json_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}
