//! Plain text: one name per line.

use crate::namelist::NameList;
use crate::render::Renderer;

pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, list: &NameList) -> String {
        let mut out = String::new();
        for name in list {
            out.push_str(name);
            out.push('\n');
        }
        out
    }

    fn file_extension(&self) -> &str {
        "txt"
    }
}
