//! Name-list serializers: trait-based format dispatch.

pub mod csv;
pub mod json;
pub mod text;

use crate::error::InputError;
use crate::namelist::NameList;

/// Trait for serializing a name list into a specific file format.
pub trait Renderer {
    fn render(&self, list: &NameList) -> String;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>, InputError> {
    match format {
        "txt" | "text" => Ok(Box::new(text::TextRenderer)),
        "csv" => Ok(Box::new(csv::CsvRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(InputError::UnknownFormat(format.to_string())),
    }
}

/// Renderers for a comma-separated format list such as `txt,csv`.
pub fn create_renderers(formats: &str) -> Result<Vec<Box<dyn Renderer>>, InputError> {
    formats
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(create_renderer)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_list() {
        let renderers = create_renderers("txt, csv,json").unwrap();
        let exts: Vec<&str> = renderers.iter().map(|r| r.file_extension()).collect();
        assert_eq!(exts, ["txt", "csv", "json"]);
    }

    #[test]
    fn unknown_format() {
        assert!(matches!(
            create_renderers("txt,xml"),
            Err(InputError::UnknownFormat(f)) if f == "xml"
        ));
    }
}
