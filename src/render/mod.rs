//! Renderer module: trait-based format dispatch.

pub mod json;
pub mod markdown;

use crate::model::Extraction;
use anyhow::{anyhow, Result};

/// One generated file, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub name: String,
    pub contents: String,
}

/// Trait for rendering an extraction into a specific output format.
pub trait Renderer {
    fn render(&self, extraction: &Extraction) -> Vec<OutputFile>;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use markdown or json", format)),
    }
}

/// Make a name safe to use as a file name. Empty names become `root`.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        "root".to_string()
    } else {
        cleaned.to_string()
    }
}
