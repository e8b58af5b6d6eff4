//! JSON renderer: structured output for tooling integration.
//!
//! Serializes the whole extraction (objects, signatures, documentation and
//! advisories) into a single file.

use crate::model::Extraction;
use crate::render::{sanitize_file_name, OutputFile, Renderer};

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, extraction: &Extraction) -> Vec<OutputFile> {
        let name = if extraction.kb_name.is_empty() {
            "extraction".to_string()
        } else {
            sanitize_file_name(&extraction.kb_name)
        };
        // Plain data with string keys; serialization cannot fail
        let mut contents = serde_json::to_string_pretty(extraction).unwrap_or_default();
        contents.push('\n');
        vec![OutputFile {
            name: format!("{}.json", name),
            contents,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;

    #[test]
    fn renders_single_file() {
        let extraction = Extraction {
            kb_name: "Sales".to_string(),
            objects: vec![ResolvedObject {
                name: "GetUser".to_string(),
                kind: ObjectKind {
                    label: "Procedure".to_string(),
                    carries_source: true,
                    container: false,
                },
                path: "GetUser".to_string(),
                source_text: String::new(),
                signature: Signature::empty("GetUser", ExtractionMode::None),
                xml_description: String::new(),
                documentation: None,
            }],
            advisories: Vec::new(),
        };

        let files = JsonRenderer.render(&extraction);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "Sales.json");

        let value: serde_json::Value = serde_json::from_str(&files[0].contents).unwrap();
        assert_eq!(value["kb_name"], "Sales");
        assert_eq!(value["objects"][0]["kind"]["label"], "Procedure");
        assert_eq!(value["objects"][0]["signature"]["mode"], "None");
        assert_eq!(
            value["objects"][0]["signature"]["raw_signature"],
            "GetUser();"
        );
    }

    #[test]
    fn unnamed_kb() {
        let files = JsonRenderer.render(&Extraction::default());
        assert_eq!(files[0].name, "extraction.json");
    }
}
