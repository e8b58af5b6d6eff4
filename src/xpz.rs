//! Export reader: `.xpz` packages and raw `.xml` export documents.
//!
//! An `.xpz` is a zip archive; every `.xml` entry inside it is one input
//! unit. A unit that cannot be decoded is reported as an advisory and the
//! remaining units are still read. Entries are read in memory.

use crate::assemble::{Assembler, RawObject};
use crate::error::{ExtractError, Result};
use crate::model::Extraction;
use crate::xml::{self, XmlDocument};
use crate::Config;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

/// Extract an `.xpz` package or a single `.xml` export document.
pub fn extract_path(path: &Path, config: &Config) -> Result<Extraction> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("xpz") => extract_archive(path, config),
        Some("xml") => {
            let text = fs::read_to_string(path).map_err(|source| ExtractError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            extract_document(&text, &path.display().to_string(), config)
        }
        _ => Err(ExtractError::UnsupportedInput(path.to_path_buf())),
    }
}

/// Extract every `.xml` entry of an export package.
pub fn extract_archive(path: &Path, config: &Config) -> Result<Extraction> {
    let archive_error = |source| ExtractError::Archive {
        path: path.to_path_buf(),
        source,
    };

    tracing::info!("opening export package {}", path.display());
    let file = File::open(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(archive_error)?;

    let mut assembler = Assembler::new(config);
    let mut kb_name = String::new();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(archive_error)?;
        let unit = entry.name().to_string();
        if entry.is_dir() || !unit.to_ascii_lowercase().ends_with(".xml") {
            continue;
        }

        let mut text = String::new();
        if let Err(e) = entry.read_to_string(&mut text) {
            assembler.advise(&unit, format!("failed to read entry: {}", e));
            continue;
        }

        match read_unit(&text, &unit, &mut assembler) {
            Ok(unit_kb) => {
                if kb_name.is_empty() {
                    kb_name = unit_kb;
                }
            }
            Err(e) => assembler.advise(&unit, e.to_string()),
        }
    }

    tracing::info!(
        "extracted {} objects from {}",
        assembler.object_count(),
        path.display()
    );
    Ok(assembler.finish(kb_name))
}

/// Extract one export document. A document that cannot be decoded fails.
pub fn extract_document(text: &str, unit: &str, config: &Config) -> Result<Extraction> {
    let mut assembler = Assembler::new(config);
    let kb_name = read_unit(text, unit, &mut assembler)?;
    Ok(assembler.finish(kb_name))
}

/// Feed the objects of one export document to `assembler`; returns the KB name.
fn read_unit(text: &str, unit: &str, assembler: &mut Assembler<'_>) -> Result<String> {
    let doc = XmlDocument::parse(text).map_err(|message| ExtractError::Malformed {
        unit: unit.to_string(),
        message,
    })?;
    let root = doc.root();

    let kb_name = xml::find_first(root, "/*/Source/Version")?
        .and_then(|version| xml::attr(version, "name"))
        .unwrap_or_default();

    let before = assembler.object_count();
    for node in xml::find_all(root, "/*/Objects/Object")? {
        assembler.add(RawObject {
            node,
            name: xml::attr(node, "name").unwrap_or_default(),
            kind: xml::attr(node, "type").unwrap_or_default(),
            description: xml::attr(node, "description").unwrap_or_default(),
        });
    }
    tracing::info!(
        "found {} objects in {}",
        assembler.object_count() - before,
        unit
    );

    Ok(kb_name)
}
