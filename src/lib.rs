//! gxdoc: documentation extraction for GeneXus export packages.
//!
//! Reads procedure signatures and `/** ... */` annotation comments from a
//! `.xpz` export and reconciles them into one documentation record per
//! object:
//!
//! - [`signature`] resolves the parameter list (`parm` rule → `IsParm`
//!   variables → empty)
//! - [`parser::annotation`] reads the human-written annotation block
//! - [`assemble`] merges both with variable metadata
//! - [`render`] turns the result into Markdown or JSON

pub mod assemble;
pub mod error;
pub mod kinds;
pub mod logging;
pub mod model;
pub mod parser;
pub mod render;
pub mod signature;
pub mod variables;
pub mod xml;
pub mod xpz;

pub use error::{ExtractError, Result};
pub use model::Extraction;

use kinds::{KindRegistry, PartKinds};

/// Extraction settings shared by every input of a run.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub parts: PartKinds,
    pub kinds: KindRegistry,
}
