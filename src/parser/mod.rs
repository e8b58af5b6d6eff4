//! Text parsers: pure functions over source strings.

pub mod annotation;
pub mod parm;
pub mod types;

pub use types::clean_type;
