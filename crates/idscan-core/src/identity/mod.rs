//! Identity document field extraction.

pub mod labels;
mod parser;

pub use parser::{extract_field, parse_identity, ExtractionResult, IdentityParser, LabelParser};
