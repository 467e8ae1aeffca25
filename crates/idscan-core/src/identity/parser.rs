//! Labeled field parser for identity documents.

use tracing::debug;

use crate::models::identity::{IdentityField, IdentityRecord};

use super::labels::find_label_line;

/// Result of identity field extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Extracted record; always carries all eight fields.
    pub record: IdentityRecord,
    /// Fields whose label did not appear on any line.
    pub missing: Vec<IdentityField>,
}

/// Trait for identity text parsing.
pub trait IdentityParser {
    /// Parse identity fields from recognized text.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Parser that reads `Label: value` lines.
///
/// For every field the first line containing its label (any case, anywhere
/// in the line) wins, and the value is whatever follows the line's first
/// colon. A line like `Note: Last Name: Smith` therefore yields
/// `Last Name: Smith` for the last name.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelParser;

impl LabelParser {
    pub fn new() -> Self {
        Self
    }
}

impl IdentityParser for LabelParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let lines = split_lines(text);
        let mut record = IdentityRecord::default();
        let mut missing = Vec::new();

        for field in IdentityField::ALL {
            match find_label_line(&lines, field) {
                Some(line) => *record.slot_mut(field) = value_after_colon(line),
                None => missing.push(field),
            }
        }

        if !missing.is_empty() {
            debug!(
                "Labels not found: {}",
                missing.iter().map(|f| f.label()).collect::<Vec<_>>().join(", ")
            );
        }

        ExtractionResult { record, missing }
    }
}

/// Parse an identity record from recognized text.
pub fn parse_identity(text: &str) -> IdentityRecord {
    LabelParser.parse(text).record
}

/// Extract one field from pre-split lines; empty when the label is absent.
pub fn extract_field(lines: &[&str], field: IdentityField) -> String {
    find_label_line(lines, field)
        .map(value_after_colon)
        .unwrap_or_default()
}

/// Split on line feeds only, keeping empty lines.
fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

// Splits at the first colon of the line, not at the label's own colon.
fn value_after_colon(line: &str) -> String {
    line.split_once(':')
        .map(|(_, value)| value.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "REPUBLIC IDENTITY CARD\n\
        First Name: Jane\n\
        Last Name: Doe\n\
        ID Number: 123-456-789\n\
        Birth Date: 01.02.1990\n\
        Sex: F\n\
        Address: Main Street\n\
        Address Number: 42\n\
        Postal Code: 00-950\n";

    #[test]
    fn test_parse_full_card() {
        let result = LabelParser::new().parse(SAMPLE);

        assert_eq!(
            result.record,
            IdentityRecord {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                id_number: "123-456-789".to_string(),
                birth_date: "01.02.1990".to_string(),
                sex: "F".to_string(),
                address_street: "Main Street".to_string(),
                address_number: "42".to_string(),
                postal_code: "00-950".to_string(),
            }
        );
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_empty_text_gives_total_empty_record() {
        let result = LabelParser::new().parse("");
        assert_eq!(result.record, IdentityRecord::default());
        assert_eq!(result.missing, IdentityField::ALL.to_vec());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "first name: Ann\nSEX: M\nnoise";
        assert_eq!(parse_identity(text), parse_identity(text));
    }

    #[test]
    fn test_label_case_insensitive() {
        let record = parse_identity("SEX: F");
        assert_eq!(record.sex, "F");
    }

    #[test]
    fn test_first_match_wins() {
        let record = parse_identity("First Name: Alice\nFirst Name: Bob");
        assert_eq!(record.first_name, "Alice");
    }

    #[test]
    fn test_missing_postal_code_is_empty() {
        let result = LabelParser::new().parse("First Name: Alice\nSex: F");
        assert_eq!(result.record.postal_code, "");
        assert!(result.missing.contains(&IdentityField::PostalCode));
        assert!(!result.missing.contains(&IdentityField::Sex));
    }

    #[test]
    fn test_id_number_keeps_dashes() {
        let lines = ["ID Number: 123-456-789"];
        assert_eq!(extract_field(&lines, IdentityField::IdNumber), "123-456-789");
    }

    #[test]
    fn test_splits_at_first_colon_of_line() {
        let lines = ["Note: Last Name: Smith"];
        assert_eq!(extract_field(&lines, IdentityField::LastName), "Last Name: Smith");
    }

    #[test]
    fn test_value_with_colon_is_kept_whole() {
        let record = parse_identity("Birth Date: 1990:02:01");
        assert_eq!(record.birth_date, "1990:02:01");
    }

    #[test]
    fn test_label_anywhere_in_line() {
        let record = parse_identity("   >> Postal Code:   12345   ");
        assert_eq!(record.postal_code, "12345");
    }

    #[test]
    fn test_address_and_address_number_are_distinct() {
        let record = parse_identity("Address Number: 12\nAddress: Elm Road");
        assert_eq!(record.address_street, "Elm Road");
        assert_eq!(record.address_number, "12");
    }

    #[test]
    fn test_empty_lines_and_crlf() {
        let record = parse_identity("\r\n\r\nFirst Name: Jane\r\n\r\nSex: F\r\n");
        assert_eq!(record.first_name, "Jane");
        assert_eq!(record.sex, "F");
    }

    #[test]
    fn test_label_with_empty_value() {
        let result = LabelParser::new().parse("Sex:");
        assert_eq!(result.record.sex, "");
        assert!(!result.missing.contains(&IdentityField::Sex));
    }

    #[test]
    fn test_split_lines_keeps_empty() {
        assert_eq!(split_lines("a\n\nb\n"), vec!["a", "", "b", ""]);
    }
}
