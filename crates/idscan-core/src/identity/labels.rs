//! Case-insensitive label lookup for identity document fields.
//!
//! Both the line and the label go through `str::to_lowercase`, so only
//! characters that lowercase to the same text match. Case-folding variants
//! such as the long s (`ſ`) do not match `s`.

use crate::models::identity::IdentityField;

/// True when the line contains the field's label, in any case, anywhere.
pub fn contains_label(line: &str, field: IdentityField) -> bool {
    line.to_lowercase().contains(&field.label().to_lowercase())
}

/// First line containing the field's label.
pub fn find_label_line<'a>(lines: &[&'a str], field: IdentityField) -> Option<&'a str> {
    let label = field.label().to_lowercase();
    lines
        .iter()
        .copied()
        .find(|line| line.to_lowercase().contains(&label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_match_any_case() {
        assert!(contains_label("SEX: F", IdentityField::Sex));
        assert!(contains_label("first name: jane", IdentityField::FirstName));
        assert!(contains_label("Id NuMbEr: 1", IdentityField::IdNumber));
    }

    #[test]
    fn test_labels_are_literal() {
        // The trailing colon is part of the label.
        assert!(!contains_label("Sex F", IdentityField::Sex));
        assert!(!contains_label("Address Number: 12", IdentityField::AddressStreet));
    }

    #[test]
    fn test_label_not_anchored() {
        assert!(contains_label(
            "City: Springfield  Postal Code: 12345",
            IdentityField::PostalCode
        ));
    }

    #[test]
    fn test_case_folding_variants_do_not_match() {
        // U+017F lowercases to itself, not to 's'.
        assert!(!contains_label("\u{17F}ex: F", IdentityField::Sex));
    }

    #[test]
    fn test_find_label_line_first_match() {
        let lines = ["noise", "SEX: M", "Sex: F"];
        assert_eq!(find_label_line(&lines, IdentityField::Sex), Some("SEX: M"));
        assert_eq!(find_label_line(&lines, IdentityField::PostalCode), None);
    }
}
