use crate::table::{normalize, ReferenceTable, SymptomToken};

/// Extract known symptom tokens from free-text input.
///
/// Matching policy: a vocabulary token matches when its normalized form
/// appears as a substring of the normalized input. This is deliberately not
/// word-boundary aware ("ache" matches "stomachache"); the imprecision is
/// part of the observable contract, not a bug to fix.
///
/// The result is always a subset of the vocabulary, in sorted token order.
/// An empty result is a normal outcome, never an error.
pub fn extract(text: &str, table: &ReferenceTable) -> Vec<SymptomToken> {
    let haystack = normalize(text);
    if haystack.is_empty() {
        return Vec::new();
    }
    table
        .vocabulary()
        .filter(|token| haystack.contains(token.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_table() -> ReferenceTable {
        let mut table = ReferenceTable::new();
        let id = table.intern("Fungal infection");
        table.add_association(id, "itching");
        table.add_association(id, "skin rash");
        table.add_symptom("ache");
        table
    }

    #[test]
    fn matches_are_case_insensitive() {
        let table = tiny_table();
        assert_eq!(extract("ITCHING all over", &table), vec!["itching"]);
    }

    #[test]
    fn substring_policy_has_no_word_boundary() {
        let table = tiny_table();
        assert_eq!(extract("bad stomachache today", &table), vec!["ache"]);
    }

    #[test]
    fn empty_and_unrecognized_text_yield_empty_set() {
        let table = tiny_table();
        assert!(extract("", &table).is_empty());
        assert!(extract("   ", &table).is_empty());
        assert!(extract("qwerty", &table).is_empty());
    }

    #[test]
    fn output_is_sorted_and_within_vocabulary() {
        let table = tiny_table();
        let matched = extract("skin rash and itching and an ache", &table);
        assert_eq!(matched, vec!["ache", "itching", "skin rash"]);
        for token in &matched {
            assert!(table.vocabulary().any(|v| v == token));
        }
    }
}
