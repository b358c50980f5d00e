//! Canonicalises regulatory schedule ("별표") cross-references.

use lazy_regex::{Regex, regex};

/// Ordered pattern → canonical label rules; the first match wins. The
/// combined-annex patterns precede the single-annex ones because they are
/// more specific.
fn basis_rules() -> [(&'static Regex, &'static str); 4] {
    [
        (regex!(r"별표\s*8.*?15"i), "별표8과15.xlsx"),
        (regex!(r"별표\s*15.*?8"i), "별표8과15.xlsx"),
        (regex!(r"별표.*?8"i), "별표8.xlsx"),
        (regex!(r"별표.*?15"i), "별표15.xlsx"),
    ]
}

/// Normalises a free-text regulatory basis reference to a canonical
/// schedule label. Unrecognised text passes through trimmed; empty input
/// yields the empty string.
pub fn normalize_basis(text: &str) -> String {
    let text = text.trim();
    for (pattern, label) in basis_rules() {
        if pattern.is_match(text) {
            return label.to_string();
        }
    }
    text.to_string()
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use test_casing::test_casing;

    use super::normalize_basis;

    const CANONICAL_CASES: [(&str, &str); 6] = [
        ("별표 8 및 15 참조", "별표8과15.xlsx"),
        ("별표 15 및 8 참조", "별표8과15.xlsx"),
        ("별표8의 기준", "별표8.xlsx"),
        ("대기환경보전법 별표 8", "별표8.xlsx"),
        ("별표 15", "별표15.xlsx"),
        ("별표 제15호", "별표15.xlsx"),
    ];

    #[test_casing(6, CANONICAL_CASES)]
    fn recognises_annex_references(input: &str, expected: &str) {
        assert_that!(normalize_basis(input), eq(expected));
    }

    #[gtest]
    fn combined_annex_label_is_order_independent() {
        expect_that!(
            normalize_basis("별표 8과 별표 15"),
            eq(&normalize_basis("별표 15와 별표 8")),
        );
    }

    #[gtest]
    fn passes_unrecognised_text_through_trimmed() {
        expect_that!(normalize_basis(" 환경부 고시 제2020-1호 "), eq("환경부 고시 제2020-1호"));
    }

    #[gtest]
    fn empty_input_yields_empty_output() {
        expect_that!(normalize_basis(""), eq(""));
        expect_that!(normalize_basis("   "), eq(""));
    }

    #[test_casing(6, CANONICAL_CASES)]
    fn is_idempotent_on_its_own_output(input: &str, _expected: &str) {
        let canonical = normalize_basis(input);

        assert_that!(normalize_basis(&canonical), eq(canonical.as_str()));
    }
}
