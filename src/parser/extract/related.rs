use std::sync::LazyLock;

use regex::Regex;

use crate::parser::entry::SemanticField;
use crate::parser::normalize::normalize;

static CROSS_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\bV\.|\bcf\.|\bsin\.|\b[vV][eé]ase\b)\s*([^.;]+)").unwrap()
});

// (field, pattern) in priority order
static FIELD_RES: LazyLock<Vec<(SemanticField, Regex)>> = LazyLock::new(|| {
    SemanticField::ALL
        .into_iter()
        .map(|f| {
            let re = Regex::new(&format!(r"\b{}", regex::escape(f.abbreviation()))).unwrap();
            (f, re)
        })
        .collect()
});

/// Cross-referenced terms, first-seen order, never the headword itself.
pub fn related_terms(text: &str, headword: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for caps in CROSS_REF_RE.captures_iter(text) {
        for raw in caps[1].split([',', ';']) {
            let term = normalize(raw);
            if term.is_empty() || term == headword || terms.contains(&term) {
                continue;
            }
            terms.push(term);
        }
    }
    terms
}

pub fn semantic_field(text: &str) -> Option<SemanticField> {
    FIELD_RES
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(field, _)| *field)
}
