use crate::parser::entry::{Example, LexicalEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub rank: usize,
    pub headword: String,
    pub definition: String,
    pub examples: Vec<Example>,
}

fn haystack(entry: &LexicalEntry) -> String {
    let mut text = format!("{} {}", entry.headword, entry.definition);
    for x in &entry.examples {
        text.push(' ');
        text.push_str(&x.source);
        text.push(' ');
        text.push_str(&x.translation);
    }
    text.to_lowercase()
}

/// Entries containing every query term; exact headword matches first.
pub fn search(entries: &[LexicalEntry], query: &str, k: usize) -> Vec<SearchHit> {
    let query = query.trim().to_lowercase();
    let terms: Vec<&str> = query.split_whitespace().collect();
    if terms.is_empty() || k == 0 {
        return Vec::new();
    }

    let matches = entries.iter().filter(|e| {
        let text = haystack(e);
        terms.iter().all(|t| text.contains(t))
    });
    let (mut exact, rest): (Vec<_>, Vec<_>) =
        matches.partition(|e| e.headword.to_lowercase() == query);
    exact.extend(rest);

    exact
        .into_iter()
        .take(k)
        .enumerate()
        .map(|(i, e)| SearchHit {
            rank: i + 1,
            headword: e.headword.clone(),
            definition: e.definition.clone(),
            examples: e.examples.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn entry(headword: &str, definition: &str, examples: &[(&str, &str)]) -> LexicalEntry {
        LexicalEntry {
            headword: headword.into(),
            grammatical_info: vec![],
            definition: definition.into(),
            examples: examples
                .iter()
                .map(|(s, t)| Example {
                    source: s.to_string(),
                    translation: t.to_string(),
                    context: None,
                })
                .collect(),
            related_terms: vec![],
            semantic_field: None,
            dialectal_variants: BTreeMap::new(),
            cultural_notes: None,
            etymology: None,
            full_content: String::new(),
        }
    }

    fn entries() -> Vec<LexicalEntry> {
        vec![
            entry("mãu", "agua de río", &[]),
            entry("kiki", "tomar", &[("pei kiki", "tomar agua")]),
            entry("pei", "agua", &[]),
            entry("mamo", "ojo", &[]),
        ]
    }

    #[test]
    fn exact_headword_ranks_first() {
        let hits = search(&entries(), "pei", 5);
        assert_eq!(hits[0].headword, "pei");
        assert_eq!(hits[0].rank, 1);
        // "pei" also occurs in kiki's example
        assert_eq!(hits[1].headword, "kiki");
        assert_eq!(hits[1].rank, 2);
    }

    #[test]
    fn all_terms_must_match() {
        let hits = search(&entries(), "Tomar AGUA", 5);
        let heads: Vec<_> = hits.iter().map(|h| h.headword.as_str()).collect();
        assert_eq!(heads, vec!["kiki"]);
    }

    #[test]
    fn stored_order_and_limit() {
        let hits = search(&entries(), "agua", 2);
        let heads: Vec<_> = hits.iter().map(|h| h.headword.as_str()).collect();
        assert_eq!(heads, vec!["mãu", "kiki"]);
    }

    #[test]
    fn empty_query_no_hits() {
        assert!(search(&entries(), "   ", 5).is_empty());
        assert!(search(&entries(), "nada", 5).is_empty());
    }
}
