use std::sync::LazyLock;

use regex::Regex;

// Abbreviations are case-sensitive so the cross-reference "V." is not "v.".
static GRAMMAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:(vb|adj|sust|pron|clasif|v|adv|prep|conj|interj|num|part)\.|(?i:(verbo|adjetivo|sustantivo|pronombre|clasificador|adverbio|preposición|conjunción|interjección|numeral|partícula))\b)",
    )
    .unwrap()
});

const SPELLED_OUT: &[(&str, &str)] = &[
    ("verbo", "vb."),
    ("adjetivo", "adj."),
    ("sustantivo", "sust."),
    ("pronombre", "pron."),
    ("clasificador", "clasif."),
    ("adverbio", "adv."),
    ("preposición", "prep."),
    ("conjunción", "conj."),
    ("interjección", "interj."),
    ("numeral", "num."),
    ("partícula", "part."),
];

/// Grammar tags in text order, canonicalized to abbreviations, deduplicated.
pub fn extract(text: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for caps in GRAMMAR_RE.captures_iter(text) {
        let tag = if let Some(abbr) = caps.get(1) {
            format!("{}.", abbr.as_str())
        } else if let Some(word) = caps.get(2) {
            let lower = word.as_str().to_lowercase();
            match SPELLED_OUT.iter().find(|(w, _)| *w == lower) {
                Some((_, abbr)) => abbr.to_string(),
                None => continue,
            }
        } else {
            continue;
        };
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviations_in_order() {
        assert_eq!(extract("wai vb. comer; adj. comido"), vec!["vb.", "adj."]);
    }

    #[test]
    fn spelled_out_canonicalized_and_deduplicated() {
        assert_eq!(
            extract("mamo sust. ojo. Sustantivo que también es Adjetivo"),
            vec!["sust.", "adj."]
        );
        assert_eq!(extract("hena: preposición de lugar"), vec!["prep."]);
    }

    #[test]
    fn cross_reference_is_not_a_verb_tag() {
        assert!(extract("pei: agua. V. mãu").is_empty());
        assert_eq!(extract("pei v. tomar"), vec!["v."]);
    }

    #[test]
    fn no_match_inside_words() {
        assert!(extract("adverbial verbosidad").is_empty());
        assert!(extract("kiadj. nada").is_empty());
    }
}
