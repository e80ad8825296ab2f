//! Parenthetical annotations: dialect variants, cultural notes, etymology.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::parser::entry::Dialect;
use crate::parser::normalize::normalize;

static DIALECT_RES: LazyLock<Vec<(Dialect, Regex)>> = LazyLock::new(|| {
    Dialect::ALL
        .into_iter()
        .map(|d| {
            let re = Regex::new(&format!(r"{}\s*([^;.()]+)", regex::escape(d.marker()))).unwrap();
            (d, re)
        })
        .collect()
});

static PAREN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());

const CULTURAL_KEYWORDS: &[&str] = &["costumbre", "creencia"];

static ETYMOLOGY_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"\(Del[^)]+\)", r"\bDe\b[^.]+\.", r"\bEtimología:\s*[^.]+\."]
        .into_iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

pub fn dialectal_variants(text: &str) -> BTreeMap<Dialect, Vec<String>> {
    let mut variants = BTreeMap::new();
    for (dialect, re) in DIALECT_RES.iter() {
        let forms: Vec<String> = re
            .captures_iter(text)
            .map(|caps| normalize(&caps[1]))
            .filter(|f| !f.is_empty())
            .collect();
        if !forms.is_empty() {
            variants.insert(*dialect, forms);
        }
    }
    variants
}

/// Parentheticals mentioning customs or beliefs, dialect markers excluded.
pub fn cultural_notes(text: &str) -> Option<String> {
    let notes: Vec<String> = PAREN_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|span| !Dialect::ALL.iter().any(|d| span.starts_with(&d.marker()[..4])))
        .filter(|span| {
            let lower = span.to_lowercase();
            CULTURAL_KEYWORDS.iter().any(|k| lower.contains(k))
        })
        .map(normalize)
        .collect();
    if notes.is_empty() {
        None
    } else {
        Some(notes.join(" "))
    }
}

pub fn etymology(text: &str) -> Option<String> {
    ETYMOLOGY_RULES
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| normalize(m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_dialects() {
        let v = dialectal_variants("yëi: grande (hra) yëyë; (hsh) yai.");
        assert_eq!(v[&Dialect::OraTeri], vec!["yëyë"]);
        assert_eq!(v[&Dialect::Shamatari], vec!["yai"]);
    }

    #[test]
    fn marker_without_form_is_ignored() {
        let v = dialectal_variants("yëi (hra). grande");
        assert!(v.is_empty());
    }

    #[test]
    fn cultural_notes_joined_in_order() {
        let text = "rahaka: flecha (costumbre de caza) grande (según la Creencia local) (hra) rahakë";
        assert_eq!(
            cultural_notes(text).as_deref(),
            Some("(costumbre de caza) (según la Creencia local)")
        );
    }

    #[test]
    fn plain_parentheticals_are_not_notes() {
        assert_eq!(cultural_notes("hii: árbol (planta grande)"), None);
        assert_eq!(cultural_notes("hii (hra costumbre)"), None);
    }

    #[test]
    fn etymology_rule_order() {
        assert_eq!(
            etymology("kaxipi: caja. De origen portugués. (Del port. caixa)").as_deref(),
            Some("(Del port. caixa)")
        );
        assert_eq!(
            etymology("kaxipi: caja. De origen portugués.").as_deref(),
            Some("De origen portugués.")
        );
        assert_eq!(
            etymology("naha: así. Etimología: incierta.").as_deref(),
            Some("Etimología: incierta.")
        );
        assert_eq!(etymology("pei: agua"), None);
    }
}
