use std::sync::LazyLock;

use regex::Regex;

use crate::parser::normalize::normalize;

static HEADWORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s.,;:=()]+").unwrap());
static HEADER_SHAPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Diccionario|^[A-Z][a-z]+\s*\d{4}$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headword {
    pub word: String,
    /// Byte offset just past the headword in the prepared text.
    pub end: usize,
}

pub fn extract(text: &str) -> Option<Headword> {
    let m = HEADWORD_RE.find(text)?;
    let word = normalize(m.as_str());
    if word.chars().count() < 2 || HEADER_SHAPE_RE.is_match(&word) {
        return None;
    }
    Some(Headword { word, end: m.end() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_run() {
        let h = extract("pei: agua").unwrap();
        assert_eq!(h.word, "pei");
        assert_eq!(h.end, 3);
        assert_eq!(extract("hãro=hermano").unwrap().word, "hãro");
        assert_eq!(extract("yëi (hra) grande").unwrap().word, "yëi");
    }

    #[test]
    fn too_short_or_missing() {
        assert!(extract("a: algo").is_none());
        assert!(extract(": algo").is_none());
        assert!(extract("").is_none());
    }

    #[test]
    fn header_shapes_rejected() {
        assert!(extract("Diccionario yãnomãm@").is_none());
        assert!(extract("Caracas1996").is_none());
    }
}
