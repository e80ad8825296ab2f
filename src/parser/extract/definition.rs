use std::sync::LazyLock;

use regex::Regex;

use crate::parser::normalize::normalize;

// numbered subsense or grammar abbreviation ends the leading definition
static BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+\.\s|\b(?:vb|adj|sust|pron)\.").unwrap());
static LEADING_SEP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\s:=,;.\-]*").unwrap());

/// Text following the headword up to the first subsense or grammar boundary.
pub fn extract(text: &str, headword_end: usize) -> String {
    let rest = text.get(headword_end..).unwrap_or_default();
    let rest = match LEADING_SEP_RE.find(rest) {
        Some(m) => &rest[m.end()..],
        None => rest,
    };
    let end = BOUNDARY_RE.find(rest).map(|m| m.start()).unwrap_or(rest.len());
    normalize(&rest[..end])
        .trim_end_matches([',', ';', ':', '=', '-', ' '])
        .to_string()
}
