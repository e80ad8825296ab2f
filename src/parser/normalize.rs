//! Character canonicalization for OCR output of the dictionary.
//!
//! Maps alternate or decomposed diacritic forms onto the target alphabet,
//! drops structural glyphs and zero-width marks, collapses whitespace.

/// Sequences replaced before any single-character substitution.
const MULTI_CHAR: &[(&str, &str)] = &[
    ("t$", "t\u{0303}"),
    ("n$", "ñ"),
    ("t\u{0303}", "t\u{0303}"),
    ("n\u{0303}", "ñ"),
    ("a\u{0303}", "ã"),
    ("e\u{0303}", "ẽ"),
    ("i\u{0303}", "ĩ"),
    ("o\u{0303}", "õ"),
    ("u\u{0303}", "ũ"),
    ("a\u{0304}", "ã"),
    ("e\u{0304}", "ẽ"),
    ("i\u{0304}", "ĩ"),
    ("o\u{0304}", "õ"),
    ("u\u{0304}", "ũ"),
    ("e\u{0308}", "ë"),
    ("i\u{0308}", "ï"),
    ("u\u{0308}", "ü"),
    ("o\u{0308}", "ö"),
    ("a\u{0308}", "ä"),
];

const SINGLE_CHAR: &[(char, &str)] = &[
    // macron variants of the nasal vowels
    ('ā', "ã"),
    ('ō', "õ"),
    ('ī', "ĩ"),
    ('ū', "ũ"),
    ('ē', "ẽ"),
    // PDF glyph substitutes
    ('∏', "ĩ"),
    ('∞', "õ"),
    // root, item, variant, paragraph and section markers
    ('√', ""),
    ('✓', ""),
    ('•', ""),
    ('◊', ""),
    ('○', ""),
    ('¶', ""),
    ('§', ""),
    // translation and note symbols
    ('→', "="),
    ('⇒', "="),
    ('≈', "~"),
    ('†', "*"),
    ('‡', "**"),
    // zero-width marks and BOM
    ('\u{200b}', ""),
    ('\u{200c}', ""),
    ('\u{200d}', ""),
    ('\u{feff}', ""),
    ('\u{a0}', " "),
];

// Each pass only shrinks multi-char sequences, so a handful always suffices.
const MAX_PASSES: usize = 8;

/// Canonicalize `text`. Total and idempotent.
pub fn normalize(text: &str) -> String {
    let mut current = substitute(text);
    for _ in 0..MAX_PASSES {
        let next = substitute(&current);
        if next == current {
            break;
        }
        current = next;
    }
    collapse_whitespace(&current)
}

fn substitute(text: &str) -> String {
    let mut out = text.to_string();
    for (seq, replacement) in MULTI_CHAR {
        if out.contains(seq) {
            out = out.replace(seq, replacement);
        }
    }
    let mut mapped = String::with_capacity(out.len());
    for c in out.chars() {
        match SINGLE_CHAR.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => mapped.push_str(to),
            None => mapped.push(c),
        }
    }
    mapped
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
