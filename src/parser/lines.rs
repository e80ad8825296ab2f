use std::sync::LazyLock;

use regex::Regex;

use super::normalize::normalize;
use crate::config::PipelineOptions;

static LEADING_PAGE_NUM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\s+").unwrap());
static TRAILING_PAGE_NUM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+\d+$").unwrap());
static HEADER_FOOTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Diccionario|^[A-Z][a-z]+ \d{4}$").unwrap());
static SYMBOLS_ONLY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\W_]+$").unwrap());
static SECTION_NUM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\d+$").unwrap());
static NUMBER_ONLY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\d+\s*$").unwrap());
static LETTER_PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[a-z]+\s*[.)]\s*$").unwrap());
static BRACKET_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[()\[\]{}]\s*$").unwrap());
static NUMBERING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+\.?\s*").unwrap());
static LETTER_LIST_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z]\.\s*").unwrap());
static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-•●*]\s*").unwrap());
// letters, optional parenthetical, then a separator or grammar marker
static ENTRY_HEAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}@][\p{L}\p{M}@\s]*(?:\s*\([^)]+\))?\s*(?:[=:]|\b(?:vb|adj|sust)\.)").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    EntryStart,
    Continuation,
    Noise,
}

/// One cleaned line and the page it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub text: String,
    pub page: usize,
}

/// Lookback available to the classifier: the previous kept line.
#[derive(Debug, Clone, Default)]
pub struct LineContext {
    pub previous: Option<String>,
}

/// Lines starting with these never open an entry.
const NON_ENTRY_PREFIXES: &[&str] = &[
    // field and grammar abbreviations
    "Bot.", "Zool.", "Anat.", "Med.", "Orn.", "Mit.", "Cham.",
    "V.", "sin.", "ant.", "cf.", "p.", "pp.",
    "Véase", "Comp.", "Var.",
    "vb.", "adj.", "sust.", "pron.", "adv.", "prep.", "conj.", "interj.",
    // structural markers
    "Nota:", "Ref.:", "Fig.:", "N.B.:", "Diccionario", "Ejemplo", "Ej.",
    // enumerators
    "1.", "2.", "3.", "4.", "5.", "a)", "b)", "c)", "d)", "e)",
];

/// Spanish function words; only match as whole words.
const NON_ENTRY_WORDS: &[&str] = &[
    "El", "La", "Los", "Las", "Un", "Una", "Este", "Esta", "Estos", "Estas",
    "Cuando", "Como", "Donde", "Porque", "Ver",
];

const CONJUNCTION_STARTS: &[&str] = &["y ", "o ", "e "];

/// Characters that mark a token as target-language.
const YANOMAMI_CHARS: &[char] = &[
    'ã', 'õ', 'ĩ', 'ũ', 'ẽ', 'ā', 'ō', 'ī', 'ū', 'ē', 'ë', 'ï', 'ü', 'ö', 'ä', '@', '∏', '∞',
    'ñ', '\u{0300}', '\u{0301}', '\u{0302}', '\u{0303}', '\u{0308}',
];

/// Normalize a raw line and strip page numbers glued to either end.
pub fn clean_line(raw: &str) -> String {
    let line = normalize(raw);
    // keep footers like "Caracas 1996" intact so they classify as noise
    if HEADER_FOOTER_RE.is_match(&line) {
        return line;
    }
    let line = LEADING_PAGE_NUM_RE.replace(&line, "");
    let line = TRAILING_PAGE_NUM_RE.replace(&line, "");
    line.trim().to_string()
}

pub struct LineClassifier {
    max_line_chars: usize,
    max_line_tokens: usize,
}

impl LineClassifier {
    pub fn new(opts: &PipelineOptions) -> Self {
        LineClassifier {
            max_line_chars: opts.max_line_chars,
            max_line_tokens: opts.max_line_tokens,
        }
    }

    /// Classify one cleaned line. First matching rule wins.
    pub fn classify(&self, line: &str, ctx: &LineContext) -> Classification {
        let line = line.trim();
        if line.is_empty() {
            return Classification::Noise;
        }
        if self.is_structural_noise(line) {
            return Classification::Noise;
        }

        let body = strip_enumeration(line);
        if has_non_entry_prefix(body) {
            return Classification::Continuation;
        }

        if !is_headword_token(first_token(body)) {
            return Classification::Continuation;
        }

        if self.is_disqualified(body, ctx) {
            return Classification::Continuation;
        }
        Classification::EntryStart
    }

    fn is_structural_noise(&self, line: &str) -> bool {
        let chars = line.chars().count();
        HEADER_FOOTER_RE.is_match(line)
            || SYMBOLS_ONLY_RE.is_match(line)
            || (is_all_caps(line) && chars > 3)
            || line.split_whitespace().count() > self.max_line_tokens
            || chars < 2
            || SECTION_NUM_RE.is_match(line)
            || NUMBER_ONLY_RE.is_match(line)
            || LETTER_PUNCT_RE.is_match(line)
            || BRACKET_ONLY_RE.is_match(line)
    }

    fn is_disqualified(&self, line: &str, ctx: &LineContext) -> bool {
        if CONJUNCTION_STARTS.iter().any(|c| line.starts_with(c)) {
            return true;
        }
        if line.chars().take(20).any(|c| c == ';') {
            return true;
        }
        // word hyphenated across a line break
        if ctx
            .previous
            .as_deref()
            .is_some_and(|p| p.ends_with('-') && !p.ends_with(" -"))
        {
            return true;
        }
        if line.chars().count() > self.max_line_chars {
            return true;
        }
        line.split_whitespace().count() > 3 && !ENTRY_HEAD_RE.is_match(line)
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        LineClassifier::new(&PipelineOptions::default())
    }
}

/// Classify a page-ordered stream of cleaned lines, dropping empty ones.
pub fn classify_lines<'a, I>(classifier: &LineClassifier, lines: I) -> Vec<(RawLine, Classification)>
where
    I: IntoIterator<Item = (usize, &'a str)>,
{
    let mut ctx = LineContext::default();
    let mut out = Vec::new();
    for (page, raw) in lines {
        let text = clean_line(raw);
        if text.is_empty() {
            continue;
        }
        let class = classifier.classify(&text, &ctx);
        if class != Classification::Noise {
            ctx.previous = Some(text.clone());
        }
        out.push((RawLine { text, page }, class));
    }
    out
}

fn strip_enumeration(line: &str) -> &str {
    let mut rest = line;
    for re in [&*NUMBERING_RE, &*LETTER_LIST_RE, &*BULLET_RE] {
        if let Some(m) = re.find(rest) {
            rest = &rest[m.end()..];
        }
    }
    rest
}

fn has_non_entry_prefix(line: &str) -> bool {
    if NON_ENTRY_PREFIXES.iter().any(|p| line.starts_with(p)) {
        return true;
    }
    NON_ENTRY_WORDS.iter().any(|w| {
        line.strip_prefix(w)
            .is_some_and(|rest| !rest.starts_with(|c: char| c.is_alphanumeric()))
    })
}

fn first_token(line: &str) -> &str {
    line.split_whitespace()
        .next()
        .unwrap_or("")
        .trim_end_matches([':', '=', ',', ';', '.'])
}

fn is_headword_token(token: &str) -> bool {
    let Some(first) = token.chars().next() else {
        return false;
    };
    let len = token.chars().count();
    first.is_alphabetic()
        && (2..=20).contains(&len)
        && (token.contains(YANOMAMI_CHARS) || token.chars().all(char::is_alphabetic))
}

fn is_all_caps(line: &str) -> bool {
    line.chars().any(char::is_uppercase) && !line.chars().any(char::is_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(line: &str) -> Classification {
        LineClassifier::default().classify(&clean_line(line), &LineContext::default())
    }

    #[test]
    fn bare_page_number_is_noise() {
        assert_eq!(classify("12"), Classification::Noise);
        assert_eq!(classify("   "), Classification::Noise);
    }

    #[test]
    fn headers_and_footers_are_noise() {
        assert_eq!(classify("Diccionario yãnomãm@ - castellano"), Classification::Noise);
        assert_eq!(classify("Caracas 1996"), Classification::Noise);
        assert_eq!(classify("LETRA A"), Classification::Noise);
        assert_eq!(classify("* * *"), Classification::Noise);
        assert_eq!(classify("3.2"), Classification::Noise);
        assert_eq!(classify("b)"), Classification::Noise);
        assert_eq!(classify("("), Classification::Noise);
        assert_eq!(classify("x"), Classification::Noise);
    }

    #[test]
    fn merged_page_line_is_noise() {
        let line = vec!["kiki"; 60].join(" ");
        assert_eq!(classify(&line), Classification::Noise);
    }

    #[test]
    fn simple_entry_heads() {
        assert_eq!(classify("pei: agua, líquido."), Classification::EntryStart);
        assert_eq!(classify("mamo sust. ojo"), Classification::EntryStart);
        assert_eq!(classify("hãro = hermano mayor"), Classification::EntryStart);
        assert_eq!(classify("yëi (hra) adj. grande"), Classification::EntryStart);
    }

    #[test]
    fn page_numbers_glued_to_line_are_stripped() {
        assert_eq!(clean_line("214 pei: agua"), "pei: agua");
        assert_eq!(clean_line("pei: agua 215"), "pei: agua");
        assert_eq!(classify("214 mamo: ojo"), Classification::EntryStart);
    }

    #[test]
    fn non_entry_prefixes_continue() {
        assert_eq!(classify("V. hãro, pei"), Classification::Continuation);
        assert_eq!(classify("Bot. árbol de la selva"), Classification::Continuation);
        assert_eq!(classify("Ejemplo: pei kiki: tomar agua."), Classification::Continuation);
        assert_eq!(classify("El agua del río"), Classification::Continuation);
        assert_eq!(classify("- vb. tomar"), Classification::Continuation);
    }

    #[test]
    fn function_words_only_match_whole_words() {
        // "Elawë" does not start with the word "El"
        assert_ne!(classify("Elawë: nombre propio"), Classification::Noise);
        assert_eq!(classify("Elawë: nombre propio"), Classification::EntryStart);
    }

    #[test]
    fn prose_continuations() {
        assert_eq!(classify("y también se dice del río"), Classification::Continuation);
        assert_eq!(classify("kiki; hena wai"), Classification::Continuation);
        assert_eq!(
            classify("que se usa para cocinar en la casa comunal"),
            Classification::Continuation
        );
        assert_eq!(classify("(planta medicinal)"), Classification::Continuation);
    }

    #[test]
    fn long_line_does_not_start_entry() {
        let line = format!("pei: {}", "agua ".repeat(30));
        assert_eq!(classify(&line), Classification::Continuation);
    }

    #[test]
    fn hyphenated_previous_line_continues() {
        let c = LineClassifier::default();
        let ctx = LineContext {
            previous: Some("esta planta se usa para medi-".into()),
        };
        assert_eq!(c.classify("cina: remedio", &ctx), Classification::Continuation);
        assert_eq!(
            c.classify("cina: remedio", &LineContext::default()),
            Classification::EntryStart
        );
    }

    #[test]
    fn deterministic() {
        let c = LineClassifier::default();
        let ctx = LineContext::default();
        for line in ["pei: agua", "12", "V. mamo", "y luego"] {
            assert_eq!(c.classify(line, &ctx), c.classify(line, &ctx));
        }
    }

    #[test]
    fn classify_lines_tracks_pages_and_skips_blank() {
        let c = LineClassifier::default();
        let input = vec![(0, "pei: agua"), (0, "  "), (1, "12"), (1, "mamo: ojo")];
        let out = classify_lines(&c, input);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].1, Classification::EntryStart);
        assert_eq!(out[1].1, Classification::Noise);
        assert_eq!(out[2].0.page, 1);
    }
}
