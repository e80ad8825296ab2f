pub mod annotations;
pub mod definition;
pub mod examples;
pub mod grammar;
pub mod headword;
pub mod related;

use std::sync::LazyLock;

use regex::Regex;

use super::entry::LexicalEntry;
use super::normalize::{collapse_whitespace, normalize};
use super::segments::EntryBlock;
use crate::error::LexiconError;

static TRAILING_NUM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\s*$").unwrap());
static LEADING_NUM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\s+").unwrap());
// running header swallowed into the block: "214 Diccionario ... yãnomãm@"
static RUNNING_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+\s*Diccionario\b.*?yãnomãm@").unwrap());

const SNIPPET_CHARS: usize = 60;

/// Block text ready for field rules: joined, collapsed, page furniture removed.
pub fn prepare(block: &EntryBlock) -> String {
    let text = collapse_whitespace(&block.joined());
    let text = RUNNING_HEADER_RE.replace_all(&text, "");
    let text = TRAILING_NUM_RE.replace(&text, "");
    let text = LEADING_NUM_RE.replace(&text, "");
    collapse_whitespace(&text)
}

/// Run every field rule over one block.
///
/// `Err(MalformedBlock)` when no headword can be found, `Ok(None)` when the
/// headword is fine but nothing else was recovered.
pub fn try_extract(block: &EntryBlock) -> Result<Option<LexicalEntry>, LexiconError> {
    let text = prepare(block);
    let Some(head) = headword::extract(&text) else {
        return Err(LexiconError::MalformedBlock {
            page: block.page(),
            snippet: text.chars().take(SNIPPET_CHARS).collect(),
        });
    };

    let entry = LexicalEntry {
        definition: definition::extract(&text, head.end),
        grammatical_info: grammar::extract(&text),
        examples: examples::extract(&text),
        related_terms: related::related_terms(&text, &head.word),
        semantic_field: related::semantic_field(&text),
        dialectal_variants: annotations::dialectal_variants(&text),
        cultural_notes: annotations::cultural_notes(&text),
        etymology: annotations::etymology(&text),
        full_content: normalize(&text),
        headword: head.word,
    };

    Ok(entry.has_content().then_some(entry))
}

pub fn extract(block: &EntryBlock) -> Option<LexicalEntry> {
    try_extract(block).ok().flatten()
}

// ── Tests ──
