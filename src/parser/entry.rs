use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexicalEntry {
    pub headword: String,
    pub grammatical_info: Vec<String>,
    pub definition: String,
    pub examples: Vec<Example>,
    pub related_terms: Vec<String>,
    pub semantic_field: Option<SemanticField>,
    pub dialectal_variants: BTreeMap<Dialect, Vec<String>>,
    pub cultural_notes: Option<String>,
    pub etymology: Option<String>,
    pub full_content: String,
}

impl LexicalEntry {
    /// At least one content-bearing field besides the headword.
    pub fn has_content(&self) -> bool {
        !self.definition.is_empty()
            || !self.examples.is_empty()
            || !self.grammatical_info.is_empty()
            || self.cultural_notes.is_some()
            || !self.dialectal_variants.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub source: String,
    pub translation: String,
    pub context: Option<String>,
}

const CROSS_REF_MARKERS: &[&str] = &["V.", "cf.", "sin."];

impl Example {
    /// Builds an example if the pair looks like a real usage sample.
    pub fn accept(source: String, translation: String, context: Option<String>) -> Option<Self> {
        if source.is_empty() || translation.is_empty() {
            return None;
        }
        if source.split_whitespace().count() < 2 {
            return None;
        }
        if CROSS_REF_MARKERS.iter().any(|m| source.starts_with(m)) {
            return None;
        }
        Some(Example {
            source,
            translation,
            context,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SemanticField {
    #[serde(rename = "Botánica")]
    Botany,
    #[serde(rename = "Zoología")]
    Zoology,
    #[serde(rename = "Ornitología")]
    Ornithology,
    #[serde(rename = "Anatomía")]
    Anatomy,
    #[serde(rename = "Medicina")]
    Medicine,
    #[serde(rename = "Mitología")]
    Mythology,
    #[serde(rename = "Chamanismo")]
    Shamanism,
}

impl SemanticField {
    /// Priority order used when several field abbreviations occur.
    pub const ALL: [SemanticField; 7] = [
        SemanticField::Botany,
        SemanticField::Zoology,
        SemanticField::Ornithology,
        SemanticField::Anatomy,
        SemanticField::Medicine,
        SemanticField::Mythology,
        SemanticField::Shamanism,
    ];

    pub fn abbreviation(self) -> &'static str {
        match self {
            SemanticField::Botany => "Bot.",
            SemanticField::Zoology => "Zool.",
            SemanticField::Ornithology => "Orn.",
            SemanticField::Anatomy => "Anat.",
            SemanticField::Medicine => "Med.",
            SemanticField::Mythology => "Mit.",
            SemanticField::Shamanism => "Cham.",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SemanticField::Botany => "Botánica",
            SemanticField::Zoology => "Zoología",
            SemanticField::Ornithology => "Ornitología",
            SemanticField::Anatomy => "Anatomía",
            SemanticField::Medicine => "Medicina",
            SemanticField::Mythology => "Mitología",
            SemanticField::Shamanism => "Chamanismo",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(name) || f.abbreviation() == name)
    }
}

impl fmt::Display for SemanticField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// Marked `(hra)` in the source.
    OraTeri,
    /// Marked `(hsh)` in the source.
    Shamatari,
}

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::OraTeri, Dialect::Shamatari];

    pub fn marker(self) -> &'static str {
        match self {
            Dialect::OraTeri => "(hra)",
            Dialect::Shamatari => "(hsh)",
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Dialect::OraTeri => "ora_teri",
            Dialect::Shamatari => "shamatari",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Dialect::OraTeri => "Ora Teri",
            Dialect::Shamatari => "Shamatari",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.tag() == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_requires_two_tokens() {
        assert!(Example::accept("pei".into(), "agua".into(), None).is_none());
        assert!(Example::accept("pei kiki".into(), "tomar agua".into(), None).is_some());
    }

    #[test]
    fn example_rejects_cross_reference() {
        assert!(Example::accept("V. hãro kiki".into(), "ver".into(), None).is_none());
        assert!(Example::accept("cf. kiki ha".into(), "x".into(), None).is_none());
        assert!(Example::accept("sin. wa ha".into(), "x".into(), None).is_none());
    }

    #[test]
    fn example_rejects_empty_translation() {
        assert!(Example::accept("pei kiki".into(), String::new(), None).is_none());
    }

    #[test]
    fn serialized_field_names() {
        let mut variants = BTreeMap::new();
        variants.insert(Dialect::OraTeri, vec!["mãu".to_string()]);
        let entry = LexicalEntry {
            headword: "mãu".into(),
            grammatical_info: vec!["sust.".into()],
            definition: "agua".into(),
            examples: vec![],
            related_terms: vec![],
            semantic_field: Some(SemanticField::Botany),
            dialectal_variants: variants,
            cultural_notes: None,
            etymology: None,
            full_content: "mãu sust. agua".into(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["grammaticalInfo"][0], "sust.");
        assert_eq!(json["semanticField"], "Botánica");
        assert_eq!(json["dialectalVariants"]["ora_teri"][0], "mãu");
        assert!(json.get("fullContent").is_some());
        assert!(json["culturalNotes"].is_null());
    }

    #[test]
    fn field_lookup_by_name_or_abbreviation() {
        assert_eq!(SemanticField::from_name("Zoología"), Some(SemanticField::Zoology));
        assert_eq!(SemanticField::from_name("Orn."), Some(SemanticField::Ornithology));
        assert_eq!(SemanticField::from_name("nada"), None);
    }
}
