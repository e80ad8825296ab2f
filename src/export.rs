use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::parser::entry::LexicalEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array
    Json,
    /// One entry per line
    Jsonl,
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    Ok(BufWriter::new(file))
}

pub fn write_entries(path: &Path, entries: &[LexicalEntry], format: OutputFormat) -> Result<()> {
    let mut out = create(path)?;
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, entries)?;
            writeln!(out)?;
        }
        OutputFormat::Jsonl => write_lines(&mut out, entries)?,
    }
    out.flush()?;
    Ok(())
}

fn write_lines<T: Serialize>(out: &mut impl Write, items: &[T]) -> Result<()> {
    for item in items {
        serde_json::to_writer(&mut *out, item)?;
        writeln!(out)?;
    }
    Ok(())
}

// ── Vector texts ──

/// Text unit handed to the embedding collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorRecord {
    pub text: String,
    pub metadata: VectorMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VectorMetadata {
    Entry {
        headword: String,
        pos: Vec<String>,
    },
    Example {
        headword: String,
        context: Option<String>,
    },
}

/// One record per entry, then one per example of that entry.
pub fn vector_records(entries: &[LexicalEntry]) -> Vec<VectorRecord> {
    let mut records = Vec::new();
    for entry in entries {
        records.push(VectorRecord {
            text: entry_text(entry),
            metadata: VectorMetadata::Entry {
                headword: entry.headword.clone(),
                pos: entry.grammatical_info.clone(),
            },
        });

        for example in &entry.examples {
            let mut parts = vec![
                format!("Yanomami example: {}", example.source),
                format!("Spanish translation: {}", example.translation),
            ];
            if let Some(context) = &example.context {
                parts.push(format!("Context: {}", context));
            }
            records.push(VectorRecord {
                text: parts.join(" | "),
                metadata: VectorMetadata::Example {
                    headword: entry.headword.clone(),
                    context: example.context.clone(),
                },
            });
        }
    }
    records
}

fn entry_text(entry: &LexicalEntry) -> String {
    let mut parts = vec![
        format!("Yanomami word: {}", entry.headword),
        format!("Part of speech: {}", entry.grammatical_info.join(", ")),
        format!("Definition: {}", entry.definition),
    ];
    if let Some(field) = entry.semantic_field {
        parts.push(format!("Field: {}", field));
    }
    for (dialect, forms) in &entry.dialectal_variants {
        if !forms.is_empty() {
            parts.push(format!("{} dialect: {}", dialect.label(), forms.join(", ")));
        }
    }
    if let Some(notes) = &entry.cultural_notes {
        parts.push(format!("Cultural context: {}", notes));
    }
    if let Some(etymology) = &entry.etymology {
        parts.push(format!("Etymology: {}", etymology));
    }
    if !entry.related_terms.is_empty() {
        parts.push(format!("Related terms: {}", entry.related_terms.join(", ")));
    }
    parts.join(" | ")
}

pub fn write_vector_records(path: &Path, records: &[VectorRecord]) -> Result<()> {
    let mut out = create(path)?;
    write_lines(&mut out, records)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::entry::{Dialect, Example, SemanticField};
    use std::collections::BTreeMap;

    fn sample() -> LexicalEntry {
        let mut variants = BTreeMap::new();
        variants.insert(Dialect::Shamatari, vec!["hiiki".to_string()]);
        LexicalEntry {
            headword: "hii".into(),
            grammatical_info: vec!["sust.".into()],
            definition: "árbol".into(),
            examples: vec![Example {
                source: "hii pata".into(),
                translation: "árbol grande".into(),
                context: Some("en el bosque".into()),
            }],
            related_terms: vec!["kõa".into()],
            semantic_field: Some(SemanticField::Botany),
            dialectal_variants: variants,
            cultural_notes: None,
            etymology: None,
            full_content: "hii sust. árbol".into(),
        }
    }

    #[test]
    fn entry_and_example_records() {
        let records = vector_records(&[sample()]);
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].text,
            "Yanomami word: hii | Part of speech: sust. | Definition: árbol | Field: Botánica \
             | Shamatari dialect: hiiki | Related terms: kõa"
        );
        assert_eq!(
            records[1].text,
            "Yanomami example: hii pata | Spanish translation: árbol grande | Context: en el bosque"
        );
    }

    #[test]
    fn metadata_is_tagged() {
        let records = vector_records(&[sample()]);
        let entry = serde_json::to_value(&records[0]).unwrap();
        assert_eq!(entry["metadata"]["type"], "entry");
        assert_eq!(entry["metadata"]["pos"][0], "sust.");
        let example = serde_json::to_value(&records[1]).unwrap();
        assert_eq!(example["metadata"]["type"], "example");
        assert_eq!(example["metadata"]["context"], "en el bosque");
    }

    #[test]
    fn json_and_jsonl_files() {
        let dir = tempfile::tempdir().unwrap();
        let entries = vec![sample(), sample()];

        let json = dir.path().join("out/entries.json");
        write_entries(&json, &entries, OutputFormat::Json).unwrap();
        let raw = std::fs::read_to_string(&json).unwrap();
        // non-ASCII written as-is
        assert!(raw.contains("árbol"));
        let back: Vec<LexicalEntry> = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.len(), 2);

        let jsonl = dir.path().join("entries.jsonl");
        write_entries(&jsonl, &entries, OutputFormat::Jsonl).unwrap();
        let raw = std::fs::read_to_string(&jsonl).unwrap();
        assert_eq!(raw.lines().count(), 2);
        assert!(raw.lines().all(|l| l.contains("\"fullContent\"")));
    }

    #[test]
    fn vector_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectors.jsonl");
        write_vector_records(&path, &vector_records(&[sample()])).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw.lines().count(), 2);
    }
}
