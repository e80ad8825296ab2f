pub mod dedup;
pub mod entry;
pub mod extract;
pub mod lines;
pub mod normalize;
pub mod segments;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::PipelineOptions;
use crate::error::LexiconError;
use crate::source::Page;
use entry::LexicalEntry;
use lines::LineClassifier;
use segments::EntryBlock;

/// Counts and final entries for one processed source document.
#[derive(Debug, Default)]
pub struct ProcessedDocument {
    pub pages: usize,
    pub skipped_pages: usize,
    pub blocks: usize,
    pub malformed: usize,
    pub rejected: usize,
    pub entries: Vec<LexicalEntry>,
}

impl ProcessedDocument {
    pub fn ensure_nonempty(&self) -> Result<(), LexiconError> {
        if self.entries.is_empty() {
            Err(LexiconError::EmptyDocument)
        } else {
            Ok(())
        }
    }
}

/// Pass 1+2: drop front matter, classify lines in page order, build blocks.
pub fn segment_pages(pages: &[Page], opts: &PipelineOptions) -> (Vec<EntryBlock>, usize) {
    let classifier = LineClassifier::new(opts);
    let mut skipped = 0;
    let body = pages.iter().filter(|page| {
        if segments::is_front_matter(page, opts) {
            debug!(page = page.index, "skipping front matter page");
            skipped += 1;
            false
        } else {
            true
        }
    });
    let stream = body.flat_map(|page| page.lines.iter().map(move |l| (page.index, l.as_str())));
    let classified = lines::classify_lines(&classifier, stream);
    (segments::segment(classified), skipped)
}

/// Pass 3: extract every block in parallel, chunk by chunk, preserving order.
/// Returns entries plus (malformed, rejected) counts.
pub fn extract_blocks(
    blocks: &[EntryBlock],
    chunk_size: usize,
    mut on_chunk: impl FnMut(usize),
) -> (Vec<LexicalEntry>, usize, usize) {
    let mut entries = Vec::with_capacity(blocks.len());
    let mut malformed = 0;
    let mut rejected = 0;

    for chunk in blocks.chunks(chunk_size.max(1)) {
        let results: Vec<_> = chunk.par_iter().map(extract::try_extract).collect();
        for result in results {
            match result {
                Ok(Some(entry)) => entries.push(entry),
                Ok(None) => rejected += 1,
                Err(e) => {
                    debug!("{e}");
                    malformed += 1;
                }
            }
        }
        on_chunk(chunk.len());
    }
    (entries, malformed, rejected)
}

/// Full pipeline over loaded pages: segment, extract, dedupe.
pub fn process_document(
    pages: &[Page],
    opts: &PipelineOptions,
    on_chunk: impl FnMut(usize),
) -> ProcessedDocument {
    let (blocks, skipped_pages) = segment_pages(pages, opts);
    extract_document(pages.len(), skipped_pages, &blocks, opts.chunk_size, on_chunk)
}

/// Pass 3+4 over already segmented blocks.
pub fn extract_document(
    pages: usize,
    skipped_pages: usize,
    blocks: &[EntryBlock],
    chunk_size: usize,
    on_chunk: impl FnMut(usize),
) -> ProcessedDocument {
    let (extracted, malformed, rejected) = extract_blocks(blocks, chunk_size, on_chunk);
    let before = extracted.len();
    let entries = dedup::dedupe(extracted);

    info!(
        pages,
        skipped_pages,
        blocks = blocks.len(),
        malformed,
        rejected,
        duplicates = before - entries.len(),
        entries = entries.len(),
        "document processed"
    );

    let doc = ProcessedDocument {
        pages,
        skipped_pages,
        blocks: blocks.len(),
        malformed,
        rejected,
        entries,
    };
    if let Err(e) = doc.ensure_nonempty() {
        warn!("{e}");
    }
    doc
}

// ── Tests ──
