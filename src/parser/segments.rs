use super::lines::{Classification, RawLine};
use crate::config::PipelineOptions;
use crate::source::Page;

/// Contiguous lines hypothesized to form one dictionary entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryBlock {
    pub lines: Vec<RawLine>,
}

impl EntryBlock {
    pub fn page(&self) -> usize {
        self.lines.first().map(|l| l.page).unwrap_or_default()
    }

    pub fn joined(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Accumulates classified lines into entry blocks, one open block at a time.
#[derive(Debug, Default)]
pub struct Segmenter {
    current: Vec<RawLine>,
    blocks: Vec<EntryBlock>,
}

impl Segmenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: RawLine, class: Classification) {
        match class {
            Classification::EntryStart => {
                self.close();
                self.current.push(line);
            }
            Classification::Continuation => {
                // OCR repeats lines across page breaks
                match self.current.last() {
                    Some(last) if last.text == line.text => {}
                    Some(_) => self.current.push(line),
                    None => {}
                }
            }
            Classification::Noise => {}
        }
    }

    pub fn finish(mut self) -> Vec<EntryBlock> {
        self.close();
        self.blocks
    }

    fn close(&mut self) {
        if !self.current.is_empty() {
            self.blocks.push(EntryBlock {
                lines: std::mem::take(&mut self.current),
            });
        }
    }
}

/// Cluster a classified line stream into entry blocks.
pub fn segment(lines: Vec<(RawLine, Classification)>) -> Vec<EntryBlock> {
    let mut segmenter = Segmenter::new();
    for (line, class) in lines {
        segmenter.push(line, class);
    }
    segmenter.finish()
}

/// Index, contents, bibliography and similar pages ahead of the entries.
pub fn is_front_matter(page: &Page, opts: &PipelineOptions) -> bool {
    page.lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .take(opts.front_matter_scan_lines)
        .any(|l| {
            let lower = l.to_lowercase();
            opts.front_matter_keywords.iter().any(|kw| lower.contains(kw.as_str()))
        })
}

// ── Tests ──
