use std::path::Path;

use crate::error::LexiconError;

const PAGE_BREAK: char = '\x0c';

/// Raw text lines of one source page, as produced by the text extractor.
#[derive(Debug, Clone)]
pub struct Page {
    pub index: usize,
    pub lines: Vec<String>,
}

/// Load pages from `.json` (`[[line, ...], ...]`) or form-feed separated text.
pub fn load_pages(path: &Path) -> Result<Vec<Page>, LexiconError> {
    let raw = std::fs::read_to_string(path).map_err(|source| LexiconError::UnreadableSource {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        let pages: Vec<Vec<String>> =
            serde_json::from_str(&raw).map_err(|source| LexiconError::MalformedPages {
                path: path.to_path_buf(),
                source,
            })?;
        return Ok(pages
            .into_iter()
            .enumerate()
            .map(|(index, lines)| Page { index, lines })
            .collect());
    }
    Ok(split_pages(&raw))
}

pub fn split_pages(text: &str) -> Vec<Page> {
    text.replace("\r\n", "\n")
        .split(PAGE_BREAK)
        .enumerate()
        .map(|(index, page)| Page {
            index,
            lines: page.split('\n').map(|l| l.to_string()).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn form_feed_splits_pages() {
        let pages = split_pages("pei: agua\r\nmamo: ojo\x0c12\nhãro: hermano");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].lines, vec!["pei: agua", "mamo: ojo"]);
        assert_eq!(pages[1].index, 1);
    }

    #[test]
    fn json_pages() {
        let mut f = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(f, r#"[["pei: agua"], ["mamo: ojo", "12"]]"#).unwrap();
        let pages = load_pages(f.path()).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].lines[1], "12");
    }

    #[test]
    fn malformed_json_reported() {
        let mut f = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(f, "{{not json").unwrap();
        let err = load_pages(f.path()).unwrap_err();
        assert!(matches!(err, LexiconError::MalformedPages { .. }));
    }

    #[test]
    fn missing_file_is_unreadable_source() {
        let err = load_pages(Path::new("tests/fixtures/does_not_exist.txt")).unwrap_err();
        assert!(matches!(err, LexiconError::UnreadableSource { .. }));
    }
}
