use std::collections::HashMap;

use super::entry::LexicalEntry;

/// One entry per headword: the one with the longest `full_content` wins,
/// earlier entries win ties. Output keeps first-seen headword order.
pub fn dedupe(entries: Vec<LexicalEntry>) -> Vec<LexicalEntry> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<LexicalEntry> = Vec::with_capacity(entries.len());

    for entry in entries {
        match index.get(&entry.headword) {
            Some(&i) => {
                if entry.full_content.chars().count() > kept[i].full_content.chars().count() {
                    kept[i] = entry;
                }
            }
            None => {
                index.insert(entry.headword.clone(), kept.len());
                kept.push(entry);
            }
        }
    }
    kept
}
