use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use loupe_db::{ItemDefinition, ItemIndex, StatIndex};

/// One matched stat line, ready for display.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatEntry {
    pub id: String,
    #[serde(rename = "ref")]
    pub reference: String,
    pub value: i64,
}

/// Normalize a raw OCR candidate for name lookup.
///
/// OCR frequently injects garbage glyphs at line boundaries, so leading
/// and trailing non-alphabetic characters are stripped before the
/// lowercase/trim pass. NFKC first, matching the rest of the pipeline.
pub fn clean_candidate(raw: &str) -> String {
    let text: String = raw.nfkc().collect();
    text.trim_matches(|c: char| !c.is_ascii_alphabetic())
        .to_lowercase()
}

/// Find the item a noisy candidate string refers to.
///
/// Exact lookup of the cleaned candidate first; otherwise a substring
/// pass over the index keys (key inside candidate or candidate inside
/// key). The longest matching key wins, with ties broken by insertion
/// order, so resolution stays deterministic.
pub fn resolve_item<'a>(index: &'a ItemIndex, candidate: &str) -> Option<&'a ItemDefinition> {
    let cleaned = clean_candidate(candidate);
    if cleaned.is_empty() {
        return None;
    }

    if let Some(item) = index.get(&cleaned) {
        return Some(item);
    }

    let mut best: Option<&str> = None;
    for key in index.keys() {
        if !cleaned.contains(key) && !key.contains(cleaned.as_str()) {
            continue;
        }
        if best.is_none_or(|b| key.len() > b.len()) {
            best = Some(key);
        }
    }

    best.and_then(|key| index.get(key))
}

/// Match one line against the stat index and extract its value.
///
/// Patterns are tried in catalogue order, first match wins. A match whose
/// placeholder capture is missing or unparseable never yields an entry;
/// the line simply stays unmatched, which the assembler tolerates.
pub fn resolve_stat(index: &StatIndex, line: &str) -> Option<StatEntry> {
    for entry in index.entries() {
        let template = entry.template();
        for pattern in entry.patterns() {
            let Some(caps) = pattern.captures(line) else {
                continue;
            };

            let Some(capture) = caps.get(1) else {
                tracing::debug!(
                    stat = %template.reference,
                    line,
                    "matcher has no placeholder, skipping line"
                );
                continue;
            };

            match capture.as_str().parse::<i64>() {
                Ok(value) => {
                    return Some(StatEntry {
                        id: template.id.clone(),
                        reference: template.reference.clone(),
                        value,
                    });
                }
                Err(err) => {
                    // Abandons only this pattern; a later template may
                    // still claim the line.
                    tracing::warn!(
                        stat = %template.reference,
                        line,
                        %err,
                        "pattern matched but value failed to parse"
                    );
                    continue;
                }
            }
        }
    }

    None
}
