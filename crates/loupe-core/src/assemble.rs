use serde::Serialize;

use loupe_db::Catalogue;

use crate::resolve::{StatEntry, resolve_item, resolve_stat};

/// Structured output for one recognized text block.
///
/// Carries the matched item's fields (opaque catalogue attributes
/// included) plus the stat lines that resolved, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedItem {
    pub name: String,
    #[serde(rename = "refName")]
    pub ref_name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
    pub stats: Vec<StatEntry>,
}

#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    #[error("capture text contains no usable lines")]
    EmptyInput,

    #[error("could not identify item from {0:?}")]
    ItemNotFound(String),
}

/// Turn a raw multi-line OCR block into a `ParsedItem`.
///
/// The first non-blank line names the item; failure there fails the whole
/// parse, because a record without an identified base item is useless
/// downstream. Every later line is matched independently against the stat
/// index and unmatched lines are dropped without error. OCR noise is the
/// normal case, not the exceptional one.
pub fn assemble(raw_text: &str, catalogue: &Catalogue) -> Result<ParsedItem, AssembleError> {
    let mut lines = raw_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty());

    let name_line = lines.next().ok_or(AssembleError::EmptyInput)?;

    let item = resolve_item(&catalogue.items, name_line)
        .ok_or_else(|| AssembleError::ItemNotFound(name_line.to_string()))?;

    let mut stats = Vec::new();
    for line in lines {
        if let Some(entry) = resolve_stat(&catalogue.stats, line) {
            stats.push(entry);
        } else {
            tracing::trace!(line, "line matched no stat template");
        }
    }

    Ok(ParsedItem {
        name: item.name.clone(),
        ref_name: item.ref_name.clone(),
        extra: item.extra.clone(),
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use loupe_db::{ItemDefinition, ItemIndex, StatIndex, StatMatcher, StatTemplate};

    fn catalogue() -> Catalogue {
        let mut extra = serde_json::Map::new();
        extra.insert("icon".to_string(), "amulet.png".into());

        let items = vec![
            ItemDefinition {
                name: "Agate Amulet".to_string(),
                ref_name: "agate".to_string(),
                extra,
            },
            ItemDefinition {
                name: "Exalted Orb".to_string(),
                ref_name: String::new(),
                extra: serde_json::Map::new(),
            },
        ];

        let stats = vec![
            template("life", "# to maximum Life", "+# to maximum Life"),
            template("str", "# to Strength", "+# to Strength"),
            template("res", "#% to Fire Resistance", "+#% to Fire Resistance"),
        ];

        Catalogue {
            items: ItemIndex::build(items),
            stats: StatIndex::build(stats).unwrap(),
        }
    }

    fn template(id: &str, reference: &str, matcher: &str) -> StatTemplate {
        StatTemplate {
            id: id.to_string(),
            reference: reference.to_string(),
            matchers: vec![StatMatcher {
                string: matcher.to_string(),
                negate: None,
            }],
        }
    }

    #[test]
    fn assembles_item_with_stats_in_input_order() {
        let parsed = assemble(
            "Agate Amulet\n+30% to Fire Resistance\n+45 to maximum Life",
            &catalogue(),
        )
        .unwrap();

        assert_eq!(parsed.name, "Agate Amulet");
        assert_eq!(parsed.extra["icon"], "amulet.png");
        let ids: Vec<_> = parsed.stats.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["res", "life"]);
        assert_eq!(parsed.stats[0].value, 30);
        assert_eq!(parsed.stats[1].value, 45);
    }

    #[test]
    fn unmatched_middle_line_preserves_order_of_the_rest() {
        let parsed = assemble(
            "Agate Amulet\n+45 to maximum Life\nsome decorative text\n+12 to Strength",
            &catalogue(),
        )
        .unwrap();

        let ids: Vec<_> = parsed.stats.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["life", "str"]);
    }

    #[test]
    fn noise_lines_are_dropped_silently() {
        let parsed = assemble(
            "Agate Amulet\ngarbage\n+45 to maximum Life\nmore garbage\n+12 to Strength",
            &catalogue(),
        )
        .unwrap();

        assert_eq!(parsed.stats.len(), 2);
    }

    #[test]
    fn unknown_item_fails_even_with_matchable_stats() {
        let err = assemble("Totally Unknown Name\n+10 to Strength", &catalogue()).unwrap_err();
        assert!(matches!(err, AssembleError::ItemNotFound(_)));
    }

    #[test]
    fn blank_lines_are_ignored() {
        let parsed = assemble(
            "\n  \nAgate Amulet\n\n+45 to maximum Life\n",
            &catalogue(),
        )
        .unwrap();

        assert_eq!(parsed.name, "Agate Amulet");
        assert_eq!(parsed.stats.len(), 1);
    }

    #[test]
    fn empty_input_is_its_own_error() {
        let err = assemble("\n   \n", &catalogue()).unwrap_err();
        assert!(matches!(err, AssembleError::EmptyInput));
    }

    #[test]
    fn noisy_name_line_still_resolves() {
        let parsed = assemble("  EXALTED ORB!! ", &catalogue()).unwrap();
        assert_eq!(parsed.name, "Exalted Orb");
        assert!(parsed.stats.is_empty());
    }

    #[test]
    fn assembly_is_deterministic() {
        let text = "Agate Amulet\n+45 to maximum Life\n+12 to Strength";
        let cat = catalogue();

        let first = serde_json::to_string(&assemble(text, &cat).unwrap()).unwrap();
        let second = serde_json::to_string(&assemble(text, &cat).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn serializes_with_ref_keys() {
        let parsed = assemble("Agate Amulet\n+45 to maximum Life", &catalogue()).unwrap();
        let json = serde_json::to_value(&parsed).unwrap();

        assert_eq!(json["refName"], "agate");
        assert_eq!(json["stats"][0]["ref"], "# to maximum Life");
        assert_eq!(json["stats"][0]["value"], 45);
    }
}
