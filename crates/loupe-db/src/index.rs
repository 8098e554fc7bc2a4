use std::collections::HashMap;

use regex::{Regex, RegexBuilder};

use crate::types::{ItemDefinition, StatTemplate};

/// Placeholder symbol in matcher strings standing in for a numeric value.
const PLACEHOLDER: char = '#';

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("failed to compile matcher {matcher:?} of stat {stat}: {source}")]
    Pattern {
        stat: String,
        matcher: String,
        source: regex::Error,
    },
}

/// Name lookup over the item catalogue.
///
/// Both `name` and `ref_name` register as keys for the same record, after
/// lowercase/trim normalization. On a key collision the later catalogue
/// record wins; the key keeps its original position in iteration order.
pub struct ItemIndex {
    items: Vec<ItemDefinition>,
    by_key: HashMap<String, usize>,
    keys: Vec<String>,
}

pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl ItemIndex {
    pub fn build(items: Vec<ItemDefinition>) -> Self {
        let mut by_key: HashMap<String, usize> = HashMap::new();
        let mut keys = Vec::new();

        for (idx, item) in items.iter().enumerate() {
            for raw in [&item.name, &item.ref_name] {
                let key = normalize_key(raw);
                if key.is_empty() {
                    continue;
                }
                match by_key.insert(key.clone(), idx) {
                    None => keys.push(key),
                    Some(prev) if prev != idx => {
                        tracing::warn!(
                            key = %key,
                            shadowed = %items[prev].name,
                            winner = %item.name,
                            "item key collision, later record wins"
                        );
                    }
                    Some(_) => {}
                }
            }
        }

        Self {
            items,
            by_key,
            keys,
        }
    }

    /// Exact lookup by an already-normalized key.
    pub fn get(&self, key: &str) -> Option<&ItemDefinition> {
        self.by_key.get(key).map(|&idx| &self.items[idx])
    }

    /// Keys in first-insertion order. Deterministic; the substring
    /// fallback in the resolver depends on this ordering being stable.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One stat template with its matchers compiled to anchored patterns.
pub struct CompiledTemplate {
    template: StatTemplate,
    patterns: Vec<Regex>,
}

impl CompiledTemplate {
    pub fn template(&self) -> &StatTemplate {
        &self.template
    }

    /// Patterns in matcher declaration order.
    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }
}

/// Pattern lookup over the stat-template catalogue.
///
/// Entries keep exact catalogue order: templates in declaration order,
/// matchers in declaration order within each. First match wins during
/// resolution, so this ordering is semantics, not an artifact.
pub struct StatIndex {
    entries: Vec<CompiledTemplate>,
}

impl StatIndex {
    pub fn build(templates: Vec<StatTemplate>) -> Result<Self, IndexError> {
        let mut entries = Vec::with_capacity(templates.len());

        for template in templates {
            let mut patterns = Vec::with_capacity(template.matchers.len());
            for matcher in &template.matchers {
                let pattern =
                    compile_matcher(&matcher.string).map_err(|source| IndexError::Pattern {
                        stat: template.reference.clone(),
                        matcher: matcher.string.clone(),
                        source,
                    })?;
                patterns.push(pattern);
            }
            entries.push(CompiledTemplate { template, patterns });
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CompiledTemplate] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Escape a matcher string literally, turning each `#` placeholder into a
/// digit-capturing group, anchored to the start of the line.
fn compile_matcher(matcher: &str) -> Result<Regex, regex::Error> {
    let body = matcher
        .split(PLACEHOLDER)
        .map(|part| regex::escape(part))
        .collect::<Vec<_>>()
        .join(r"(\d+)");

    RegexBuilder::new(&format!("^{body}"))
        .case_insensitive(true)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StatMatcher;

    fn item(name: &str, ref_name: &str) -> ItemDefinition {
        ItemDefinition {
            name: name.to_string(),
            ref_name: ref_name.to_string(),
            extra: serde_json::Map::new(),
        }
    }

    fn template(id: &str, reference: &str, matchers: &[&str]) -> StatTemplate {
        StatTemplate {
            id: id.to_string(),
            reference: reference.to_string(),
            matchers: matchers
                .iter()
                .map(|string| StatMatcher {
                    string: string.to_string(),
                    negate: None,
                })
                .collect(),
        }
    }

    #[test]
    fn registers_name_and_ref_name() {
        let index = ItemIndex::build(vec![item("Exalted Orb", "CurrencyAddModToRare")]);

        assert_eq!(index.get("exalted orb").unwrap().name, "Exalted Orb");
        assert_eq!(
            index.get("currencyaddmodtorare").unwrap().name,
            "Exalted Orb"
        );
    }

    #[test]
    fn skips_empty_ref_name() {
        let index = ItemIndex::build(vec![item("Chaos Orb", "")]);

        assert_eq!(index.keys().count(), 1);
        assert!(index.get("chaos orb").is_some());
    }

    #[test]
    fn later_record_wins_key_collisions() {
        let index = ItemIndex::build(vec![
            item("Exalted Orb", "shared"),
            item("Chaos Orb", "shared"),
        ]);

        assert_eq!(index.get("shared").unwrap().name, "Chaos Orb");
        // Shadowed key keeps its original iteration position.
        let keys: Vec<_> = index.keys().collect();
        assert_eq!(keys, ["exalted orb", "shared", "chaos orb"]);
    }

    #[test]
    fn stat_patterns_are_anchored_and_case_insensitive() {
        let index = StatIndex::build(vec![template("life", "# to maximum Life", &[
            "+# to maximum Life",
        ])])
        .unwrap();

        let pattern = &index.entries()[0].patterns()[0];
        assert!(pattern.is_match("+45 TO MAXIMUM LIFE"));
        assert!(!pattern.is_match("grants +45 to maximum Life"));
    }

    #[test]
    fn placeholder_captures_digits() {
        let index = StatIndex::build(vec![template("res", "+#% to Fire Resistance", &[
            "+#% to Fire Resistance",
        ])])
        .unwrap();

        let caps = index.entries()[0].patterns()[0]
            .captures("+30% to Fire Resistance")
            .unwrap();
        assert_eq!(&caps[1], "30");
    }

    #[test]
    fn literal_regex_characters_are_escaped() {
        let index = StatIndex::build(vec![template("weird", "weird", &["(#-#) Added Damage"])])
            .unwrap();

        let pattern = &index.entries()[0].patterns()[0];
        assert!(pattern.is_match("(3-7) Added Damage"));
        assert!(!pattern.is_match("37 Added Damage"));
    }

    #[test]
    fn empty_catalogues_build_empty_indices() {
        let items = ItemIndex::build(Vec::new());
        assert!(items.is_empty());
        assert_eq!(items.len(), 0);

        let stats = StatIndex::build(Vec::new()).unwrap();
        assert!(stats.is_empty());
        assert_eq!(stats.len(), 0);
    }

    #[test]
    fn preserves_catalogue_order() {
        let index = StatIndex::build(vec![
            template("a", "stat.a", &["# to Armour"]),
            template("b", "stat.b", &["# to Armour and Evasion"]),
        ])
        .unwrap();

        let refs: Vec<_> = index
            .entries()
            .iter()
            .map(|e| e.template().reference.as_str())
            .collect();
        assert_eq!(refs, ["stat.a", "stat.b"]);
    }
}
