use serde::{Deserialize, Serialize};

/// One record of the item catalogue.
///
/// Only `name` and `ref_name` take part in matching. Everything else the
/// catalogue carries (category, icon, dimensions, trade tags, ...) is kept
/// opaque in `extra` and copied verbatim into the assembled record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub name: String,
    #[serde(rename = "refName", default)]
    pub ref_name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One phrasing of a stat, with `#` standing in for a numeric value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatMatcher {
    pub string: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negate: Option<bool>,
}

/// One record of the stat-template catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatTemplate {
    pub id: String,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub matchers: Vec<StatMatcher>,
}
