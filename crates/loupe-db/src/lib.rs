pub mod index;
pub mod loader;
pub mod types;

use std::path::Path;

pub use self::index::{IndexError, ItemIndex, StatIndex};
pub use self::loader::{LoadError, load_ndjson};
pub use self::types::{ItemDefinition, StatMatcher, StatTemplate};

/// Both catalogues, indexed and ready for lookups.
///
/// Built once at startup and treated as immutable afterwards; a reload is
/// a new `Catalogue` swapped in by the owner, never an in-place mutation.
pub struct Catalogue {
    pub items: ItemIndex,
    pub stats: StatIndex,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Index(#[from] IndexError),
}

impl Catalogue {
    /// Load both catalogue files and build their lookup indices.
    pub fn load(items_path: &Path, stats_path: &Path) -> Result<Self, CatalogueError> {
        let items: Vec<ItemDefinition> = load_ndjson(items_path)?;
        let stats: Vec<StatTemplate> = load_ndjson(stats_path)?;

        let items = ItemIndex::build(items);
        let stats = StatIndex::build(stats)?;

        if items.is_empty() || stats.is_empty() {
            tracing::warn!("empty catalogue, most captures will not match");
        }
        tracing::info!(items = items.len(), stats = stats.len(), "catalogues loaded");

        Ok(Self { items, stats })
    }
}
