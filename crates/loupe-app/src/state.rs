use std::sync::Arc;

use loupe_config::Config;
use loupe_db::Catalogue;
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    catalogue: RwLock<Arc<Catalogue>>,
}

impl AppState {
    pub fn new(config: Config, catalogue: Catalogue) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            catalogue: RwLock::new(Arc::new(catalogue)),
        }
    }

    /// Current catalogue snapshot. In-flight parses keep the snapshot
    /// they grabbed even if a reload swaps in a new one underneath.
    pub async fn catalogue(&self) -> Arc<Catalogue> {
        Arc::clone(&*self.catalogue.read().await)
    }

    pub async fn swap_catalogue(&self, next: Arc<Catalogue>) {
        *self.catalogue.write().await = next;
    }
}
