use std::sync::Arc;

use loupe_db::Catalogue;

use crate::state::AppState;

/// Rebuild the catalogue and swap it in atomically. A failed reload keeps
/// the previous snapshot; parsing never observes a half-built index.
pub async fn handle_reload(state: &AppState) {
    let (items_path, stats_path) = {
        let config = state.config.read().await;
        (config.data.items_path(), config.data.stats_path())
    };

    match Catalogue::load(&items_path, &stats_path) {
        Ok(catalogue) => {
            state.swap_catalogue(Arc::new(catalogue)).await;
            tracing::info!("catalogues reloaded");
        }
        Err(err) => {
            tracing::error!(%err, "reload failed, keeping previous catalogues");
        }
    }
}
