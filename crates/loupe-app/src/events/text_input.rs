use kanal::AsyncSender;
use loupe_core::types::{AppEvent, TextSource};
use loupe_core::{AssembleError, assemble};
use loupe_db::Catalogue;

pub async fn handle_text_input(
    text: &str,
    source: TextSource,
    catalogue: &Catalogue,
    output_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    tracing::debug!(?source, chars = text.len(), "parsing capture");

    match assemble(text, catalogue) {
        Ok(item) => {
            tracing::debug!(item = %item.name, stats = item.stats.len(), "item assembled");
            output_tx.send(AppEvent::ShowItem(item)).await?;
        }
        Err(err @ AssembleError::ItemNotFound(_)) => {
            // Expected for captures of non-item text; never a partial record.
            tracing::warn!(%err, "dropping capture");
        }
        Err(AssembleError::EmptyInput) => {
            tracing::debug!("empty capture, nothing to parse");
        }
    }

    Ok(())
}
