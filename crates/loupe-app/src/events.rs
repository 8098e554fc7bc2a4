use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use loupe_core::types::AppEvent;

use crate::state::AppState;

pub mod reload;
pub mod text_input;

use reload::handle_reload;
use text_input::handle_text_input;

/// App's main loop: one event in, at most one record out.
pub async fn event_loop(
    state: Arc<AppState>,
    input_rx: AsyncReceiver<AppEvent>,
    output_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    loop {
        let Ok(event) = input_rx.recv().await else {
            // Input side closed; drop output_tx so the writer can finish.
            return Ok(());
        };

        match event {
            AppEvent::TextInput { text, source } => {
                let catalogue = state.catalogue().await;
                handle_text_input(&text, source, &catalogue, &output_tx).await?;
            }
            AppEvent::Reload => handle_reload(&state).await,
            AppEvent::ShowItem(_) => {
                // Produced by this loop, never consumed here.
            }
        }
    }
}
