use kanal::{AsyncReceiver, AsyncSender};
use loupe_core::types::{AppEvent, TextSource};
use tokio::io::{AsyncBufReadExt, BufReader};

/// What to do with one incoming stdin line.
#[derive(Debug, PartialEq, Eq)]
enum InputAction {
    Append,
    Flush,
    Reload,
    Quit,
}

fn classify_line(line: &str) -> InputAction {
    match line.trim() {
        "" => InputAction::Flush,
        ":reload" => InputAction::Reload,
        ":quit" => InputAction::Quit,
        _ => InputAction::Append,
    }
}

/// Drain a buffered block into one text event payload, if it holds
/// anything beyond whitespace.
fn take_block(block: &mut Vec<String>) -> Option<String> {
    if block.iter().all(|line| line.trim().is_empty()) {
        block.clear();
        return None;
    }
    let text = block.join("\n");
    block.clear();
    Some(text)
}

/// Watch stdin for OCR text blocks separated by blank lines.
///
/// The capture side pipes each recognized region as one block. Lines
/// starting with `:` are control commands, not capture text.
pub async fn watch_stdin(input_tx: AsyncSender<AppEvent>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut block: Vec<String> = Vec::new();

    while let Some(line) = lines.next_line().await? {
        match classify_line(&line) {
            InputAction::Append => block.push(line),
            InputAction::Flush => {
                if let Some(text) = take_block(&mut block) {
                    input_tx
                        .send(AppEvent::TextInput {
                            text,
                            source: TextSource::Stdin,
                        })
                        .await?;
                }
            }
            InputAction::Reload => input_tx.send(AppEvent::Reload).await?,
            InputAction::Quit => break,
        }
    }

    if let Some(text) = take_block(&mut block) {
        input_tx
            .send(AppEvent::TextInput {
                text,
                source: TextSource::Stdin,
            })
            .await?;
    }

    Ok(())
}

/// Print assembled records to stdout, one JSON object per line.
pub async fn write_output(output_rx: AsyncReceiver<AppEvent>) -> anyhow::Result<()> {
    while let Ok(event) = output_rx.recv().await {
        if let AppEvent::ShowItem(item) = event {
            println!("{}", serde_json::to_string(&item)?);
        }
    }
    Ok(())
}
