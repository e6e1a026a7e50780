use crate::events::AppEvent;
use async_channel::Sender;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, BufReader};

/// Reads one event per line until EOF or `quit`, then sends `Quit`.
///
/// Blank lines and `#` comments are skipped; malformed lines are logged and dropped.
pub async fn run_reader<R>(input: R, tx: Sender<AppEvent>)
where
    R: AsyncRead + Unpin,
{
    forward_lines(BufReader::new(input), &tx).await;
    let _ = tx.send(AppEvent::Quit).await;
}

async fn forward_lines<R>(reader: R, tx: &Sender<AppEvent>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return,
            Err(e) => {
                log::error!("Failed to read input: {}", e);
                return;
            }
        };

        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line.parse::<AppEvent>() {
            Ok(AppEvent::Quit) => return,
            Ok(event) => {
                if tx.send(event).await.is_err() {
                    return;
                }
            }
            Err(e) => log::warn!("Ignoring input line '{}': {}", line, e),
        }
    }
}
