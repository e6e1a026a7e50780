use crate::events::AppEvent;
use async_channel::Sender;
use std::thread;
use tokio::runtime::Runtime;

/// Runs input and config watching on a background thread.
///
/// The thread exits once stdin is exhausted, dropping its senders so the
/// main loop sees the channel close.
pub fn start_background_services(tx: Sender<AppEvent>, watch_config: bool) {
    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create Tokio runtime: {}", e);
                return;
            }
        };

        rt.block_on(async {
            if watch_config {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::config::run_async_watcher(tx).await;
                });
            }

            crate::sys::input::run_reader(tokio::io::stdin(), tx).await;
        });
    });
}
