//! Main event loop
//!
//! Owns the terminal, the message channels, and the parameter watcher.
//! Each iteration draws the current state, polls for one terminal event,
//! and drains any messages posted by background tasks.

use std::path::PathBuf;

use opdeck_app::handler::OutboundSignal;
use opdeck_app::message::Message;
use opdeck_app::process::{process_message, PendingEffects};
use opdeck_app::state::AppState;
use opdeck_app::watcher::{ParamWatcher, WatcherConfig};
use opdeck_app::Settings;
use opdeck_core::prelude::*;
use opdeck_core::Params;
use tokio::sync::mpsc;

use crate::{event, render};

/// Install a panic hook that restores the terminal before printing
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));
}

/// Run the settings console until the shell closes.
pub async fn run(params_dir: PathBuf, settings: Settings) -> Result<()> {
    let params = Params::new(params_dir).context("opening parameter store")?;
    let mut state = AppState::new(params.clone(), settings);

    let (message_tx, mut message_rx) = mpsc::channel::<Message>(100);
    let (signal_tx, mut signal_rx) = mpsc::channel::<OutboundSignal>(16);
    let mut pending = PendingEffects::new();

    let mut watcher = ParamWatcher::new(&params, WatcherConfig::default());
    if let Err(e) = watcher.start(message_tx.clone()) {
        warn!(error = %e, "parameter watcher not started");
    }

    install_panic_hook();
    let mut terminal = ratatui::init();

    // Entering the shell resets navigation to the first panel.
    process_message(&mut state, Message::Shown, &message_tx, &signal_tx, &mut pending);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| render::view(frame, &state)) {
            break Err(Error::terminal(e.to_string()));
        }

        match event::poll() {
            Ok(Some(message)) => {
                process_message(&mut state, message, &message_tx, &signal_tx, &mut pending)
            }
            Ok(None) => {}
            Err(e) => break Err(e),
        }

        while let Ok(message) = message_rx.try_recv() {
            process_message(&mut state, message, &message_tx, &signal_tx, &mut pending);
        }

        let mut close = false;
        while let Ok(signal) = signal_rx.try_recv() {
            match signal {
                OutboundSignal::CloseSettings => {
                    info!("settings shell closing");
                    close = true;
                }
                // With no embedding host these are informational only.
                OutboundSignal::ShowDriverCamera => info!("driver camera requested"),
                OutboundSignal::ReviewTrainingGuide => info!("training guide requested"),
                OutboundSignal::SelectedCarChanged => info!("car selection changed"),
            }
        }

        if close || state.should_quit {
            break Ok(());
        }
    };

    watcher.stop();
    ratatui::restore();

    // Scheduled writes (soft-restart flag, delayed reboots) must land even
    // though the shell closed first.
    if !pending.is_empty() {
        info!(count = pending.len(), "waiting for scheduled writes");
    }
    pending.drain().await;

    result
}
