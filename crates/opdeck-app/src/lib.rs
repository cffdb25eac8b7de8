//! # opdeck-app - Application State and Orchestration
//!
//! The console's engine: state, messages, and the update loop, independent
//! of any terminal library. The TUI layer feeds [`Message`]s in and renders
//! from [`AppState`]; side effects come back out as dispatcher actions and
//! [`handler::OutboundSignal`]s for the embedding host.
//!
//! ## Public API
//!
//! ### State (`state`, `panel`, `controls`, `items`)
//! - [`AppState`] - Complete console state
//! - [`Panel`] - The five fixed settings panels
//! - [`Control`] - One renderable/activatable row
//!
//! ### Update loop (`message`, `handler`, `process`)
//! - [`Message`] - Everything that can happen to the console
//! - [`handler::update()`] - Pure-ish state transition
//! - [`process::process_message()`] - Transition plus side-effect dispatch
//!
//! ### Services (`github`, `watcher`, `config`)
//! - [`github::spawn_fetch()`] - Async public key fetch
//! - [`watcher::ParamWatcher`] - Debounced parameter file watcher
//! - [`config::Settings`] - TOML configuration with defaults

pub mod config;
pub mod controls;
pub mod github;
pub mod handler;
pub mod input_key;
pub mod items;
pub mod message;
pub mod panel;
pub mod process;
pub mod state;
pub mod watcher;

pub use config::Settings;
pub use controls::{ButtonAction, Control, ControlKind};
pub use handler::{OutboundSignal, UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use panel::Panel;
pub use state::{AppState, CarSelect, Modal};
