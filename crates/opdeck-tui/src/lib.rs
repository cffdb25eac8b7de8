//! opdeck-tui - Terminal UI for the settings console
//!
//! This crate provides the ratatui-based terminal interface. It drives the
//! opdeck-app update loop with terminal events and renders the panels,
//! modals, and car selection screen.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod theme;
pub mod widgets;

// Re-export main entry point
pub use runner::run;
