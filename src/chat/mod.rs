//! Interactive concierge mode.
//!
//! Provides a REPL-style interface with slash commands for the cart,
//! photo attachments and the storefront language.

/// Slash command parsing and autocomplete.
pub mod command;
mod session;
mod ui;

pub use session::ChatSession;
