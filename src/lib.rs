//! # aura - Aura storefront CLI
//!
//! `aura` is the terminal storefront for Aura's lifestyle-tech products.
//! Every string it shows can be translated on the fly by an OpenAI-compatible
//! model, shipping is estimated from a postal code, and a concierge answers
//! questions and edits room photos to show products in place.
//!
//! ## Features
//!
//! - **Live translation**: Strings are cached per language and translated in
//!   debounced batches
//! - **Shipping estimates**: Postal-code suggestions and a cost breakdown in
//!   the destination's currency
//! - **Concierge**: Chat with an assistant that can edit your photos
//! - **Multiple providers**: Configure and switch between API providers
//!
//! ## Quick Start
//!
//! ```bash
//! # Browse the catalog in French
//! aura catalog --lang fr
//!
//! # Estimate shipping
//! aura ship 10115
//!
//! # Talk to the concierge
//! aura chat
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/aura/config.toml`:
//!
//! ```toml
//! [aura]
//! provider = "openai"
//! model = "gpt-4o-mini"
//! language = "fr"
//!
//! [providers.local]
//! endpoint = "http://localhost:8080"
//! models = ["gpt-4o-mini"]
//! ```

/// Interactive concierge mode.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Concierge conversation and the image-edit tool.
pub mod concierge;

/// Configuration file management and provider settings.
pub mod config;

/// Cancel-and-replace timers for bursty input.
pub mod debounce;

/// File system utilities.
pub mod fs;

/// Cached, batched storefront translation.
pub mod i18n;

/// Reading image attachments.
pub mod input;

/// Model client for OpenAI-compatible APIs.
pub mod llm;

/// Global output configuration (quiet mode, colors, logging).
pub mod output;

/// XDG-style path utilities for configuration and cache.
pub mod paths;

/// Postal-code lookup and shipping quotes.
pub mod shipping;

/// Product catalog and cart.
pub mod store;

/// Terminal UI components (spinner, colors).
pub mod ui;
