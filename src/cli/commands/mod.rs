//! Subcommand implementations.

use anyhow::Result;
use std::sync::Arc;

use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};
use crate::llm::{ModelClient, OpenAiClient};

/// Catalog command handler.
pub mod catalog;

/// Concierge chat command handler.
pub mod chat;

/// Configure command handler.
pub mod configure;

/// Provider listing command handler.
pub mod providers;

/// Shipping estimate command handler.
pub mod ship;

/// Loads the config file and resolves it against CLI options.
pub fn load_config(options: &ResolveOptions) -> Result<ResolvedConfig> {
    let config_file = ConfigManager::new().load_or_default()?;
    resolve_config(options, &config_file)
}

/// Builds the model client for a resolved configuration.
pub fn connect(config: &ResolvedConfig) -> Arc<dyn ModelClient> {
    Arc::new(OpenAiClient::new(
        config.endpoint.clone(),
        config.api_key.clone(),
        config.model.clone(),
        config.image_model.clone(),
    ))
}
