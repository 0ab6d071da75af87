//! Configure command handler for editing default settings.

use anyhow::{Result, bail};
use inquire::{Select, Text};

use crate::config::{
    ConfigFile, ConfigManager, DEFAULT_IMAGE_MODEL, DEFAULT_MODEL, DEFAULT_PROVIDER,
    ProviderConfig,
};
use crate::i18n::SUPPORTED_LANGUAGES;
use crate::ui::{Style, handle_prompt_cancellation};

/// Runs the configure command.
///
/// With `show`, prints the current settings. Otherwise lets the user
/// interactively pick the default provider, models and language.
pub fn run_configure(show: bool) -> Result<()> {
    let manager = ConfigManager::new();
    if show {
        let config = manager.load_or_default()?;
        print_current_defaults(&config, &manager);
        return Ok(());
    }
    handle_prompt_cancellation(configure(&manager))
}

fn configure(manager: &ConfigManager) -> Result<()> {
    let mut config = manager.load_or_default()?;

    print_current_defaults(&config, manager);

    let provider_names = provider_names(&config);
    let provider = select_provider(&provider_names, config.aura.provider.as_deref())?;

    let available_models = config
        .providers
        .get(&provider)
        .map_or_else(|| ProviderConfig::builtin().models, |p| p.models.clone());
    let model = select_model(&available_models, config.aura.model.as_deref())?;

    let image_model = Text::new("Image model:")
        .with_default(
            config
                .aura
                .image_model
                .as_deref()
                .unwrap_or(DEFAULT_IMAGE_MODEL),
        )
        .prompt()?;

    let language = select_language(config.aura.language.as_deref())?;

    config.aura.provider = Some(provider);
    config.aura.model = Some(model);
    config.aura.image_model = Some(image_model.trim().to_string());
    config.aura.language = Some(language);

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display())
    );

    Ok(())
}

/// Configured provider names plus the built-in one, sorted.
fn provider_names(config: &ConfigFile) -> Vec<String> {
    let mut names: Vec<String> = config.providers.keys().cloned().collect();
    if !config.providers.contains_key(DEFAULT_PROVIDER) {
        names.push(DEFAULT_PROVIDER.to_string());
    }
    names.sort();
    names
}

fn print_current_defaults(config: &ConfigFile, manager: &ConfigManager) {
    let not_set = || Style::secondary("(not set)");

    println!("{}", Style::header("Current defaults"));
    println!(
        "  {}     {}",
        Style::label("provider"),
        config.aura.provider.as_deref().map_or_else(not_set, Style::value)
    );
    println!(
        "  {}        {}",
        Style::label("model"),
        config.aura.model.as_deref().map_or_else(not_set, Style::value)
    );
    println!(
        "  {}  {}",
        Style::label("image_model"),
        config
            .aura
            .image_model
            .as_deref()
            .map_or_else(not_set, Style::value)
    );
    println!(
        "  {}     {}",
        Style::label("language"),
        config.aura.language.as_deref().map_or_else(not_set, Style::value)
    );
    println!(
        "  {}         {}",
        Style::label("file"),
        Style::secondary(manager.config_path().display())
    );
    println!();
}

fn select_provider(providers: &[String], default: Option<&str>) -> Result<String> {
    let default = default.unwrap_or(DEFAULT_PROVIDER);
    let default_index = providers.iter().position(|p| p == default).unwrap_or(0);

    let selection = Select::new("Default provider:", providers.to_vec())
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(selection)
}

fn select_model(available_models: &[String], default: Option<&str>) -> Result<String> {
    if available_models.is_empty() {
        // No models configured, fall back to text input
        let model = Text::new("Default model:")
            .with_help_message("Enter the model name")
            .with_default(default.unwrap_or(DEFAULT_MODEL))
            .prompt()?;

        if model.trim().is_empty() {
            bail!("Model name cannot be empty");
        }

        Ok(model.trim().to_string())
    } else {
        let default_index = default
            .and_then(|d| available_models.iter().position(|m| m == d))
            .unwrap_or(0);

        let selection = Select::new("Default model:", available_models.to_vec())
            .with_starting_cursor(default_index)
            .prompt()?;

        Ok(selection)
    }
}

fn select_language(default: Option<&str>) -> Result<String> {
    // Build options with format "code - Name"
    let options: Vec<String> = SUPPORTED_LANGUAGES
        .iter()
        .map(|(code, name)| format!("{code} - {name}"))
        .collect();

    let default_index = default
        .and_then(|d| {
            SUPPORTED_LANGUAGES.iter().position(|(code, name)| {
                code.eq_ignore_ascii_case(d) || name.eq_ignore_ascii_case(d)
            })
        })
        .or_else(|| SUPPORTED_LANGUAGES.iter().position(|(code, _)| *code == "en"))
        .unwrap_or(0);

    let selection = Select::new("Storefront language:", options)
        .with_starting_cursor(default_index)
        .prompt()?;

    let code = selection.split(" - ").next().unwrap_or(&selection);
    Ok(code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_names_always_offer_builtin() {
        assert_eq!(provider_names(&ConfigFile::default()), vec!["openai"]);

        let mut config = ConfigFile::default();
        config.providers.insert(
            "local".to_string(),
            ProviderConfig {
                endpoint: "http://localhost:8080".to_string(),
                api_key: None,
                api_key_env: None,
                models: vec![],
            },
        );
        assert_eq!(provider_names(&config), vec!["local", "openai"]);
    }
}
