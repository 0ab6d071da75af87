//! Provider listing command handler.

use anyhow::{Result, bail};

use crate::config::{ConfigFile, ConfigManager, DEFAULT_PROVIDER, ProviderConfig};
use crate::ui::Style;

/// Prints known providers to stdout.
///
/// The built-in provider is listed unless the config file overrides it.
/// If `specific_provider` is given, shows details for that provider only.
pub fn print_providers(specific_provider: Option<&str>) -> Result<()> {
    let config = ConfigManager::new().load_or_default()?;
    let providers = known_providers(&config);
    let default_provider = config.aura.provider.as_deref().unwrap_or(DEFAULT_PROVIDER);

    if let Some(name) = specific_provider {
        let Some((_, provider, builtin)) = providers.iter().find(|(n, _, _)| n == name) else {
            bail!("Provider '{name}' not found");
        };
        print_provider_details(name, provider, name == default_provider, *builtin);
        return Ok(());
    }

    println!("{}", Style::header("Providers"));
    for (name, provider, builtin) in &providers {
        println!(
            "  {}{}{}",
            Style::value(name),
            if name == default_provider {
                format!(" {}", Style::default_marker())
            } else {
                String::new()
            },
            if *builtin {
                Style::secondary(" (built-in)")
            } else {
                String::new()
            }
        );
        println!("    {} {}", Style::label("endpoint:"), provider.endpoint);
        if !provider.models.is_empty() {
            println!(
                "    {} {}",
                Style::label("models:"),
                provider.models.join(", ")
            );
        }
    }
    Ok(())
}

/// Configured providers sorted by name, plus the built-in one when it is
/// not overridden. The flag marks the built-in entry.
fn known_providers(config: &ConfigFile) -> Vec<(String, ProviderConfig, bool)> {
    let mut providers: Vec<_> = config
        .providers
        .iter()
        .map(|(name, provider)| (name.clone(), provider.clone(), false))
        .collect();
    if !config.providers.contains_key(DEFAULT_PROVIDER) {
        providers.push((DEFAULT_PROVIDER.to_string(), ProviderConfig::builtin(), true));
    }
    providers.sort_by(|a, b| a.0.cmp(&b.0));
    providers
}

fn print_provider_details(name: &str, provider: &ProviderConfig, is_default: bool, builtin: bool) {
    println!(
        "{} {}{}",
        Style::header("Provider:"),
        Style::value(name),
        if is_default {
            format!(" {}", Style::default_marker())
        } else {
            String::new()
        }
    );
    if builtin {
        println!("  {}", Style::secondary("(built-in)"));
    }
    println!("  {} {}", Style::label("endpoint ="), provider.endpoint);
    if provider.requires_api_key() {
        let has_key = provider.get_api_key().is_some();
        println!(
            "  {} {}",
            Style::label("api_key  ="),
            if has_key {
                Style::success("(set)")
            } else {
                Style::warning("(not set)")
            }
        );
    }
    if provider.models.is_empty() {
        println!(
            "  {} {}",
            Style::label("models   ="),
            Style::secondary("(none configured)")
        );
    } else {
        println!("  {}", Style::label("models:"));
        for model in &provider.models {
            println!("    - {model}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(endpoint: &str) -> ProviderConfig {
        ProviderConfig {
            endpoint: endpoint.to_string(),
            api_key: None,
            api_key_env: None,
            models: vec![],
        }
    }

    #[test]
    fn test_known_providers_includes_builtin() {
        let providers = known_providers(&ConfigFile::default());
        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0].0, DEFAULT_PROVIDER);
        assert!(providers[0].2);
    }

    #[test]
    fn test_known_providers_sorted_and_override_builtin() {
        let mut config = ConfigFile::default();
        config
            .providers
            .insert("openai".to_string(), provider("http://proxy"));
        config
            .providers
            .insert("local".to_string(), provider("http://localhost:8080"));

        let providers = known_providers(&config);
        let names: Vec<_> = providers.iter().map(|(n, _, _)| n.as_str()).collect();
        assert_eq!(names, vec!["local", "openai"]);
        assert_eq!(providers[1].1.endpoint, "http://proxy");
        assert!(!providers[1].2);
    }
}
