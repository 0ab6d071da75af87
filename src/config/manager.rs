use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::i18n::{DEFAULT_TRANSLATE_DEBOUNCE, ENGLISH, resolve_language};
use crate::paths;
use crate::shipping::DEFAULT_ZIP_DEBOUNCE;
use crate::ui::Style;

/// Provider used when neither the CLI nor the config file names one.
pub const DEFAULT_PROVIDER: &str = "openai";
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_IMAGE_MODEL: &str = "gpt-image-1";

/// Default settings in the `[aura]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuraConfig {
    /// Default provider name.
    pub provider: Option<String>,
    /// Default chat model name.
    pub model: Option<String>,
    /// Model used for image edits.
    pub image_model: Option<String>,
    /// Storefront language (code or English name).
    pub language: Option<String>,
    /// Quiet period before a translation batch is sent.
    pub translate_debounce_ms: Option<u64>,
    /// Quiet period before a postal-code lookup is sent.
    pub zip_debounce_ms: Option<u64>,
}

/// Configuration for a model provider.
///
/// Each provider has an endpoint and optional API key settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The OpenAI-compatible API endpoint URL.
    pub endpoint: String,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// List of available models for this provider.
    #[serde(default)]
    pub models: Vec<String>,
}

impl ProviderConfig {
    /// The built-in provider used when nothing is configured.
    pub fn builtin() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            api_key_env: Some(DEFAULT_API_KEY_ENV.to_string()),
            models: vec![DEFAULT_MODEL.to_string()],
        }
    }

    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone()
    }

    /// Returns `true` if this provider requires an API key.
    pub const fn requires_api_key(&self) -> bool {
        self.api_key.is_some() || self.api_key_env.is_some()
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/aura/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Default settings.
    #[serde(default)]
    pub aura: AuraConfig,
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The selected provider name.
    pub provider_name: String,
    /// The API endpoint URL.
    pub endpoint: String,
    /// The chat model.
    pub model: String,
    /// The image-edit model.
    pub image_model: String,
    /// The API key (if required).
    pub api_key: Option<String>,
    /// The storefront language (English name).
    pub language: String,
    pub translate_debounce: Duration,
    pub zip_debounce: Duration,
}

/// Options for resolving configuration.
///
/// Contains CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Provider name override.
    pub provider: Option<String>,
    /// Model name override.
    pub model: Option<String>,
    /// Language override.
    pub language: Option<String>,
}

/// Resolves the storefront language: CLI, then config file, then English.
///
/// # Errors
///
/// Returns an error if the chosen language is not supported.
pub fn resolve_language_setting(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<&'static str> {
    options
        .language
        .as_deref()
        .or(config_file.aura.language.as_deref())
        .map_or(Ok(ENGLISH), resolve_language)
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// CLI options take precedence over config file values, which take
/// precedence over built-in defaults.
///
/// # Errors
///
/// Returns an error if the provider is not found, the language is not
/// supported, or a required API key is missing.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let provider_name = options
        .provider
        .as_ref()
        .or(config_file.aura.provider.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_PROVIDER.to_string());

    let builtin = ProviderConfig::builtin();
    let provider_config = match config_file.providers.get(&provider_name) {
        Some(provider) => provider,
        None if provider_name == DEFAULT_PROVIDER => &builtin,
        None => {
            let mut available: Vec<_> = config_file.providers.keys().map(String::as_str).collect();
            available.sort_unstable();
            if available.is_empty() {
                bail!(
                    "Provider '{provider_name}' not found\n\n\
                     No providers configured. Add providers to ~/.config/aura/config.toml"
                );
            }
            bail!(
                "Provider '{provider_name}' not found\n\n\
                 Available providers:\n  \
                 - {}\n\n\
                 Add providers to ~/.config/aura/config.toml",
                available.join("\n  - ")
            );
        }
    };

    let model = options
        .model
        .as_ref()
        .or(config_file.aura.model.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    // Warn if model is not in provider's models list
    if !provider_config.models.is_empty() && !provider_config.models.contains(&model) {
        crate::warn!(
            "{} Model '{}' is not in the configured models list for '{}'\n\
             Configured models: {}\n\
             Proceeding anyway...\n",
            Style::warning("Warning:"),
            model,
            provider_name,
            provider_config.models.join(", ")
        );
    }

    let image_model = config_file
        .aura
        .image_model
        .clone()
        .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string());

    let language = resolve_language_setting(options, config_file)?.to_string();

    let api_key = provider_config.get_api_key();

    if provider_config.requires_api_key() && api_key.is_none() {
        let env_var = provider_config.api_key_env.as_deref().unwrap_or("API_KEY");
        bail!(
            "Provider '{provider_name}' requires an API key\n\n\
             Set the {env_var} environment variable:\n  \
             export {env_var}=\"your-api-key\"\n\n\
             Or set api_key in ~/.config/aura/config.toml"
        );
    }

    Ok(ResolvedConfig {
        provider_name,
        endpoint: provider_config.endpoint.clone(),
        model,
        image_model,
        api_key,
        language,
        translate_debounce: config_file
            .aura
            .translate_debounce_ms
            .map_or(DEFAULT_TRANSLATE_DEBOUNCE, Duration::from_millis),
        zip_debounce: config_file
            .aura
            .zip_debounce_ms
            .map_or(DEFAULT_ZIP_DEBOUNCE, Duration::from_millis),
    })
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/aura/config.toml`
    /// or `~/.config/aura/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Self {
        Self {
            config_path: paths::config_dir().join("config.toml"),
        }
    }

    /// Creates a manager for an explicit config file path.
    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        crate::fs::atomic_write(&self.config_path, contents.as_bytes()).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }

    /// Loads the config file; a missing file yields the defaults.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn create_test_manager(temp_dir: &TempDir) -> ConfigManager {
        ConfigManager::with_path(temp_dir.path().join("config.toml"))
    }

    fn local_provider() -> ProviderConfig {
        ProviderConfig {
            endpoint: "http://localhost:11434".to_string(),
            api_key: None,
            api_key_env: None,
            models: vec!["gemma3:12b".to_string()],
        }
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        let mut providers = HashMap::new();
        providers.insert("ollama".to_string(), local_provider());

        let config = ConfigFile {
            aura: AuraConfig {
                provider: Some("ollama".to_string()),
                model: Some("gemma3:12b".to_string()),
                language: Some("French".to_string()),
                zip_debounce_ms: Some(250),
                ..AuraConfig::default()
            },
            providers,
        };

        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(loaded.aura.provider, Some("ollama".to_string()));
        assert_eq!(loaded.aura.language, Some("French".to_string()));
        assert_eq!(loaded.aura.zip_debounce_ms, Some(250));
        assert!(loaded.providers.contains_key("ollama"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        assert!(manager.load().is_err());
        assert!(manager.load_or_default().unwrap().providers.is_empty());
    }

    #[test]
    fn test_load_or_default_reports_parse_errors() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::write(manager.config_path(), "[aura\nprovider = ").unwrap();

        assert!(manager.load_or_default().is_err());
    }

    #[test]
    #[serial]
    fn test_provider_get_api_key_from_env() {
        // SAFETY: serialized with other env-mutating tests
        unsafe {
            std::env::set_var("AURA_TEST_API_KEY", "test-key-value");
        }

        let provider = ProviderConfig {
            endpoint: "https://api.example.com".to_string(),
            api_key: Some("fallback-key".to_string()),
            api_key_env: Some("AURA_TEST_API_KEY".to_string()),
            models: vec![],
        };

        assert_eq!(provider.get_api_key(), Some("test-key-value".to_string()));

        // SAFETY: serialized with other env-mutating tests
        unsafe {
            std::env::remove_var("AURA_TEST_API_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_provider_get_api_key_fallback() {
        // SAFETY: serialized with other env-mutating tests
        unsafe {
            std::env::remove_var("AURA_TEST_NONEXISTENT_KEY");
        }

        let provider = ProviderConfig {
            endpoint: "https://api.example.com".to_string(),
            api_key: Some("fallback-key".to_string()),
            api_key_env: Some("AURA_TEST_NONEXISTENT_KEY".to_string()),
            models: vec![],
        };

        assert_eq!(provider.get_api_key(), Some("fallback-key".to_string()));
    }

    #[test]
    fn test_resolve_config_uses_file_provider() {
        let mut config = ConfigFile::default();
        config.providers.insert("ollama".to_string(), local_provider());
        config.aura.provider = Some("ollama".to_string());
        config.aura.model = Some("gemma3:12b".to_string());
        config.aura.language = Some("ja".to_string());
        config.aura.translate_debounce_ms = Some(1000);

        let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();

        assert_eq!(resolved.provider_name, "ollama");
        assert_eq!(resolved.endpoint, "http://localhost:11434");
        assert_eq!(resolved.language, "Japanese");
        assert_eq!(resolved.image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(resolved.translate_debounce, Duration::from_millis(1000));
        assert_eq!(resolved.zip_debounce, DEFAULT_ZIP_DEBOUNCE);
        assert!(resolved.api_key.is_none());
    }

    #[test]
    fn test_resolve_config_provider_not_found() {
        let mut config = ConfigFile::default();
        config.providers.insert("ollama".to_string(), local_provider());
        let options = ResolveOptions {
            provider: Some("nonexistent".to_string()),
            ..ResolveOptions::default()
        };

        let err = resolve_config(&options, &config).unwrap_err().to_string();
        assert!(err.contains("not found"));
        assert!(err.contains("ollama"));
    }

    #[test]
    fn test_resolve_config_invalid_language() {
        let mut config = ConfigFile::default();
        config.providers.insert("ollama".to_string(), local_provider());
        config.aura.provider = Some("ollama".to_string());
        let options = ResolveOptions {
            language: Some("Klingon".to_string()),
            ..ResolveOptions::default()
        };

        let err = resolve_config(&options, &config).unwrap_err().to_string();
        assert!(err.contains("Unsupported language"));
    }

    #[test]
    #[serial]
    fn test_resolve_config_builtin_requires_key() {
        // SAFETY: serialized with other env-mutating tests
        unsafe {
            std::env::remove_var(DEFAULT_API_KEY_ENV);
        }

        let err = resolve_config(&ResolveOptions::default(), &ConfigFile::default())
            .unwrap_err()
            .to_string();
        assert!(err.contains("API key"));
        assert!(err.contains(DEFAULT_API_KEY_ENV));
    }

    #[test]
    fn test_resolve_language_setting_defaults_to_english() {
        let language =
            resolve_language_setting(&ResolveOptions::default(), &ConfigFile::default()).unwrap();
        assert_eq!(language, ENGLISH);
    }
}
