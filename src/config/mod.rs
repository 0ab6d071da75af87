mod manager;

pub use manager::{
    AuraConfig, ConfigFile, ConfigManager, DEFAULT_API_KEY_ENV, DEFAULT_ENDPOINT,
    DEFAULT_IMAGE_MODEL, DEFAULT_MODEL, DEFAULT_PROVIDER, ProviderConfig, ResolveOptions,
    ResolvedConfig, resolve_config, resolve_language_setting,
};
