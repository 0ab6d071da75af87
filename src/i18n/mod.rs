//! Storefront translation: cached, debounced, batched.

mod language;
mod loader;
mod prompt;
mod provider;
mod state;
mod translator;

pub use language::{ENGLISH, SUPPORTED_LANGUAGES, is_english, print_languages, resolve_language};
pub use loader::{Overlay, SpinnerOverlay, TranslationLoader};
pub use provider::{DEFAULT_TRANSLATE_DEBOUNCE, LanguageProvider};
pub use state::{Batch, EXEMPT_TEXTS, LanguageState, Lookup};
pub use translator::Translator;
