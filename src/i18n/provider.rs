use anyhow::Result;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;

use super::language::resolve_language;
use super::state::{LanguageState, Lookup};
use super::translator::Translator;
use crate::debounce::Debouncer;
use crate::llm::ModelClient;

/// Quiet period after the last registration before a batch is sent.
pub const DEFAULT_TRANSLATE_DEBOUNCE: Duration = Duration::from_millis(600);

/// Shared translation context handed to every text call site.
///
/// Lookups never block: a miss returns the English text and schedules a
/// debounced batch request. Cloning is cheap and every clone sees the same
/// cache.
#[derive(Clone)]
pub struct LanguageProvider {
    inner: Arc<Inner>,
}

struct Inner {
    state: Mutex<LanguageState>,
    translator: Translator,
    debouncer: Debouncer,
    translating: watch::Sender<bool>,
}

impl LanguageProvider {
    pub fn new(client: Arc<dyn ModelClient>, language: &str, debounce: Duration) -> Self {
        let (translating, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(LanguageState::new(language)),
                translator: Translator::new(client),
                debouncer: Debouncer::new(debounce),
                translating,
            }),
        }
    }

    /// Returns the translation of `text` for the current language, or `text`
    /// itself while the translation is pending.
    pub fn t(&self, text: &str) -> String {
        let lookup = self.state().lookup(text);
        match lookup {
            Lookup::Hit(translated) => translated,
            Lookup::PassThrough => text.to_string(),
            Lookup::Miss { newly_queued } => {
                if newly_queued {
                    self.schedule_flush();
                }
                text.to_string()
            }
        }
    }

    pub fn language(&self) -> String {
        self.state().language().to_string()
    }

    /// Switches to `language` (a code or name).
    ///
    /// # Errors
    ///
    /// Returns an error if the language is not supported.
    pub fn set_language(&self, language: &str) -> Result<()> {
        let language = resolve_language(language)?;
        let queued = self.state().set_language(language);
        tracing::debug!(language, queued, "language changed");

        self.publish();
        if queued {
            self.schedule_flush();
        } else {
            self.inner.debouncer.cancel();
        }
        Ok(())
    }

    /// Registers `texts` and translates them right away instead of waiting
    /// for the debounce.
    pub async fn prefetch<'a>(&self, texts: impl IntoIterator<Item = &'a str>) {
        for text in texts {
            self.t(text);
        }
        self.inner.debouncer.cancel();
        self.flush().await;
    }

    /// Sends every queued text in one batch and merges the result.
    pub async fn flush(&self) {
        let Some(batch) = self.state().take_batch() else {
            return;
        };
        self.publish();

        tracing::debug!(
            language = %batch.language,
            count = batch.texts.len(),
            "translating batch"
        );

        let translations = match self
            .inner
            .translator
            .translate_batch(&batch.texts, &batch.language)
            .await
        {
            Ok(translations) => Some(translations),
            Err(e) => {
                tracing::warn!(language = %batch.language, "translation failed: {e}");
                None
            }
        };

        self.state().complete_batch(&batch, translations);
        self.publish();
    }

    /// Watches whether a translation request is in flight.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.translating.subscribe()
    }

    pub fn is_translating(&self) -> bool {
        self.state().is_translating()
    }

    pub fn cached(&self, language: &str, text: &str) -> Option<String> {
        self.state().cached(language, text).map(ToString::to_string)
    }

    fn schedule_flush(&self) {
        let provider = self.clone();
        self.inner.debouncer.schedule(async move {
            provider.flush().await;
        });
    }

    fn publish(&self) {
        let translating = self.state().is_translating();
        self.inner.translating.send_replace(translating);
    }

    fn state(&self) -> MutexGuard<'_, LanguageState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
