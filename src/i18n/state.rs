use std::collections::{HashMap, HashSet};

use super::language::{ENGLISH, is_english};

/// Brand strings that are never translated.
pub const EXEMPT_TEXTS: &[&str] = &["Aura", "Quiet living"];

/// Outcome of a single lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// A cached translation for the current language.
    Hit(String),
    /// The text is shown as-is and never requested.
    PassThrough,
    /// Not cached yet; `newly_queued` is `true` only the first time.
    Miss { newly_queued: bool },
}

/// Texts taken out of the queue for a single batched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub language: String,
    pub texts: Vec<String>,
}

/// Translation cache and pending bookkeeping for the active language.
///
/// Pending texts are either queued (waiting for the debounce to fire) or in
/// flight (sent, awaiting the response). A text is registered at most once
/// while it is in either state. In-flight and failed texts are tracked per
/// language; a failed text is never requested again for that language.
#[derive(Debug)]
pub struct LanguageState {
    language: String,
    cache: HashMap<String, HashMap<String, String>>,
    queued: Vec<String>,
    in_flight: HashMap<String, HashSet<String>>,
    failed: HashMap<String, HashSet<String>>,
    seen: Vec<String>,
    seen_set: HashSet<String>,
}

impl Default for LanguageState {
    fn default() -> Self {
        Self::new(ENGLISH)
    }
}

impl LanguageState {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
            cache: HashMap::new(),
            queued: Vec::new(),
            in_flight: HashMap::new(),
            failed: HashMap::new(),
            seen: Vec::new(),
            seen_set: HashSet::new(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Looks `text` up for the current language, queueing it on a miss.
    pub fn lookup(&mut self, text: &str) -> Lookup {
        if is_exempt(text) {
            return Lookup::PassThrough;
        }

        if self.seen_set.insert(text.to_string()) {
            self.seen.push(text.to_string());
        }

        if is_english(&self.language) {
            return Lookup::PassThrough;
        }

        if let Some(translated) = self.cached(&self.language, text) {
            return Lookup::Hit(translated.to_string());
        }

        if self.has_failed(&self.language, text) {
            return Lookup::PassThrough;
        }

        let newly_queued = self.queue(text);
        Lookup::Miss { newly_queued }
    }

    /// Switches language, dropping queued work for the old one.
    ///
    /// Every text seen so far that has no cached translation in the new
    /// language, is not already in flight for it and has not failed for it
    /// is queued again. Returns `true` if anything was queued.
    pub fn set_language(&mut self, language: &str) -> bool {
        self.language = language.to_string();
        self.queued.clear();

        if is_english(language) {
            return false;
        }

        let misses: Vec<String> = self
            .seen
            .iter()
            .filter(|text| {
                self.cached(language, text).is_none() && !self.has_failed(language, text)
            })
            .cloned()
            .collect();
        for text in misses {
            self.queue(&text);
        }

        !self.queued.is_empty()
    }

    /// Moves all queued texts in flight and returns them as one batch.
    pub fn take_batch(&mut self) -> Option<Batch> {
        if self.queued.is_empty() {
            return None;
        }

        let texts = std::mem::take(&mut self.queued);
        self.in_flight
            .entry(self.language.clone())
            .or_default()
            .extend(texts.iter().cloned());

        Some(Batch {
            language: self.language.clone(),
            texts,
        })
    }

    /// Records the outcome of a batch.
    ///
    /// Translations are stored under the batch's language even if the
    /// current language has changed since. `None` (a failed request) leaves
    /// the cache untouched and marks the texts failed for that language.
    /// Either way the texts stop being pending.
    pub fn complete_batch(&mut self, batch: &Batch, translations: Option<Vec<String>>) {
        match translations {
            Some(translations) => {
                let entries = self.cache.entry(batch.language.clone()).or_default();
                for (source, translated) in batch.texts.iter().zip(translations) {
                    entries.insert(source.clone(), translated);
                }
            }
            None => {
                self.failed
                    .entry(batch.language.clone())
                    .or_default()
                    .extend(batch.texts.iter().cloned());
            }
        }

        if let Some(in_flight) = self.in_flight.get_mut(&batch.language) {
            for text in &batch.texts {
                in_flight.remove(text);
            }
        }
    }

    pub fn cached(&self, language: &str, text: &str) -> Option<&str> {
        self.cache
            .get(language)
            .and_then(|entries| entries.get(text))
            .map(String::as_str)
    }

    /// Returns `true` while a batch for the current language is in flight.
    pub fn is_translating(&self) -> bool {
        self.current_in_flight().is_some_and(|texts| !texts.is_empty())
    }

    /// Queued texts plus those in flight for the current language.
    pub fn pending_count(&self) -> usize {
        self.queued.len() + self.current_in_flight().map_or(0, HashSet::len)
    }

    fn current_in_flight(&self) -> Option<&HashSet<String>> {
        self.in_flight.get(&self.language)
    }

    fn has_failed(&self, language: &str, text: &str) -> bool {
        self.failed
            .get(language)
            .is_some_and(|texts| texts.contains(text))
    }

    fn queue(&mut self, text: &str) -> bool {
        let in_flight = self
            .current_in_flight()
            .is_some_and(|texts| texts.contains(text));
        if in_flight || self.queued.iter().any(|q| q == text) {
            return false;
        }
        self.queued.push(text.to_string());
        true
    }
}

fn is_exempt(text: &str) -> bool {
    text.trim().is_empty() || EXEMPT_TEXTS.contains(&text)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn french() -> LanguageState {
        LanguageState::new("French")
    }

    fn translate(state: &mut LanguageState, pairs: &[(&str, &str)]) {
        let batch = state.take_batch().unwrap();
        let translations = batch
            .texts
            .iter()
            .map(|text| {
                pairs
                    .iter()
                    .find(|(source, _)| *source == text.as_str())
                    .map(|(_, translated)| (*translated).to_string())
                    .unwrap()
            })
            .collect();
        state.complete_batch(&batch, Some(translations));
    }

    #[test]
    fn test_miss_returns_queued_once() {
        let mut state = french();
        assert_eq!(state.lookup("Shop"), Lookup::Miss { newly_queued: true });
        assert_eq!(state.lookup("Shop"), Lookup::Miss { newly_queued: false });
        assert_eq!(state.pending_count(), 1);
    }

    #[test]
    fn test_in_flight_text_not_queued_again() {
        let mut state = french();
        state.lookup("Shop");
        let _batch = state.take_batch().unwrap();

        assert_eq!(state.lookup("Shop"), Lookup::Miss { newly_queued: false });
        assert!(state.take_batch().is_none());
        assert!(state.is_translating());
    }

    #[test]
    fn test_completed_batch_hits() {
        let mut state = french();
        state.lookup("Shop");
        state.lookup("About");
        translate(&mut state, &[("Shop", "Boutique"), ("About", "À propos")]);

        assert_eq!(state.lookup("Shop"), Lookup::Hit("Boutique".to_string()));
        assert_eq!(state.lookup("About"), Lookup::Hit("À propos".to_string()));
        assert_eq!(state.pending_count(), 0);
        assert!(!state.is_translating());
    }

    #[test]
    fn test_failed_batch_leaves_cache_untouched() {
        let mut state = french();
        state.lookup("Shop");
        let batch = state.take_batch().unwrap();
        state.complete_batch(&batch, None);

        assert!(state.cached("French", "Shop").is_none());
        assert_eq!(state.pending_count(), 0);
    }

    #[test]
    fn test_failed_text_not_requested_again() {
        let mut state = french();
        state.lookup("Shop");
        let batch = state.take_batch().unwrap();
        state.complete_batch(&batch, None);

        assert_eq!(state.lookup("Shop"), Lookup::PassThrough);
        assert_eq!(state.lookup("Shop"), Lookup::PassThrough);
        assert!(state.take_batch().is_none());

        // Switching away and back does not revive it either.
        assert!(state.set_language("German"));
        let _german_batch = state.take_batch().unwrap();
        assert!(!state.set_language("French"));
        assert_eq!(state.lookup("Shop"), Lookup::PassThrough);
    }

    #[test]
    fn test_failure_is_per_language() {
        let mut state = french();
        state.lookup("Shop");
        let batch = state.take_batch().unwrap();
        state.complete_batch(&batch, None);

        assert!(state.set_language("German"));
        let batch = state.take_batch().unwrap();
        assert_eq!(batch.texts, vec!["Shop".to_string()]);
    }

    #[test]
    fn test_switching_back_keeps_in_flight_batch() {
        let mut state = french();
        state.lookup("Shop");
        let french_batch = state.take_batch().unwrap();

        state.set_language("German");
        let _german_batch = state.take_batch().unwrap();

        // French is still awaiting its response, so nothing is queued again.
        assert!(!state.set_language("French"));
        assert!(state.take_batch().is_none());
        assert!(state.is_translating());
        assert_eq!(state.lookup("Shop"), Lookup::Miss { newly_queued: false });

        state.complete_batch(&french_batch, Some(vec!["Boutique".to_string()]));
        assert_eq!(state.lookup("Shop"), Lookup::Hit("Boutique".to_string()));
        assert!(!state.is_translating());
    }

    #[test]
    fn test_english_is_pass_through() {
        let mut state = LanguageState::default();
        assert_eq!(state.lookup("Shop"), Lookup::PassThrough);
        assert!(state.take_batch().is_none());
    }

    #[test]
    fn test_exempt_texts_pass_through() {
        let mut state = french();
        for text in EXEMPT_TEXTS {
            assert_eq!(state.lookup(text), Lookup::PassThrough);
        }
        assert_eq!(state.lookup("   "), Lookup::PassThrough);
        assert_eq!(state.pending_count(), 0);
    }

    #[test]
    fn test_language_switch_requeues_misses() {
        let mut state = french();
        state.lookup("Shop");
        state.lookup("About");
        translate(&mut state, &[("Shop", "Boutique"), ("About", "À propos")]);

        assert!(state.set_language("German"));
        let batch = state.take_batch().unwrap();
        assert_eq!(batch.language, "German");
        assert_eq!(batch.texts, vec!["Shop".to_string(), "About".to_string()]);

        // Back to French: everything is cached, nothing to do.
        assert!(!state.set_language("French"));
        assert_eq!(state.lookup("Shop"), Lookup::Hit("Boutique".to_string()));
    }

    #[test]
    fn test_language_switch_clears_pending() {
        let mut state = french();
        state.lookup("Shop");
        let _in_flight = state.take_batch().unwrap();
        state.lookup("Cart");

        state.set_language("English");
        assert_eq!(state.pending_count(), 0);
        assert_eq!(state.lookup("Shop"), Lookup::PassThrough);
    }

    #[test]
    fn test_stale_batch_stored_under_its_language() {
        let mut state = french();
        state.lookup("Shop");
        let french_batch = state.take_batch().unwrap();

        state.set_language("German");
        let german_batch = state.take_batch().unwrap();

        state.complete_batch(&french_batch, Some(vec!["Boutique".to_string()]));
        assert_eq!(state.cached("French", "Shop"), Some("Boutique"));
        assert!(state.cached("German", "Shop").is_none());
        // The German request is still outstanding.
        assert!(state.is_translating());

        state.complete_batch(&german_batch, Some(vec!["Laden".to_string()]));
        assert_eq!(state.lookup("Shop"), Lookup::Hit("Laden".to_string()));
    }
}
