//! Dashboard theme and language preferences

use crate::store::{KeyValueStore, Persistence};
use crate::types::{Language, Theme};

pub const THEME_KEY: &str = "theme";
pub const LANGUAGE_KEY: &str = "language";

/// Theme and language, persisted next to the selected business
#[derive(Debug)]
pub struct Preferences<S> {
    backend: Persistence<S>,
    theme: Theme,
    language: Language,
}

impl<S: KeyValueStore> Preferences<S> {
    /// Load saved preferences; missing or unknown values fall back to defaults
    pub fn open(store: S) -> Self {
        let backend = Persistence::probe(store);
        let theme = backend
            .get(THEME_KEY)
            .ok()
            .flatten()
            .and_then(|v| Theme::from_str(&v))
            .unwrap_or_default();
        let language = backend
            .get(LANGUAGE_KEY)
            .ok()
            .flatten()
            .and_then(|v| Language::from_code(&v))
            .unwrap_or_default();
        Self {
            backend,
            theme,
            language,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Whether the dark colour scheme should be applied
    pub fn is_dark(&self) -> bool {
        self.theme == Theme::Dark
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        if let Err(e) = self.backend.set(THEME_KEY, theme.as_str()) {
            tracing::error!("Failed to save theme: {}", e);
        }
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        if let Err(e) = self.backend.set(LANGUAGE_KEY, language.code()) {
            tracing::error!("Failed to save language: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::open(MemoryStore::new());
        assert_eq!(prefs.theme(), Theme::Light);
        assert_eq!(prefs.language(), Language::En);
        assert!(!prefs.is_dark());
    }

    #[test]
    fn test_saved_values_are_restored() {
        let mut storage = MemoryStore::new();
        storage.set(THEME_KEY, "dark").unwrap();
        storage.set(LANGUAGE_KEY, "fr").unwrap();

        let prefs = Preferences::open(storage);
        assert!(prefs.is_dark());
        assert_eq!(prefs.language(), Language::Fr);
    }

    #[test]
    fn test_unknown_values_fall_back() {
        let mut storage = MemoryStore::new();
        storage.set(THEME_KEY, "sepia").unwrap();
        storage.set(LANGUAGE_KEY, "de").unwrap();

        let prefs = Preferences::open(storage);
        assert_eq!(prefs.theme(), Theme::Light);
        assert_eq!(prefs.language(), Language::En);
    }

    #[test]
    fn test_set_updates_value() {
        let mut prefs = Preferences::open(MemoryStore::new());
        prefs.set_theme(Theme::Dark);
        prefs.set_language(Language::Es);
        assert!(prefs.is_dark());
        assert_eq!(prefs.language(), Language::Es);
    }
}
