//! Localization events.
//!
//! Trigger [`ChangeLanguage`] to switch languages at runtime; observe
//! [`LanguageChanged`] to refresh anything showing translated text.

use bevy::prelude::*;

use crate::i18n::Language;

/// Request a language switch by code, e.g. `"zh_tw"`.
///
/// Unsupported codes select `en_us`.
#[derive(Event, Debug, Clone)]
pub struct ChangeLanguage {
    pub code: String,
}

impl ChangeLanguage {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// Fired after [`Localization`](crate::i18n::Localization) switched tables.
#[derive(Event, Debug, Clone)]
pub struct LanguageChanged {
    /// The language actually selected
    pub language: Language,
}
