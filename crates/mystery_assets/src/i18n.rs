//! Localized strings.
//!
//! Each language ships a flat JSON object mapping keys to templates, for
//! example `{"hello": "Hi {name}"}`. Lookups fall back from the selected
//! language to `en_us` and finally to the key itself, so a missing string
//! shows up as its key on screen instead of an error.

use std::collections::HashMap;

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::resource::{ResourceError, ResourceManager};

/// Languages the game ships translation tables for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    EnUs,
    ZhCn,
    ZhHk,
    ZhTw,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::EnUs,
        Language::ZhCn,
        Language::ZhHk,
        Language::ZhTw,
    ];

    /// Code used for the translation file name.
    pub fn code(self) -> &'static str {
        match self {
            Language::EnUs => "en_us",
            Language::ZhCn => "zh_cn",
            Language::ZhHk => "zh_hk",
            Language::ZhTw => "zh_tw",
        }
    }

    /// Name shown in the language picker, in the language itself.
    pub fn display_name(self) -> &'static str {
        match self {
            Language::EnUs => "English (United States)",
            Language::ZhCn => "简体中文 (中国大陆)",
            Language::ZhHk => "繁體中文 (中國香港)",
            Language::ZhTw => "繁體中文 (中國臺灣)",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code)
    }
}

pub type TranslationTable = HashMap<String, String>;

/// Why a template could not be filled in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("No value for placeholder '{0}'")]
    MissingArgument(String),

    #[error("Unmatched brace at byte {0}")]
    UnmatchedBrace(usize),

    #[error("Unsupported placeholder '{0}'")]
    UnsupportedField(String),
}

/// Substitute `{name}` placeholders in `template`.
///
/// `{{` and `}}` produce literal braces. Only identifier placeholders are
/// accepted; positional (`{0}`), empty (`{}`) and formatted (`{n:>3}`)
/// fields are rejected.
pub fn format_template(template: &str, args: &[(&str, &str)]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '{' => {
                if chars.next_if(|&(_, next)| next == '{').is_some() {
                    out.push('{');
                    continue;
                }

                let mut field = String::new();
                let mut closed = false;
                for (_, next) in chars.by_ref() {
                    if next == '}' {
                        closed = true;
                        break;
                    }
                    field.push(next);
                }
                if !closed {
                    return Err(FormatError::UnmatchedBrace(i));
                }
                if !is_identifier(&field) {
                    return Err(FormatError::UnsupportedField(field));
                }

                let Some((_, value)) = args.iter().find(|(name, _)| *name == field) else {
                    return Err(FormatError::MissingArgument(field));
                };
                out.push_str(value);
            }
            '}' => {
                if chars.next_if(|&(_, next)| next == '}').is_none() {
                    return Err(FormatError::UnmatchedBrace(i));
                }
                out.push('}');
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}

fn is_identifier(field: &str) -> bool {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Translation tables for the default and the selected language.
#[derive(Resource, Debug, Clone, Default)]
pub struct Localization {
    language: Language,
    default_table: TranslationTable,
    selected_table: TranslationTable,
}

impl Localization {
    /// Build from in-memory tables.
    pub fn from_tables(
        language: Language,
        default_table: TranslationTable,
        selected_table: TranslationTable,
    ) -> Self {
        Self {
            language,
            default_table,
            selected_table,
        }
    }

    /// Load the `en_us` table and the table for `language`.
    ///
    /// The default table is required. A missing selected table is logged and
    /// left empty.
    pub fn load(resources: &ResourceManager, language: Language) -> Result<Self, ResourceError> {
        let default_table = read_table(resources, Language::EnUs)?;
        let mut localization = Self {
            language: Language::EnUs,
            default_table,
            selected_table: TranslationTable::new(),
        };
        localization.select(resources, language);
        Ok(localization)
    }

    /// Switch to the language with the given code.
    ///
    /// Unsupported codes fall back to `en_us`. Returns the language actually
    /// selected.
    pub fn set_language(&mut self, resources: &ResourceManager, code: &str) -> Language {
        let language = Language::from_code(code).unwrap_or_else(|| {
            warn!("Unsupported language '{}', falling back to en_us", code);
            Language::EnUs
        });
        self.select(resources, language);
        language
    }

    fn select(&mut self, resources: &ResourceManager, language: Language) {
        self.language = language;
        if language == Language::EnUs {
            self.selected_table = self.default_table.clone();
            return;
        }

        self.selected_table = match read_table(resources, language) {
            Ok(table) => table,
            Err(e) => {
                warn!("No translations for {}: {}", language.code(), e);
                TranslationTable::new()
            }
        };
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// True when either table has an entry for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.selected_table.contains_key(key) || self.default_table.contains_key(key)
    }

    /// Translate `key`, filling `{name}` placeholders from `args`.
    ///
    /// Never fails: an unknown key, or a template that cannot be filled,
    /// yields `key` itself.
    pub fn translate(&self, key: &str, args: &[(&str, &str)]) -> String {
        let Some(template) = self
            .selected_table
            .get(key)
            .or_else(|| self.default_table.get(key))
        else {
            return key.to_string();
        };

        if template == key {
            return key.to_string();
        }

        match format_template(template, args) {
            Ok(text) => text,
            Err(e) => {
                debug!("Could not format '{}': {}", key, e);
                key.to_string()
            }
        }
    }
}

fn read_table(
    resources: &ResourceManager,
    language: Language,
) -> Result<TranslationTable, ResourceError> {
    resources.read_json(resources.translation_file(language))
}
