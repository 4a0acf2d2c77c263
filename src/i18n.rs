//! Localized message lookup.
//!
//! Catalogs are nested JSON objects compiled into the binary; nested keys are
//! flattened into dotted identifiers such as `play.startedPlaying`.
//! Placeholders use `{name}` syntax.

use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::DEFAULT_LOCALE;

/// Locale catalogs shipped with the bot.
const CATALOGS: [(&str, &str); 2] = [
    ("en", include_str!("../locales/en.json")),
    ("es", include_str!("../locales/es.json")),
];

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

/// Errors raised while loading a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    #[error("Malformed catalog for locale {locale}: {source}")]
    Malformed {
        locale: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A set of messages for one locale, backed by the default locale.
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: String,
    messages: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

impl Catalog {
    /// Loads one of the embedded locale catalogs.
    pub fn load(locale: &str) -> Result<Self, CatalogError> {
        let json = embedded(locale).ok_or_else(|| CatalogError::UnknownLocale(locale.to_string()))?;
        let fallback_json = embedded(DEFAULT_LOCALE).unwrap_or("{}");
        Self::from_json(locale, json, fallback_json)
    }

    /// Loads the requested locale, or the default one if it is not shipped.
    pub fn load_or_default(locale: &str) -> Result<Self, CatalogError> {
        match Self::load(locale) {
            Err(CatalogError::UnknownLocale(unknown)) => {
                warn!("No catalog for locale {}, using {}", unknown, DEFAULT_LOCALE);
                Self::load(DEFAULT_LOCALE)
            }
            other => other,
        }
    }

    /// Builds a catalog from raw JSON for `locale` plus a fallback catalog.
    pub fn from_json(locale: &str, json: &str, fallback_json: &str) -> Result<Self, CatalogError> {
        let messages = parse_catalog(locale, json)?;
        let fallback = parse_catalog(DEFAULT_LOCALE, fallback_json)?;
        debug!("Loaded {} messages for locale {}", messages.len(), locale);

        Ok(Self {
            locale: locale.to_string(),
            messages,
            fallback,
        })
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Formats the message `key`, substituting `{name}` placeholders from `params`.
    ///
    /// Missing keys fall back to the default locale and then to the key itself.
    /// Placeholders without a matching parameter are left untouched.
    pub fn format_message(&self, key: &str, params: &[(&str, &str)]) -> String {
        let Some(template) = self.messages.get(key).or_else(|| self.fallback.get(key)) else {
            warn!("Missing message {} for locale {}", key, self.locale);
            return key.to_string();
        };

        PLACEHOLDER
            .replace_all(template, |caps: &Captures| {
                params
                    .iter()
                    .find(|(name, _)| *name == &caps[1])
                    .map(|(_, value)| value.to_string())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

fn embedded(locale: &str) -> Option<&'static str> {
    CATALOGS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(locale))
        .map(|(_, json)| *json)
}

fn parse_catalog(locale: &str, json: &str) -> Result<HashMap<String, String>, CatalogError> {
    let root: Value = serde_json::from_str(json).map_err(|source| CatalogError::Malformed {
        locale: locale.to_string(),
        source,
    })?;

    let mut messages = HashMap::new();
    flatten(None, &root, &mut messages);
    Ok(messages)
}

fn flatten(prefix: Option<&str>, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = match prefix {
                    Some(prefix) => format!("{}.{}", prefix, key),
                    None => key.clone(),
                };
                flatten(Some(&path), child, out);
            }
        }
        Value::String(text) => {
            if let Some(key) = prefix {
                out.insert(key.to_string(), text.clone());
            }
        }
        // Numbers, booleans and arrays are not messages.
        _ => {}
    }
}
