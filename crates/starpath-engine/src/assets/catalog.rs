use std::collections::HashMap;

use serde::Deserialize;

/// Language used when the requested one (or one of its keys) is missing.
pub const FALLBACK_LANGUAGE: &str = "zh-TW";

/// Localized text templates: language → key → template.
///
/// Templates may contain `{token}` placeholders filled by `render`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct TextCatalog {
    languages: HashMap<String, HashMap<String, String>>,
}

impl TextCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from a JSON string: `{ "en": { "key": "text" }, ... }`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Raw template for `key`, falling back to `FALLBACK_LANGUAGE`.
    pub fn translate(&self, lang: &str, key: &str) -> Option<&str> {
        self.languages
            .get(lang)
            .and_then(|table| table.get(key))
            .or_else(|| self.languages.get(FALLBACK_LANGUAGE).and_then(|t| t.get(key)))
            .map(String::as_str)
    }

    /// Template with every `{name}` replaced by its value in `params`.
    /// Unknown tokens are left as-is; a missing key renders as the key itself.
    pub fn render(&self, lang: &str, key: &str, params: &[(&str, String)]) -> String {
        let Some(template) = self.translate(lang, key) else {
            log::warn!("catalog: no text for '{}' in '{}'", key, lang);
            return key.to_string();
        };
        fill_template(template, params)
    }
}

fn fill_template(template: &str, params: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let token = &after[..close];
        match params.iter().find(|(name, _)| *name == token) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + close + 2]),
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}
