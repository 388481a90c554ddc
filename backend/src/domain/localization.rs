//! Bilingual text and language negotiation.
//!
//! Content is stored as English/Nepali pairs. Nepali is optional and falls
//! back to English whenever it is missing or blank.

use serde::{Deserialize, Serialize};

/// Display language supported by the site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Nepali.
    Ne,
}

impl Language {
    /// Parse an explicit language code such as `ne`, `en` or `ne-NP`.
    ///
    /// # Examples
    /// ```
    /// use eduwarn::domain::Language;
    ///
    /// assert_eq!(Language::parse("NE"), Some(Language::Ne));
    /// assert_eq!(Language::parse("fr"), None);
    /// ```
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        let primary = code.trim().split(['-', '_']).next().unwrap_or_default();
        match primary.to_ascii_lowercase().as_str() {
            "en" => Some(Self::En),
            "ne" => Some(Self::Ne),
            _ => None,
        }
    }

    /// Negotiate from an `Accept-Language` header: Nepali only when the
    /// header starts with `ne`.
    #[must_use]
    pub fn from_accept_language(header: &str) -> Self {
        if header.trim_start().to_ascii_lowercase().starts_with("ne") {
            Self::Ne
        } else {
            Self::En
        }
    }

    /// Resolve the request language from an explicit query value and the
    /// `Accept-Language` header, in that order.
    #[must_use]
    pub fn negotiate(query: Option<&str>, accept_language: Option<&str>) -> Self {
        query
            .and_then(Self::parse)
            .or_else(|| accept_language.map(Self::from_accept_language))
            .unwrap_or_default()
    }

    /// Two-letter code used in the store.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ne => "ne",
        }
    }
}

/// English text with an optional Nepali translation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ne: Option<String>,
}

impl LocalizedText {
    /// Build a text pair; blank Nepali values are dropped.
    pub fn new(en: impl Into<String>, ne: Option<String>) -> Self {
        Self {
            en: en.into(),
            ne: ne.filter(|value| !value.trim().is_empty()),
        }
    }

    /// English-only text.
    pub fn english(en: impl Into<String>) -> Self {
        Self::new(en, None)
    }

    /// English text.
    #[must_use]
    pub fn en(&self) -> &str {
        self.en.as_str()
    }

    /// Nepali translation, if present.
    #[must_use]
    pub fn ne(&self) -> Option<&str> {
        self.ne.as_deref()
    }

    /// Text for `language`, falling back to English.
    ///
    /// # Examples
    /// ```
    /// use eduwarn::domain::{Language, LocalizedText};
    ///
    /// let text = LocalizedText::english("Flood safety");
    /// assert_eq!(text.resolve(Language::Ne), "Flood safety");
    /// ```
    #[must_use]
    pub fn resolve(&self, language: Language) -> &str {
        match (language, self.ne.as_deref()) {
            (Language::Ne, Some(ne)) => ne,
            _ => self.en.as_str(),
        }
    }
}
