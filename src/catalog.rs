// src/catalog.rs
//! The content catalog: supported languages, rows, and site-level settings.
//!
//! The catalog arrives already parsed and structurally validated by an
//! external loader; this module defines its shape and asserts the one
//! invariant this layer owns: every row names at least one content id.

use crate::constants::{
    FALLBACK_FONT_COLOR, FALLBACK_FOOTER_COLOR, FALLBACK_HEADER_COLOR, FALLBACK_MAIN_COLOR,
};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A supported interface language.
///
/// The variant order here is load-bearing twice over: it is the display
/// order of the language switcher and the fallback order used when a
/// requested language is unavailable for a row. It is never inferred from
/// any storage iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    En,
    Fr,
    De,
    Pt,
    Lb,
}

impl LanguageCode {
    /// The fixed fallback priority order.
    pub const PRIORITY: [LanguageCode; 5] = [Self::En, Self::Fr, Self::De, Self::Pt, Self::Lb];

    /// The lowercase two-letter code used in routes and the catalog.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
            Self::De => "de",
            Self::Pt => "pt",
            Self::Lb => "lb",
        }
    }

    /// Lenient parse for route parameters.
    ///
    /// Case-insensitive; anything outside the supported set is "no
    /// preference" rather than an error, so an unknown `lang` segment
    /// still resolves through the priority fallback.
    pub fn parse(input: &str) -> Option<Self> {
        match input.to_ascii_lowercase().as_str() {
            "en" => Some(Self::En),
            "fr" => Some(Self::Fr),
            "de" => Some(Self::De),
            "pt" => Some(Self::Pt),
            "lb" => Some(Self::Lb),
            _ => None,
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Opaque content identifier, serving as both the catalog key and the
/// remote API's record key. No format is assumed beyond being non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentId(String);

impl ContentId {
    #[allow(dead_code)] // Public API - used by library consumers
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Serialize for ContentId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Catalogs written by hand store WordPress post ids as bare numbers;
// exported ones store strings. Accept both, normalize to a string.
impl<'de> Deserialize<'de> for ContentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum StringOrNumber {
            Text(String),
            Number(u64),
        }

        let value = match StringOrNumber::deserialize(deserializer)? {
            StringOrNumber::Text(s) => s.trim().to_string(),
            StringOrNumber::Number(n) => n.to_string(),
        };

        if value.is_empty() {
            return Err(serde::de::Error::custom("content id cannot be empty"));
        }
        Ok(ContentId(value))
    }
}

/// One logical article: per supported language, an optional content id.
///
/// Invariant: at least one column is populated. The external loader is
/// responsible for structure; [`Row::first_available`] and
/// [`Catalog::assert_row_invariant`] surface violations as corrupt-catalog
/// errors rather than silent misses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Row {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<ContentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fr: Option<ContentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub de: Option<ContentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pt: Option<ContentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lb: Option<ContentId>,
}

impl Row {
    /// The column for one language.
    pub fn get(&self, language: LanguageCode) -> Option<&ContentId> {
        match language {
            LanguageCode::En => self.en.as_ref(),
            LanguageCode::Fr => self.fr.as_ref(),
            LanguageCode::De => self.de.as_ref(),
            LanguageCode::Pt => self.pt.as_ref(),
            LanguageCode::Lb => self.lb.as_ref(),
        }
    }

    /// First populated column in priority order, if any.
    pub fn first_available(&self) -> Option<(LanguageCode, &ContentId)> {
        LanguageCode::PRIORITY
            .iter()
            .find_map(|&lc| self.get(lc).map(|id| (lc, id)))
    }

    /// Whether no column is populated (an invariant violation).
    pub fn is_empty(&self) -> bool {
        self.first_available().is_none()
    }
}

/// The ordered list of rows driving navigation adjacency and position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SequenceSection {
    #[serde(default)]
    pub posts: Vec<Row>,
}

/// Theme variables for the three page regions.
///
/// Fields mirror the catalog's `color` block; every accessor falls back to
/// the fixed defaults when the catalog omits a value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColors {
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub main: Option<String>,
    #[serde(default)]
    pub footer: Option<String>,
    #[serde(default, rename = "header-font")]
    pub header_font: Option<String>,
    #[serde(default, rename = "main-font")]
    pub main_font: Option<String>,
    #[serde(default, rename = "footer-font")]
    pub footer_font: Option<String>,
}

/// Theme colors with all defaults applied; this is what the view-model
/// carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedColors {
    pub header: String,
    pub main: String,
    pub footer: String,
    pub header_font: String,
    pub main_font: String,
    pub footer_font: String,
}

impl ThemeColors {
    /// Applies the fixed fallback palette to any missing field.
    pub fn resolved(&self) -> ResolvedColors {
        let pick = |value: &Option<String>, fallback: &str| {
            value.clone().unwrap_or_else(|| fallback.to_string())
        };
        ResolvedColors {
            header: pick(&self.header, FALLBACK_HEADER_COLOR),
            main: pick(&self.main, FALLBACK_MAIN_COLOR),
            footer: pick(&self.footer, FALLBACK_FOOTER_COLOR),
            header_font: pick(&self.header_font, FALLBACK_FONT_COLOR),
            main_font: pick(&self.main_font, FALLBACK_FONT_COLOR),
            footer_font: pick(&self.footer_font, FALLBACK_FONT_COLOR),
        }
    }
}

/// Site-level root links passed through to the rendering layer untouched.
///
/// These may be external URLs and are therefore never base-prefixed here;
/// only internal asset paths (logo, favicon) go through the normalizer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RootLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faq: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl RootLinks {
    /// The welcome link, falling back to the landing link (the two are
    /// aliases in older catalogs).
    pub fn welcome_or_landing(&self) -> Option<&String> {
        self.welcome.as_ref().or(self.landing.as_ref())
    }
}

/// The parsed catalog: ordered sequence, theme, root links, favicon.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub sequence: SequenceSection,
    #[serde(default)]
    pub color: ThemeColors,
    #[serde(flatten)]
    pub links: RootLinks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
}

impl Catalog {
    pub fn posts(&self) -> &[Row] {
        &self.sequence.posts
    }

    /// Asserts the row invariant over the whole sequence.
    ///
    /// Structure is the loader's responsibility; this is the one check that
    /// belongs to the resolution layer, and its violation is fatal.
    pub fn assert_row_invariant(&self) -> Result<(), AppError> {
        for (index, row) in self.sequence.posts.iter().enumerate() {
            if row.is_empty() {
                return Err(AppError::CatalogInvariant(format!(
                    "sequence row {} has no content id in any language",
                    index
                )));
            }
        }
        Ok(())
    }
}
