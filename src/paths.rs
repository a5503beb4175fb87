// src/paths.rs
//! Pure functions for base-path normalization of internal links.
//!
//! Deployments may live under a sub-path (e.g. `/knowledge/app3`); every
//! internally generated link goes through [`BasePath`] exactly once. The
//! normalizer is an explicit value injected where needed; there is no
//! process-global base path.

use once_cell::sync::Lazy;
use regex::Regex;

static ABSOLUTE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://").expect("absolute URL pattern must compile"));

static SLASH_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/{2,}").expect("slash-run pattern must compile"));

/// A configured base path segment, normalized at construction and fixed for
/// the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePath {
    prefix: String,
}

impl BasePath {
    /// Normalizes the configured prefix: trailing slashes are dropped and a
    /// non-empty prefix always starts with `/`. An empty prefix means the
    /// site is deployed at the root and `apply` only slash-ensures.
    pub fn new(prefix: impl Into<String>) -> Self {
        let trimmed = prefix.into().trim_end_matches('/').to_string();
        let prefix = if trimmed.is_empty() || trimmed.starts_with('/') {
            trimmed
        } else {
            format!("/{}", trimmed)
        };
        Self { prefix }
    }

    /// A base path for root deployments.
    pub fn root() -> Self {
        Self::new("")
    }

    #[allow(dead_code)] // Public API - used by library consumers
    pub fn as_str(&self) -> &str {
        &self.prefix
    }

    /// Prefixes an internal path with the base segment, exactly once.
    ///
    /// Empty paths, absolute `http(s)` URLs, and fragment/query references
    /// pass through unchanged. Everything else is slash-ensured, prefixed
    /// unless already prefixed, and has runs of slashes collapsed.
    /// Idempotent: `apply(apply(p)) == apply(p)`.
    pub fn apply(&self, path: &str) -> String {
        if path.is_empty() {
            return path.to_string();
        }
        if ABSOLUTE_URL.is_match(path) {
            return path.to_string();
        }
        if path.starts_with('#') || path.starts_with('?') {
            return path.to_string();
        }

        let path = ensure_leading_slash(path);
        if self.prefix.is_empty() {
            return path;
        }

        // already prefixed?
        if path == self.prefix || path.starts_with(&format!("{}/", self.prefix)) {
            return path;
        }

        SLASH_RUNS
            .replace_all(&format!("{}{}", self.prefix, path), "/")
            .into_owned()
    }

    /// Strips the base prefix if present; otherwise returns the
    /// slash-ensured path unchanged. Inverse of [`BasePath::apply`] for
    /// internal paths, used to normalize incoming pre-prefixed links.
    #[allow(dead_code)] // Public API - used by the rendering layer
    pub fn strip(&self, path: &str) -> String {
        if path.is_empty() || self.prefix.is_empty() || ABSOLUTE_URL.is_match(path) {
            return path.to_string();
        }
        let path = ensure_leading_slash(path);
        match path.strip_prefix(&format!("{}/", self.prefix)) {
            Some(rest) => format!("/{}", rest),
            None => path,
        }
    }
}

fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}
