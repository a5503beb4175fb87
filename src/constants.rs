// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you the story of
//! how the system talks to the content API and how it degrades.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Content API boundaries
// ---------------------------------------------------------------------------

/// How long a single fetch attempt may run before it is aborted.
///
/// The upstream CMS is occasionally very slow under load; 25 seconds is
/// generous enough for a cold cache while still bounding a full site build.
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 25_000;

/// How many times a transport failure is retried after the first attempt.
///
/// Completed responses are never retried, whatever their status code.
pub const DEFAULT_FETCH_RETRIES: u32 = 2;

/// Base delay between retry attempts; the actual delay grows linearly
/// with the attempt number (attempt 1 waits one base delay, attempt 2 two).
pub const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

/// User-Agent sent on every content API request.
pub const HTTP_USER_AGENT: &str = "wp2reader-static/0.1";

// ---------------------------------------------------------------------------
// Degradation placeholders
// ---------------------------------------------------------------------------

/// Author initials shown when no author name can be determined.
pub const FALLBACK_AUTHOR_INITIALS: &str = "AU";

/// Body substituted when a post completes with an empty content field.
pub const EMPTY_BODY_PLACEHOLDER: &str = "<p>(empty)</p>";

// ---------------------------------------------------------------------------
// Internal asset paths (pre-normalization)
// ---------------------------------------------------------------------------

/// Site logo asset, relative to the site root.
pub const LOGO_ASSET_PATH: &str = "/assets/logo.svg";

/// Favicon used when the catalog does not configure one.
pub const DEFAULT_FAVICON_PATH: &str = "/assets/favicon.ico";

/// Route the landing redirect falls back to when the catalog has no
/// resolvable first article.
pub const NOT_FOUND_ROUTE: &str = "/404/";

// ---------------------------------------------------------------------------
// Theme fallbacks
// ---------------------------------------------------------------------------

/// Background colors for the three page regions when the catalog omits them.
pub const FALLBACK_HEADER_COLOR: &str = "#1F1F1F";
pub const FALLBACK_MAIN_COLOR: &str = "#2E2E2E";
pub const FALLBACK_FOOTER_COLOR: &str = "#1A1A1A";

/// Font color shared by all three regions when the catalog omits it.
pub const FALLBACK_FONT_COLOR: &str = "#FFFFFF";
