// src/output/paths.rs
//! Pure functions for on-disk output locations.
//!
//! URL-space paths go through [`crate::paths::BasePath`]; these functions
//! only decide where a route's artifact lands under the output directory.

use crate::catalog::{ContentId, LanguageCode};
use std::path::{Path, PathBuf};

/// The view-model artifact for one article route:
/// `{out}/{lang}/{id}/index.json`, mirroring the produced route URL.
pub fn route_output_path(out_dir: &Path, language: LanguageCode, id: &ContentId) -> PathBuf {
    out_dir
        .join(language.as_str())
        .join(id.as_str())
        .join("index.json")
}

/// The landing redirect artifact at the output root.
pub fn landing_output_path(out_dir: &Path) -> PathBuf {
    out_dir.join("index.json")
}
