// src/resolver.rs
//! Deterministic resolution of (language, content id) requests against the
//! ordered catalog sequence.
//!
//! Everything in this module is pure: the outcome depends only on the
//! sequence, the requested language, and the requested id, so it is safe to
//! call concurrently across arbitrarily many routes.

use crate::catalog::{ContentId, LanguageCode, Row};
use crate::constants::NOT_FOUND_ROUTE;
use crate::error::AppError;
use crate::paths::BasePath;
use serde::Serialize;

/// One populated (language, content id) column of a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageOption {
    pub language: LanguageCode,
    pub content_id: ContentId,
}

/// The canonical outcome of resolution: which row serves the request and
/// which (language, id) pair actually renders it after fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub row_index: usize,
    pub language: LanguageCode,
    pub content_id: ContentId,
}

/// Localized neighbor links and the language switcher entries for one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationLinks {
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
    pub language_options: Vec<LanguageOption>,
}

/// A (language, id) route to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteParams {
    pub language: LanguageCode,
    pub content_id: ContentId,
}

/// Scans rows in sequence order, columns in priority order, and returns the
/// first row carrying `content_id`.
///
/// Content ids are assumed unique across the catalog but this is not
/// enforced: a duplicate id resolves to the first match in scan order.
pub fn find_row_by_id<'a>(
    sequence: &'a [Row],
    content_id: &str,
) -> Result<(usize, &'a Row), AppError> {
    for (index, row) in sequence.iter().enumerate() {
        for &lc in &LanguageCode::PRIORITY {
            if row.get(lc).is_some_and(|id| id.as_str() == content_id) {
                return Ok((index, row));
            }
        }
    }
    Err(AppError::RouteNotFound {
        content_id: content_id.to_string(),
    })
}

/// Picks the column that serves a row for a preferred language: the
/// preferred column when populated, otherwise the first populated column in
/// priority order.
///
/// A row with no populated column violates the catalog invariant and is
/// reported as a corrupt-catalog error, not as a missing route.
pub fn best_for_row(
    row: &Row,
    preferred: Option<LanguageCode>,
) -> Result<LanguageOption, AppError> {
    if let Some(lc) = preferred {
        if let Some(id) = row.get(lc) {
            return Ok(LanguageOption {
                language: lc,
                content_id: id.clone(),
            });
        }
    }
    row.first_available()
        .map(|(language, id)| LanguageOption {
            language,
            content_id: id.clone(),
        })
        .ok_or_else(|| {
            AppError::CatalogInvariant("row has no content id in any language".to_string())
        })
}

/// Resolves a request to its canonical location: row lookup by id, then
/// language fallback within that row.
pub fn resolve_location(
    sequence: &[Row],
    requested: Option<LanguageCode>,
    content_id: &str,
) -> Result<ResolvedLocation, AppError> {
    let (row_index, row) = find_row_by_id(sequence, content_id)?;
    let picked = best_for_row(row, requested)?;
    Ok(ResolvedLocation {
        row_index,
        language: picked.language,
        content_id: picked.content_id,
    })
}

/// The 1-based display position, e.g. `"3/12"`.
pub fn position(total: usize, row_index: usize) -> String {
    format!("{}/{}", row_index + 1, total)
}

/// The canonical href of one article route.
pub fn route_href(base: &BasePath, language: LanguageCode, content_id: &ContentId) -> String {
    base.apply(&format!("/{}/{}/", language, content_id))
}

/// Computes prev/next links and the language switcher for a resolved row.
///
/// Neighbors resolve against the *actual* resolved language, not the
/// originally requested one, so a fallback on the current row carries
/// through to its neighbors.
pub fn resolve_navigation(
    sequence: &[Row],
    row_index: usize,
    language: LanguageCode,
    base: &BasePath,
) -> Result<NavigationLinks, AppError> {
    let neighbor = |index: Option<usize>| -> Result<Option<String>, AppError> {
        match index.and_then(|i| sequence.get(i)) {
            Some(row) => {
                let pick = best_for_row(row, Some(language))?;
                Ok(Some(route_href(base, pick.language, &pick.content_id)))
            }
            None => Ok(None),
        }
    };

    let prev_href = neighbor(row_index.checked_sub(1))?;
    let next_href = neighbor(row_index.checked_add(1))?;

    let current = sequence.get(row_index).ok_or_else(|| {
        AppError::CatalogInvariant(format!("row index {} out of bounds", row_index))
    })?;
    let language_options = LanguageCode::PRIORITY
        .iter()
        .filter_map(|&lc| {
            current.get(lc).map(|id| LanguageOption {
                language: lc,
                content_id: id.clone(),
            })
        })
        .collect();

    Ok(NavigationLinks {
        prev_href,
        next_href,
        language_options,
    })
}

/// Every (language, id) route the sequence produces, row order first,
/// priority order within a row.
pub fn enumerate_routes(sequence: &[Row]) -> Vec<RouteParams> {
    let mut routes = Vec::new();
    for row in sequence {
        for &lc in &LanguageCode::PRIORITY {
            if let Some(id) = row.get(lc) {
                routes.push(RouteParams {
                    language: lc,
                    content_id: id.clone(),
                });
            }
        }
    }
    routes
}

/// The landing redirect target: the first populated column of the first
/// non-empty row, or the not-found page when the sequence is empty.
pub fn landing_target(sequence: &[Row], base: &BasePath) -> String {
    sequence
        .iter()
        .find_map(|row| row.first_available())
        .map(|(lc, id)| route_href(base, lc, id))
        .unwrap_or_else(|| base.apply(NOT_FOUND_ROUTE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sequence(raw: &str) -> Vec<Row> {
        serde_json::from_str(raw).expect("test sequence must parse")
    }

    #[test]
    fn find_row_scans_in_sequence_order() {
        let rows = sequence(r#"[{"en": "1"}, {"fr": "2"}]"#);
        let (index, _) = find_row_by_id(&rows, "2").unwrap();
        assert_eq!(index, 1);
    }

    #[test]
    fn find_row_misses_with_route_not_found() {
        let rows = sequence(r#"[{"en": "1"}]"#);
        let err = find_row_by_id(&rows, "9").unwrap_err();
        assert!(matches!(err, AppError::RouteNotFound { content_id } if content_id == "9"));
    }

    #[test]
    fn duplicate_ids_resolve_to_the_first_scan_match() {
        let rows = sequence(r#"[{"fr": "7"}, {"en": "7"}]"#);
        let (index, _) = find_row_by_id(&rows, "7").unwrap();
        assert_eq!(index, 0);
    }

    #[test]
    fn best_for_row_prefers_the_requested_language() {
        let rows = sequence(r#"[{"en": "1", "fr": "2"}]"#);
        let pick = best_for_row(&rows[0], Some(LanguageCode::Fr)).unwrap();
        assert_eq!(pick.language, LanguageCode::Fr);
        assert_eq!(pick.content_id.as_str(), "2");
    }

    #[test]
    fn best_for_row_falls_back_in_priority_order() {
        let rows = sequence(r#"[{"en": "1", "fr": "2"}]"#);
        let pick = best_for_row(&rows[0], Some(LanguageCode::De)).unwrap();
        assert_eq!(pick.language, LanguageCode::En);
        assert_eq!(pick.content_id.as_str(), "1");
    }

    #[test]
    fn best_for_row_reports_the_corrupt_catalog() {
        let row = Row::default();
        let err = best_for_row(&row, Some(LanguageCode::En)).unwrap_err();
        assert!(matches!(err, AppError::CatalogInvariant(_)));
    }

    #[test]
    fn position_is_one_based() {
        assert_eq!(position(12, 2), "3/12");
        assert_eq!(position(1, 0), "1/1");
    }

    #[test]
    fn navigation_at_the_first_row_has_no_prev() {
        let rows = sequence(r#"[{"en": "1"}, {"en": "2"}]"#);
        let base = BasePath::root();
        let nav = resolve_navigation(&rows, 0, LanguageCode::En, &base).unwrap();
        assert_eq!(nav.prev_href, None);
        assert_eq!(nav.next_href.as_deref(), Some("/en/2/"));
    }

    #[test]
    fn navigation_at_the_last_row_has_no_next() {
        let rows = sequence(r#"[{"en": "1"}, {"en": "2"}]"#);
        let base = BasePath::root();
        let nav = resolve_navigation(&rows, 1, LanguageCode::En, &base).unwrap();
        assert_eq!(nav.prev_href.as_deref(), Some("/en/1/"));
        assert_eq!(nav.next_href, None);
    }

    #[test]
    fn navigation_neighbors_fall_back_per_row() {
        // Row 1 has no German column; the next link keeps the reader in
        // German, the prev link falls back to English.
        let rows = sequence(r#"[{"en": "1"}, {"de": "5", "en": "2"}, {"de": "6"}]"#);
        let base = BasePath::new("/x");
        let nav = resolve_navigation(&rows, 1, LanguageCode::De, &base).unwrap();
        assert_eq!(nav.prev_href.as_deref(), Some("/x/en/1/"));
        assert_eq!(nav.next_href.as_deref(), Some("/x/de/6/"));
    }

    #[test]
    fn language_options_cover_the_current_row_in_priority_order() {
        let rows = sequence(r#"[{"lb": "5", "en": "1", "pt": "4"}]"#);
        let base = BasePath::root();
        let nav = resolve_navigation(&rows, 0, LanguageCode::En, &base).unwrap();
        let langs: Vec<&str> = nav
            .language_options
            .iter()
            .map(|o| o.language.as_str())
            .collect();
        assert_eq!(langs, ["en", "pt", "lb"]);
    }

    #[test]
    fn resolution_uses_the_actual_language_for_neighbors() {
        // Full walk-through: request (fr, "10") on a catalog whose row 0 has
        // no French column.
        let rows = sequence(r#"[{"en": "10"}, {"en": "11", "fr": "21"}]"#);
        let base = BasePath::root();

        let location = resolve_location(&rows, LanguageCode::parse("fr"), "10").unwrap();
        assert_eq!(location.row_index, 0);
        assert_eq!(location.language, LanguageCode::En);
        assert_eq!(location.content_id.as_str(), "10");

        let nav = resolve_navigation(&rows, location.row_index, location.language, &base).unwrap();
        assert_eq!(nav.prev_href, None);
        assert_eq!(nav.next_href.as_deref(), Some("/en/11/"));
        assert_eq!(position(rows.len(), location.row_index), "1/2");
    }

    #[test]
    fn routes_enumerate_every_populated_pair() {
        let rows = sequence(r#"[{"en": "1", "lb": "5"}, {"fr": "2"}]"#);
        let routes = enumerate_routes(&rows);
        let pairs: Vec<(&str, &str)> = routes
            .iter()
            .map(|r| (r.language.as_str(), r.content_id.as_str()))
            .collect();
        assert_eq!(pairs, [("en", "1"), ("lb", "5"), ("fr", "2")]);
    }

    #[test]
    fn landing_target_picks_the_first_populated_pair() {
        let rows = sequence(r#"[{"fr": "2"}, {"en": "1"}]"#);
        let base = BasePath::new("/x");
        assert_eq!(landing_target(&rows, &base), "/x/fr/2/");
    }

    #[test]
    fn landing_target_falls_back_to_not_found() {
        let base = BasePath::new("/x");
        assert_eq!(landing_target(&[], &base), "/x/404/");
    }
}
