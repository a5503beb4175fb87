// src/assembler.rs
//! Per-request orchestration: resolve a route, fetch its content, merge
//! into the view-model consumed by the rendering layer.
//!
//! No retry or resolution logic lives here: this is composition plus the
//! one network call. Each request is independent, so batch generation just
//! runs every route's assembly concurrently.

use crate::api::{ContentApi, ContentRecord};
use crate::catalog::{Catalog, ContentId, LanguageCode, ResolvedColors, RootLinks};
use crate::constants::{DEFAULT_FAVICON_PATH, LOGO_ASSET_PATH};
use crate::error::AppError;
use crate::paths::BasePath;
use crate::resolver::{self, NavigationLinks, RouteParams};
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;

/// The assembled output for one route: everything the rendering layer
/// needs, immutable once built and owned by the caller.
#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    /// The language actually serving the page after fallback.
    pub language: LanguageCode,
    pub content_id: ContentId,
    /// 1-based display position, e.g. `"3/12"`.
    pub position: String,
    pub record: ContentRecord,
    pub navigation: NavigationLinks,
    pub colors: ResolvedColors,
    pub links: RootLinks,
    pub logo: String,
    pub favicon: String,
}

/// One route's generation result. A failed route never aborts the others.
#[derive(Debug)]
pub struct RouteOutcome {
    pub route: RouteParams,
    pub result: Result<ViewModel, AppError>,
}

/// Assembles view-models for article routes against a fixed catalog,
/// base path, and content API.
pub struct ContentAssembler<'a> {
    catalog: &'a Catalog,
    base: &'a BasePath,
    api: Arc<dyn ContentApi>,
}

impl<'a> ContentAssembler<'a> {
    pub fn new(catalog: &'a Catalog, base: &'a BasePath, api: Arc<dyn ContentApi>) -> Self {
        Self { catalog, base, api }
    }

    /// Assembles one route from a requested (language, id) pair.
    ///
    /// The language is taken leniently from the route parameter; an
    /// unknown value resolves through the priority fallback. A missing id
    /// propagates as [`AppError::RouteNotFound`]; fetch failures degrade
    /// into the view-model instead of failing the route.
    pub async fn assemble(
        &self,
        requested_lang: &str,
        content_id: &str,
    ) -> Result<ViewModel, AppError> {
        let sequence = self.catalog.posts();
        let requested = LanguageCode::parse(requested_lang);

        let location = resolver::resolve_location(sequence, requested, content_id)?;
        let navigation = resolver::resolve_navigation(
            sequence,
            location.row_index,
            location.language,
            self.base,
        )?;
        let position = resolver::position(sequence.len(), location.row_index);

        let record = self.api.fetch_content_record(&location.content_id).await;

        // Older catalogs alias welcome and landing.
        let mut links = self.catalog.links.clone();
        links.welcome = links.welcome_or_landing().cloned();

        Ok(ViewModel {
            language: location.language,
            content_id: location.content_id,
            position,
            record,
            navigation,
            colors: self.catalog.color.resolved(),
            links,
            logo: self.base.apply(LOGO_ASSET_PATH),
            favicon: normalized_favicon(self.catalog.favicon.as_deref(), self.base),
        })
    }

    /// Assembles every route the catalog produces, concurrently.
    ///
    /// Resolution is pure and the fetches are independent, so the routes
    /// run unbounded; ordering of outcomes follows enumeration order.
    pub async fn assemble_all(&self) -> Vec<RouteOutcome> {
        let routes = resolver::enumerate_routes(self.catalog.posts());
        log::info!("Assembling {} routes", routes.len());

        let assemblies = routes.into_iter().map(|route| async move {
            let result = self
                .assemble(route.language.as_str(), route.content_id.as_str())
                .await;
            RouteOutcome { route, result }
        });

        join_all(assemblies).await
    }
}

/// Favicon path rule: a configured root-relative path is base-prefixed,
/// anything else (external or already-relative) passes through untouched;
/// the default asset is always base-prefixed.
fn normalized_favicon(configured: Option<&str>, base: &BasePath) -> String {
    match configured {
        Some(path) if path.starts_with('/') => base.apply(path),
        Some(path) => path.to_string(),
        None => base.apply(DEFAULT_FAVICON_PATH),
    }
}
