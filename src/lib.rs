// src/lib.rs
//! wp2reader library — resolves multilingual article routes against an
//! ordered catalog and assembles reader view-models from a remote content
//! API.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `DegradedReason`
//! - **Configuration** — `PipelineConfig`, `ApiBase`
//! - **Catalog model** — `Catalog`, `Row`, `LanguageCode`, `ContentId`
//! - **Path normalization** — `BasePath`
//! - **Resolution** — `resolve_location`, `resolve_navigation`, `best_for_row`
//! - **API client** — `ContentApi`, `WpHttpClient`, payload parsing
//! - **Assembly** — `ContentAssembler`, `ViewModel`

// Internal modules — must match what's in main.rs
mod api;
mod assembler;
mod catalog;
mod config;
mod constants;
mod error;
mod error_recovery;
mod output;
mod paths;
mod pipeline;
mod resolver;

// --- Error Handling ---
pub use crate::error::{AppError, DegradedReason, Result};

// --- Configuration ---
pub use crate::config::{ApiBase, CommandLineInput, PipelineConfig};

// --- Catalog Model ---
pub use crate::catalog::{
    Catalog, ContentId, LanguageCode, ResolvedColors, RootLinks, Row, SequenceSection, ThemeColors,
};

// --- Path Normalization ---
pub use crate::paths::BasePath;

// --- Resolution ---
pub use crate::resolver::{
    best_for_row, enumerate_routes, find_row_by_id, landing_target, position, resolve_location,
    resolve_navigation, route_href, LanguageOption, NavigationLinks, ResolvedLocation, RouteParams,
};

// --- API Client ---
pub use crate::api::{
    parser::{author_display_name, author_initials, post_body, post_title},
    parser::{AuthorPayload, EmbeddedAuthor, EmbeddedRelations, PostPayload, RenderedField, SeoHead},
    ContentApi, ContentRecord, WpHttpClient,
};

// --- Retry Policy ---
pub use crate::error_recovery::retry_with_backoff;

// --- Assembly ---
pub use crate::assembler::{ContentAssembler, RouteOutcome, ViewModel};

// --- Output ---
pub use crate::output::{
    deliver, landing_output_path, route_output_path, DeliveryTarget, OutputPlan, OutputReport,
};

// --- Pipeline Traits ---
pub use crate::pipeline::{ViewDelivery, ViewSource};
