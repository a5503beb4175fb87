// src/api/mod.rs
//! Content API interaction — the ability to retrieve article records from
//! the remote CMS.
//!
//! The module separates I/O (the HTTP client and its retry policy) from
//! payload interpretation (the parser), behind one capability trait so the
//! assembler never depends on HTTP details.

pub mod client;
pub mod parser;

use crate::catalog::ContentId;
use crate::constants::FALLBACK_AUTHOR_INITIALS;
use crate::error::{AppError, DegradedReason};
use parser::{AuthorPayload, PostPayload};
use serde::Serialize;

/// One article's content as served to the rendering layer.
///
/// Lives for a single request; never cached beyond one resolution. A
/// degraded record is a well-formed placeholder, distinguishable by
/// [`ContentRecord::degraded`] but renderable like any other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentRecord {
    pub title: String,
    pub html_body: String,
    pub author_initials: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded: Option<DegradedReason>,
}

impl ContentRecord {
    /// The placeholder substituted when the upstream is unreachable or
    /// answers with an error status. The title deterministically references
    /// the requested id; a received status code is named in the body.
    pub fn placeholder(content_id: &ContentId, reason: DegradedReason) -> Self {
        let html_body = match reason {
            DegradedReason::Status(code) => format!(
                "<p><em>Content temporarily unavailable (HTTP {}).</em></p>",
                code
            ),
            _ => "<p><em>Content temporarily unavailable.</em></p>".to_string(),
        };
        Self {
            title: format!("Post {}", content_id),
            html_body,
            author_initials: FALLBACK_AUTHOR_INITIALS.to_string(),
            degraded: Some(reason),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}

/// The ability to retrieve records from the content API.
///
/// This is the fundamental seam for API interaction: the assembler and the
/// tests depend on this trait, never on reqwest.
#[async_trait::async_trait]
pub trait ContentApi: Send + Sync {
    /// Retrieves a post with embedded relations. Errors carry the transport
    /// vs. upstream-status distinction; interpreting them is the caller's
    /// business.
    async fn retrieve_post(&self, id: &ContentId) -> Result<PostPayload, AppError>;

    /// Fallback author lookup. Absence and failure are both `None`, never
    /// an error; a missing author must not degrade the article.
    async fn retrieve_author(&self, id: u64) -> Option<AuthorPayload>;

    /// Fetches one article record, degrading to a placeholder instead of
    /// failing. Nothing propagates past this boundary.
    async fn fetch_content_record(&self, id: &ContentId) -> ContentRecord {
        match self.retrieve_post(id).await {
            Ok(payload) => {
                let name = match parser::author_display_name(&payload) {
                    Some(name) => Some(name),
                    None => match payload.author {
                        Some(author_id) => self
                            .retrieve_author(author_id)
                            .await
                            .and_then(|author| author.name),
                        None => None,
                    },
                };

                ContentRecord {
                    title: parser::post_title(&payload, id),
                    html_body: parser::post_body(&payload),
                    author_initials: parser::author_initials(name.as_deref()),
                    degraded: None,
                }
            }
            Err(error) => {
                let reason = DegradedReason::classify(&error);
                log::warn!("Fetch for post {} degraded ({}): {}", id, reason, error);
                ContentRecord::placeholder(id, reason)
            }
        }
    }
}

// Re-export the public interface
pub use client::WpHttpClient;
