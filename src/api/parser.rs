// src/api/parser.rs
//! Payload shapes and pure extraction functions for content API responses.
//!
//! The upstream exposes rendered fields nested one level deep
//! (`title.rendered`, `content.rendered`) and the author either embedded
//! under `_embedded.author[0].name` or, on older installations, under the
//! SEO plugin's `yoast_head_json.author`. Every field is optional here;
//! extraction decides the fallbacks.

use crate::catalog::ContentId;
use crate::constants::{EMPTY_BODY_PLACEHOLDER, FALLBACK_AUTHOR_INITIALS};
use serde::Deserialize;

/// A field rendered by the CMS, with its raw source when exposed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderedField {
    #[serde(default)]
    pub rendered: Option<String>,
    #[serde(default)]
    pub raw: Option<String>,
}

/// Author entry under `_embedded.author`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmbeddedAuthor {
    #[serde(default)]
    pub name: Option<String>,
}

/// The `_embedded` relations block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmbeddedRelations {
    #[serde(default)]
    pub author: Option<Vec<EmbeddedAuthor>>,
}

/// The SEO plugin's head block; only the author field matters here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeoHead {
    #[serde(default)]
    pub author: Option<String>,
}

/// A post record as returned by `GET /posts/{id}?_embed=1`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostPayload {
    #[serde(default)]
    pub title: Option<RenderedField>,
    #[serde(default)]
    pub content: Option<RenderedField>,
    /// Numeric author id, used for the fallback `/users/{id}` lookup.
    #[serde(default)]
    pub author: Option<u64>,
    #[serde(default, rename = "_embedded")]
    pub embedded: Option<EmbeddedRelations>,
    #[serde(default, rename = "yoast_head_json")]
    pub seo_head: Option<SeoHead>,
}

/// An author record as returned by `GET /users/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorPayload {
    #[serde(default)]
    pub name: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Post title: rendered, then raw, then a deterministic reference to the id.
pub fn post_title(payload: &PostPayload, content_id: &ContentId) -> String {
    payload
        .title
        .as_ref()
        .and_then(|t| non_empty(&t.rendered).or_else(|| non_empty(&t.raw)))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Post {}", content_id))
}

/// Post body: rendered HTML, or an explicit empty-content marker.
pub fn post_body(payload: &PostPayload) -> String {
    payload
        .content
        .as_ref()
        .and_then(|c| non_empty(&c.rendered))
        .map(str::to_string)
        .unwrap_or_else(|| EMPTY_BODY_PLACEHOLDER.to_string())
}

/// Author display name from the embedded relations, falling back to the
/// SEO head's author field.
pub fn author_display_name(payload: &PostPayload) -> Option<String> {
    let embedded = payload
        .embedded
        .as_ref()
        .and_then(|e| e.author.as_ref())
        .and_then(|authors| authors.first())
        .and_then(|a| non_empty(&a.name));

    embedded
        .or_else(|| payload.seo_head.as_ref().and_then(|h| non_empty(&h.author)))
        .map(str::to_string)
}

/// Author initials: first character of up to the first two whitespace
/// tokens, uppercased and concatenated; the fixed placeholder when no
/// usable name exists.
pub fn author_initials(name: Option<&str>) -> String {
    let initials: String = name
        .unwrap_or_default()
        .split_whitespace()
        .take(2)
        .filter_map(|token| token.chars().next())
        .flat_map(char::to_uppercase)
        .collect();

    if initials.is_empty() {
        FALLBACK_AUTHOR_INITIALS.to_string()
    } else {
        initials
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn payload(raw: &str) -> PostPayload {
        serde_json::from_str(raw).expect("test payload must parse")
    }

    #[test]
    fn title_prefers_rendered_over_raw() {
        let p = payload(r#"{"title": {"rendered": "Hello", "raw": "hello-src"}}"#);
        assert_eq!(post_title(&p, &ContentId::from("9")), "Hello");

        let p = payload(r#"{"title": {"raw": "hello-src"}}"#);
        assert_eq!(post_title(&p, &ContentId::from("9")), "hello-src");
    }

    #[test]
    fn title_falls_back_to_the_id_reference() {
        let p = payload(r#"{"title": {"rendered": ""}}"#);
        assert_eq!(post_title(&p, &ContentId::from("99")), "Post 99");

        let p = payload("{}");
        assert_eq!(post_title(&p, &ContentId::from("99")), "Post 99");
    }

    #[test]
    fn body_marks_empty_content() {
        let p = payload(r#"{"content": {"rendered": "<p>hi</p>"}}"#);
        assert_eq!(post_body(&p), "<p>hi</p>");

        let p = payload("{}");
        assert_eq!(post_body(&p), "<p>(empty)</p>");
    }

    #[test]
    fn author_name_prefers_embedded_then_seo_head() {
        let p = payload(
            r#"{"_embedded": {"author": [{"name": "Jean Muller"}]},
                "yoast_head_json": {"author": "Someone Else"}}"#,
        );
        assert_eq!(author_display_name(&p).as_deref(), Some("Jean Muller"));

        let p = payload(r#"{"yoast_head_json": {"author": "Anne Weber"}}"#);
        assert_eq!(author_display_name(&p).as_deref(), Some("Anne Weber"));

        let p = payload(r#"{"_embedded": {"author": []}}"#);
        assert_eq!(author_display_name(&p), None);
    }

    #[test]
    fn initials_take_the_first_two_tokens() {
        assert_eq!(author_initials(Some("Jean Muller")), "JM");
        assert_eq!(author_initials(Some("anna maria weber")), "AM");
        assert_eq!(author_initials(Some("Cher")), "C");
    }

    #[test]
    fn initials_default_to_the_placeholder() {
        assert_eq!(author_initials(None), "AU");
        assert_eq!(author_initials(Some("")), "AU");
        assert_eq!(author_initials(Some("   ")), "AU");
    }
}
