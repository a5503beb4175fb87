// tests/assembler_flow.rs
//! Integration tests for per-request assembly with a scripted content API:
//! live content, degraded placeholders, author fallback, and route-level
//! not-found outcomes.

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::sync::Arc;
use wp2reader::{
    AppError, AuthorPayload, BasePath, Catalog, ContentApi, ContentAssembler, ContentId,
    DegradedReason, LanguageCode, PostPayload,
};

/// How the scripted API answers a post lookup.
enum Scripted {
    Payload(&'static str),
    Status(u16),
    Timeout,
}

/// A content API stand-in with canned per-id behavior.
struct ScriptedApi {
    posts: HashMap<&'static str, Scripted>,
    authors: HashMap<u64, &'static str>,
}

impl ScriptedApi {
    fn new() -> Self {
        Self {
            posts: HashMap::new(),
            authors: HashMap::new(),
        }
    }

    fn with_post(mut self, id: &'static str, response: Scripted) -> Self {
        self.posts.insert(id, response);
        self
    }

    fn with_author(mut self, id: u64, name: &'static str) -> Self {
        self.authors.insert(id, name);
        self
    }
}

#[async_trait]
impl ContentApi for ScriptedApi {
    async fn retrieve_post(&self, id: &ContentId) -> Result<PostPayload, AppError> {
        match self.posts.get(id.as_str()) {
            Some(Scripted::Payload(raw)) => Ok(serde_json::from_str(raw).unwrap()),
            Some(Scripted::Status(code)) => Err(AppError::UpstreamStatus {
                status: reqwest::StatusCode::from_u16(*code).unwrap(),
                url: format!("http://upstream/posts/{}", id),
            }),
            Some(Scripted::Timeout) | None => Err(AppError::Timeout {
                url: format!("http://upstream/posts/{}", id),
                after_ms: 25_000,
            }),
        }
    }

    async fn retrieve_author(&self, id: u64) -> Option<AuthorPayload> {
        self.authors.get(&id).map(|name| AuthorPayload {
            name: Some(name.to_string()),
        })
    }
}

fn catalog(raw: &str) -> Catalog {
    serde_json::from_str(raw).expect("test catalog must parse")
}

#[tokio::test]
async fn assembles_live_content_with_fallback_navigation() {
    let cat = catalog(
        r##"{
            "sequence": {"posts": [{"en": "10"}, {"en": "11", "fr": "21"}]},
            "color": {"header": "#101010"},
            "landing": "/start/",
            "favicon": "/icons/site.ico"
        }"##,
    );
    let base = BasePath::new("/x");
    let api = ScriptedApi::new().with_post(
        "10",
        Scripted::Payload(
            r#"{
                "title": {"rendered": "First article"},
                "content": {"rendered": "<p>Body</p>"},
                "_embedded": {"author": [{"name": "Jean Muller"}]}
            }"#,
        ),
    );
    let assembler = ContentAssembler::new(&cat, &base, Arc::new(api));

    // French request on a row without a French column.
    let view = assembler.assemble("fr", "10").await.unwrap();

    assert_eq!(view.language, LanguageCode::En);
    assert_eq!(view.content_id.as_str(), "10");
    assert_eq!(view.position, "1/2");
    assert_eq!(view.record.title, "First article");
    assert_eq!(view.record.html_body, "<p>Body</p>");
    assert_eq!(view.record.author_initials, "JM");
    assert!(!view.record.is_degraded());

    assert_eq!(view.navigation.prev_href, None);
    assert_eq!(view.navigation.next_href.as_deref(), Some("/x/en/11/"));
    assert_eq!(view.navigation.language_options.len(), 1);

    assert_eq!(view.colors.header, "#101010");
    assert_eq!(view.colors.main, "#2E2E2E");
    assert_eq!(view.links.welcome.as_deref(), Some("/start/"));
    assert_eq!(view.logo, "/x/assets/logo.svg");
    assert_eq!(view.favicon, "/x/icons/site.ico");
}

#[tokio::test]
async fn upstream_status_degrades_without_failing_the_route() {
    let cat = catalog(r#"{"sequence": {"posts": [{"en": "99"}]}}"#);
    let base = BasePath::root();
    let api = ScriptedApi::new().with_post("99", Scripted::Status(404));
    let assembler = ContentAssembler::new(&cat, &base, Arc::new(api));

    let view = assembler.assemble("en", "99").await.unwrap();

    assert_eq!(view.record.title, "Post 99");
    assert_eq!(view.record.author_initials, "AU");
    assert_eq!(
        view.record.html_body,
        "<p><em>Content temporarily unavailable (HTTP 404).</em></p>"
    );
    assert_eq!(view.record.degraded, Some(DegradedReason::Status(404)));
}

#[tokio::test]
async fn exhausted_transport_failure_degrades_without_a_status() {
    let cat = catalog(r#"{"sequence": {"posts": [{"en": "7"}]}}"#);
    let base = BasePath::root();
    let api = ScriptedApi::new().with_post("7", Scripted::Timeout);
    let assembler = ContentAssembler::new(&cat, &base, Arc::new(api));

    let view = assembler.assemble("en", "7").await.unwrap();

    assert_eq!(view.record.title, "Post 7");
    assert_eq!(
        view.record.html_body,
        "<p><em>Content temporarily unavailable.</em></p>"
    );
    assert_eq!(view.record.degraded, Some(DegradedReason::Timeout));
}

#[tokio::test]
async fn missing_id_propagates_route_not_found() {
    let cat = catalog(r#"{"sequence": {"posts": [{"en": "1"}]}}"#);
    let base = BasePath::root();
    let assembler = ContentAssembler::new(&cat, &base, Arc::new(ScriptedApi::new()));

    let err = assembler.assemble("en", "404").await.unwrap_err();
    assert!(matches!(err, AppError::RouteNotFound { content_id } if content_id == "404"));
}

#[tokio::test]
async fn author_lookup_falls_back_to_the_users_endpoint() {
    let cat = catalog(r#"{"sequence": {"posts": [{"en": "5"}]}}"#);
    let base = BasePath::root();
    let api = ScriptedApi::new()
        .with_post(
            "5",
            Scripted::Payload(
                r#"{
                    "title": {"rendered": "No embedded author"},
                    "content": {"rendered": "<p>x</p>"},
                    "author": 3
                }"#,
            ),
        )
        .with_author(3, "Anna Becker");
    let assembler = ContentAssembler::new(&cat, &base, Arc::new(api));

    let view = assembler.assemble("en", "5").await.unwrap();
    assert_eq!(view.record.author_initials, "AB");
}

#[tokio::test]
async fn unresolvable_author_keeps_the_placeholder_initials() {
    let cat = catalog(r#"{"sequence": {"posts": [{"en": "5"}]}}"#);
    let base = BasePath::root();
    let api = ScriptedApi::new().with_post(
        "5",
        Scripted::Payload(r#"{"title": {"rendered": "T"}, "content": {"rendered": "<p>x</p>"}, "author": 8}"#),
    );
    let assembler = ContentAssembler::new(&cat, &base, Arc::new(api));

    let view = assembler.assemble("en", "5").await.unwrap();
    assert_eq!(view.record.author_initials, "AU");
    assert!(!view.record.is_degraded());
}

#[tokio::test]
async fn assemble_all_generates_every_route_independently() {
    let cat = catalog(r#"{"sequence": {"posts": [{"en": "1", "fr": "2"}, {"en": "3"}]}}"#);
    let base = BasePath::root();
    let api = ScriptedApi::new()
        .with_post(
            "1",
            Scripted::Payload(r#"{"title": {"rendered": "One"}, "content": {"rendered": "<p>1</p>"}}"#),
        )
        .with_post(
            "2",
            Scripted::Payload(r#"{"title": {"rendered": "Deux"}, "content": {"rendered": "<p>2</p>"}}"#),
        )
        .with_post("3", Scripted::Status(500));
    let assembler = ContentAssembler::new(&cat, &base, Arc::new(api));

    let outcomes = assembler.assemble_all().await;
    assert_eq!(outcomes.len(), 3);

    let pairs: Vec<(&str, &str)> = outcomes
        .iter()
        .map(|o| (o.route.language.as_str(), o.route.content_id.as_str()))
        .collect();
    assert_eq!(pairs, [("en", "1"), ("fr", "2"), ("en", "3")]);

    // The degraded route still yields a renderable view-model.
    let last = outcomes[2].result.as_ref().unwrap();
    assert_eq!(last.record.degraded, Some(DegradedReason::Status(500)));
    assert_eq!(last.record.title, "Post 3");

    // And it never affected its neighbors.
    assert_eq!(outcomes[0].result.as_ref().unwrap().record.title, "One");
    assert_eq!(outcomes[1].result.as_ref().unwrap().record.title, "Deux");
}
