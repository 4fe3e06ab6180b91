//! End-to-end publication flow tests against a mocked GraphQL endpoint.
//!
//! These tests drive the real Octocrab gateway and publisher over HTTP,
//! distinguishing GraphQL operations by fragments of their query documents.
#![expect(clippy::expect_used, reason = "Tests panic on failure")]

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use banter::github::test_support::{SAMPLE_LABEL_PREFIX as LABEL_PREFIX, persona_comments};
use banter::{
    OctocrabDiscussionGateway, PersonalAccessToken, PublicationRequest, PublishError, Publisher,
    RepositoryTarget,
};

const GRAPHQL_PATH: &str = "/api/v3/graphql";
const TITLE: &str = "Why Rust Feels Different";

fn gateway_for(server: &MockServer) -> (OctocrabDiscussionGateway, RepositoryTarget) {
    let target = RepositoryTarget::parse(&format!("{}/octocat/blog", server.uri()))
        .expect("should create repository target");
    let token = PersonalAccessToken::new("valid-token").expect("token should be valid");
    let gateway =
        OctocrabDiscussionGateway::for_token(&token, &target).expect("should create gateway");
    (gateway, target)
}

fn request_for(target: RepositoryTarget, personas: &[&str]) -> PublicationRequest {
    PublicationRequest {
        target,
        category: "Blog Comments".to_owned(),
        title: TITLE.to_owned(),
        body: "This discussion mirrors the post: https://example.test/post".to_owned(),
        label_prefix: LABEL_PREFIX.to_owned(),
        comments: persona_comments(personas),
    }
}

async fn mount_search(server: &MockServer, nodes: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("type: DISCUSSION"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "data": { "search": { "nodes": nodes } }
            })),
        )
        .mount(server)
        .await;
}

async fn mount_comments(server: &MockServer, bodies: &[String]) {
    let nodes: Vec<serde_json::Value> = bodies.iter().map(|body| json!({ "body": body })).collect();
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("comments(first:"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "data": { "node": { "comments": { "nodes": nodes } } }
            })),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn first_run_creates_the_discussion_and_publishes_every_persona() {
    let server = MockServer::start().await;
    let (gateway, target) = gateway_for(&server);

    mount_search(&server, json!([])).await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("discussionCategories"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "repository": {
                        "id": "R_repo",
                        "discussionCategories": {
                            "nodes": [
                                { "id": "DIC_general", "name": "General" },
                                { "id": "DIC_blog", "name": "Blog Comments" }
                            ]
                        }
                    }
                }
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("createDiscussion"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "createDiscussion": {
                        "discussion": { "id": "D_new", "url": "https://example.test/d/1" }
                    }
                }
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    mount_comments(&server, &[]).await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("addDiscussionComment"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "addDiscussionComment": { "comment": { "id": "DC_1" } }
                }
            })),
        )
        .expect(2)
        .mount(&server)
        .await;

    let request = request_for(target, &["Curious Reader", "Devil's Advocate"]);
    let publisher = Publisher::new(&gateway);

    let outcome = publisher
        .publish(&request)
        .await
        .expect("publication should succeed");

    assert_eq!(outcome.discussion.url, "https://example.test/d/1");
    assert_eq!(outcome.published, vec!["Curious Reader", "Devil's Advocate"]);
    assert!(outcome.skipped.is_empty());
}

#[tokio::test]
async fn second_run_reuses_the_discussion_and_skips_credited_personas() {
    let server = MockServer::start().await;
    let (gateway, target) = gateway_for(&server);

    mount_search(
        &server,
        json!([
            { "id": "D_existing", "title": TITLE, "url": "https://example.test/d/9" }
        ]),
    )
    .await;

    // Re-creation would break the one-discussion-per-title guarantee.
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("createDiscussion"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let credited = format!("{LABEL_PREFIX} · Persona: Curious Reader\n\nEarlier thoughts.");
    mount_comments(
        &server,
        &[credited, "A human reply without the label.".to_owned()],
    )
    .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("addDiscussionComment"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "addDiscussionComment": { "comment": { "id": "DC_2" } }
                }
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = request_for(target, &["Curious Reader", "Devil's Advocate"]);
    let publisher = Publisher::new(&gateway);

    let outcome = publisher
        .publish(&request)
        .await
        .expect("publication should succeed");

    assert_eq!(outcome.discussion.id.as_str(), "D_existing");
    assert_eq!(outcome.published, vec!["Devil's Advocate"]);
    assert_eq!(outcome.skipped, vec!["Curious Reader"]);
}

#[tokio::test]
async fn similar_titles_do_not_satisfy_the_exact_match() {
    let server = MockServer::start().await;
    let (gateway, target) = gateway_for(&server);

    // Fuzzy search over-matches; only a byte-exact title counts.
    mount_search(
        &server,
        json!([
            { "id": "D_punct", "title": "Why Rust Feels Different!", "url": "https://example.test/d/2" },
            { "id": "D_case", "title": "why rust feels different", "url": "https://example.test/d/3" }
        ]),
    )
    .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("discussionCategories"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "repository": {
                        "id": "R_repo",
                        "discussionCategories": {
                            "nodes": [{ "id": "DIC_blog", "name": "Blog Comments" }]
                        }
                    }
                }
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("createDiscussion"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "createDiscussion": {
                        "discussion": { "id": "D_new", "url": "https://example.test/d/4" }
                    }
                }
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    mount_comments(&server, &[]).await;

    let request = request_for(target, &[]);
    let publisher = Publisher::new(&gateway);

    let outcome = publisher
        .publish(&request)
        .await
        .expect("publication should succeed");

    assert_eq!(outcome.discussion.id.as_str(), "D_new");
}

#[tokio::test]
async fn mid_sequence_failure_keeps_earlier_comments_and_reports_progress() {
    let server = MockServer::start().await;
    let (gateway, target) = gateway_for(&server);

    mount_search(
        &server,
        json!([
            { "id": "D_existing", "title": TITLE, "url": "https://example.test/d/9" }
        ]),
    )
    .await;

    mount_comments(&server, &[]).await;

    // First comment succeeds, the second hits a server error.
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("addDiscussionComment"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "addDiscussionComment": { "comment": { "id": "DC_1" } }
                }
            })),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("addDiscussionComment"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "Server Error"
        })))
        .mount(&server)
        .await;

    let request = request_for(target, &["Curious Reader", "Devil's Advocate"]);
    let publisher = Publisher::new(&gateway);

    let failure = publisher
        .publish(&request)
        .await
        .expect_err("second comment should fail");

    assert_eq!(failure.published, vec!["Curious Reader"]);
    assert!(failure.skipped.is_empty());
    assert!(
        matches!(failure.error, PublishError::Api { .. }),
        "expected Api error, got {:?}",
        failure.error
    );
}

#[tokio::test]
async fn unknown_category_fails_before_any_write() {
    let server = MockServer::start().await;
    let (gateway, target) = gateway_for(&server);

    mount_search(&server, json!([])).await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("discussionCategories"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "repository": {
                        "id": "R_repo",
                        "discussionCategories": {
                            "nodes": [{ "id": "DIC_general", "name": "General" }]
                        }
                    }
                }
            })),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("createDiscussion"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let request = request_for(target, &["Curious Reader"]);
    let publisher = Publisher::new(&gateway);

    let failure = publisher
        .publish(&request)
        .await
        .expect_err("unknown category should fail");

    match failure.error {
        PublishError::CategoryNotFound { category, available, .. } => {
            assert_eq!(category, "Blog Comments");
            assert_eq!(available, vec!["General"]);
        }
        other => panic!("expected CategoryNotFound, got {other:?}"),
    }
}
