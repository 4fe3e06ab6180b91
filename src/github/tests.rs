//! Unit tests for the discussion publication engine.
#![expect(clippy::expect_used, reason = "Tests panic on failure")]

use std::collections::VecDeque;

use rstest::rstest;

use super::test_support::{SAMPLE_LABEL_PREFIX as LABEL_PREFIX, publication_request, sample_target};
use super::{
    CategoryId, CategoryResolver, DiscussionCandidate, DiscussionCategory, DiscussionComment,
    DiscussionFinder, DiscussionId, DiscussionRef, MockDiscussionGateway, PublicationRequest,
    PublicationStep, PublishError, Publisher, RepositoryDiscussionInfo, RepositoryId,
    RepositoryTarget, credited_persona, format_comment_body,
};

fn sample_request(personas: &[&str]) -> PublicationRequest {
    publication_request("My Post", personas)
}

fn existing_discussion() -> DiscussionRef {
    DiscussionRef {
        id: DiscussionId::new("D_1"),
        url: "https://github.com/octo/blog/discussions/1".to_owned(),
    }
}

fn bot_comment(persona: &str) -> DiscussionComment {
    DiscussionComment {
        body: format_comment_body(LABEL_PREFIX, persona, "Earlier thoughts"),
    }
}

// --- Repository targeting ---

#[rstest]
#[case::public_github("https://github.com/octo/blog", "https://api.github.com/")]
#[case::enterprise_host("https://ghe.corp.example/octo/blog", "https://ghe.corp.example/api/v3")]
#[case::enterprise_with_port("http://localhost:8080/octo/blog", "http://localhost:8080/api/v3")]
fn repository_target_derives_api_base_from_host(#[case] input: &str, #[case] expected: &str) {
    let target = RepositoryTarget::parse(input).expect("target should parse");

    assert_eq!(target.api_base().as_str(), expected);
    assert_eq!(target.owner().as_str(), "octo");
    assert_eq!(target.repository().as_str(), "blog");
}

#[rstest]
#[case::missing_repo("https://github.com/only-owner")]
#[case::bare_host("https://github.com/")]
fn repository_target_rejects_incomplete_paths(#[case] input: &str) {
    let error = RepositoryTarget::parse(input).expect_err("incomplete path should fail");
    assert_eq!(error, PublishError::MissingRepositorySegments);
}

// --- Prefix-boundary parsing ---

#[rstest]
#[case::exact_match(
    "🤖 **AI-Generated Comment** · Persona: Curious Reader\n\nGreat post!",
    Some("Curious Reader")
)]
#[case::whitespace_trimmed(
    "🤖 **AI-Generated Comment** · Persona:   Curious Reader  \nbody",
    Some("Curious Reader")
)]
#[case::different_prefix("🔧 **Other Bot** · Persona: Curious Reader\n\nhi", None)]
#[case::missing_marker("🤖 **AI-Generated Comment** Curious Reader", None)]
#[case::blank_name("🤖 **AI-Generated Comment** · Persona:   \n\nbody", None)]
#[case::human_reply("Great write-up, thanks!", None)]
fn credited_persona_requires_exact_prefix(#[case] body: &str, #[case] expected: Option<&str>) {
    assert_eq!(credited_persona(body, LABEL_PREFIX), expected);
}

#[test]
fn formatted_comment_round_trips_through_scanner() {
    let body = format_comment_body(LABEL_PREFIX, "Devil's Advocate", "But consider this.");
    assert_eq!(credited_persona(&body, LABEL_PREFIX), Some("Devil's Advocate"));
    assert!(
        body.ends_with("\n\nBut consider this."),
        "drafted text should follow a blank line, got `{body}`"
    );
}

// --- Discussion locating ---

#[tokio::test]
async fn finder_requires_byte_exact_title_equality() {
    let mut gateway = MockDiscussionGateway::new();
    gateway.expect_search_discussions().returning(|_, _| {
        Ok(vec![
            DiscussionCandidate {
                id: DiscussionId::new("D_2"),
                title: "My Post 2".to_owned(),
                url: "https://github.com/octo/blog/discussions/2".to_owned(),
            },
            DiscussionCandidate {
                id: DiscussionId::new("D_1"),
                title: "My Post".to_owned(),
                url: "https://github.com/octo/blog/discussions/1".to_owned(),
            },
        ])
    });

    let finder = DiscussionFinder::new(&gateway);
    let found = finder
        .find(&sample_target(), "My Post")
        .await
        .expect("search should succeed")
        .expect("exact match should be found");

    assert_eq!(found.id, DiscussionId::new("D_1"), "fuzzy match must lose");
}

#[tokio::test]
async fn finder_reports_absence_as_none() {
    let mut gateway = MockDiscussionGateway::new();
    gateway.expect_search_discussions().returning(|_, _| {
        Ok(vec![DiscussionCandidate {
            id: DiscussionId::new("D_2"),
            title: "My Post 2".to_owned(),
            url: "https://github.com/octo/blog/discussions/2".to_owned(),
        }])
    });

    let finder = DiscussionFinder::new(&gateway);
    let found = finder
        .find(&sample_target(), "My Post")
        .await
        .expect("search should succeed");

    assert_eq!(found, None, "no exact match must yield None, not an error");
}

// --- Category resolution ---

#[tokio::test]
async fn resolver_lists_available_categories_on_miss() {
    let mut gateway = MockDiscussionGateway::new();
    gateway.expect_repository_discussion_info().returning(|_| {
        Ok(RepositoryDiscussionInfo {
            repository_id: RepositoryId::new("R_abc"),
            categories: vec![
                DiscussionCategory {
                    id: CategoryId::new("DIC_1"),
                    name: "General".to_owned(),
                },
                DiscussionCategory {
                    id: CategoryId::new("DIC_2"),
                    name: "Blog Comments".to_owned(),
                },
            ],
        })
    });

    let resolver = CategoryResolver::new(&gateway);
    let error = resolver
        .resolve(&sample_target(), "Nonexistent")
        .await
        .expect_err("unknown category should fail");

    let message = error.to_string();
    assert!(
        message.contains("General") && message.contains("Blog Comments"),
        "error should enumerate available categories, got `{message}`"
    );
    assert!(
        matches!(error, PublishError::CategoryNotFound { .. }),
        "expected CategoryNotFound, got {error:?}"
    );
}

#[tokio::test]
async fn resolver_matches_category_names_case_insensitively() {
    let mut gateway = MockDiscussionGateway::new();
    gateway.expect_repository_discussion_info().returning(|_| {
        Ok(RepositoryDiscussionInfo {
            repository_id: RepositoryId::new("R_abc"),
            categories: vec![DiscussionCategory {
                id: CategoryId::new("DIC_2"),
                name: "Blog Comments".to_owned(),
            }],
        })
    });

    let resolver = CategoryResolver::new(&gateway);
    let (repository_id, category_id) = resolver
        .resolve(&sample_target(), "blog comments")
        .await
        .expect("case-insensitive match should resolve");

    assert_eq!(repository_id.as_str(), "R_abc");
    assert_eq!(category_id.as_str(), "DIC_2");
}

// --- Full publication runs ---

#[tokio::test]
async fn second_run_reuses_discussion_and_skips_credited_personas() {
    let mut gateway = MockDiscussionGateway::new();
    gateway.expect_search_discussions().returning(|_, _| {
        Ok(vec![DiscussionCandidate {
            id: DiscussionId::new("D_1"),
            title: "My Post".to_owned(),
            url: "https://github.com/octo/blog/discussions/1".to_owned(),
        }])
    });
    gateway.expect_repository_discussion_info().never();
    gateway.expect_create_discussion().never();
    gateway
        .expect_discussion_comments()
        .returning(|_| Ok(vec![bot_comment("A")]));
    gateway
        .expect_add_discussion_comment()
        .withf(|_, body| !body.contains("Persona: A\n"))
        .times(2)
        .returning(|_, _| Ok(super::CommentId::new("DC_new")));

    let request = sample_request(&["A", "B", "C"]);
    let publisher = Publisher::new(&gateway);
    let outcome = publisher
        .publish(&request)
        .await
        .expect("publication should succeed");

    assert_eq!(outcome.discussion.id, DiscussionId::new("D_1"));
    assert_eq!(outcome.published, vec!["B".to_owned(), "C".to_owned()]);
    assert_eq!(outcome.skipped, vec!["A".to_owned()]);
}

#[tokio::test]
async fn first_run_creates_discussion_then_publishes_all_personas() {
    let mut gateway = MockDiscussionGateway::new();
    gateway
        .expect_search_discussions()
        .returning(|_, _| Ok(Vec::new()));
    gateway.expect_repository_discussion_info().returning(|_| {
        Ok(RepositoryDiscussionInfo {
            repository_id: RepositoryId::new("R_abc"),
            categories: vec![DiscussionCategory {
                id: CategoryId::new("DIC_2"),
                name: "Blog Comments".to_owned(),
            }],
        })
    });
    gateway
        .expect_create_discussion()
        .withf(|repository_id, category_id, title, _body| {
            repository_id.as_str() == "R_abc"
                && category_id.as_str() == "DIC_2"
                && title == "My Post"
        })
        .times(1)
        .returning(|_, _, _, _| Ok(existing_discussion()));
    gateway
        .expect_discussion_comments()
        .returning(|_| Ok(Vec::new()));
    gateway
        .expect_add_discussion_comment()
        .times(2)
        .returning(|_, _| Ok(super::CommentId::new("DC_new")));

    let request = sample_request(&["A", "B"]);
    let publisher = Publisher::new(&gateway);
    let outcome = publisher
        .publish(&request)
        .await
        .expect("publication should succeed");

    assert_eq!(outcome.published, vec!["A".to_owned(), "B".to_owned()]);
    assert!(outcome.skipped.is_empty(), "nothing should be skipped");
}

#[tokio::test]
async fn mid_sequence_failure_reports_partial_progress() {
    let mut gateway = MockDiscussionGateway::new();
    gateway.expect_search_discussions().returning(|_, _| {
        Ok(vec![DiscussionCandidate {
            id: DiscussionId::new("D_1"),
            title: "My Post".to_owned(),
            url: "https://github.com/octo/blog/discussions/1".to_owned(),
        }])
    });
    gateway
        .expect_discussion_comments()
        .returning(|_| Ok(vec![bot_comment("A")]));

    let mut calls = 0_u32;
    gateway
        .expect_add_discussion_comment()
        .returning(move |_, _| {
            calls += 1;
            if calls == 1 {
                Ok(super::CommentId::new("DC_new"))
            } else {
                Err(PublishError::Network {
                    message: "connection reset".to_owned(),
                })
            }
        });

    let request = sample_request(&["A", "B", "C"]);
    let publisher = Publisher::new(&gateway);
    let failure = publisher
        .publish(&request)
        .await
        .expect_err("second comment should fail");

    assert_eq!(failure.published, vec!["B".to_owned()], "B was posted");
    assert_eq!(failure.skipped, vec!["A".to_owned()], "A was credited");
    assert!(
        matches!(failure.error, PublishError::Network { .. }),
        "expected the network error to surface, got {:?}",
        failure.error
    );
}

// --- State machine transitions ---

#[tokio::test]
async fn locating_transitions_to_creating_on_miss() {
    let mut gateway = MockDiscussionGateway::new();
    gateway
        .expect_search_discussions()
        .returning(|_, _| Ok(Vec::new()));

    let request = sample_request(&["A"]);
    let publisher = Publisher::new(&gateway);
    let next = publisher
        .advance(PublicationStep::Locating, &request)
        .await
        .expect("transition should succeed");

    assert_eq!(next, PublicationStep::Creating);
}

#[tokio::test]
async fn publishing_with_empty_queue_transitions_to_done() {
    let gateway = MockDiscussionGateway::new();
    let request = sample_request(&[]);
    let publisher = Publisher::new(&gateway);

    let next = publisher
        .advance(
            PublicationStep::Publishing {
                discussion: existing_discussion(),
                pending: VecDeque::new(),
                published: vec!["A".to_owned()],
                skipped: vec!["B".to_owned()],
            },
            &request,
        )
        .await
        .expect("transition should succeed");

    let PublicationStep::Done(outcome) = next else {
        panic!("expected Done, got {next:?}");
    };
    assert_eq!(outcome.published, vec!["A".to_owned()]);
    assert_eq!(outcome.skipped, vec!["B".to_owned()]);
}
