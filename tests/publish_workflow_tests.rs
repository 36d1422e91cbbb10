//! Publish workflow tests against a scripted hosting API

mod common;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use blog_pipeline::artifact::MemorySession;
use blog_pipeline::error::ErrorKind;
use blog_pipeline::pipeline::{MarkdownProducer, Pipeline, run_publisher};
use blog_pipeline::publish::{NoopProgress, publish};
use blog_pipeline::types::{PublishRequest, PublishResult};
use common::{
    Call, MockHostingApi, SAMPLE_POST, make_config, make_request, make_saved_session,
    make_session_with,
};
use serde_json::json;

fn expect_error(result: PublishResult) -> (String, Option<String>, ErrorKind) {
    match result {
        PublishResult::Error {
            message,
            details,
            kind,
        } => (message, details, kind),
        other @ PublishResult::Success { .. } => panic!("expected error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_publish_success_runs_every_step_in_order() {
    let api = MockHostingApi::new();
    let session = make_saved_session().await;

    let result = publish(&session, &api, &make_config(), &make_request(), &NoopProgress).await;

    assert_eq!(
        result,
        PublishResult::Success {
            message: "Blog post published successfully".to_string(),
            pr_url: "https://github.com/queryplanner/blogs/pull/1".to_string(),
            branch: "blog/test".to_string(),
            file_path: "src/data/blog/test.md".to_string(),
        }
    );

    let calls = api.calls();
    assert_eq!(calls.len(), 6);
    assert_eq!(
        calls[0],
        Call::GetRepository {
            repo: "queryplanner/blogs".to_string()
        }
    );
    assert_eq!(
        calls[1],
        Call::GetBranchRef {
            repo: "queryplanner/blogs".to_string(),
            branch: "main".to_string(),
        }
    );
    let Call::CreateRef { payload, .. } = &calls[2] else {
        panic!("expected create_ref, got {:?}", calls[2]);
    };
    assert_eq!(payload.ref_name, "refs/heads/blog/test");
    assert_eq!(payload.sha, "base123");
    assert_eq!(
        calls[3],
        Call::GetContents {
            repo: "queryplanner/blogs".to_string(),
            path: "src/data/blog/test.md".to_string(),
            branch: "blog/test".to_string(),
        }
    );
    assert!(matches!(&calls[4], Call::PutContents { path, .. } if path == "src/data/blog/test.md"));

    let pull = api.pull_payload().unwrap();
    assert_eq!(pull.head, "blog/test");
    assert_eq!(pull.base, "main");
    assert_eq!(pull.title, "Blog: Test Post");
    assert_eq!(pull.body, "This PR adds a new blog post: Test Post");
}

#[tokio::test]
async fn test_missing_artifact_makes_no_calls() {
    let api = MockHostingApi::new();
    let session = MemorySession::new();

    let result = publish(&session, &api, &make_config(), &make_request(), &NoopProgress).await;

    let (message, details, kind) = expect_error(result);
    assert_eq!(message, "No blog content found. Writer must save first.");
    assert!(details.is_none());
    assert_eq!(kind, ErrorKind::ContentMissing);
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn test_empty_artifact_makes_no_calls() {
    let api = MockHostingApi::new();
    let session = make_session_with("").await;

    let result = publish(&session, &api, &make_config(), &make_request(), &NoopProgress).await;

    assert_eq!(expect_error(result).2, ErrorKind::ContentMissing);
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn test_content_uploaded_byte_identical() {
    let content = "---\ntitle: Ünïcödé\n---\n\n# 見出し\n\nEmoji 🚀 and CRLF\r\nend\n";
    let api = MockHostingApi::new();
    let session = make_session_with(content).await;

    let result = publish(&session, &api, &make_config(), &make_request(), &NoopProgress).await;
    assert!(result.is_success());

    let put = api.put_payload().unwrap();
    assert_eq!(BASE64.decode(&put.content).unwrap(), content.as_bytes());
    assert_eq!(put.message, "Add blog: Test Post");
    assert_eq!(put.branch, "blog/test");
}

#[tokio::test]
async fn test_new_file_omits_sha() {
    let api = MockHostingApi::new();
    let session = make_saved_session().await;

    publish(&session, &api, &make_config(), &make_request(), &NoopProgress).await;

    assert!(api.put_payload().unwrap().sha.is_none());
}

#[tokio::test]
async fn test_existing_file_is_updated_with_its_sha() {
    let api = MockHostingApi::new();
    api.set_contents(200, json!({"sha": "existing-sha", "name": "test.md"}).to_string());
    api.set_put_contents(200, "{}");
    let session = make_saved_session().await;

    let result = publish(&session, &api, &make_config(), &make_request(), &NoopProgress).await;

    assert!(result.is_success());
    assert_eq!(
        api.put_payload().unwrap().sha.as_deref(),
        Some("existing-sha")
    );
}

#[tokio::test]
async fn test_existing_branch_is_reused() {
    let api = MockHostingApi::new();
    api.set_create_ref(422, json!({"message": "Reference already exists"}).to_string());
    let session = make_saved_session().await;

    let result = publish(&session, &api, &make_config(), &make_request(), &NoopProgress).await;

    assert!(result.is_success());
    assert!(api.put_payload().is_some());
}

#[tokio::test]
async fn test_other_branch_422_fails() {
    let api = MockHostingApi::new();
    api.set_create_ref(422, json!({"message": "Invalid request"}).to_string());
    let session = make_saved_session().await;

    let result = publish(&session, &api, &make_config(), &make_request(), &NoopProgress).await;

    let (message, details, kind) = expect_error(result);
    assert_eq!(message, "Failed to create branch: 422");
    assert!(details.unwrap().contains("Invalid request"));
    assert_eq!(kind, ErrorKind::BranchCreateFailed);
    assert_eq!(api.call_count(), 3);
}

#[tokio::test]
async fn test_existing_pull_request_is_found() {
    let api = MockHostingApi::new();
    api.set_create_pull(
        422,
        json!({
            "message": "Validation Failed",
            "errors": [{"message": "A pull request already exists for queryplanner:blog/test."}]
        })
        .to_string(),
    );
    api.set_list_pulls(
        200,
        json!([{"html_url": "https://github.com/queryplanner/blogs/pull/7"}]).to_string(),
    );
    let session = make_saved_session().await;

    let result = publish(&session, &api, &make_config(), &make_request(), &NoopProgress).await;

    assert_eq!(
        result.pr_url(),
        Some("https://github.com/queryplanner/blogs/pull/7")
    );
    assert_eq!(
        api.calls().last().unwrap(),
        &Call::ListPulls {
            repo: "queryplanner/blogs".to_string(),
            head: "queryplanner:blog/test".to_string(),
            state: "open".to_string(),
        }
    );
}

#[tokio::test]
async fn test_existing_pull_request_not_listed() {
    let api = MockHostingApi::new();
    api.set_create_pull(422, "A pull request already exists for queryplanner:blog/test.");
    api.set_list_pulls(200, "[]");
    let session = make_saved_session().await;

    let result = publish(&session, &api, &make_config(), &make_request(), &NoopProgress).await;

    let (message, _, kind) = expect_error(result);
    assert_eq!(message, "PR already exists but could not find its URL");
    assert_eq!(kind, ErrorKind::PrLookupAmbiguous);
}

#[tokio::test]
async fn test_repository_not_found_stops_early() {
    let api = MockHostingApi::new();
    api.set_repository(404, json!({"message": "Not Found"}).to_string());
    let session = make_saved_session().await;

    let result = publish(&session, &api, &make_config(), &make_request(), &NoopProgress).await;

    let (message, details, kind) = expect_error(result);
    assert!(message.contains("Failed to fetch repo info"));
    assert!(message.contains("404"));
    assert!(details.unwrap().contains("Not Found"));
    assert_eq!(kind, ErrorKind::RepositoryLookupFailed);
    assert_eq!(api.call_count(), 1);
}

#[tokio::test]
async fn test_base_ref_failures() {
    let session = make_saved_session().await;

    let api = MockHostingApi::new();
    api.set_branch_ref(404, "{}");
    let result = publish(&session, &api, &make_config(), &make_request(), &NoopProgress).await;
    assert_eq!(expect_error(result).0, "Failed to get branch ref: 404");
    assert_eq!(api.call_count(), 2);

    let api = MockHostingApi::new();
    api.set_branch_ref(200, json!({"ref": "refs/heads/main"}).to_string());
    let result = publish(&session, &api, &make_config(), &make_request(), &NoopProgress).await;
    let (message, _, kind) = expect_error(result);
    assert_eq!(message, "Could not get base SHA");
    assert_eq!(kind, ErrorKind::MissingBaseSha);
    assert_eq!(api.call_count(), 2);
}

#[tokio::test]
async fn test_default_branch_is_used_as_base() {
    let api = MockHostingApi::new();
    api.set_repository(200, json!({"default_branch": "trunk"}).to_string());
    let session = make_saved_session().await;

    publish(&session, &api, &make_config(), &make_request(), &NoopProgress).await;

    assert!(matches!(&api.calls()[1], Call::GetBranchRef { branch, .. } if branch == "trunk"));
    assert_eq!(api.pull_payload().unwrap().base, "trunk");
}

#[tokio::test]
async fn test_file_write_failure() {
    let api = MockHostingApi::new();
    api.set_put_contents(409, json!({"message": "sha mismatch"}).to_string());
    let session = make_saved_session().await;

    let result = publish(&session, &api, &make_config(), &make_request(), &NoopProgress).await;

    let (message, details, kind) = expect_error(result);
    assert_eq!(message, "Failed to create file: 409");
    assert!(details.unwrap().contains("sha mismatch"));
    assert_eq!(kind, ErrorKind::FileWriteFailed);
    assert_eq!(api.call_count(), 5);
}

#[tokio::test]
async fn test_pull_request_failure() {
    let api = MockHostingApi::new();
    api.set_create_pull(403, json!({"message": "Forbidden"}).to_string());
    let session = make_saved_session().await;

    let result = publish(&session, &api, &make_config(), &make_request(), &NoopProgress).await;

    let (message, _, kind) = expect_error(result);
    assert_eq!(message, "Failed to create PR: 403");
    assert_eq!(kind, ErrorKind::PrCreateFailed);
}

#[tokio::test]
async fn test_injected_failure_is_unexpected_error() {
    let api = MockHostingApi::new();
    api.fail_on("get_contents");
    let session = make_saved_session().await;

    let result = publish(&session, &api, &make_config(), &make_request(), &NoopProgress).await;

    let (message, details, kind) = expect_error(result);
    assert_eq!(message, "An unexpected error occurred");
    assert!(details.unwrap().contains("get_contents"));
    assert_eq!(kind, ErrorKind::UnexpectedError);
    assert!(api.put_payload().is_none());
}

#[tokio::test]
async fn test_request_overrides_repository() {
    let api = MockHostingApi::new();
    let session = make_saved_session().await;
    let request = PublishRequest {
        repo_owner: Some("custom-owner".to_string()),
        repo_name: Some("custom-repo".to_string()),
        ..make_request()
    };

    let result = publish(&session, &api, &make_config(), &request, &NoopProgress).await;

    assert!(result.is_success());
    assert!(
        api.repos()
            .iter()
            .all(|r| r == "custom-owner/custom-repo")
    );
}

#[tokio::test]
async fn test_republish_is_idempotent() {
    let api = MockHostingApi::new();
    api.set_create_ref(422, "Reference already exists");
    api.set_contents(200, json!({"sha": "old"}).to_string());
    api.set_put_contents(200, "{}");
    api.set_create_pull(422, "A pull request already exists for queryplanner:blog/test.");
    api.set_list_pulls(
        200,
        json!([{"html_url": "https://github.com/queryplanner/blogs/pull/1"}]).to_string(),
    );
    let session = make_saved_session().await;

    let result = publish(&session, &api, &make_config(), &make_request(), &NoopProgress).await;

    assert_eq!(
        result.pr_url(),
        Some("https://github.com/queryplanner/blogs/pull/1")
    );
}

#[tokio::test]
async fn test_run_publisher_uses_session_state() {
    let api = MockHostingApi::new();
    let session = make_saved_session().await;

    let result = run_publisher(&session, &api, &make_config(), &NoopProgress).await;

    assert!(result.is_success());
    assert_eq!(api.pull_payload().unwrap().title, "Blog: Test Post");
}

#[tokio::test]
async fn test_pipeline_saves_then_publishes() {
    let api = MockHostingApi::new();
    let session = MemorySession::new();
    let config = make_config();
    let producer = MarkdownProducer::new(SAMPLE_POST);

    let result = Pipeline::new(&producer, &api, &config)
        .run("testing", &session, &NoopProgress)
        .await
        .unwrap();

    assert!(result.is_success());
    let put = api.put_payload().unwrap();
    assert_eq!(BASE64.decode(put.content).unwrap(), SAMPLE_POST.as_bytes());
    assert_eq!(put.branch, "blog/test");
}

#[tokio::test]
async fn test_pipeline_producer_failure_publishes_nothing() {
    let api = MockHostingApi::new();
    let session = MemorySession::new();
    let config = make_config();
    let producer = MarkdownProducer::new("no frontmatter here");

    let result = Pipeline::new(&producer, &api, &config)
        .run("testing", &session, &NoopProgress)
        .await;

    assert!(result.is_err());
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn test_publish_tool_with_bound_api() {
    use blog_pipeline::tools::{PublishToHostingTool, Tool};
    use std::sync::Arc;

    let api = Arc::new(MockHostingApi::new());
    let tool = PublishToHostingTool::with_api(make_config(), api.clone());
    let session = make_saved_session().await;

    let out = tool
        .execute(
            json!({
                "branch_name": "blog/test",
                "file_name": "test.md",
                "commit_message": "Add blog: Test Post",
                "pr_title": "Blog: Test Post",
                "pr_body": "This PR adds a new blog post: Test Post",
            }),
            &session,
        )
        .await;

    assert_eq!(out["status"], "success");
    assert_eq!(out["pr_url"], "https://github.com/queryplanner/blogs/pull/1");
    assert_eq!(out["file_path"], "src/data/blog/test.md");
    assert_eq!(api.call_count(), 6);
}
