//! Mock GitHub API shared by the adapter tests.

use octocrab::Octocrab;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub(crate) fn client_for(server: &MockServer) -> Octocrab {
    // Already installed by an earlier test in the same process is fine
    let _ = rustls::crypto::ring::default_provider().install_default();
    Octocrab::builder()
        .base_uri(server.uri())
        .unwrap()
        .build()
        .unwrap()
}

/// Closed pull request created Jan 1 and merged Jan 5, 2024
pub(crate) fn pull_request_json(number: u64) -> Value {
    json!({
        "url": format!("https://api.github.com/repos/owner/repo/pulls/{}", number),
        "id": 1000 + number,
        "node_id": format!("PR_{}", number),
        "number": number,
        "state": "closed",
        "locked": false,
        "maintainer_can_modify": false,
        "draft": false,
        "title": format!("Change {}", number),
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-05T00:00:00Z",
        "closed_at": "2024-01-05T00:00:00Z",
        "merged_at": "2024-01-05T00:00:00Z",
        "head": { "ref": "feature", "sha": "1111111" },
        "base": { "ref": "main", "sha": "2222222" }
    })
}

pub(crate) fn review_requested(at: &str) -> Value {
    json!({ "event": "review_requested", "created_at": at })
}

pub(crate) fn review(state: &str, at: &str, login: &str) -> Value {
    json!({
        "state": state,
        "submitted_at": at,
        "user": { "login": login, "type": "User" }
    })
}

/// `Link` header pointing the client at `route` on the mock server
pub(crate) fn next_link(server: &MockServer, route: &str) -> String {
    format!("<{}{}>; rel=\"next\"", server.uri(), route)
}

pub(crate) fn ok_json(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

pub(crate) async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

pub(crate) async fn mount_server_error(server: &MockServer, route: &str) {
    let response = ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" }));
    mount(server, route, response).await;
}

/// Detail, empty timeline and empty reviews for one pull request
pub(crate) async fn mount_quiet_pull_request(server: &MockServer, number: u64) {
    let base = format!("/repos/owner/repo/pulls/{}", number);
    mount(server, &base, ok_json(pull_request_json(number))).await;
    mount(
        server,
        &format!("/repos/owner/repo/issues/{}/timeline", number),
        ok_json(json!([])),
    )
    .await;
    mount(server, &format!("{}/reviews", base), ok_json(json!([]))).await;
}
