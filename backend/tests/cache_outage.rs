//! Behaviour with the cache tier unreachable: every operation still works,
//! reads always come from the database, and lockout is never enforced.

mod support;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::json;

use support::{
    Harness, cache_stats_request, delete_request, list_request, login_request, register_request,
    send, source, update_request,
};

#[rstest]
#[actix_web::test]
async fn reads_always_come_from_the_database() {
    let harness = Harness::with_unreachable_cache();
    let app = actix_test::init_service(harness.app()).await;
    send(&app, register_request("alice", "alice@example.com", "pw1")).await;

    for _ in 0..2 {
        let (status, body) = send(&app, list_request()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(source(&body), Some("database"));
    }
}

#[rstest]
#[actix_web::test]
async fn writes_classify_as_usual() {
    let harness = Harness::with_unreachable_cache();
    let app = actix_test::init_service(harness.app()).await;

    let (status, _) = send(&app, register_request("alice", "alice@example.com", "pw1")).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, register_request("alice", "alice@example.com", "pw1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, update_request(1, json!({ "role": "admin" }))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, delete_request(1)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, delete_request(1)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn lockout_is_never_enforced() {
    let harness = Harness::with_unreachable_cache();
    let app = actix_test::init_service(harness.app()).await;
    send(&app, register_request("alice", "alice@example.com", "pw1")).await;

    for _ in 0..10 {
        let (status, _) = send(&app, login_request("alice", "wrongpw")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
    let (status, _) = send(&app, login_request("alice", "pw1")).await;
    assert_eq!(status, StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn cache_stats_report_unavailable() {
    let harness = Harness::with_unreachable_cache();
    let app = actix_test::init_service(harness.app()).await;

    let (status, body) = send(&app, cache_stats_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "unavailable" }));
}

#[rstest]
#[actix_web::test]
async fn cache_recovery_resumes_caching() {
    let harness = Harness::new();
    let app = actix_test::init_service(harness.app()).await;
    harness.cache.set_online(false);

    let (_, body) = send(&app, list_request()).await;
    assert_eq!(source(&body), Some("database"));
    assert_eq!(harness.cache.peek("users_list"), None);

    harness.cache.set_online(true);
    send(&app, list_request()).await;
    let (_, body) = send(&app, list_request()).await;
    assert_eq!(source(&body), Some("cache"));
}
