//! End-to-end reversal tests against a local mock of the lookup service.
//!
//! These exercise the real `ureq` transport; nothing leaves the machine.

use std::sync::Arc;
use std::time::Duration;

use hashorbit_core::{classify, Md5DbProvider, ReversalOutcome, ReversalRegistry};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MD5_HELLO: &str = "5d41402abc4b2a76b9719d911017c592";

fn registry_for(server: &MockServer) -> ReversalRegistry {
    let provider = Md5DbProvider::new()
        .with_base_url(format!("{}/md5db", server.uri()))
        .with_request_timeout(Duration::from_secs(2));
    let mut registry = ReversalRegistry::empty().with_timeout(Duration::from_secs(5));
    registry.register("MD5", Arc::new(provider));
    registry
}

#[tokio::test(flavor = "multi_thread")]
async fn test_known_digest_is_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/md5db/{MD5_HELLO}")))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .expect(1)
        .mount(&server)
        .await;

    let registry = registry_for(&server);
    let outcome = registry
        .attempt_reversal(&format!("  {MD5_HELLO}\n"), &classify(MD5_HELLO))
        .await;

    assert_eq!(outcome, ReversalOutcome::Found("hello".into()));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_body_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let registry = registry_for(&server);
    let outcome = registry
        .attempt_reversal(MD5_HELLO, &classify(MD5_HELLO))
        .await;

    assert_eq!(outcome, ReversalOutcome::NotFound);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_is_unsupported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let registry = registry_for(&server);
    let outcome = registry
        .attempt_reversal(MD5_HELLO, &classify(MD5_HELLO))
        .await;

    assert_eq!(
        outcome,
        ReversalOutcome::Unsupported(ReversalOutcome::FAILED.into())
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_non_utf8_body_is_unsupported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xff, 0xfe, 0xfd]))
        .mount(&server)
        .await;

    let registry = registry_for(&server);
    let outcome = registry
        .attempt_reversal(MD5_HELLO, &classify(MD5_HELLO))
        .await;

    assert_eq!(
        outcome,
        ReversalOutcome::Unsupported(ReversalOutcome::FAILED.into())
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("too late")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let registry = registry_for(&server).with_timeout(Duration::from_millis(200));
    let outcome = registry
        .attempt_reversal(MD5_HELLO, &classify(MD5_HELLO))
        .await;

    assert_eq!(
        outcome,
        ReversalOutcome::Unsupported(ReversalOutcome::FAILED.into())
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sha256_never_reaches_the_service() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("nope"))
        .expect(0)
        .mount(&server)
        .await;

    let digest = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    let registry = registry_for(&server);
    let outcome = registry.attempt_reversal(digest, &classify(digest)).await;

    assert_eq!(
        outcome,
        ReversalOutcome::Unsupported(ReversalOutcome::NO_SUPPORT.into())
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unreachable_service_is_unsupported() {
    // Nothing listens on the discard port of the loopback interface
    let provider = Md5DbProvider::new()
        .with_base_url("http://127.0.0.1:9/md5db")
        .with_request_timeout(Duration::from_secs(1));
    let mut registry = ReversalRegistry::empty();
    registry.register("MD5", Arc::new(provider));

    let outcome = registry
        .attempt_reversal(MD5_HELLO, &classify(MD5_HELLO))
        .await;

    assert_eq!(
        outcome,
        ReversalOutcome::Unsupported(ReversalOutcome::FAILED.into())
    );
}
