//! Integration tests for `LookupSession` against a mock provider.
//!
//! Covers explicit lookups, input validation, the pro->free fallback,
//! auto-detection, and out-of-order responses.

mod helpers;

use std::time::Duration;

use helpers::{fail_body, harness, request_count, success_body};
use ip_finder::config::{
    MSG_API_KEY_REMOVED, MSG_INVALID_INPUT, MSG_LOOKUP_SUCCESS, MSG_NETWORK_ERROR,
    MSG_PROVIDER_FAILED,
};
use ip_finder::error_handling::{LookupEvent, TransportErrorKind};
use ip_finder::{ApiKeyChange, LookupError, NotificationKind, PreferenceStore};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_lookup_success_displays_provider_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/free/json/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("8.8.8.8", "United States")))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, None);
    let record = h.session.lookup("8.8.8.8").await.expect("lookup should succeed");

    assert_eq!(record.query, "8.8.8.8");
    let shown = h.session.current_record().expect("record should be displayed");
    assert_eq!(shown.query, "8.8.8.8");
    assert_eq!(shown.country, "United States");
    assert!(!h.session.is_auto_detected());

    let notes = h.notifier.notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].kind, NotificationKind::Success);
    assert_eq!(notes[0].description, MSG_LOOKUP_SUCCESS);
}

#[tokio::test]
async fn test_lookup_trims_subject() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/free/json/1.1.1.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("1.1.1.1", "Australia")))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, None);
    let record = h.session.lookup("  1.1.1.1\t").await.unwrap();
    assert_eq!(record.country, "Australia");
}

#[tokio::test]
async fn test_empty_and_whitespace_subjects_issue_no_requests() {
    let server = MockServer::start().await;
    let h = harness(&server, None);

    for subject in ["", "   ", "\t\n"] {
        let before = h.notifier.len();
        let err = h.session.lookup(subject).await.unwrap_err();
        assert_eq!(err, LookupError::InvalidInput);

        let notes = h.notifier.notifications();
        assert_eq!(notes.len(), before + 1, "exactly one notification per attempt");
        let last = notes.last().unwrap();
        assert!(last.is_error());
        assert_eq!(last.description, MSG_INVALID_INPUT);
    }

    assert_eq!(request_count(&server).await, 0);
    assert!(h.session.current_record().is_none());
    assert_eq!(
        h.session.lookup_stats().get_count(LookupEvent::InvalidInput),
        3
    );
}

#[tokio::test]
async fn test_provider_fail_keeps_previous_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/free/json/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("8.8.8.8", "United States")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/free/json/999.999.999.999"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(fail_body("999.999.999.999", "invalid query")),
        )
        .mount(&server)
        .await;

    let h = harness(&server, None);
    h.session.lookup("8.8.8.8").await.unwrap();

    let err = h.session.lookup("999.999.999.999").await.unwrap_err();
    assert_eq!(err, LookupError::ProviderRejected("invalid query".into()));

    let last = h.notifier.last().unwrap();
    assert!(last.is_error());
    assert_eq!(last.description, "invalid query");

    let shown = h.session.current_record().unwrap();
    assert_eq!(shown.query, "8.8.8.8");
}

#[tokio::test]
async fn test_provider_fail_without_message_uses_generic_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/free/json/10.0.0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "fail"})))
        .mount(&server)
        .await;

    let h = harness(&server, None);
    let err = h.session.lookup("10.0.0.1").await.unwrap_err();
    assert_eq!(err, LookupError::ProviderRejected(MSG_PROVIDER_FAILED.into()));
    assert_eq!(h.notifier.last().unwrap().description, MSG_PROVIDER_FAILED);
}

#[tokio::test]
async fn test_non_json_response_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/free/json/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("8.8.8.8", "United States")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/free/json/4.4.4.4"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let h = harness(&server, None);
    h.session.lookup("8.8.8.8").await.unwrap();

    let err = h.session.lookup("4.4.4.4").await.unwrap_err();
    match err {
        LookupError::TransportFailure { kind, .. } => assert_eq!(kind, TransportErrorKind::Decode),
        other => panic!("expected transport failure, got {:?}", other),
    }
    assert_eq!(h.notifier.last().unwrap().description, MSG_NETWORK_ERROR);
    assert_eq!(h.session.current_record().unwrap().query, "8.8.8.8");
}

#[tokio::test]
async fn test_http_error_status_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/free/json/4.4.4.4"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let h = harness(&server, None);
    let err = h.session.lookup("4.4.4.4").await.unwrap_err();
    match err {
        LookupError::TransportFailure { kind, .. } => {
            assert_eq!(kind, TransportErrorKind::Status(503))
        }
        other => panic!("expected transport failure, got {:?}", other),
    }
    assert_eq!(h.notifier.last().unwrap().description, MSG_NETWORK_ERROR);
}

#[tokio::test]
async fn test_http_error_with_fail_body_is_provider_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/free/json/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("8.8.8.8", "United States")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/free/json/4.4.4.4"))
        .respond_with(ResponseTemplate::new(429).set_body_json(fail_body("4.4.4.4", "quota exceeded")))
        .mount(&server)
        .await;

    let h = harness(&server, None);
    h.session.lookup("8.8.8.8").await.unwrap();

    let err = h.session.lookup("4.4.4.4").await.unwrap_err();
    assert_eq!(err, LookupError::ProviderRejected("quota exceeded".into()));
    assert_eq!(h.notifier.last().unwrap().description, "quota exceeded");
    assert_eq!(h.session.current_record().unwrap().query, "8.8.8.8");
    assert_eq!(
        h.session.lookup_stats().get_count(LookupEvent::ProviderRejected),
        1
    );
}

#[tokio::test]
async fn test_http_error_with_success_body_is_displayed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/free/json/8.8.8.8"))
        .respond_with(ResponseTemplate::new(503).set_body_json(success_body("8.8.8.8", "United States")))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, None);
    let record = h.session.lookup("8.8.8.8").await.expect("record body should be honored");

    assert_eq!(record.country, "United States");
    assert_eq!(h.session.current_record().unwrap().query, "8.8.8.8");
    let last = h.notifier.last().unwrap();
    assert_eq!(last.kind, NotificationKind::Success);
    assert_eq!(last.description, MSG_LOOKUP_SUCCESS);
}

#[tokio::test]
async fn test_dot_segment_subjects_issue_no_requests() {
    let server = MockServer::start().await;
    let h = harness(&server, None);

    for subject in [".", "..", " .. "] {
        let err = h.session.lookup(subject).await.unwrap_err();
        assert_eq!(err, LookupError::InvalidInput);
    }

    assert_eq!(request_count(&server).await, 0);
    assert_eq!(h.notifier.len(), 3);
    assert!(h
        .notifier
        .notifications()
        .iter()
        .all(|n| n.description == MSG_INVALID_INPUT));
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/free/json/8.8.8.8"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success_body("8.8.8.8", "United States"))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let mut config = helpers::test_config(&server);
    config.timeout_seconds = 1;
    let h = helpers::harness_with_store(
        &config,
        std::sync::Arc::new(ip_finder::MemoryPreferenceStore::new()),
    );

    let err = h.session.lookup("8.8.8.8").await.unwrap_err();
    match err {
        LookupError::TransportFailure { kind, .. } => assert_eq!(kind, TransportErrorKind::Timeout),
        other => panic!("expected timeout, got {:?}", other),
    }
    assert!(!h.session.is_busy());
    assert_eq!(h.notifier.last().unwrap().description, MSG_NETWORK_ERROR);
}

#[tokio::test]
async fn test_pro_fail_falls_back_to_free_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pro/json/8.8.8.8"))
        .and(query_param("key", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fail_body("8.8.8.8", "invalid key")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/free/json/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("8.8.8.8", "United States")))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, Some("abc123"));
    let record = h.session.lookup("8.8.8.8").await.unwrap();

    assert_eq!(record.country, "United States");
    assert_eq!(h.session.current_record().unwrap().query, "8.8.8.8");
    assert_eq!(request_count(&server).await, 2);

    let stats = h.session.lookup_stats();
    assert_eq!(stats.get_count(LookupEvent::ElevatedRequest), 1);
    assert_eq!(stats.get_count(LookupEvent::FreeRequest), 1);
    assert_eq!(stats.get_count(LookupEvent::Fallback), 1);

    // Free request carries no key
    let requests = server.received_requests().await.unwrap();
    let free_request = requests
        .iter()
        .find(|r| r.url.path().starts_with("/free/"))
        .unwrap();
    assert_eq!(free_request.url.query(), None);
}

#[tokio::test]
async fn test_pro_and_free_fail_reports_free_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pro/json/999.999.999.999"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(fail_body("999.999.999.999", "invalid query")),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/free/json/999.999.999.999"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(fail_body("999.999.999.999", "reserved range")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, Some("abc123"));
    let err = h.session.lookup("999.999.999.999").await.unwrap_err();

    assert_eq!(err, LookupError::ProviderRejected("reserved range".into()));
    assert_eq!(h.notifier.len(), 1);
    assert_eq!(h.notifier.last().unwrap().description, "reserved range");
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn test_pro_success_uses_only_pro() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pro/json/8.8.8.8"))
        .and(query_param("key", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("8.8.8.8", "United States")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/free/json/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("8.8.8.8", "United States")))
        .expect(0)
        .mount(&server)
        .await;

    let h = harness(&server, Some("abc123"));
    h.session.lookup("8.8.8.8").await.unwrap();
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_pro_transport_failure_does_not_fall_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pro/json/8.8.8.8"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/free/json/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("8.8.8.8", "United States")))
        .expect(0)
        .mount(&server)
        .await;

    let h = harness(&server, Some("abc123"));
    let err = h.session.lookup("8.8.8.8").await.unwrap_err();
    assert!(matches!(err, LookupError::TransportFailure { .. }));
    assert_eq!(h.notifier.last().unwrap().description, MSG_NETWORK_ERROR);
}

#[tokio::test]
async fn test_removing_key_switches_to_free_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pro/json/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("8.8.8.8", "United States")))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/free/json/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("8.8.8.8", "United States")))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, Some("abc123"));
    assert_eq!(h.session.api_key_preference().as_deref(), Some("abc123"));

    let change = h.session.set_api_key_preference("   ").unwrap();
    assert_eq!(change, ApiKeyChange::Removed);
    assert_eq!(
        h.store.get(ip_finder::config::API_KEY_PREFERENCE).unwrap(),
        None
    );
    assert_eq!(h.notifier.last().unwrap().description, MSG_API_KEY_REMOVED);
    // Changing the key does not re-fetch
    assert_eq!(request_count(&server).await, 0);

    h.session.lookup("8.8.8.8").await.unwrap();
}

#[tokio::test]
async fn test_saving_key_switches_to_pro_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pro/json/"))
        .and(query_param("key", "newkey"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("203.0.113.7", "United States")))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, None);
    let change = h.session.set_api_key_preference("  newkey ").unwrap();
    assert_eq!(change, ApiKeyChange::Saved);
    assert_eq!(
        h.store
            .get(ip_finder::config::API_KEY_PREFERENCE)
            .unwrap()
            .as_deref(),
        Some("newkey")
    );
    assert_eq!(request_count(&server).await, 0);

    let detected = h.session.detect_caller_address().await;
    assert_eq!(detected.unwrap().query, "203.0.113.7");
}

#[tokio::test]
async fn test_later_issued_lookup_wins_when_answered_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/free/json/1.1.1.1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success_body("1.1.1.1", "Australia"))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/free/json/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("8.8.8.8", "United States")))
        .mount(&server)
        .await;

    let h = harness(&server, None);
    // join! polls in order, so A takes its sequence token before B
    let (a, b) = tokio::join!(h.session.lookup("1.1.1.1"), h.session.lookup("8.8.8.8"));

    assert_eq!(a.unwrap_err(), LookupError::Superseded);
    assert_eq!(b.unwrap().query, "8.8.8.8");
    assert_eq!(h.session.current_record().unwrap().query, "8.8.8.8");

    // Only B's success is announced
    let notes = h.notifier.notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].description, MSG_LOOKUP_SUCCESS);
    assert_eq!(
        h.session.lookup_stats().get_count(LookupEvent::StaleDiscarded),
        1
    );
}

#[tokio::test]
async fn test_stale_failure_is_silent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/free/json/bad"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fail_body("bad", "invalid query"))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/free/json/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("8.8.8.8", "United States")))
        .mount(&server)
        .await;

    let h = harness(&server, None);
    let (a, b) = tokio::join!(h.session.lookup("bad"), h.session.lookup("8.8.8.8"));

    assert_eq!(a.unwrap_err(), LookupError::Superseded);
    assert!(b.is_ok());
    assert!(h.notifier.notifications().iter().all(|n| !n.is_error()));
}

#[tokio::test]
async fn test_busy_while_request_outstanding() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/free/json/8.8.8.8"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success_body("8.8.8.8", "United States"))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let h = harness(&server, None);
    assert!(!h.session.is_busy());

    let observe = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        h.session.is_busy()
    };
    let (result, busy_midway) = tokio::join!(h.session.lookup("8.8.8.8"), observe);

    assert!(result.is_ok());
    assert!(busy_midway);
    assert!(!h.session.is_busy());
}

#[tokio::test]
async fn test_submit_uses_input_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/free/json/9.9.9.9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("9.9.9.9", "Switzerland")))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, None);
    h.session.set_input(" 9.9.9.9 ");
    let record = h.session.submit().await.unwrap();
    assert_eq!(record.country, "Switzerland");

    h.session.set_input("");
    assert_eq!(h.session.submit().await.unwrap_err(), LookupError::InvalidInput);
}
