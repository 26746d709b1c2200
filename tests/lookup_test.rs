//! Lookup helper tests against a scripted in-memory transport
//!
//! Each test queues the bodies the "server" returns and inspects the
//! commands and parameters the client sent.

use async_trait::async_trait;
use cloudstack::{
    with_domain, with_list_all, with_project, with_zone, ApiError, CloudStackClient,
    CloudStackError, ListRequest, QueryParams, RequestOption, Transport,
};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

const PROJECT_ID: &str = "0f4b8c2e-6a3d-4f1e-9b7a-2c5d8e1f3a60";
const ZONE_ID: &str = "7d3c1b2a-0e9f-4a8b-8c7d-6e5f4a3b2c1d";

type Calls = Arc<Mutex<Vec<(String, QueryParams)>>>;

/// Transport that replays queued results and records every call
struct ScriptedTransport {
    replies: Mutex<VecDeque<anyhow::Result<Vec<u8>>>>,
    calls: Calls,
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, command: &str, query: &QueryParams) -> anyhow::Result<Vec<u8>> {
        self.calls
            .lock()
            .unwrap()
            .push((command.to_string(), query.clone()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow::anyhow!("no scripted reply for {}", command)))
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn scripted(replies: Vec<anyhow::Result<serde_json::Value>>) -> (CloudStackClient, Calls) {
    init_tracing();
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let replies = replies
        .into_iter()
        .map(|r| r.map(|v| serde_json::to_vec(&v).unwrap()))
        .collect();
    let transport = ScriptedTransport {
        replies: Mutex::new(replies),
        calls: calls.clone(),
    };
    (CloudStackClient::new(transport), calls)
}

fn stores(items: serde_json::Value) -> anyhow::Result<serde_json::Value> {
    let count = items.as_array().map(|a| a.len()).unwrap_or_default();
    Ok(json!({"count": count, "imagestore": items}))
}

fn invalid_id_error(id: &str) -> anyhow::Result<serde_json::Value> {
    Err(ApiError {
        code: 431,
        cs_code: 4350,
        text: format!(
            "Invalid parameter id value={} due to incorrect long value format, or entity does not exist",
            id
        ),
    }
    .into())
}

/// Test module for name to id resolution
mod id_by_name_tests {
    use super::*;

    #[tokio::test]
    async fn test_no_match_is_not_found() {
        let (client, calls) = scripted(vec![stores(json!([]))]);

        let err = client
            .image_store()
            .get_image_store_id("nfs-1", &[])
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().starts_with("No match found for nfs-1"));

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "listImageStores");
        assert_eq!(calls[0].1.get("name"), Some("nfs-1"));
    }

    #[tokio::test]
    async fn test_single_match_returns_id() {
        let (client, _) = scripted(vec![stores(json!([{"id": "s-1", "name": "nfs-1"}]))]);

        let id = client
            .image_store()
            .get_image_store_id("nfs-1", &[])
            .await
            .unwrap();
        assert_eq!(id, "s-1");
    }

    #[tokio::test]
    async fn test_single_numeric_id_is_stringified() {
        let (client, _) = scripted(vec![stores(json!([{"id": 12345, "name": "nfs-1"}]))]);

        let id = client
            .image_store()
            .get_image_store_id("nfs-1", &[])
            .await
            .unwrap();
        assert_eq!(id, "12345");
    }

    #[tokio::test]
    async fn test_many_results_prefer_exact_name() {
        let (client, _) = scripted(vec![stores(json!([
            {"id": "s-1", "name": "nfs-10"},
            {"id": "s-2", "name": "nfs-1"}
        ]))]);

        let id = client
            .image_store()
            .get_image_store_id("nfs-1", &[])
            .await
            .unwrap();
        assert_eq!(id, "s-2");
    }

    #[tokio::test]
    async fn test_many_results_without_exact_name_is_ambiguous() {
        let (client, _) = scripted(vec![stores(json!([
            {"id": "s-1", "name": "nfs-10"},
            {"id": "s-2", "name": "nfs-11"}
        ]))]);

        let err = client
            .image_store()
            .get_image_store_id("nfs-1", &[])
            .await
            .unwrap_err();

        match err {
            CloudStackError::Ambiguous { query, count } => {
                assert_eq!(query, "nfs-1");
                assert_eq!(count, 2);
            },
            other => panic!("expected Ambiguous, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transport_errors_pass_through() {
        let (client, _) = scripted(vec![Err(anyhow::anyhow!("connection refused"))]);

        let err = client
            .image_store()
            .get_image_store_id("nfs-1", &[])
            .await
            .unwrap_err();

        assert!(matches!(err, CloudStackError::Transport(_)));
        assert!(!err.is_not_found());
    }
}

/// Test module for id resolution
mod by_id_tests {
    use super::*;

    #[tokio::test]
    async fn test_single_match_returns_record() {
        let (client, calls) = scripted(vec![stores(json!([
            {"id": "s-1", "name": "nfs-1", "protocol": "nfs", "zoneid": 7}
        ]))]);

        let store = client
            .image_store()
            .get_image_store_by_id("s-1", &[])
            .await
            .unwrap();

        assert_eq!(store.name, "nfs-1");
        assert_eq!(store.zone_id, "7");
        assert_eq!(calls.lock().unwrap()[0].1.get("id"), Some("s-1"));
    }

    #[tokio::test]
    async fn test_no_match_is_not_found() {
        let (client, _) = scripted(vec![Ok(json!({}))]);

        let err = client
            .image_store()
            .get_image_store_by_id("s-1", &[])
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_many_matches_are_ambiguous() {
        let (client, _) = scripted(vec![stores(json!([
            {"id": "s-1", "name": "a"},
            {"id": "s-1", "name": "b"}
        ]))]);

        let err = client
            .image_store()
            .get_image_store_by_id("s-1", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, CloudStackError::Ambiguous { count: 2, .. }));
    }

    #[tokio::test]
    async fn test_invalid_id_error_is_not_found() {
        let (client, _) = scripted(vec![invalid_id_error("bogus")]);

        let err = client
            .image_store()
            .get_image_store_by_id("bogus", &[])
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(err.api_error().is_none());
        assert!(err.to_string().starts_with("No match found for bogus"));
    }

    #[tokio::test]
    async fn test_invalid_id_error_for_other_id_is_kept() {
        let (client, _) = scripted(vec![invalid_id_error("other")]);

        let err = client
            .image_store()
            .get_image_store_by_id("bogus", &[])
            .await
            .unwrap_err();

        assert!(!err.is_not_found());
        assert_eq!(err.api_error().map(|e| e.code), Some(431));
    }

    #[tokio::test]
    async fn test_event_by_id() {
        let (client, calls) = scripted(vec![Ok(json!({
            "count": 1,
            "event": [{"id": "e-1", "type": "USER.LOGIN", "level": "INFO"}]
        }))]);

        let event = client.event().get_event_by_id("e-1", &[]).await.unwrap();
        assert_eq!(event.event_type, "USER.LOGIN");
        assert_eq!(calls.lock().unwrap()[0].0, "listEvents");
    }
}

/// Test module for name to record resolution
mod by_name_tests {
    use super::*;

    #[tokio::test]
    async fn test_name_then_id_lookup() {
        let (client, calls) = scripted(vec![
            Ok(json!({"count": 1, "managementserver": [{"id": "ms-1", "name": "mgmt"}]})),
            Ok(json!({"count": 1, "managementserver": [
                {"id": "ms-1", "name": "mgmt", "state": "Up", "version": "4.19.0"}
            ]})),
        ]);

        let server = client
            .infrastructure_usage()
            .get_management_server_by_name("mgmt", &[])
            .await
            .unwrap();
        assert_eq!(server.state, "Up");

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].1.get("name"), Some("mgmt"));
        assert_eq!(calls[1].1.get("id"), Some("ms-1"));
        assert!(!calls[1].1.contains("name"));
    }

    #[tokio::test]
    async fn test_image_store_name_then_id_lookup() {
        let (client, calls) = scripted(vec![
            stores(json!([{"id": "s-1", "name": "nfs-1"}])),
            stores(json!([{"id": "s-1", "name": "nfs-1", "protocol": "nfs"}])),
        ]);

        let store = client
            .image_store()
            .get_image_store_by_name("nfs-1", &[])
            .await
            .unwrap();
        assert_eq!(store.protocol, "nfs");

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].1.get("id"), Some("s-1"));
        assert!(!calls[1].1.contains("name"));
    }

    #[tokio::test]
    async fn test_metric_name_then_id_lookup() {
        let (client, calls) = scripted(vec![
            Ok(json!({"count": 1, "managementserversmetric": [{"id": 7, "name": "mgmt"}]})),
            Ok(json!({"count": 1, "managementserversmetric": [
                {"id": 7, "name": "mgmt", "agentcount": 4}
            ]})),
        ]);

        let metric = client
            .infrastructure_usage()
            .get_management_servers_metric_by_name("mgmt", &[])
            .await
            .unwrap();
        assert_eq!(metric.agent_count, 4);

        let calls = calls.lock().unwrap();
        assert_eq!(calls[0].0, "listManagementServersMetrics");
        assert_eq!(calls[1].1.get("id"), Some("7"));
    }

    #[tokio::test]
    async fn test_name_miss_skips_id_lookup() {
        let (client, calls) = scripted(vec![Ok(json!({}))]);

        let err = client
            .image_store()
            .get_secondary_staging_store_by_name("staging", &[])
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(calls.lock().unwrap().len(), 1);
    }
}

/// Test module for request options
mod option_tests {
    use super::*;

    fn recording(log: &Arc<Mutex<Vec<&'static str>>>, label: &'static str) -> RequestOption {
        let log = log.clone();
        Arc::new(move |_: &CloudStackClient, _: &mut dyn ListRequest| {
            log.lock().unwrap().push(label);
            Ok(())
        })
    }

    #[tokio::test]
    async fn test_client_options_run_before_call_options() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (client, _) = scripted(vec![stores(json!([{"id": "s-1", "name": "a"}]))]);
        let client = client.with_option(recording(&log, "client"));

        client
            .image_store()
            .get_image_store_id("a", &[recording(&log, "first"), recording(&log, "second")])
            .await
            .unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["client", "first", "second"]);
    }

    #[tokio::test]
    async fn test_failing_option_short_circuits() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (client, calls) = scripted(vec![stores(json!([]))]);

        let failing: RequestOption = Arc::new(|_: &CloudStackClient, _: &mut dyn ListRequest| {
            Err(CloudStackError::InvalidArgument("nope".to_string()))
        });

        let err = client
            .image_store()
            .get_image_store_id("a", &[failing, recording(&log, "after")])
            .await
            .unwrap_err();

        assert!(matches!(err, CloudStackError::InvalidArgument(_)));
        assert!(log.lock().unwrap().is_empty());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_with_project_rejects_non_uuid() {
        let (client, calls) = scripted(vec![]);

        let err = client
            .event()
            .get_event_by_id("e-1", &[with_project("my-project")])
            .await
            .unwrap_err();

        assert!(matches!(err, CloudStackError::InvalidArgument(_)));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_with_project_scopes_events() {
        let (client, calls) = scripted(vec![Ok(json!({"count": 1, "event": [{"id": "e-1"}]}))]);

        client
            .event()
            .get_event_by_id("e-1", &[with_project(PROJECT_ID), with_list_all(true)])
            .await
            .unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls[0].1.get("projectid"), Some(PROJECT_ID));
        assert_eq!(calls[0].1.get("listall"), Some("true"));
    }

    #[tokio::test]
    async fn test_with_project_accepts_numeric_id() {
        let (client, calls) = scripted(vec![Ok(json!({"count": 1, "event": [{"id": 5}]}))]);

        let event = client
            .event()
            .get_event_by_id("5", &[with_project("12345")])
            .await
            .unwrap();

        assert_eq!(event.id, "5");
        assert_eq!(calls.lock().unwrap()[0].1.get("projectid"), Some("12345"));
    }

    #[tokio::test]
    async fn test_unsupported_domain_and_zone_are_ignored() {
        let (client, calls) = scripted(vec![Ok(json!({
            "count": 1,
            "managementserver": [{"id": "ms-1", "name": "mgmt"}]
        }))]);

        client
            .infrastructure_usage()
            .get_management_server_id("mgmt", &[with_domain(PROJECT_ID), with_zone("42")])
            .await
            .unwrap();

        let calls = calls.lock().unwrap();
        assert!(!calls[0].1.contains("domainid"));
        assert!(!calls[0].1.contains("zoneid"));
    }

    #[tokio::test]
    async fn test_unsupported_scope_is_ignored() {
        let (client, calls) = scripted(vec![stores(json!([{"id": "s-1", "name": "a"}]))]);

        client
            .image_store()
            .get_image_store_id("a", &[with_project(PROJECT_ID), with_zone(ZONE_ID)])
            .await
            .unwrap();

        let calls = calls.lock().unwrap();
        assert!(!calls[0].1.contains("projectid"));
        assert_eq!(calls[0].1.get("zoneid"), Some(ZONE_ID));
    }

    #[tokio::test]
    async fn test_empty_scope_is_skipped() {
        let (client, calls) = scripted(vec![Ok(json!({"count": 1, "event": [{"id": "e-1"}]}))]);

        client
            .event()
            .get_event_by_id("e-1", &[with_project("")])
            .await
            .unwrap();

        assert!(!calls.lock().unwrap()[0].1.contains("projectid"));
    }
}
