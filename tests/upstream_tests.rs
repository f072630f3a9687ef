use chain_dashboard::commands::{execute_snapshot, SnapshotArgs};
use chain_dashboard::fetcher::MetricFetcher;
use chain_dashboard::output::read_view;
use chain_dashboard::pipeline::collect_view;
use chain_dashboard::upstream::types::{HeightRange, NoVariables};
use chain_dashboard::upstream::{run_query, HttpQueryClient, LatestHeightQuery, TransactionsQuery};
use chain_dashboard::utils::{FetchStep, UpstreamConfig, UpstreamErrorKind};
use chrono::{TimeZone, Utc};
use mockito::{Matcher, Server};
use serde_json::json;
use std::net::TcpListener;

fn localhost_binding_permitted() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

fn client_for(server: &Server) -> HttpQueryClient {
    let config = UpstreamConfig::new(format!("{}/graphql", server.url()));
    HttpQueryClient::new(&config).unwrap()
}

#[test]
fn test_height_query_over_http() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/graphql")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "operationName": "LatestBlockHeight",
            "variables": {}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data":{"latestBlockHeight":42}}"#)
        .create();

    let client = client_for(&server);
    let data = run_query::<LatestHeightQuery, _>(&client, &NoVariables::default()).unwrap();

    assert_eq!(data.latest_block_height, 42);
    mock.assert();
}

#[test]
fn test_transactions_query_sends_range() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({
            "operationName": "TotalTransactions",
            "variables": {"fromBlockHeight": 1, "toBlockHeight": 123}
        })))
        .with_status(200)
        .with_body(r#"{"data": {"transactions": [{"index": 1, "hash": "abc123", "block_height": 123, "gas_wanted": 1000, "gas_used": 800, "content_raw": "Lorem ipsum"}]}}"#)
        .create();

    let client = client_for(&server);
    let range = HeightRange { from_block_height: 1, to_block_height: 123 };
    let data = run_query::<TransactionsQuery, _>(&client, &range).unwrap();

    assert_eq!(data.transactions.len(), 1);
    assert_eq!(data.transactions[0].hash, "abc123");
    assert_eq!(data.transactions[0].gas_wanted, 1000);
    mock.assert();
}

#[test]
fn test_graphql_errors_are_application_errors() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut server = Server::new();
    let _m = server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_body(r#"{"data":null,"errors":[{"message":"unknown field latestBlockHeight","path":["latestBlockHeight"]}]}"#)
        .create();

    let client = client_for(&server);
    let err = run_query::<LatestHeightQuery, _>(&client, &NoVariables::default()).unwrap_err();

    assert_eq!(err.kind(), UpstreamErrorKind::Application);
    assert!(err.to_string().contains("unknown field latestBlockHeight"));
}

#[test]
fn test_http_error_status_is_protocol_error() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut server = Server::new();
    let _m = server
        .mock("POST", "/graphql")
        .with_status(500)
        .with_body("internal error")
        .create();

    let client = client_for(&server);
    let err = run_query::<LatestHeightQuery, _>(&client, &NoVariables::default()).unwrap_err();

    assert_eq!(err.kind(), UpstreamErrorKind::Protocol);
    assert!(err.to_string().contains("500"));
}

#[test]
fn test_undecodable_body_is_protocol_error() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut server = Server::new();
    let _m = server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create();

    let client = client_for(&server);
    let err = run_query::<LatestHeightQuery, _>(&client, &NoVariables::default()).unwrap_err();

    assert_eq!(err.kind(), UpstreamErrorKind::Protocol);
}

#[test]
fn test_unreachable_endpoint_is_transport_error() {
    // Grab a free port, then close it so nothing is listening there
    let port = match TcpListener::bind("127.0.0.1:0") {
        Ok(listener) => listener.local_addr().unwrap().port(),
        Err(_) => return,
    };

    let config = UpstreamConfig::new(format!("http://127.0.0.1:{}/graphql", port));
    let client = HttpQueryClient::new(&config).unwrap();
    let err = run_query::<LatestHeightQuery, _>(&client, &NoVariables::default()).unwrap_err();

    assert_eq!(err.kind(), UpstreamErrorKind::Transport);
}

#[test]
fn test_full_pipeline_over_http() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut server = Server::new();
    let _height = server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({"operationName": "LatestBlockHeight"})))
        .with_status(200)
        .with_body(r#"{"data":{"latestBlockHeight":3}}"#)
        .create();
    let _txs = server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({"operationName": "TotalTransactions"})))
        .with_status(200)
        .with_body(r#"{"data":{"transactions":[
            {"index":0,"hash":"0x01","block_height":1,"gas_wanted":10,"gas_used":9,"content_raw":""},
            {"index":0,"hash":"0x02","block_height":3,"gas_wanted":10,"gas_used":10,"content_raw":""}
        ]}}"#)
        .create();
    let _blocks = server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({
            "operationName": "BlocksWithinTimeRange",
            "variables": {"fromTime": "2024-06-01T06:00:00Z", "toTime": "2024-06-01T12:00:00Z"}
        })))
        .with_status(200)
        .with_body(r#"{"data":{"blocks":[
            {"height":2,"time":"2024-06-01T09:10:00Z"},
            {"height":3,"time":"2024-06-01T11:20:00.123456Z"}
        ]}}"#)
        .create();

    let config = UpstreamConfig::new(format!("{}/graphql", server.url()));
    let fetcher = MetricFetcher::connect(&config).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

    let view = collect_view(&fetcher, now).unwrap();

    assert_eq!(view.latest_block_height, 3);
    assert_eq!(view.total_transactions_since_genesis, 2);
    assert_eq!(view.transactions_per_hour["2024-06-01 09:00:00"], 1);
    assert_eq!(view.transactions_per_hour["2024-06-01 11:00:00"], 1);
}

#[test]
fn test_pipeline_stops_at_failing_height() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut server = Server::new();
    let _height = server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({"operationName": "LatestBlockHeight"})))
        .with_status(503)
        .create();
    let later = server
        .mock("POST", "/graphql")
        .match_body(Matcher::Regex("TotalTransactions|BlocksWithinTimeRange".to_string()))
        .with_status(200)
        .with_body(r#"{"data":{}}"#)
        .expect(0)
        .create();

    let config = UpstreamConfig::new(format!("{}/graphql", server.url()));
    let fetcher = MetricFetcher::connect(&config).unwrap();

    let err = fetcher.fetch_now().unwrap_err();

    assert_eq!(err.step, FetchStep::LatestHeight);
    assert_eq!(err.kind(), UpstreamErrorKind::Protocol);
    later.assert();
}

#[test]
fn test_snapshot_command_writes_outputs() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut server = Server::new();
    let _height = server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({"operationName": "LatestBlockHeight"})))
        .with_status(200)
        .with_body(r#"{"data":{"latestBlockHeight":7}}"#)
        .create();
    let _txs = server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({"operationName": "TotalTransactions"})))
        .with_status(200)
        .with_body(r#"{"data":{"transactions":[]}}"#)
        .create();
    let _blocks = server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({"operationName": "BlocksWithinTimeRange"})))
        .with_status(200)
        .with_body(r#"{"data":{"blocks":[]}}"#)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let args = SnapshotArgs {
        endpoint: format!("{}/graphql", server.url()),
        output_html: dir.path().join("dashboard.html"),
        output_json: Some(dir.path().join("view.json")),
        ..Default::default()
    };

    let view = execute_snapshot(args).unwrap();

    assert_eq!(view.latest_block_height, 7);
    assert_eq!(view.total_transactions_since_genesis, 0);

    let html = std::fs::read_to_string(dir.path().join("dashboard.html")).unwrap();
    assert!(html.contains("Current Block Height: 7"));

    let document = read_view(dir.path().join("view.json")).unwrap();
    assert_eq!(document.window_hours, 6);
    assert_eq!(document.view, view);
}

#[test]
fn test_snapshot_command_writes_nothing_on_fetch_failure() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut server = Server::new();
    let _height = server
        .mock("POST", "/graphql")
        .with_status(502)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let html_path = dir.path().join("dashboard.html");
    let args = SnapshotArgs {
        endpoint: format!("{}/graphql", server.url()),
        output_html: html_path.clone(),
        ..Default::default()
    };

    assert!(execute_snapshot(args).is_err());
    assert!(!html_path.exists());
}
