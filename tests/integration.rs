//! Integration tests for the Peergraph CLI.

use std::process::Command;

const SAMPLE: &str = r#"{
    "nodes": [
        {"pub_key": "A", "alias": "Alice", "is_reachable": true},
        {"pub_key": "B", "alias": "Bob", "is_reachable": false},
        {"pub_key": "a.b", "is_reachable": true},
        {"pub_key": "axb", "is_reachable": true}
    ],
    "edges": [
        {"node1_pub": "A", "node2_pub": "B", "capacity": "120000"},
        {"node1_pub": "A", "node2_pub": "a.b"}
    ]
}"#;

fn write_sample(dir: &std::path::Path) -> String {
    let path = dir.join("graph.json");
    std::fs::write(&path, SAMPLE).expect("write snapshot");
    path.to_string_lossy().to_string()
}

fn run_peergraph(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_peergraph"))
        .args(args)
        .output()
        .expect("run peergraph");

    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

#[test]
fn summary_reports_counts_and_fingerprint() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let graph = write_sample(tmp.path());

    let (code, out, err) = run_peergraph(&["--graph", &graph, "-f", "json", "summary"]);
    assert_eq!(code, 0, "{err}");

    let response: serde_json::Value = serde_json::from_str(&out).expect("json output");
    assert_eq!(response["success"], true);
    assert_eq!(response["data"]["node_count"], 4);
    assert_eq!(response["data"]["edge_count"], 2);
    assert_eq!(response["data"]["reachable_count"], 3);
    assert!(response["data"]["fingerprint"].as_str().is_some_and(|s| s.len() == 64));
}

#[test]
fn nodes_filters_by_alias_case_insensitively() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let graph = write_sample(tmp.path());

    let (code, out, err) = run_peergraph(&[
        "--graph", &graph, "-f", "json", "nodes", "--query", "ali",
    ]);
    assert_eq!(code, 0, "{err}");

    let response: serde_json::Value = serde_json::from_str(&out).expect("json output");
    assert_eq!(response["data"]["count"], 1);
    assert_eq!(response["data"]["nodes"][0]["id"], "A");
}

#[test]
fn nodes_query_metacharacters_match_literally() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let graph = write_sample(tmp.path());

    let (code, out, err) = run_peergraph(&[
        "--graph", &graph, "-f", "json", "nodes", "--query", "a.b",
    ]);
    assert_eq!(code, 0, "{err}");

    let response: serde_json::Value = serde_json::from_str(&out).expect("json output");
    assert_eq!(response["data"]["count"], 1);
    assert_eq!(response["data"]["nodes"][0]["id"], "a.b");
}

#[test]
fn subgraph_drops_edges_with_filtered_endpoints() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let graph = write_sample(tmp.path());

    let (code, out, err) = run_peergraph(&[
        "--graph", &graph, "-f", "json", "subgraph", "--only-reachable",
    ]);
    assert_eq!(code, 0, "{err}");

    // B is unreachable, so the A-B channel disappears; A-a.b survives.
    let response: serde_json::Value = serde_json::from_str(&out).expect("json output");
    assert_eq!(response["data"]["node_count"], 3);
    assert_eq!(response["data"]["edge_count"], 1);
    assert_eq!(response["data"]["edges"][0]["endpoint_a"], "A");
    assert_eq!(response["data"]["edges"][0]["endpoint_b"], "a.b");
}

#[test]
fn node_shows_record_and_channels() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let graph = write_sample(tmp.path());

    let (code, out, err) = run_peergraph(&["--graph", &graph, "-f", "json", "node", "A"]);
    assert_eq!(code, 0, "{err}");

    let response: serde_json::Value = serde_json::from_str(&out).expect("json output");
    assert_eq!(response["data"]["found"], true);
    assert_eq!(response["data"]["node"]["alias"], "Alice");
    assert_eq!(response["data"]["channel_count"], 2);
    // Opaque channel fields survive the pipeline.
    assert_eq!(response["data"]["channels"][0]["capacity"], "120000");
}

#[test]
fn missing_node_is_not_a_failure() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let graph = write_sample(tmp.path());

    let (code, out, err) = run_peergraph(&["--graph", &graph, "-f", "json", "node", "ZZZ"]);
    assert_eq!(code, 0, "{err}");

    let response: serde_json::Value = serde_json::from_str(&out).expect("json output");
    assert_eq!(response["data"]["found"], false);
    assert_eq!(response["data"]["channel_count"], 0);
}

#[test]
fn missing_snapshot_file_fails_with_data_error() {
    let (code, _out, err) = run_peergraph(&[
        "--graph", "/nonexistent/graph.json", "-f", "json", "summary",
    ]);
    assert_eq!(code, 1);

    let response: serde_json::Value = serde_json::from_str(&err).expect("json error output");
    assert_eq!(response["success"], false);
    assert_eq!(response["error"]["category"], "data");
    assert_eq!(response["error"]["code"], "snapshot_read_failed");
}

#[test]
fn missing_graph_flag_is_a_user_error() {
    let (code, _out, err) = run_peergraph(&["-f", "json", "summary"]);
    assert_eq!(code, 3);

    let response: serde_json::Value = serde_json::from_str(&err).expect("json error output");
    assert_eq!(response["error"]["code"], "graph_path_missing");
}

#[test]
fn malformed_snapshot_fails_with_parse_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("bad.json");
    std::fs::write(&path, "{not json").expect("write file");
    let graph = path.to_string_lossy().to_string();

    let (code, _out, err) = run_peergraph(&["--graph", &graph, "-f", "json", "summary"]);
    assert_eq!(code, 1);

    let response: serde_json::Value = serde_json::from_str(&err).expect("json error output");
    assert_eq!(response["error"]["code"], "snapshot_parse_failed");
}

#[test]
fn table_output_renders_for_humans() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let graph = write_sample(tmp.path());

    let (code, out, err) = run_peergraph(&["--graph", &graph, "nodes"]);
    assert_eq!(code, 0, "{err}");
    assert!(out.contains("Alice"));
    assert!(out.contains("Bob"));
}
