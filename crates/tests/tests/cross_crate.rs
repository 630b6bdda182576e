//! End-to-end tests for the tracing pipeline.
//!
//! These exercise full call chains through the public API: nested calls
//! rendered as the arrow diagram, concurrent chains sharing one tracer, and
//! records persisted and read back through the JSONL writer.

use std::sync::Arc;

use calltrace_core::{JsonlWriter, RecordKind, Tracer, testing::MemorySink};

fn capture() -> (Tracer, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    (Tracer::with_sink(sink.clone()), sink)
}

/// The canonical two-level scenario: a root "save item" call with a nested
/// "validate item" call completing before it. Four lines, one identifier,
/// markers and depth cells exactly as rendered.
#[test]
fn test_nested_scenario_line_format() {
    let (tracer, sink) = capture();

    let root = tracer.begin("save item");
    let child = tracer.begin_child(root.context(), "validate item");
    let id = root.context().id().to_string();
    tracer.end(child);
    tracer.end(root);

    let lines = sink.lines();
    assert_eq!(lines.len(), 4);

    assert_eq!(lines[0], format!("[{}] -->save item", id));
    assert_eq!(lines[1], format!("[{}] |-->validate item", id));
    assert!(lines[2].starts_with(&format!("[{}] |<--validate item time=", id)));
    assert!(lines[2].ends_with("ms"));
    assert!(lines[3].starts_with(&format!("[{}] <--save item time=", id)));
    assert!(lines[3].ends_with("ms"));
}

/// A third nesting level pushes the depth cells out by one more bar.
#[test]
fn test_three_level_depth_rendering() {
    let (tracer, sink) = capture();

    let a = tracer.begin("controller");
    let b = tracer.begin_child(a.context(), "service");
    let c = tracer.begin_child(b.context(), "repository");
    tracer.end(c);
    tracer.end(b);
    tracer.end(a);

    let lines = sink.lines();
    assert!(lines[2].contains("|   |-->repository"));
    assert!(lines[3].contains("|   |<--repository"));
}

/// A failure deep in the chain shows the exception marker and error at each
/// level that reports it, while outer levels can still complete normally.
#[test]
fn test_partial_failure_markers() {
    let (tracer, sink) = capture();

    let root = tracer.begin("save item");
    let child = tracer.begin_child(root.context(), "validate item");
    tracer.fail(child, "missing field: name");
    tracer.end(root);

    let lines = sink.lines();
    assert!(lines[2].contains("|<X-validate item"));
    assert!(lines[2].contains("ex=missing field: name"));
    assert!(lines[3].contains("<--save item"));
    assert!(!lines[3].contains("ex="));
}

/// Many chains on one shared tracer: identifiers never collide across
/// chains and each chain's level sequence is untouched by the others.
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_chains_are_isolated() {
    let (tracer, sink) = capture();

    let mut handles = Vec::new();
    for i in 0..32 {
        let tracer = tracer.clone();
        handles.push(tokio::spawn(async move {
            let root = tracer.begin(format!("request-{}", i));
            let id = root.context().id().to_string();

            let child = tracer.begin_child(root.context(), "handler");
            let grandchild = tracer.begin_child(child.context(), "store");
            tokio::task::yield_now().await;
            tracer.end(grandchild);
            tracer.end(child);
            tracer.end(root);
            id
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }

    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len(), "chains must not share identifiers");

    let records = sink.records();
    assert_eq!(records.len(), 32 * 6);
    for id in &ids {
        let levels: Vec<u32> = records
            .iter()
            .filter(|r| &r.trace_id == id)
            .map(|r| r.level)
            .collect();
        assert_eq!(levels, vec![0, 1, 2, 2, 1, 0]);
    }
}

/// Records written through the JSONL sink and read back keep kind, order,
/// identifier, and error information.
#[test]
fn test_jsonl_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("traces").join("run.jsonl");
    let writer = Arc::new(JsonlWriter::new(&path).unwrap());
    let tracer = Tracer::with_sink(writer.clone());

    let root = tracer.begin("save item");
    let child = tracer.begin_child(root.context(), "validate item");
    tracer.fail(child, "missing field: name");
    tracer.end(root);

    let records = JsonlWriter::read_records(writer.path()).unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].kind, RecordKind::Begin);
    assert_eq!(records[2].kind, RecordKind::Fail);
    assert_eq!(records[2].error.as_deref(), Some("missing field: name"));
    assert_eq!(records[3].kind, RecordKind::End);
    assert!(records.iter().all(|r| r.trace_id == records[0].trace_id));

    // Each line on disk is standalone JSON.
    let raw = std::fs::read_to_string(&path).unwrap();
    for line in raw.lines() {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(value.get("kind").is_some());
    }
}

/// Guarded spans close the trace even when the caller unwinds.
#[test]
fn test_span_guard_covers_early_exit() {
    let (tracer, sink) = capture();

    fn flaky(tracer: &Tracer, fail: bool) -> Result<(), String> {
        let span = tracer.span("flaky");
        if fail {
            // Early return: the guard reports the failure on drop.
            return Err("gave up".to_string());
        }
        span.ok();
        Ok(())
    }

    flaky(&tracer, false).unwrap();
    flaky(&tracer, true).unwrap_err();

    let records = sink.records();
    assert_eq!(records.len(), 4);
    assert_eq!(records[1].kind, RecordKind::End);
    assert_eq!(records[3].kind, RecordKind::Fail);
    assert_eq!(
        records[3].error.as_deref(),
        Some("dropped before completion")
    );
}
