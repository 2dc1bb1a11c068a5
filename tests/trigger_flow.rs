// tests/trigger_flow.rs
use std::cell::Cell;

use serde_json::json;

use fc_ranking::config::consts::{LAST_UPDATED_KEY, RESULTS_KEY};
use fc_ranking::model::CrawlResponse;
use fc_ranking::progress::Progress;
use fc_ranking::store::{load_batch, Loaded, MemoryStore, Store};
use fc_ranking::trigger::{trigger_crawl, Transport, TriggerError, TriggerOutcome, REQUEST_SENT};

/// Replays one canned answer and counts calls.
struct FakeTransport {
    answer: fn() -> Result<CrawlResponse, TriggerError>,
    calls: Cell<usize>,
}

impl FakeTransport {
    fn new(answer: fn() -> Result<CrawlResponse, TriggerError>) -> Self {
        Self { answer, calls: Cell::new(0) }
    }
}

impl Transport for FakeTransport {
    fn endpoint(&self) -> &str {
        "http://test/crawl"
    }
    fn post_crawl(&self) -> Result<CrawlResponse, TriggerError> {
        self.calls.set(self.calls.get() + 1);
        (self.answer)()
    }
}

#[derive(Default)]
struct Recorder {
    begun: usize,
    lines: Vec<String>,
    finished: usize,
}

impl Progress for Recorder {
    fn begin(&mut self, _total: usize) {
        self.begun += 1;
    }
    fn log(&mut self, msg: &str) {
        self.lines.push(msg.to_string());
    }
    fn finish(&mut self) {
        self.finished += 1;
    }
}

fn response(v: serde_json::Value) -> CrawlResponse {
    serde_json::from_value(v).unwrap()
}

fn success() -> Result<CrawlResponse, TriggerError> {
    Ok(response(json!({
        "status": "success",
        "message": "크롤링 완료",
        "results": [
            { "리그명": "1부리그", "구단주명": "감독A", "채굴 효율": 70, "비고": "↑2" },
            { "리그명": "2부리그", "구단주명": "감독B", "채굴 효율": "N/A", "비고": "오류", "error": "timeout" }
        ],
        "last_updated": "2025-06-01 12:00:00"
    })))
}

fn warning() -> Result<CrawlResponse, TriggerError> {
    Ok(response(json!({
        "status": "warning",
        "message": "일부 실패",
        "results": []
    })))
}

fn rejected() -> Result<CrawlResponse, TriggerError> {
    Ok(response(json!({
        "status": "error",
        "message": "크롤러 실패",
        "results": [
            { "구단주명": "감독C", "승": 1, "무": "N/A", "error": "Message:  element\n  not found" }
        ]
    })))
}

fn unreachable() -> Result<CrawlResponse, TriggerError> {
    Err(TriggerError::Transport("connection refused".to_string()))
}

fn seeded_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.set(RESULTS_KEY, "[]").unwrap();
    store.set(LAST_UPDATED_KEY, "old").unwrap();
    store
}

#[test]
fn success_stores_batch_verbatim() {
    let transport = FakeTransport::new(success);
    let mut store = MemoryStore::new();
    let mut progress = Recorder::default();

    let outcome = trigger_crawl(&transport, &mut store, &mut progress).unwrap();

    assert_eq!(
        outcome,
        TriggerOutcome::Stored {
            message: "크롤링 완료".to_string(),
            total: 2,
            succeeded: 1,
            failed: 1,
            last_updated: Some("2025-06-01 12:00:00".to_string()),
        }
    );
    assert_eq!(transport.calls.get(), 1);
    assert_eq!((progress.begun, progress.finished), (1, 1));
    assert_eq!(progress.lines[0], REQUEST_SENT);

    let Loaded::Batch(batch) = load_batch(&store).unwrap() else { panic!("batch not stored") };
    assert_eq!(batch.results, success().unwrap().results.unwrap());
    assert_eq!(batch.last_updated.as_deref(), Some("2025-06-01 12:00:00"));
}

#[test]
fn warning_is_stored_too() {
    let mut store = seeded_store();
    let mut progress = Recorder::default();

    let outcome = trigger_crawl(&FakeTransport::new(warning), &mut store, &mut progress).unwrap();

    assert!(matches!(outcome, TriggerOutcome::Stored { total: 0, .. }));
    // No timestamp in the answer: the old one goes.
    assert_eq!(store.get(LAST_UPDATED_KEY).unwrap(), None);
    assert_eq!(progress.finished, 1);
}

#[test]
fn rejection_leaves_store_alone() {
    let mut store = seeded_store();
    let mut progress = Recorder::default();

    let outcome = trigger_crawl(&FakeTransport::new(rejected), &mut store, &mut progress).unwrap();

    let TriggerOutcome::Rejected { message, details } = outcome else { panic!("expected rejection") };
    assert_eq!(message, "크롤러 실패");
    assert_eq!(
        details[0].lines(),
        vec!["구단주명: 감독C", "승: 1", "무: N/A", "패: N/A", "오류: Message: element not found"]
    );
    assert!(progress.lines.iter().any(|l| l == "오류: 크롤러 실패"));
    assert_eq!(progress.finished, 1);

    assert_eq!(store.get(RESULTS_KEY).unwrap().as_deref(), Some("[]"));
    assert_eq!(store.get(LAST_UPDATED_KEY).unwrap().as_deref(), Some("old"));
}

#[test]
fn transport_failure_is_reported_once() {
    let transport = FakeTransport::new(unreachable);
    let mut store = seeded_store();
    let mut progress = Recorder::default();

    let err = trigger_crawl(&transport, &mut store, &mut progress).unwrap_err();

    assert!(matches!(err, TriggerError::Transport(_)));
    assert_eq!(transport.calls.get(), 1);
    assert_eq!(progress.finished, 1);
    assert!(progress.lines.iter().any(|l| l.starts_with("네트워크 오류 또는 서버 응답 실패:")));
    assert_eq!(store.get(LAST_UPDATED_KEY).unwrap().as_deref(), Some("old"));
}
