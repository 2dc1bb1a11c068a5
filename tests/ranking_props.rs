// tests/ranking_props.rs
use proptest::prelude::*;
use serde_json::{json, Map, Value};

use fc_ranking::model::{CrawlBatch, CrawlRecord, Text};
use fc_ranking::ranking::{rank_batch, rank_league, sort_by_efficiency};
use fc_ranking::store::{load_batch, save_batch, Loaded, MemoryStore};

fn score() -> impl Strategy<Value = Option<Value>> {
    prop_oneof![
        Just(None),
        Just(Some(json!("N/A"))),
        Just(Some(Value::Null)),
        Just(Some(json!(-0.0))),
        (-1000i64..1000).prop_map(|n| Some(json!(n))),
        (-4000i64..4000).prop_map(|n| Some(json!(n as f64 / 4.0))),
    ]
}

/// Absent, explicit `null`, or a value.
fn text_field<S: Strategy<Value = String>>(value: S) -> impl Strategy<Value = Text> {
    prop_oneof![Just(None), Just(Some(None)), value.prop_map(|v| Some(Some(v)))]
}

fn pick(choices: &'static [&'static str]) -> impl Strategy<Value = String> {
    prop::sample::select(choices).prop_map(String::from)
}

fn extras() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::vec(
        (
            pick(&["player_id", "주석"]),
            prop_oneof![Just(Value::Null), "[0-9]{1,10}".prop_map(Value::String)],
        ),
        0..3,
    )
    .prop_map(|pairs| pairs.into_iter().collect())
}

fn record() -> impl Strategy<Value = CrawlRecord> {
    (
        text_field(pick(&["1부리그", "2부리그", "3부리그"])),
        text_field("[가-힣a-z]{0,6}".prop_map(String::from)),
        score(),
        text_field(pick(&["↑2", "↓1", "New", "오류", "-", ""])),
        text_field(pick(&["", "timeout", "Message: not found"])),
        text_field(pick(&["", "https://example.com/popup/1"])),
        extras(),
    )
        .prop_map(|(league, owner_name, efficiency_score, remark, error, source_url, extra)| CrawlRecord {
            league,
            owner_name,
            efficiency_score,
            remark,
            error,
            source_url,
            extra,
            ..Default::default()
        })
}

proptest! {
    #[test]
    fn one_row_per_record(records in prop::collection::vec(record(), 0..40)) {
        let table = rank_league(&records, "1부리그");
        prop_assert_eq!(table.total, records.len());
        prop_assert_eq!(table.succeeded + table.failed, table.total);
        if !records.is_empty() {
            prop_assert_eq!(table.rows().len(), records.len());
            let ranks: Vec<usize> = table.rows().iter().map(|r| r.rank).collect();
            prop_assert_eq!(ranks, (1..=records.len()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn sorting_is_idempotent(records in prop::collection::vec(record(), 0..40)) {
        let mut once: Vec<&CrawlRecord> = records.iter().collect();
        sort_by_efficiency(&mut once);
        let mut twice = once.clone();
        sort_by_efficiency(&mut twice);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn scores_never_increase_down_the_table(records in prop::collection::vec(record(), 0..40)) {
        let mut sorted: Vec<&CrawlRecord> = records.iter().collect();
        sort_by_efficiency(&mut sorted);
        let keys: Vec<f64> = sorted.iter().map(|r| r.efficiency().unwrap_or(f64::NEG_INFINITY)).collect();
        prop_assert!(keys.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn cohorts_only_hold_their_league(records in prop::collection::vec(record(), 0..40)) {
        let [first, second] = rank_batch(&records);
        let count = |label: &str| records.iter().filter(|r| r.league_label() == Some(label)).count();
        prop_assert_eq!(first.total, count("1부리그"));
        prop_assert_eq!(second.total, count("2부리그"));
    }

    #[test]
    fn store_keeps_the_batch(records in prop::collection::vec(record(), 0..20), ts in proptest::option::of("[0-9: -]{1,19}")) {
        let batch = CrawlBatch { results: records, last_updated: ts };
        let mut store = MemoryStore::new();
        save_batch(&mut store, &batch).unwrap();
        match load_batch(&store).unwrap() {
            Loaded::Batch(back) => prop_assert_eq!(back, batch),
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }
}
