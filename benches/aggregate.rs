use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};

use slack_api::http::channels::HistoryResponse;
use slack_metadata::aggregate;

/// A 1000 message page shaped like a busy channel: mostly plain messages, with threads,
/// bot posts, file shares and reactions spread across 40 authors.
fn page() -> String {
    let messages: Vec<Value> = (0..1000u32)
        .map(|i| {
            let user = format!("U{:08}", i % 37);
            let ts = format!("{}.{:06}", 1_525_306_421 - i, i);
            match i % 10 {
                0 => json!({
                    "type": "message", "subtype": "bot_message", "bot_id": format!("B{:08}", i % 3),
                    "text": "deploy finished", "ts": ts, "thread_ts": ts, "reply_count": 2,
                    "replies": [{"user": "U00000001", "ts": ts}, {"user": "U00000002", "ts": ts}]
                }),
                1 => json!({
                    "type": "message", "subtype": "file_share", "user": user, "ts": ts,
                    "file": {"id": format!("F{:08}", i), "filetype": "python", "lines": 120,
                             "comments_count": 1, "reactions": [{"name": "eyes", "count": 2}]}
                }),
                2 => json!({
                    "type": "message", "user": user, "text": "thread", "ts": ts, "thread_ts": ts,
                    "reply_count": 3,
                    "replies": [{"user": user, "ts": ts}, {"user": "U00000005", "ts": ts}]
                }),
                _ => json!({
                    "type": "message", "user": user, "text": "hello", "ts": ts,
                    "reactions": [{"name": "+1", "count": i % 4}]
                }),
            }
        })
        .collect();
    json!({"ok": true, "messages": messages, "has_more": true}).to_string()
}

fn aggregate_1000(c: &mut Criterion) {
    let the_json = page();
    let response: HistoryResponse = serde_json::from_str(&the_json).unwrap();

    c.bench_function("parse_and_aggregate_1000", |b| {
        b.iter(|| {
            let response: HistoryResponse = serde_json::from_str(&the_json).unwrap();
            aggregate(&response.messages)
        })
    });
    c.bench_function("aggregate_1000", |b| b.iter(|| aggregate(&response.messages)));
}

criterion_group!(benches, aggregate_1000);
criterion_main!(benches);
