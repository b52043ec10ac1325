//! Concurrent producers racing on one pipeline.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use placard_events::{
    EventPipeline, EventRecord, EventType, FnSink, PipelineConfig, SubmitOutcome,
};

/// Number of concurrent tasks to spawn in each test.
const N: usize = 10;

fn collecting_pipeline() -> (EventPipeline, Arc<Mutex<Vec<String>>>) {
    let batches = Arc::new(Mutex::new(Vec::new()));
    let sink_batches = batches.clone();
    let sink = FnSink(move |payload: String| sink_batches.lock().unwrap().push(payload));
    let pipeline = EventPipeline::new(PipelineConfig::default(), Arc::new(sink)).unwrap();
    (pipeline, batches)
}

fn event_count(batches: &[String]) -> usize {
    batches
        .iter()
        .map(|b| {
            let json: serde_json::Value = serde_json::from_str(b).unwrap();
            json["events"].as_array().unwrap().len()
        })
        .sum()
}

/// N tasks submit the same impression. Exactly one is queued.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_duplicates_exactly_one_wins() {
    let (pipeline, batches) = collecting_pipeline();

    let mut handles = Vec::new();
    for _ in 0..N {
        let p = pipeline.clone();
        handles.push(tokio::spawn(async move {
            p.submit(EventRecord::new(
                EventType::SignalImpression,
                "session",
                "offer-1",
                "page",
                "token",
            ))
        }));
    }

    let mut queued = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.unwrap() {
            SubmitOutcome::Queued => queued += 1,
            SubmitOutcome::Duplicate => duplicates += 1,
            SubmitOutcome::Filtered => panic!("impression must not be filtered"),
        }
    }
    assert_eq!(queued, 1, "exactly one submit wins");
    assert_eq!(duplicates, N - 1);

    pipeline.flush().await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(event_count(&batches.lock().unwrap()), 1);
}

/// N tasks submit distinct events. None are lost across window boundaries.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_distinct_events_all_delivered() {
    let (pipeline, batches) = collecting_pipeline();

    let mut handles = Vec::new();
    for i in 0..N {
        let p = pipeline.clone();
        handles.push(tokio::spawn(async move {
            // Stagger producers so some land after the first window closes.
            tokio::time::sleep(Duration::from_millis((i as u64) * 5)).await;
            p.submit(EventRecord::new(
                EventType::SignalViewed,
                "session",
                format!("offer-{i}"),
                "page",
                "token",
            ))
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), SubmitOutcome::Queued);
    }

    pipeline.flush().await;
    // A timer may have taken a window just before the flush.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let batches = batches.lock().unwrap();
    assert_eq!(event_count(&batches), N);

    let mut parents: Vec<String> = batches
        .iter()
        .flat_map(|b| {
            let json: serde_json::Value = serde_json::from_str(b).unwrap();
            json["events"]
                .as_array()
                .unwrap()
                .iter()
                .map(|e| e["parentGuid"].as_str().unwrap().to_string())
                .collect::<Vec<_>>()
        })
        .collect();
    parents.sort();
    parents.dedup();
    assert_eq!(parents.len(), N, "every event lands in exactly one batch");
}

/// Excluded types race freely: all N are forwarded.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_user_interactions_all_forwarded() {
    let (pipeline, batches) = collecting_pipeline();

    let mut handles = Vec::new();
    for _ in 0..N {
        let p = pipeline.clone();
        handles.push(tokio::spawn(async move {
            p.submit(EventRecord::new(
                EventType::SignalUserInteraction,
                "session",
                "offer-1",
                "page",
                "token",
            ))
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), SubmitOutcome::Queued);
    }

    pipeline.flush().await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(event_count(&batches.lock().unwrap()), N);
}
