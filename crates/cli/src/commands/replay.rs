use std::path::Path;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use placard_events::{ChannelSink, EventPipeline, EventRecord, PipelineConfig, SubmitOutcome};

use crate::{report_error, OutputFormat};

#[derive(Debug, Default)]
struct Tally {
    queued: usize,
    duplicate: usize,
    filtered: usize,
}

pub(crate) fn cmd_replay(
    events_path: &Path,
    config_path: Option<&Path>,
    interval_ms: u64,
    output: OutputFormat,
    quiet: bool,
) {
    let config = match config_path {
        Some(path) => match PipelineConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                report_error(&format!("error: {}", e), output, quiet);
                process::exit(1);
            }
        },
        None => PipelineConfig::default(),
    };

    let text = match std::fs::read_to_string(events_path) {
        Ok(s) => s,
        Err(_) => {
            let msg = format!("error: events file not found: {}", events_path.display());
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let mut records = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<EventRecord>(line) {
            Ok(r) => records.push(r),
            Err(e) => {
                let msg = format!(
                    "error: invalid event at {}:{}: {}",
                    events_path.display(),
                    index + 1,
                    e
                );
                report_error(&msg, output, quiet);
                process::exit(1);
            }
        }
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            report_error(&format!("error: cannot start runtime: {}", e), output, quiet);
            process::exit(1);
        }
    };

    let (batches, tally) = rt.block_on(async {
        let (sink, mut rx) = ChannelSink::new();
        let pipeline = match EventPipeline::new(config, Arc::new(sink)) {
            Ok(p) => p,
            Err(e) => {
                report_error(&format!("error: {}", e), output, quiet);
                process::exit(1);
            }
        };

        let mut tally = Tally::default();
        for record in records {
            match pipeline.submit(record) {
                SubmitOutcome::Queued => tally.queued += 1,
                SubmitOutcome::Duplicate => tally.duplicate += 1,
                SubmitOutcome::Filtered => tally.filtered += 1,
            }
            if interval_ms > 0 {
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
            }
        }
        pipeline.flush().await;

        let mut batches = Vec::new();
        while let Ok(payload) = rx.try_recv() {
            batches.push(payload);
        }
        (batches, tally)
    });

    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => {
            for batch in &batches {
                println!("{}", batch);
            }
            eprintln!(
                "{} queued, {} duplicate, {} filtered, {} batch(es)",
                tally.queued,
                tally.duplicate,
                tally.filtered,
                batches.len()
            );
        }
        OutputFormat::Json => {
            let parsed: Vec<serde_json::Value> = batches
                .iter()
                .filter_map(|b| serde_json::from_str(b).ok())
                .collect();
            let json = serde_json::json!({
                "queued": tally.queued,
                "duplicate": tally.duplicate,
                "filtered": tally.filtered,
                "batches": parsed,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or_default()
            );
        }
    }
}
