use std::path::Path;
use std::process;

use serde::Deserialize;

use placard_eval::{
    eval_predicate, parse_predicates, Breakpoints, CustomStateKey, CustomStateMap,
    UiStateSnapshot,
};
use placard_interchange::LayoutSchema;

use crate::{load_schema, read_json, report_error, OutputFormat};

pub(crate) struct EvalOptions<'a> {
    pub predicates: &'a Path,
    pub state: &'a Path,
    pub schema: Option<&'a Path>,
    pub slot: usize,
    pub catalog_item: Option<usize>,
    pub output: OutputFormat,
    pub quiet: bool,
}

/// UI state as written in a state file.
///
/// ```json
/// { "currentProgress": 1, "totalItems": 3, "width": 390,
///   "customState": [{ "position": 1, "key": "expanded", "value": 1 }] }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StateFile {
    current_progress: i32,
    total_items: Option<i32>,
    position: Option<i32>,
    width: f32,
    dark_mode: bool,
    breakpoints: Option<Breakpoints>,
    custom_state: Vec<CustomStateEntry>,
}

#[derive(Debug, Deserialize)]
struct CustomStateEntry {
    #[serde(default)]
    position: Option<i32>,
    key: String,
    value: i32,
}

pub(crate) fn cmd_eval(opts: EvalOptions<'_>) {
    let EvalOptions { output, quiet, .. } = opts;

    let when = read_json(opts.predicates, output, quiet);
    let predicates = match parse_predicates(&when) {
        Ok(p) => p,
        Err(e) => {
            let msg = format!("error: invalid predicates in {}: {}", opts.predicates.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let state_doc = read_json(opts.state, output, quiet);
    let state_file: StateFile = match serde_json::from_value(state_doc) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error: invalid state in {}: {}", opts.state.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let schema: Option<LayoutSchema> = opts.schema.map(|p| load_schema(p, output, quiet));

    let breakpoints = state_file
        .breakpoints
        .clone()
        .or_else(|| schema.as_ref().map(|s| s.breakpoints.clone()))
        .unwrap_or_default();
    let total_items = state_file
        .total_items
        .or_else(|| {
            schema
                .as_ref()
                .and_then(|s| i32::try_from(s.slots.len()).ok())
        })
        .unwrap_or(1);
    let custom_state: CustomStateMap = state_file
        .custom_state
        .iter()
        .map(|e| (CustomStateKey::new(e.position, e.key.as_str()), e.value))
        .collect();

    let mut snapshot = UiStateSnapshot::new(&breakpoints)
        .with_progress(state_file.current_progress, total_items)
        .with_position(state_file.position)
        .with_width(state_file.width)
        .with_dark_mode(state_file.dark_mode)
        .with_custom_state(&custom_state);

    if let Some(offer) = schema.as_ref().and_then(|s| s.offer(opts.slot)) {
        snapshot = snapshot.with_creative(&offer.creative);
        if let Some(index) = opts.catalog_item {
            match offer.catalog_items.get(index) {
                Some(item) => snapshot = snapshot.with_catalog_item(item),
                None => {
                    let msg = format!("error: slot {} has no catalog item {}", opts.slot, index);
                    report_error(&msg, output, quiet);
                    process::exit(1);
                }
            }
        }
    }

    let results: Vec<(&str, bool)> = predicates
        .iter()
        .map(|p| (p.kind(), eval_predicate(p, &snapshot)))
        .collect();
    let applies = results.iter().all(|(_, holds)| *holds);
    tracing::debug!(predicates = results.len(), applies, "evaluated predicate set");

    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => println!("{}", applies),
        OutputFormat::Json => {
            let json = serde_json::json!({
                "applies": applies,
                "predicates": results
                    .iter()
                    .map(|(kind, holds)| serde_json::json!({ "kind": kind, "holds": holds }))
                    .collect::<Vec<_>>(),
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or_default()
            );
        }
    }
}
