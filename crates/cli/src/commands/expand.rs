use std::path::Path;
use std::process;

use placard_core::{bind, BoundText, DataBinding, DataSource, StateValues};
use placard_interchange::ResponseKey;

use crate::{load_schema, report_error, OutputFormat, ResponseArg};

pub(crate) struct ExpandOptions<'a> {
    pub template: &'a str,
    pub schema: &'a Path,
    pub slot: usize,
    pub catalog_item: Option<usize>,
    pub response: Option<ResponseArg>,
    pub position: usize,
    pub output: OutputFormat,
    pub quiet: bool,
}

pub(crate) fn cmd_expand(opts: ExpandOptions<'_>) {
    let ExpandOptions {
        template,
        output,
        quiet,
        ..
    } = opts;
    let schema = load_schema(opts.schema, output, quiet);

    let Some(offer) = schema.offer(opts.slot) else {
        let msg = format!("error: slot {} has no offer", opts.slot);
        report_error(&msg, output, quiet);
        process::exit(1);
    };

    let mut source = match opts.catalog_item {
        Some(index) => match offer.catalog_items.get(index) {
            Some(item) => DataSource::offer_with_catalog_item(&offer.creative, item),
            None => {
                let msg = format!(
                    "error: slot {} has no catalog item {} ({} available)",
                    opts.slot,
                    index,
                    offer.catalog_items.len()
                );
                report_error(&msg, output, quiet);
                process::exit(1);
            }
        },
        None => DataSource::offer(&offer.creative),
    };
    if let Some(response) = opts.response {
        source = source.with_response(match response {
            ResponseArg::Positive => ResponseKey::Positive,
            ResponseArg::Negative => ResponseKey::Negative,
        });
    }

    let binding = match bind(template, &source) {
        Ok(b) => b,
        Err(e) if e.collapses_to_empty() => {
            tracing::debug!(error = %e, "template collapsed to empty");
            DataBinding::Value(BoundText::new())
        }
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    let values = StateValues {
        indicator_position: opts.position,
        total_offers: schema.slots.len(),
    };
    let rendered = binding.inner().render(&values);

    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => println!("{}", rendered),
        OutputFormat::Json => {
            let json = serde_json::json!({
                "binding": if binding.is_state() { "state" } else { "value" },
                "text": binding.inner().text(),
                "rendered": rendered,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or_default()
            );
        }
    }
}
