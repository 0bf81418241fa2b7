//! Extract command handler

use super::utils::{load_interpreter, read_document};
use crate::cli::{ExtractArgs, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::{OutputFormatter, OutputWriter};
use serde_json::Value;
use tracing::{debug, info, instrument};

/// Handle the extract command
#[instrument(skip(config, output), fields(mapping = %args.mapping.display(), document = %args.document.display()))]
pub fn handle_extract(args: ExtractArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let timer = Timer::with_details("extract_command", &args.document.display().to_string());

    let interpreter = load_interpreter(&args.mapping, args.base_url.as_deref(), config)?;
    let document = read_document(&args.document)?;
    debug!(
        item_class = %interpreter.definition().item_class(),
        attributes = interpreter.definition().len(),
        "Interpreter declared"
    );

    if args.items {
        let items = interpreter.evaluate_items(&document)?;
        info!(
            items = items.len(),
            elapsed_ms = timer.elapsed().as_millis() as u64,
            "Interpreted collection"
        );
        write_items(output, &items)
    } else {
        let item = interpreter.evaluate(&document)?;
        info!(elapsed_ms = timer.elapsed().as_millis() as u64, "Interpreted document");
        output.attributes(&item)
    }
}

fn write_items(output: &mut OutputWriter, items: &[Value]) -> Result<()> {
    if output.format() != OutputFormat::Human {
        return output.data(&items);
    }

    if items.is_empty() {
        return output.info("Collection has no items");
    }

    for (index, item) in items.iter().enumerate() {
        output.section(&format!("Item {}", index + 1))?;
        let formatted = output.format().format_attributes(item)?;
        output.writeln(&formatted)?;
    }
    Ok(())
}
