//! Check command handler

use super::utils::{load_interpreter, read_document};
use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use tracing::{instrument, warn};

/// Handle the check command
///
/// Every attribute is attempted. Any problem makes the command fail after
/// the full report has been written.
#[instrument(skip(config, output), fields(mapping = %args.mapping.display(), document = %args.document.display()))]
pub fn handle_check(args: CheckArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::new("check_command");

    let interpreter = load_interpreter(&args.mapping, args.base_url.as_deref(), config)?;
    let document = read_document(&args.document)?;
    let problems = interpreter.problems(&document);

    if problems.is_empty() {
        output.success(&format!(
            "✓ {} interprets as {}",
            args.document.display(),
            interpreter.definition().item_class()
        ))?;
        return Ok(());
    }

    warn!(problems = problems.len(), "Document failed interpretation check");
    output.error(&format!("✗ {} does not interpret cleanly", args.document.display()))?;
    output.problems(&problems)?;

    Err(Error::Problems {
        count: problems.len(),
    })
}
