//! Explain command implementation

use std::path::PathBuf;

use crate::cli::error::CliError;
use crate::cli::output::write_output;
use crate::describe::explain_file;
use crate::llm::{LlmClient, NarrativeBackend, NarrativeGenerator};

/// Arguments for the `explain` command
pub struct ExplainArgs {
    /// Dataset to analyze
    pub input: PathBuf,
    /// Output file path (stdout if not provided)
    pub output: Option<PathBuf>,
}

/// Handle the `explain` command
pub fn handle_explain<C: LlmClient>(
    args: &ExplainArgs,
    backend: &NarrativeBackend<C>,
) -> Result<(), CliError> {
    let generator = NarrativeGenerator::new(backend);
    let explanation = explain_file(&args.input, &generator)?;
    write_output(&explanation, args.output.as_deref(), "Explanation")
}
