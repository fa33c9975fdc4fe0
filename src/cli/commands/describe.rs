//! Describe command implementation

use std::path::PathBuf;

use crate::cli::error::CliError;
use crate::cli::output::write_output;
use crate::describe::generate_description;
use crate::llm::{LlmClient, NarrativeBackend, NarrativeGenerator};

/// Arguments for the `describe` command
pub struct DescribeArgs {
    /// Dataset to describe
    pub input: PathBuf,
    /// Output file path (stdout if not provided)
    pub output: Option<PathBuf>,
    /// Output format (markdown, html, text)
    pub format: String,
    /// Leave out the area and extent section
    pub no_stats: bool,
}

/// Handle the `describe` command
pub fn handle_describe<C: LlmClient>(
    args: &DescribeArgs,
    backend: &NarrativeBackend<C>,
) -> Result<(), CliError> {
    let generator = NarrativeGenerator::new(backend);

    eprintln!("Describing {}...", args.input.display());
    let rendered = generate_description(&args.input, &args.format, !args.no_stats, &generator)?;

    if rendered.fell_back() {
        eprintln!(
            "Unknown format '{}', using {} instead",
            rendered.requested, rendered.format
        );
    }

    write_output(&rendered.content, args.output.as_deref(), "Description")
}
