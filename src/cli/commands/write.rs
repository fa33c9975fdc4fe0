//! Write command implementation

use std::path::PathBuf;

use crate::cli::error::CliError;
use crate::cli::output::write_output;
use crate::describe::{PageFormat, generate_content};
use crate::llm::{LlmClient, NarrativeBackend, NarrativeGenerator};

/// Arguments for the `write` command
pub struct WriteArgs {
    /// Dataset to document
    pub input: PathBuf,
    /// Output file path (stdout if not provided)
    pub output: Option<PathBuf>,
    /// Page title, derived from the file name if not provided
    pub title: Option<String>,
    /// Page format (markdown, html, text, gitbook)
    pub format: String,
}

/// Handle the `write` command
pub fn handle_write<C: LlmClient>(
    args: &WriteArgs,
    backend: &NarrativeBackend<C>,
) -> Result<(), CliError> {
    let generator = NarrativeGenerator::new(backend);
    let format = PageFormat::resolve(&args.format);

    eprintln!("Writing documentation for {}...", args.input.display());
    let page = generate_content(&args.input, args.title.as_deref(), format, &generator)?;

    write_output(&page, args.output.as_deref(), "Documentation")
}
