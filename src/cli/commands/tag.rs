//! Tag command implementation

use std::path::PathBuf;

use crate::cli::error::CliError;
use crate::cli::output::write_output;
use crate::describe::generate_tags;
use crate::llm::{LlmClient, NarrativeBackend, NarrativeGenerator};

/// Arguments for the `tag` command
pub struct TagArgs {
    /// Dataset to tag
    pub input: PathBuf,
    /// Number of tags to suggest
    pub count: usize,
    /// Output file path (stdout if not provided)
    pub output: Option<PathBuf>,
}

/// Handle the `tag` command
pub fn handle_tag<C: LlmClient>(
    args: &TagArgs,
    backend: &NarrativeBackend<C>,
) -> Result<(), CliError> {
    if args.count == 0 {
        return Err(CliError::InvalidArgument(
            "--count must be at least 1".to_string(),
        ));
    }

    let generator = NarrativeGenerator::new(backend);
    let tags = generate_tags(&args.input, args.count, &generator)?;

    // One tag per line
    write_output(&tags.join("\n"), args.output.as_deref(), "Tags")
}
