//! Upload command implementation

use std::path::PathBuf;

use crate::cli::error::CliError;
use crate::publish::{AgolClient, AgolCredentials, ItemMetadata};

/// Arguments for the `upload` command
pub struct UploadArgs {
    /// File to upload
    pub input: PathBuf,
    /// Item title, the file stem if not provided
    pub title: Option<String>,
    /// Extra item tags
    pub tags: Vec<String>,
    /// Item description
    pub description: Option<String>,
}

/// Handle the `upload` command
pub fn handle_upload(args: &UploadArgs) -> Result<(), CliError> {
    if !args.input.is_file() {
        return Err(CliError::InvalidArgument(format!(
            "{} is not a file",
            args.input.display()
        )));
    }

    let metadata = ItemMetadata::for_file(
        &args.input,
        args.title.as_deref(),
        &args.tags,
        args.description.as_deref(),
    );

    let credentials = AgolCredentials::from_env()?;
    eprintln!("Signing in to {}...", credentials.portal);
    let client = AgolClient::connect(&credentials)?;

    let item = client.upload_data(&args.input, &metadata)?;

    println!("Uploaded: {}", item.title);
    println!("  ID: {}", item.id);
    println!("  Type: {}", item.item_type);
    println!("  URL: {}", item.url);
    Ok(())
}
