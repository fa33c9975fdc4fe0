//! walter - describe, tag and publish GIS datasets

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use walter::cli::CliError;
use walter::cli::commands::describe::{DescribeArgs, handle_describe};
use walter::cli::commands::explain::{ExplainArgs, handle_explain};
use walter::cli::commands::sync::{SyncArgs, handle_sync};
use walter::cli::commands::tag::{TagArgs, handle_tag};
use walter::cli::commands::upload::{UploadArgs, handle_upload};
use walter::cli::commands::validate::{ValidateArgs, handle_validate};
use walter::cli::commands::write::{WriteArgs, handle_write};
use walter::cli::logging::init_logging;
use walter::llm::{LlmConfig, NarrativeBackend};

#[derive(Parser, Debug)]
#[command(
    name = "walter",
    version,
    about = "Walter - your AI GIS assistant for geospatial workflows"
)]
struct Cli {
    #[command(flatten)]
    llm: LlmArgs,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct LlmArgs {
    /// Ollama model to use
    #[arg(long, global = true)]
    model: Option<String>,
    /// Ollama API address
    #[arg(long, global = true)]
    ollama_url: Option<String>,
    /// Sampling temperature (0.0-2.0)
    #[arg(long, global = true)]
    temperature: Option<f32>,
    /// Never contact the model runtime
    #[arg(long, global = true)]
    no_llm: bool,
    /// Fail when the model runtime cannot be reached
    #[arg(long, global = true, conflicts_with = "no_llm")]
    require_llm: bool,
    /// LLM request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a description of a dataset
    Describe {
        /// Path to the input GIS file
        input: PathBuf,
        /// Output file path for the description
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format (markdown/html/text)
        #[arg(short, long, default_value = "markdown")]
        format: String,
        /// Leave out area and extent statistics
        #[arg(long)]
        no_stats: bool,
    },
    /// Suggest tags for a dataset
    Tag {
        /// Path to the input GIS file
        input: PathBuf,
        /// Number of tags
        #[arg(short, long, default_value_t = 5)]
        count: usize,
        /// Output file path for the tags
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write a documentation page for a dataset
    Write {
        /// Path to the input GIS file
        input: PathBuf,
        /// Output file path for the page
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Page title
        #[arg(short, long)]
        title: Option<String>,
        /// Page format (markdown/html/text/gitbook)
        #[arg(short, long, default_value = "markdown")]
        format: String,
    },
    /// Explain the analysis results of a dataset
    Explain {
        /// Path to the input GIS file
        input: PathBuf,
        /// Output file path for the explanation
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check every geometry in a dataset for validity
    Validate {
        /// Path to the input GIS file
        input: PathBuf,
    },
    /// Publish a directory of markdown files to GitBook
    Sync {
        /// Directory to publish
        directory: PathBuf,
        /// GitBook space ID
        #[arg(short, long)]
        space: Option<String>,
        /// Publisher config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Upload a dataset to ArcGIS Online
    Upload {
        /// File to upload
        input: PathBuf,
        /// Item title
        #[arg(short, long)]
        title: Option<String>,
        /// Item tags (repeatable or comma-separated)
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
        /// Item description
        #[arg(short, long)]
        description: Option<String>,
    },
}

impl LlmArgs {
    fn to_config(&self) -> LlmConfig {
        let mut config = LlmConfig::from_env();
        if self.no_llm {
            return config.without_llm();
        }
        if let Some(model) = &self.model {
            config = config.with_model(model.clone());
        }
        if let Some(url) = &self.ollama_url {
            config = config.with_url(url.clone());
        }
        if let Some(temperature) = self.temperature {
            config = config.with_temperature(temperature);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        config.with_require_llm(self.require_llm)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Warning: {}", e);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Describe {
            input,
            output,
            format,
            no_stats,
        } => {
            let backend = NarrativeBackend::from_config(&cli.llm.to_config())?;
            handle_describe(
                &DescribeArgs {
                    input,
                    output,
                    format,
                    no_stats,
                },
                &backend,
            )
        }
        Command::Tag {
            input,
            count,
            output,
        } => {
            let backend = NarrativeBackend::from_config(&cli.llm.to_config())?;
            handle_tag(
                &TagArgs {
                    input,
                    count,
                    output,
                },
                &backend,
            )
        }
        Command::Write {
            input,
            output,
            title,
            format,
        } => {
            let backend = NarrativeBackend::from_config(&cli.llm.to_config())?;
            handle_write(
                &WriteArgs {
                    input,
                    output,
                    title,
                    format,
                },
                &backend,
            )
        }
        Command::Explain { input, output } => {
            let backend = NarrativeBackend::from_config(&cli.llm.to_config())?;
            handle_explain(&ExplainArgs { input, output }, &backend)
        }
        Command::Validate { input } => handle_validate(&ValidateArgs { input }),
        Command::Sync {
            directory,
            space,
            config,
        } => handle_sync(&SyncArgs {
            directory,
            space,
            config,
        }),
        Command::Upload {
            input,
            title,
            tags,
            description,
        } => handle_upload(&UploadArgs {
            input,
            title,
            tags,
            description,
        }),
    }
}
