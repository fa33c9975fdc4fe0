//! Walter - an AI GIS assistant
//!
//! Provides a pipeline for:
//! - Reading GeoJSON datasets and inspecting their geometry
//! - Analyzing dataset schema and attribute statistics
//! - Generating descriptions, tags and explanations, with or without a local LLM
//! - Rendering narrative sections as markdown, HTML or plain text
//! - Publishing documentation to GitBook and datasets to ArcGIS Online

pub mod analysis;
#[cfg(feature = "cli")]
pub mod cli;
pub mod describe;
pub mod error;
pub mod gis;
pub mod llm;
pub mod publish;
pub mod render;

// Re-export commonly used types
pub use analysis::{AnalysisRecord, ColumnSummary, analyze, analyze_dataset};
pub use describe::{
    PageFormat, describe_sections, explain_file, generate_content, generate_description,
    generate_tags,
};
pub use error::{WalterError, WalterResult};
pub use gis::{
    AreaUnit, CrsHandle, Dataset, DatasetReadError, DatasetResult, Feature, GeometryStats,
    ValidationReport, compute_stats, describe_crs, read_dataset, validate_dataset,
};
pub use llm::{
    LlmClient, LlmConfig, LlmError, LlmMode, NarrativeBackend, NarrativeGenerator, OllamaClient,
};
pub use publish::{
    AgolClient, GitBookApi, GitBookPublisher, PublishError, PublishedPage, PublisherConfig,
    SyncReport, title_from_path,
};
pub use render::{NarrativeSections, OutputFormat, Rendered, render};
