//! Dataset descriptions and documentation pages
//!
//! Wires analysis, narrative generation and rendering together for the CLI's
//! `describe`, `tag`, `write` and `explain` commands.

use std::path::Path;

use serde::Serialize;

use crate::analysis::{self, AnalysisRecord};
use crate::gis::DatasetResult;
use crate::llm::{LlmClient, NarrativeGenerator};
use crate::publish::title_from_path;
use crate::render::{self, NarrativeSections, OutputFormat, Rendered};

/// Number of tags requested by default
pub const DEFAULT_TAG_COUNT: usize = 5;

/// Format of a full documentation page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    Markdown,
    Html,
    Text,
    /// Markdown with a YAML front-matter block, as GitBook expects
    GitBook,
}

impl PageFormat {
    /// Parse a page format name; unknown names give plain text, like [`render::render`]
    pub fn resolve(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("gitbook") {
            return PageFormat::GitBook;
        }
        match OutputFormat::resolve(name).0 {
            OutputFormat::Markdown => PageFormat::Markdown,
            OutputFormat::Html => PageFormat::Html,
            OutputFormat::Text => PageFormat::Text,
        }
    }

    fn section_format(self) -> OutputFormat {
        match self {
            PageFormat::Markdown | PageFormat::GitBook => OutputFormat::Markdown,
            PageFormat::Html => OutputFormat::Html,
            PageFormat::Text => OutputFormat::Text,
        }
    }
}

/// Assemble the description sections for an analysis record
///
/// `summary` is the narrative description and is placed right after the overview.
pub fn describe_sections(
    record: &AnalysisRecord,
    summary: Option<&str>,
    include_stats: bool,
) -> NarrativeSections {
    let mut sections = NarrativeSections::new();
    sections.insert(
        "overview",
        format!(
            "This dataset ({}) contains {} {} features.",
            record.source_name,
            record.feature_count,
            record.geometry_types_lowercase()
        ),
    );
    if let Some(summary) = summary {
        sections.insert("summary", summary);
    }
    sections.insert(
        "spatial",
        format!("The data uses the {} coordinate system.", record.crs_label),
    );
    sections.insert(
        "attributes",
        format!(
            "Available attributes include: {}.",
            record.columns.join(", ")
        ),
    );
    if include_stats {
        let stats = &record.geometry_stats;
        sections.insert(
            "statistics",
            format!(
                "The features cover an area of {:.2} {}, with a bounding box extent of {}.",
                stats.total_area, stats.area_unit, stats.bbox
            ),
        );
    }
    sections
}

/// Analyze a file and render its description
pub fn generate_description<C: LlmClient>(
    path: &Path,
    format: &str,
    include_stats: bool,
    generator: &NarrativeGenerator<'_, C>,
) -> DatasetResult<Rendered> {
    let record = analysis::analyze(path)?;
    let summary = generator.generate_description(&record);
    let sections = describe_sections(&record, Some(&summary), include_stats);
    Ok(render::render(&sections, format))
}

/// Analyze a file and suggest tags for it
pub fn generate_tags<C: LlmClient>(
    path: &Path,
    count: usize,
    generator: &NarrativeGenerator<'_, C>,
) -> DatasetResult<Vec<String>> {
    let record = analysis::analyze(path)?;
    let description = generator.generate_description(&record);
    Ok(generator.suggest_tags(&description, count))
}

/// Analyze a file and explain its analysis results
pub fn explain_file<C: LlmClient>(
    path: &Path,
    generator: &NarrativeGenerator<'_, C>,
) -> DatasetResult<String> {
    let record = analysis::analyze(path)?;
    Ok(generator.explain_analysis(&record.analysis_results()))
}

#[derive(Serialize)]
struct FrontMatter<'a> {
    description: &'a str,
}

/// Build a full documentation page for a dataset
///
/// The page carries a title heading, the description sections with statistics, and a
/// tag line. The title defaults to one derived from the file name.
pub fn generate_content<C: LlmClient>(
    path: &Path,
    title: Option<&str>,
    format: PageFormat,
    generator: &NarrativeGenerator<'_, C>,
) -> DatasetResult<String> {
    let record = analysis::analyze(path)?;
    let title = title
        .map(str::to_string)
        .unwrap_or_else(|| title_from_path(path));

    let summary = generator.generate_description(&record);
    let tags = generator.suggest_tags(&summary, DEFAULT_TAG_COUNT);
    let sections = describe_sections(&record, Some(&summary), true);

    Ok(build_page(&title, &summary, &sections, &tags, format))
}

fn build_page(
    title: &str,
    summary: &str,
    sections: &NarrativeSections,
    tags: &[String],
    format: PageFormat,
) -> String {
    let body = render::render(sections, &format.section_format().to_string()).content;
    let tag_line = tags.join(", ");

    match format {
        PageFormat::Markdown => format!("# {}\n\n{}\n**Tags:** {}\n", title, body, tag_line),
        PageFormat::GitBook => {
            let front_matter = serde_yaml::to_string(&FrontMatter {
                description: summary,
            })
            .unwrap_or_else(|_| String::new());
            format!(
                "---\n{}---\n\n# {}\n\n{}\n**Tags:** {}\n",
                front_matter, title, body, tag_line
            )
        }
        PageFormat::Html => format!(
            "<h1>{}</h1>\n{}\n<p class='walter-tags'>Tags: {}</p>\n",
            render::html::escape_html(title),
            body,
            render::html::escape_html(&tag_line)
        ),
        PageFormat::Text => format!(
            "{}\n{}\n\n{}\nTags: {}\n",
            title,
            "=".repeat(title.chars().count()),
            body,
            tag_line
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_dataset;
    use crate::gis::{CrsHandle, Dataset, Feature};
    use geo::{Geometry, polygon};
    use serde_json::{Map, json};

    fn parcels() -> AnalysisRecord {
        let mut properties = Map::new();
        properties.insert("parcel_id".to_string(), json!("P-1"));
        let dataset = Dataset {
            features: vec![Feature::new(
                Some(Geometry::Polygon(polygon![
                    (x: 0.0, y: 0.0),
                    (x: 10.0, y: 0.0),
                    (x: 10.0, y: 10.0),
                    (x: 0.0, y: 10.0),
                ])),
                properties,
            )],
            crs: Some(CrsHandle::epsg("26913")),
        };
        analyze_dataset(&dataset, "parcels.geojson", ".geojson")
    }

    #[test]
    fn test_describe_sections() {
        let sections = describe_sections(&parcels(), Some("Parcels."), true);
        assert_eq!(
            sections.keys().collect::<Vec<_>>(),
            vec!["overview", "summary", "spatial", "attributes", "statistics"]
        );
        assert_eq!(
            sections.get("overview"),
            Some("This dataset (parcels.geojson) contains 1 polygon features.")
        );
        assert_eq!(
            sections.get("spatial"),
            Some("The data uses the EPSG:26913 coordinate system.")
        );
        assert_eq!(
            sections.get("attributes"),
            Some("Available attributes include: parcel_id.")
        );
        assert_eq!(
            sections.get("statistics"),
            Some(
                "The features cover an area of 100.00 square units, with a bounding box extent of (0.00, 0.00, 10.00, 10.00)."
            )
        );
    }

    #[test]
    fn test_describe_sections_without_stats() {
        let sections = describe_sections(&parcels(), None, false);
        assert_eq!(
            sections.keys().collect::<Vec<_>>(),
            vec!["overview", "spatial", "attributes"]
        );
    }

    #[test]
    fn test_page_format_resolve() {
        assert_eq!(PageFormat::resolve("GitBook"), PageFormat::GitBook);
        assert_eq!(PageFormat::resolve("md"), PageFormat::Markdown);
        assert_eq!(PageFormat::resolve("html"), PageFormat::Html);
        assert_eq!(PageFormat::resolve("docx"), PageFormat::Text);
    }

    #[test]
    fn test_gitbook_page() {
        let sections = describe_sections(&parcels(), Some("Parcels."), false);
        let tags = vec!["cadastre".to_string(), "parcels".to_string()];
        let page = build_page("Parcels", "Parcels.", &sections, &tags, PageFormat::GitBook);

        assert!(page.starts_with("---\ndescription: Parcels.\n---\n\n# Parcels\n\n### Overview\n"));
        assert!(page.ends_with("**Tags:** cadastre, parcels\n"));
    }

    #[test]
    fn test_html_page_escapes_title() {
        let sections = describe_sections(&parcels(), None, false);
        let page = build_page("Roads & Rails", "", &sections, &[], PageFormat::Html);
        assert!(page.starts_with("<h1>Roads &amp; Rails</h1>\n<div class='walter-output'>"));
    }
}
