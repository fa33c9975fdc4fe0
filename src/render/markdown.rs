//! Markdown renderer

use super::{NarrativeSections, SectionRenderer, title_case};

/// Renders each section as a level-3 heading followed by its text
pub struct MarkdownRenderer;

impl SectionRenderer for MarkdownRenderer {
    fn render(&self, sections: &NarrativeSections) -> String {
        sections
            .iter()
            .map(|(key, body)| format!("### {}\n\n{}\n", title_case(key), body))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
