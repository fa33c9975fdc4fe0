//! Plain text renderer

use super::{NarrativeSections, SectionRenderer};

/// Renders each section under an upper-cased key underlined with `=`
pub struct TextRenderer;

impl SectionRenderer for TextRenderer {
    fn render(&self, sections: &NarrativeSections) -> String {
        sections
            .iter()
            .map(|(key, body)| {
                format!(
                    "{}\n{}\n{}\n",
                    key.to_uppercase(),
                    "=".repeat(key.chars().count()),
                    body
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
