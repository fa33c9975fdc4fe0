//! HTML fragment renderer

use super::{NarrativeSections, SectionRenderer, title_case};

/// Renders sections inside a `walter-output` div
pub struct HtmlRenderer;

impl SectionRenderer for HtmlRenderer {
    fn render(&self, sections: &NarrativeSections) -> String {
        let mut parts = Vec::with_capacity(sections.len() + 2);
        parts.push("<div class='walter-output'>".to_string());
        for (key, body) in sections.iter() {
            parts.push(format!(
                "<h3>{}</h3>\n<p>{}</p>",
                escape_html(&title_case(key)),
                escape_html(body)
            ));
        }
        parts.push("</div>".to_string());
        parts.join("\n")
    }
}

/// Escape text for use in HTML element content and attributes
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_sections() {
        let sections = NarrativeSections::new()
            .with("overview", "A.")
            .with("spatial", "B.");
        assert_eq!(
            HtmlRenderer.render(&sections),
            "<div class='walter-output'>\n<h3>Overview</h3>\n<p>A.</p>\n<h3>Spatial</h3>\n<p>B.</p>\n</div>"
        );
    }

    #[test]
    fn test_html_escaping() {
        let sections = NarrativeSections::new().with("overview", "Roads <major> & \"minor\"");
        let html = HtmlRenderer.render(&sections);
        assert!(html.contains("<p>Roads &lt;major&gt; &amp; &quot;minor&quot;</p>"));
    }
}
