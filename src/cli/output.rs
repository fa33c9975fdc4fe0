//! Output helpers for CLI commands

use std::path::Path;

use crate::publish::SyncReport;

use super::CliError;

/// Write `content` to `output`, or print it to stdout when no path is given
pub fn write_output(content: &str, output: Option<&Path>, what: &str) -> Result<(), CliError> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .map_err(|e| CliError::FileWriteError(parent.to_path_buf(), e.to_string()))?;
            }
            std::fs::write(path, content)
                .map_err(|e| CliError::FileWriteError(path.to_path_buf(), e.to_string()))?;
            eprintln!("{} saved to: {}", what, path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Human-readable summary of a directory sync
pub fn format_sync_report(report: &SyncReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("Published {} page(s):\n", report.published.len()));
    for page in &report.published {
        output.push_str(&format!(
            "  - {} ({}) -> {}\n",
            page.title,
            page.path.as_deref().unwrap_or("-"),
            page.id
        ));
    }

    if !report.failures.is_empty() {
        output.push_str(&format!("\nFailed {} file(s):\n", report.failures.len()));
        for failure in &report.failures {
            output.push_str(&format!(
                "  - {}: {}\n",
                failure.path.display(),
                failure.error
            ));
        }
    }

    if let Some(summary) = &report.summary_path {
        output.push_str(&format!("\nSummary written to: {}\n", summary.display()));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publish::{PublishedPage, SyncFailure};
    use chrono::Utc;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_format_sync_report() {
        let report = SyncReport {
            published: vec![PublishedPage {
                id: "p1".to_string(),
                title: "Roads".to_string(),
                path: Some("roads.md".to_string()),
                published_at: Utc::now(),
            }],
            failures: vec![SyncFailure {
                path: PathBuf::from("docs/parks.md"),
                error: "API error (HTTP 500): boom".to_string(),
            }],
            summary_path: Some(PathBuf::from("docs/SUMMARY.md")),
        };

        let text = format_sync_report(&report);
        assert!(text.contains("Published 1 page(s):\n  - Roads (roads.md) -> p1\n"));
        assert!(text.contains("Failed 1 file(s):\n  - docs/parks.md: API error (HTTP 500): boom\n"));
        assert!(text.ends_with("Summary written to: docs/SUMMARY.md\n"));
    }

    #[test]
    fn test_write_output_creates_parent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out/description.md");
        write_output("### Overview", Some(&path), "Description").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "### Overview");
    }
}
