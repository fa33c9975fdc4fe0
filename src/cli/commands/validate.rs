//! Validate command implementation

use std::path::PathBuf;

use crate::cli::error::CliError;
use crate::gis::{ValidationReport, read_dataset, validate_dataset};

/// Arguments for the `validate` command
pub struct ValidateArgs {
    /// Dataset whose geometries are checked
    pub input: PathBuf,
}

/// Handle the `validate` command
///
/// Fails with [`CliError::InvalidGeometry`] when any feature is invalid.
pub fn handle_validate(args: &ValidateArgs) -> Result<(), CliError> {
    let dataset = read_dataset(&args.input)?;
    let report = validate_dataset(&dataset);

    print!("{}", format_validation_report(&report));

    if report.valid {
        Ok(())
    } else {
        Err(CliError::InvalidGeometry {
            invalid: report.issues.len(),
            total: dataset.len(),
        })
    }
}

fn format_validation_report(report: &ValidationReport) -> String {
    if report.valid {
        return "All geometries are valid.\n".to_string();
    }

    let mut output = String::from("Found invalid geometries:\n");
    for issue in &report.issues {
        output.push_str(&format!("  - Feature {}: {}\n", issue.index, issue.reason));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gis::ValidationIssue;

    #[test]
    fn test_format_validation_report() {
        let report = ValidationReport {
            valid: false,
            issues: vec![ValidationIssue {
                index: 3,
                reason: "Ring self-intersection at (5.00, 5.00)".to_string(),
            }],
        };
        assert_eq!(
            format_validation_report(&report),
            "Found invalid geometries:\n  - Feature 3: Ring self-intersection at (5.00, 5.00)\n"
        );

        let report = ValidationReport {
            valid: true,
            issues: Vec::new(),
        };
        assert_eq!(format_validation_report(&report), "All geometries are valid.\n");
    }
}
