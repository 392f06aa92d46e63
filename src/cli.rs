use clap::Parser;
use std::path::PathBuf;

use crate::adapters::outbound::formatters::{CsvFormatter, JsonFormatter, SummaryFormatter};
use crate::ports::outbound::GraphFormatter;
use crate::sbom_analysis::services::TypeFilter;
use crate::shared::error::SbomGraphError;
use crate::shared::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
    Summary,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "summary" | "text" => Ok(OutputFormat::Summary),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'json', 'csv' or 'summary'",
                s
            )),
        }
    }
}

impl OutputFormat {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Returns
    /// A boxed GraphFormatter trait object appropriate for this format
    pub fn create_formatter(&self) -> Box<dyn GraphFormatter> {
        match self {
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Csv => Box::new(CsvFormatter::new()),
            OutputFormat::Summary => Box::new(SummaryFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    pub fn progress_message(&self) -> &'static str {
        match self {
            OutputFormat::Json => "📝 Generating JSON graph export...",
            OutputFormat::Csv => "📝 Generating CSV common-component export...",
            OutputFormat::Summary => "📝 Generating summary...",
        }
    }
}

/// Build a component graph across one or more SBOM documents
#[derive(Parser, Debug)]
#[command(name = "sbom-graph")]
#[command(version)]
#[command(about = "Detect shared components across SBOMs and export a reduced graph", long_about = None)]
pub struct Args {
    /// SBOM JSON files to load
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Output format: json, csv or summary
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Component types to include (comma separated: system,hardware,software)
    #[arg(short = 't', long = "types", value_delimiter = ',', value_name = "TYPE")]
    pub types: Vec<String>,

    /// Node count above which same-kind nodes are clustered
    #[arg(long, value_name = "N")]
    pub cluster_threshold: Option<usize>,

    /// Hard cap on node count after clustering
    #[arg(long, value_name = "N")]
    pub max_nodes: Option<usize>,

    /// Search loaded components instead of producing a graph
    #[arg(short, long, value_name = "QUERY")]
    pub search: Option<String>,

    /// Explicit config file path (default: ./sbom-graph.config.yml if present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Parses a type selection list into a filter. An empty list selects every
/// component type.
pub fn parse_type_filter(types: &[String]) -> Result<TypeFilter> {
    if types.is_empty() {
        return Ok(TypeFilter::default());
    }

    let mut filter = TypeFilter {
        systems: false,
        hardware: false,
        software: false,
    };
    for name in types {
        match name.to_lowercase().as_str() {
            "system" | "systems" => filter.systems = true,
            "hardware" => filter.hardware = true,
            "software" => filter.software = true,
            other => {
                return Err(SbomGraphError::Validation {
                    message: format!(
                        "Invalid component type: {}. Valid types are 'system', 'hardware' and 'software'",
                        other
                    ),
                }
                .into())
            }
        }
    }
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_output_format_from_str_json() {
        let format = OutputFormat::from_str("json").unwrap();
        assert_eq!(format, OutputFormat::Json);
    }

    #[test]
    fn test_output_format_from_str_case_insensitive() {
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("Csv").unwrap(), OutputFormat::Csv);
    }

    #[test]
    fn test_output_format_from_str_summary_aliases() {
        assert_eq!(
            OutputFormat::from_str("summary").unwrap(),
            OutputFormat::Summary
        );
        assert_eq!(
            OutputFormat::from_str("text").unwrap(),
            OutputFormat::Summary
        );
    }

    #[test]
    fn test_output_format_from_str_invalid() {
        let result = OutputFormat::from_str("yaml");
        assert!(result.is_err());
        let error = result.unwrap_err();
        assert!(error.contains("Invalid format"));
        assert!(error.contains("yaml"));
    }

    #[test]
    fn test_parse_type_filter_empty_selects_all() {
        let filter = parse_type_filter(&[]).unwrap();
        assert_eq!(filter, TypeFilter::default());
    }

    #[test]
    fn test_parse_type_filter_subset() {
        let filter = parse_type_filter(&["software".to_string()]).unwrap();
        assert!(filter.software);
        assert!(!filter.systems);
        assert!(!filter.hardware);
    }

    #[test]
    fn test_parse_type_filter_invalid_name() {
        let result = parse_type_filter(&["firmware".to_string()]);
        assert!(result.is_err());
    }
}
