// Output rendering for extracted function names

use std::fmt;
use std::str::FromStr;

use crate::extractor::NameList;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Compact JSON array on one line
    #[default]
    Json,
    /// Indented JSON array
    Pretty,
    /// One English sentence listing the components
    Summary,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "pretty" => Ok(OutputFormat::Pretty),
            "summary" | "text" => Ok(OutputFormat::Summary),
            other => Err(anyhow::anyhow!(
                "Unsupported output format: '{}'. Supported formats: json, pretty, summary",
                other
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Json => "json",
            OutputFormat::Pretty => "pretty",
            OutputFormat::Summary => "summary",
        })
    }
}

/// Render names in the requested format, without a trailing newline
pub fn render(names: &NameList, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string(names),
        OutputFormat::Pretty => serde_json::to_string_pretty(names),
        OutputFormat::Summary => Ok(summary(names)),
    }
}

fn summary(names: &NameList) -> String {
    if names.is_empty() {
        "This file does not define any components.".to_string()
    } else {
        let joined = names
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        format!("This file defines the following components: {}", joined)
    }
}
