//! Shared CLI definitions for plotpick.
//!
//! Used by the main application and by the build script (manpage) and
//! gen_docs binary (command-line-options markdown).

use clap::{CommandFactory, Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Dataset formats the chart server accepts as an upload.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum DatasetFormat {
    /// Comma-separated values
    Csv,
    /// Excel workbook (.xlsx)
    Excel,
    /// JSON records
    Json,
}

impl DatasetFormat {
    pub const ALL: [Self; 3] = [Self::Csv, Self::Excel, Self::Json];

    /// Detect format from path extension. Returns None when extension is missing or unsupported.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Parse format from extension string (e.g. "csv", "XLSX").
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Excel),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "xlsx",
            Self::Json => "json",
        }
    }

    /// MIME type sent with the multipart `file` field.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Excel => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Json => "application/json",
        }
    }

    /// Comma-separated list of accepted extensions, for messages.
    pub fn accepted_extensions() -> String {
        Self::ALL
            .iter()
            .map(|f| format!(".{}", f.extension()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Command-line arguments for plotpick
#[derive(Clone, Parser, Debug)]
#[command(
    name = "plotpick",
    version,
    about = "Compose and render server-side charts from a tabular dataset",
    long_about = include_str!("../long_about.txt")
)]
pub struct Args {
    /// Dataset to upload (.csv, .xlsx or .json). Required with --list and --batch
    #[arg(value_name = "PATH", required_if_eq_any = [("list", "true"), ("batch", "true")])]
    pub path: Option<PathBuf>,

    /// Catalog label to add as a selection, e.g. "Bar Chart (Age vs Income)". Repeatable
    #[arg(long = "graph", short = 'g', value_name = "LABEL")]
    pub graphs: Vec<String>,

    /// Fetch the chart catalog for PATH, print one label per line and exit
    #[arg(long = "list", action, conflicts_with = "batch")]
    pub list: bool,

    /// Run without the terminal UI: fetch the catalog, generate every --graph and print the results
    #[arg(long = "batch", action, requires = "graphs")]
    pub batch: bool,

    /// Directory to write generated chart images into (batch mode, or the default for `s` in the UI)
    #[arg(long = "save-images", value_name = "DIR")]
    pub save_images: Option<PathBuf>,

    /// Chart server base URL (overrides config). Example: http://127.0.0.1:8000
    #[arg(long = "server", value_name = "URL")]
    pub server: Option<String>,

    /// Request timeout in seconds (overrides config). Default: no timeout
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Log filter (e.g. info, debug, plotpick=trace). Overrides RUST_LOG and config
    #[arg(long = "log-level", value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Enable debug mode to show operational information
    #[arg(long = "debug", action)]
    pub debug: bool,

    /// Generate default configuration file at ~/.config/plotpick/config.toml
    #[arg(long = "generate-config", action)]
    pub generate_config: bool,

    /// Force overwrite existing config file when using --generate-config
    #[arg(long = "force", requires = "generate_config", action)]
    pub force: bool,

    /// Clear all cache data (log file, dataset history) and exit
    #[arg(long = "clear-cache", action)]
    pub clear_cache: bool,
}

/// Escape `|` and newlines for use in markdown table cells.
fn escape_table_cell(s: &str) -> String {
    s.replace('|', "\\|").replace(['\n', '\r'], " ")
}

fn value_placeholder(arg: &clap::Arg) -> String {
    arg.get_value_names()
        .map(|names| {
            names
                .iter()
                .map(|n: &clap::builder::Str| format!("<{}>", n.as_ref() as &str))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}

/// Render command-line options as markdown.
///
/// Used by the gen_docs binary; output is written to stdout.
pub fn render_options_markdown() -> String {
    let mut cmd = Args::command();
    cmd.build();

    let mut out = String::from("# Command Line Options\n\n");

    out.push_str("## Usage\n\n```\n");
    let usage = cmd.render_usage();
    out.push_str(&usage.to_string());
    out.push_str("\n```\n\n");

    out.push_str("## Options\n\n");
    out.push_str("| Option | Description |\n");
    out.push_str("|--------|-------------|\n");

    for arg in cmd.get_arguments() {
        let id = arg.get_id().as_ref().to_string();
        if id == "help" || id == "version" {
            continue;
        }

        let option_str = if arg.is_positional() {
            let placeholder = value_placeholder(arg);
            if arg.is_required_set() {
                placeholder
            } else {
                format!("[{placeholder}]")
            }
        } else {
            let mut parts = Vec::new();
            if let Some(s) = arg.get_short() {
                parts.push(format!("-{s}"));
            }
            if let Some(l) = arg.get_long() {
                parts.push(format!("--{l}"));
            }
            let op = parts.join(", ");
            let placeholder = if arg.get_action().takes_values() {
                value_placeholder(arg)
            } else {
                String::new()
            };
            if placeholder.is_empty() {
                op
            } else {
                format!("{op} {placeholder}")
            }
        };

        let help = arg
            .get_help()
            .map(|h| escape_table_cell(&h.to_string()))
            .unwrap_or_else(|| "-".to_string());

        out.push_str(&format!("| `{option_str}` | {help} |\n"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_format_from_path() {
        assert_eq!(
            DatasetFormat::from_path(Path::new("people.csv")),
            Some(DatasetFormat::Csv)
        );
        assert_eq!(
            DatasetFormat::from_path(Path::new("book.XLSX")),
            Some(DatasetFormat::Excel)
        );
        assert_eq!(
            DatasetFormat::from_path(Path::new("rows.json")),
            Some(DatasetFormat::Json)
        );
        assert_eq!(DatasetFormat::from_path(Path::new("data.parquet")), None);
        assert_eq!(DatasetFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_accepted_extensions() {
        assert_eq!(DatasetFormat::accepted_extensions(), ".csv, .xlsx, .json");
    }

    #[test]
    fn test_args_parse_graphs() {
        let args = Args::try_parse_from([
            "plotpick",
            "data.csv",
            "--graph",
            "Bar Chart (Age vs Income)",
            "-g",
            "Pie Chart (Region)",
            "--batch",
        ])
        .unwrap();
        assert_eq!(args.path, Some(PathBuf::from("data.csv")));
        assert_eq!(args.graphs.len(), 2);
        assert!(args.batch);
    }

    #[test]
    fn test_batch_requires_path_and_graphs() {
        let no_path = Args::try_parse_from(["plotpick", "--batch", "-g", "Pie Chart (A)"]);
        assert!(no_path.is_err());
        let no_graphs = Args::try_parse_from(["plotpick", "data.csv", "--batch"]);
        assert!(no_graphs.is_err());
    }

    #[test]
    fn test_render_options_markdown_lists_flags() {
        let md = render_options_markdown();
        assert!(md.contains("--graph"));
        assert!(md.contains("--save-images"));
        assert!(!md.contains("--help"));
    }
}
