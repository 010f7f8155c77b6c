use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use descry::config::{self, EngineConfig};
use descry::dataset::{ColumnSelection, Dataset};
use descry::frame;
use descry::stats::{CorrelationMethod, SkewnessKind};
use descry::summary::{self, ReportEntry, SummaryEngine, SummaryRequest};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "descry",
    version,
    about = "Descriptive summaries of tabular data files"
)]
pub struct Cli {
    /// Settings file. Defaults to <config dir>/descry/config.json when present.
    #[arg(long, global = true, env = "DESCRY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter (e.g. "debug"). `RUST_LOG` takes precedence.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Print results as JSON instead of text tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Decimal places in text output (at least 4)
    #[arg(long, global = true)]
    pub precision: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct Input {
    /// Data file (CSV, JSON, NDJSON)
    #[arg(short, long)]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct Columns {
    /// Comma-separated numeric attributes. Defaults to every numeric attribute.
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,
}

impl Columns {
    fn selection(&self) -> ColumnSelection {
        if self.columns.is_empty() {
            ColumnSelection::AllNumeric
        } else {
            ColumnSelection::named(self.columns.iter().cloned())
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the first rows
    Peek {
        #[command(flatten)]
        input: Input,

        /// Number of rows. Defaults to `peek_rows` from the settings.
        #[arg(short = 'n', long)]
        rows: Option<usize>,
    },
    /// Count rows and columns
    Shape {
        #[command(flatten)]
        input: Input,
    },
    /// List attribute types
    Types {
        #[command(flatten)]
        input: Input,
    },
    /// Count and share of each label of a categorical column
    Classes {
        #[command(flatten)]
        input: Input,

        #[arg(short, long)]
        column: String,
    },
    /// Five-number summary and mean per numeric column, level counts per categorical column
    Summary {
        #[command(flatten)]
        input: Input,
    },
    /// Standard deviation of numeric columns
    Sd {
        #[command(flatten)]
        input: Input,

        #[command(flatten)]
        columns: Columns,
    },
    /// Skewness of numeric columns
    Skewness {
        #[command(flatten)]
        input: Input,

        #[command(flatten)]
        columns: Columns,

        /// type1, type2 or type3. Defaults to the configured convention.
        #[arg(long)]
        kind: Option<SkewnessKind>,
    },
    /// Correlation matrix of numeric columns
    Correlation {
        #[command(flatten)]
        input: Input,

        #[command(flatten)]
        columns: Columns,

        /// pearson or spearman. Defaults to the configured method.
        #[arg(long)]
        method: Option<CorrelationMethod>,
    },
    /// Every view in one go
    Report {
        #[command(flatten)]
        input: Input,

        /// Categorical column to show the class distribution of
        #[arg(long)]
        class_column: Option<String>,
    },
    /// Show the effective settings
    Config {
        /// Save them to the settings file
        #[arg(long)]
        write: bool,
    },
}

/// Settings file merged with command-line overrides.
pub fn effective_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = config::load_config(cli.config.as_deref())?;
    if let Some(precision) = cli.precision {
        config.precision = precision;
    }
    if let Some(level) = &cli.log_level {
        config.log_level.clone_from(level);
    }
    config.validate()?;
    Ok(config)
}

pub fn run_command(cli: &Cli, config: EngineConfig) -> Result<()> {
    let (input, request) = match &cli.command {
        Commands::Config { write } => return handle_config(cli, &config, *write),
        Commands::Report {
            input,
            class_column,
        } => return handle_report(cli, config, &input.file, class_column.as_deref()),
        Commands::Peek { input, rows } => (
            input,
            SummaryRequest::Peek {
                rows: rows.unwrap_or(config.peek_rows),
            },
        ),
        Commands::Shape { input } => (input, SummaryRequest::Shape),
        Commands::Types { input } => (input, SummaryRequest::TypeMap),
        Commands::Classes { input, column } => (
            input,
            SummaryRequest::ClassDistribution {
                label: column.clone(),
            },
        ),
        Commands::Summary { input } => (input, SummaryRequest::SummaryTable),
        Commands::Sd { input, columns } => (
            input,
            SummaryRequest::StdDev {
                columns: columns.selection(),
            },
        ),
        Commands::Skewness {
            input,
            columns,
            kind,
        } => (
            input,
            SummaryRequest::Skewness {
                columns: columns.selection(),
                kind: *kind,
            },
        ),
        Commands::Correlation {
            input,
            columns,
            method,
        } => (
            input,
            SummaryRequest::Correlation {
                columns: columns.selection(),
                method: *method,
            },
        ),
    };

    let ds = load(&input.file)?;
    let precision = config.precision;
    let engine = SummaryEngine::with_config(&ds, config);
    let result = engine
        .run(&request)
        .with_context(|| format!("{} failed", request.kind().title()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", summary::render(&result, precision));
    }
    Ok(())
}

fn load(path: &Path) -> Result<Dataset> {
    let ds = frame::load_dataset(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    tracing::info!(
        rows = ds.row_count(),
        columns = ds.column_count(),
        "Loaded {}",
        path.display()
    );
    Ok(ds)
}

fn handle_report(
    cli: &Cli,
    config: EngineConfig,
    file: &Path,
    class_column: Option<&str>,
) -> Result<()> {
    let ds = load(file)?;
    let precision = config.precision;
    let engine = SummaryEngine::with_config(&ds, config);
    let entries = engine.report(class_column);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report_json(file, &entries))?);
    } else {
        println!(
            "# {} ({})\n",
            file.display(),
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        print!("{}", summary::render_report(&entries, precision));
    }
    Ok(())
}

fn report_json(file: &Path, entries: &[ReportEntry]) -> serde_json::Value {
    let sections: Vec<serde_json::Value> = entries
        .iter()
        .map(|entry| match &entry.outcome {
            Ok(result) => serde_json::json!({ "kind": entry.kind, "result": result }),
            Err(e) => serde_json::json!({ "kind": entry.kind, "error": e.to_string() }),
        })
        .collect();
    serde_json::json!({
        "file": file.display().to_string(),
        "generated_at": chrono::Local::now().to_rfc3339(),
        "sections": sections,
    })
}

fn handle_config(cli: &Cli, config: &EngineConfig, write: bool) -> Result<()> {
    if write {
        let path = match &cli.config {
            Some(p) => p.clone(),
            None => config::default_config_path().context("Failed to determine config directory")?,
        };
        config::save_config(config, &path)?;
        println!("Saved settings to {}", path.display());
    } else {
        println!("{}", serde_json::to_string_pretty(config)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory as _;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_columns_and_kind() -> Result<()> {
        let cli = Cli::try_parse_from([
            "descry",
            "skewness",
            "--file",
            "pima.csv",
            "--columns",
            "glucose,insulin",
            "--kind",
            "type2",
            "--json",
        ])?;
        assert!(cli.json);
        let Commands::Skewness {
            input,
            columns,
            kind,
        } = cli.command
        else {
            panic!("expected skewness");
        };
        assert_eq!(input.file, PathBuf::from("pima.csv"));
        assert_eq!(
            columns.selection(),
            ColumnSelection::named(["glucose", "insulin"])
        );
        assert_eq!(kind, Some(SkewnessKind::Type2));
        Ok(())
    }

    #[test]
    fn test_no_columns_means_all_numeric() -> Result<()> {
        let cli = Cli::try_parse_from(["descry", "sd", "-f", "iris.csv"])?;
        let Commands::Sd { columns, .. } = cli.command else {
            panic!("expected sd");
        };
        assert_eq!(columns.selection(), ColumnSelection::AllNumeric);
        Ok(())
    }

    #[test]
    fn test_bad_method_rejected() {
        let parsed = Cli::try_parse_from([
            "descry",
            "correlation",
            "-f",
            "iris.csv",
            "--method",
            "kendall",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_precision_override_validated() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "precision": 6 }"#)?;
        let path = path.display().to_string();

        let cli = Cli::try_parse_from(["descry", "--config", &path, "config"])?;
        assert_eq!(effective_config(&cli)?.precision, 6);

        let cli = Cli::try_parse_from(["descry", "--config", &path, "--precision", "2", "config"])?;
        assert!(effective_config(&cli).is_err());
        Ok(())
    }
}
