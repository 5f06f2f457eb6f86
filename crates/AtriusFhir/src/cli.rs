//! # Model CLI
//!
//! Command-line access to the R5 model: read a resource from a file or stdin,
//! validate it, and dump its tree, its element paths or its canonical JSON.
//!
//! ## Command Line Options
//!
//! ```text
//! atrius-model-cli [OPTIONS] <COMMAND>
//!
//! Commands:
//!   validate  Parse and validate a resource, report type/id or the first error
//!   print     Indented tree of every element with primitive values
//!   paths     One FHIRPath-style path per element, with its type
//!   format    Re-serialize a resource in canonical FHIR JSON
//!
//! Options:
//!       --log-level <LEVEL>  Log level [env: ATRIUS_LOG_LEVEL] [default: warn]
//!       --pretty             Pretty-print JSON output [env: ATRIUS_PRETTY]
//!   -o, --output <OUTPUT>    Output file path (defaults to stdout)
//! ```
//!
//! Every command takes an input path; `-` (the default) reads stdin.
//!
//! ## Usage Examples
//!
//! ```bash
//! atrius-model-cli validate medication.json
//! cat medication.json | atrius-model-cli print --max-depth 2
//! atrius-model-cli --pretty format parameters.json -o parameters.pretty.json
//! RUST_LOG=atrius_fhir_model=debug atrius-model-cli paths observation-definition.json
//! ```

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::{ModelError, ModelResult};
use crate::json;
use crate::r5::Resource;
use crate::visitor::{validate_tree, PathCollector, TreePrinter};
use atrius_model_support::Visitable;

#[derive(Parser, Debug)]
#[command(name = "atrius-model-cli")]
#[command(about = "Validate, inspect and format FHIR R5 resources")]
#[command(version)]
pub struct Args {
    /// Log level for the model and CLI (overridden by RUST_LOG)
    #[arg(long, env = "ATRIUS_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Pretty-print JSON output
    #[arg(long, env = "ATRIUS_PRETTY")]
    pub pretty: bool,

    /// Output file path (defaults to stdout)
    #[arg(long, short = 'o', global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse and validate a resource
    Validate {
        /// Resource JSON file, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },
    /// Print the element tree
    Print {
        /// Resource JSON file, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
        /// Do not descend below this depth
        #[arg(long)]
        max_depth: Option<usize>,
    },
    /// List element paths
    Paths {
        /// Resource JSON file, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },
    /// Re-serialize as canonical FHIR JSON
    Format {
        /// Resource JSON file, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },
}

/// Installs the `tracing` subscriber. `RUST_LOG` wins over `level`.
///
/// Fails if a global subscriber is already set.
pub fn init_logging(level: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = format!("atrius_fhir_model={level},atrius_model_cli={level}");
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .finish()
        .try_init()
}

pub fn run_cli(args: Args) -> ModelResult<()> {
    let output = match &args.command {
        Command::Validate { input } => {
            let resource = read_resource(input)?;
            validate(&resource)?
        }
        Command::Print { input, max_depth } => {
            let resource = read_resource(input)?;
            let mut printer = match max_depth {
                Some(depth) => TreePrinter::new().with_max_depth(*depth),
                None => TreePrinter::new(),
            };
            resource.walk(&mut printer);
            printer.into_output()
        }
        Command::Paths { input } => {
            let resource = read_resource(input)?;
            let mut collector = PathCollector::new();
            resource.walk(&mut collector);
            collector
                .into_paths()
                .into_iter()
                .map(|(path, type_name)| format!("{path}\t{type_name}\n"))
                .collect()
        }
        Command::Format { input } => {
            let resource = read_resource(input)?;
            let mut text = if args.pretty {
                json::to_json_string_pretty(&resource)?
            } else {
                json::to_json_string(&resource)?
            };
            text.push('\n');
            text
        }
    };
    write_output(args.output.as_deref(), &output)
}

fn validate(resource: &Resource) -> ModelResult<String> {
    let label = match resource.id() {
        Some(id) => format!("{}/{id}", resource.resource_type()),
        None => resource.resource_type().to_string(),
    };
    // Parsing already validated each node on build; this pass reports paths.
    match validate_tree(resource).into_iter().next() {
        Some(failure) => {
            info!(path = %failure.path, "validation failed");
            Err(ModelError::Validation(failure.error))
        }
        None => Ok(format!("{label}: valid\n")),
    }
}

fn read_resource(input: &Path) -> ModelResult<Resource> {
    if input == Path::new("-") {
        debug!("reading resource from stdin");
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return json::parse_resource(&text);
    }
    debug!(path = %input.display(), "reading resource");
    json::parse_resource_reader(io::BufReader::new(File::open(input)?))
}

fn write_output(path: Option<&Path>, text: &str) -> ModelResult<()> {
    match path {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(text.as_bytes())?;
            info!(path = %path.display(), "output written");
        }
        None => io::stdout().lock().write_all(text.as_bytes())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEDICATION: &str = r#"{"resourceType":"Medication","id":"m1","status":"active"}"#;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("atrius-model-cli-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn logging_installs_once() {
        // Another test in this binary may have installed it first.
        let _ = init_logging("debug");
        assert!(init_logging("warn").is_err());
    }

    #[test]
    fn parses_subcommands_and_globals() {
        let args = Args::try_parse_from(["atrius-model-cli", "--pretty", "print", "in.json", "--max-depth", "2"]).unwrap();
        assert!(args.pretty);
        assert_eq!(args.log_level, "warn");
        assert!(matches!(args.command, Command::Print { max_depth: Some(2), .. }));

        let args = Args::try_parse_from(["atrius-model-cli", "validate"]).unwrap();
        assert!(matches!(args.command, Command::Validate { input } if input == Path::new("-")));
    }

    #[test]
    fn format_writes_canonical_json() {
        let input = temp_file("format-in.json", "{ \"status\": \"active\", \"id\": \"m1\", \"resourceType\": \"Medication\" }");
        let output = input.with_extension("out");
        let args = Args {
            log_level: "warn".to_string(),
            pretty: false,
            output: Some(output.clone()),
            command: Command::Format { input: input.clone() },
        };
        run_cli(args).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), format!("{MEDICATION}\n"));
        let _ = std::fs::remove_file(input);
        let _ = std::fs::remove_file(output);
    }

    #[test]
    fn validate_reports_type_and_id() {
        let resource = json::parse_resource(MEDICATION).unwrap();
        assert_eq!(validate(&resource).unwrap(), "Medication/m1: valid\n");
    }

    #[test]
    fn invalid_input_is_an_error() {
        let input = temp_file("invalid.json", r#"{"resourceType":"Medication","status":"unknown-status"}"#);
        let args = Args {
            log_level: "warn".to_string(),
            pretty: false,
            output: None,
            command: Command::Validate { input: input.clone() },
        };
        assert!(matches!(run_cli(args), Err(ModelError::Json(_))));
        let _ = std::fs::remove_file(input);
    }
}
