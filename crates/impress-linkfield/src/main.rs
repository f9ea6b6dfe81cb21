//! impress-linkfield CLI
//!
//! Inspect and rewrite `file` field values from the command line.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use impress_linkfield::file_types::all_file_types;
use impress_linkfield::{
    format_records, FileFieldParser, InvalidRecordPolicy, LinkFieldConfig, LinkedFileRecord,
    PathSyntax,
};

#[derive(Parser)]
#[command(name = "impress-linkfield", version, about = "Parse and format linked-file fields")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the path syntax used to classify targets
    #[arg(long, global = true, value_parser = parse_path_syntax)]
    path_syntax: Option<PathSyntax>,

    /// Drop records with invalid targets instead of failing
    #[arg(long, global = true)]
    skip_invalid: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a field value (argument or stdin) into JSON records
    Parse { value: Option<String> },
    /// Format JSON records (argument or stdin) into a field value
    Format { json: Option<String> },
    /// Report every record of a field value, exit 1 if any is invalid
    Check { value: Option<String> },
    /// List known file types
    Types,
}

fn parse_path_syntax(s: &str) -> Result<PathSyntax, String> {
    match s.to_lowercase().as_str() {
        "posix" => Ok(PathSyntax::Posix),
        "windows" => Ok(PathSyntax::Windows),
        other => Err(format!("unknown path syntax '{}', expected posix or windows", other)),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<LinkFieldConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            tracing::debug!("Loaded configuration from {:?}", path);
            LinkFieldConfig::from_toml(&content)?
        }
        None => LinkFieldConfig::default(),
    };

    if let Some(syntax) = cli.path_syntax {
        config.path_syntax = syntax;
    }
    if cli.skip_invalid {
        config.on_invalid_record = InvalidRecordPolicy::Skip;
    }
    Ok(config)
}

/// Use the argument if given, otherwise read all of stdin
fn input_or_stdin(arg: Option<String>) -> std::io::Result<String> {
    match arg {
        Some(value) => Ok(value),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer.trim_end_matches(['\n', '\r']).to_string())
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = load_config(&cli)?;
    let parser = FileFieldParser::from_config(&config);

    match cli.command {
        Command::Parse { value } => {
            let records = parser.parse(&input_or_stdin(value)?)?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Command::Format { json } => {
            let records: Vec<LinkedFileRecord> = serde_json::from_str(&input_or_stdin(json)?)?;
            println!("{}", format_records(&records, config.entity_policy));
        }
        Command::Check { value } => {
            let report = parser.parse_report(&input_or_stdin(value)?);
            for record in &report.records {
                let kind = if record.target().is_url() { "url" } else { "path" };
                println!(
                    "ok    {:<5} {} [{}] {}",
                    kind,
                    record.target(),
                    record.file_type(),
                    record.description()
                );
            }
            for error in &report.errors {
                println!("error #{} {}", error.index, error.message);
            }
            if !report.is_ok() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Types => {
            for ft in all_file_types() {
                println!("{:<28} .{:<6} {}", ft.name, ft.extension, ft.mime_type);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("impress-linkfield: {}", e);
            ExitCode::FAILURE
        }
    }
}
