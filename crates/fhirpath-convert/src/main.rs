use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fhirpath_convert::{Converter, ConverterConfig};
use serde_json::json;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

/// What to do with each expression
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Validate, rewrite and tag variables
    #[default]
    Convert,
    /// Only report whether the expression is accepted
    Validate,
    /// Rewrite without tagging or checking variables
    Rewrite,
    /// Only tag variables
    Tag,
    /// Print the parsed tree as JSON
    Ir,
}

#[derive(Parser)]
#[command(name = "fhirpath-convert")]
#[command(about = "Convert infix formulas to FHIRPath expressions")]
#[command(version)]
struct Cli {
    /// Expressions to convert (read one per line from stdin if omitted)
    expressions: Vec<String>,

    /// Allowed variable names
    #[arg(short = 'v', long = "var", value_delimiter = ',')]
    variables: Vec<String>,

    /// Config file (TOML, or JSON by extension)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Processing mode
    #[arg(short, long, value_enum, default_value_t = Mode::Convert)]
    mode: Mode,

    /// Print one JSON record per expression
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(format!(
            "fhirpath_convert={}",
            log_level
        )))
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => ConverterConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ConverterConfig::default(),
    };
    config.merge_variables(cli.variables.iter().map(|v| v.trim()).filter(|v| !v.is_empty()));
    debug!(variables = ?config.variables, sigil = %config.sigil, "configured converter");

    let converter = Converter::from_config(config);

    let expressions = if cli.expressions.is_empty() {
        read_stdin_lines()?
    } else {
        cli.expressions.clone()
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut all_accepted = true;

    for expression in &expressions {
        let output = run(&converter, cli.mode, expression)?;
        all_accepted &= output.is_some();

        if cli.json {
            let record = json!({ "input": expression, "output": output });
            writeln!(out, "{}", serde_json::to_string(&record)?)?;
        } else {
            writeln!(out, "{}", output.as_deref().unwrap_or("null"))?;
        }
    }

    Ok(if all_accepted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Apply `mode` to one expression; `None` means rejected.
fn run(converter: &Converter, mode: Mode, expression: &str) -> Result<Option<String>> {
    Ok(match mode {
        Mode::Convert => converter.convert(expression),
        Mode::Validate => converter
            .validate(expression)
            .then(|| "true".to_string()),
        Mode::Rewrite => match converter.rewrite(expression) {
            Ok(rewritten) => Some(rewritten),
            Err(error) => {
                debug!(expression, %error, "rewrite failed");
                None
            }
        },
        Mode::Tag => Some(fhirpath_convert::tag::tag_with(
            expression,
            converter.config().variables.as_slice(),
            converter.config().sigil,
        )),
        Mode::Ir => match converter.parse(expression) {
            Ok(expr) => Some(serde_json::to_string(&expr)?),
            Err(error) => {
                debug!(expression, %error, "parse failed");
                None
            }
        },
    })
}

fn read_stdin_lines() -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in std::io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}
