//! restyle - re-apply the look of one HTML page to new content
//!
//! Prints JSON responses on stdout; logs go to stderr (`RUST_LOG`, default
//! `info`).

mod request;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use restyle_engine::{Config, Engine};
use restyle_net::{DEFAULT_USER_AGENT, HttpFetcher};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "restyle", author, version, about)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json, global = true)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch source HTML from a URL
    Fetch {
        /// http or https URL
        url: String,
    },
    /// Restyle target content with the dominant styles of a source page
    Transform {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Classify target content and render it without styles
    Render {
        #[command(flatten)]
        target: TargetArgs,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// Source HTML file (`-` for stdin)
    #[arg(long)]
    source_file: Option<PathBuf>,

    /// Fetch the source HTML from this URL
    #[arg(long)]
    source_url: Option<String>,

    /// Source HTML given inline
    #[arg(long)]
    source_html: Option<String>,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct TargetArgs {
    /// Target content file (`-` for stdin)
    #[arg(long)]
    target_file: Option<PathBuf>,

    /// Target content given inline
    #[arg(long)]
    target: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    /// Full JSON response
    Json,
    /// HTML only
    Html,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::from_json_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };

    match &cli.command {
        Command::Fetch { url } => {
            let fetcher = fetcher(&config)?;
            let response = request::fetch(&fetcher, url);
            emit(cli.format, &response, response.success, response.html.as_deref())
        }
        Command::Transform { source, target } => {
            let target = read_target(target)?;
            let response = match read_source(source, &config)? {
                Ok(source_html) => request::transform(&Engine::new(config), &source_html, &target),
                Err(fetch_error) => request::TransformResponse::failure(fetch_error),
            };
            emit(
                cli.format,
                &response,
                response.success,
                response.transformed_html.as_deref(),
            )
        }
        Command::Render { target } => {
            let target = read_target(target)?;
            let response = request::render(&Engine::new(config), &target);
            emit(cli.format, &response, response.success, response.html.as_deref())
        }
    }
}

fn fetcher(config: &Config) -> Result<HttpFetcher> {
    let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
    let timeout = Duration::from_secs(config.fetch_timeout_secs);
    HttpFetcher::with_options(user_agent, timeout).context("Failed to build HTTP client")
}

/// Source HTML, or the fetch error message when `--source-url` failed
fn read_source(args: &SourceArgs, config: &Config) -> Result<Result<String, String>> {
    if let Some(url) = &args.source_url {
        let response = request::fetch(&fetcher(config)?, url);
        return Ok(match (response.html, response.error) {
            (Some(html), _) => Ok(html),
            (None, error) => Err(error.unwrap_or_default()),
        });
    }
    if let Some(path) = &args.source_file {
        return read_input(path).map(Ok);
    }
    Ok(Ok(args.source_html.clone().unwrap_or_default()))
}

fn read_target(args: &TargetArgs) -> Result<String> {
    match (&args.target_file, &args.target) {
        (Some(path), _) => read_input(path),
        (None, text) => Ok(text.clone().unwrap_or_default()),
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn emit<T: Serialize>(format: Format, response: &T, success: bool, html: Option<&str>) -> Result<ExitCode> {
    match format {
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(response)?);
        }
        Format::Html => {
            if let Some(html) = html {
                println!("{html}");
            } else {
                let value = serde_json::to_value(response)?;
                let error = value.get("error").and_then(|e| e.as_str()).unwrap_or("request failed");
                eprintln!("error: {error}");
            }
        }
    }
    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
