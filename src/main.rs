mod report;

use phoebe_legacy::mesh::MeshConvention;
use phoebe_legacy::params::EpochConvention;
use phoebe_legacy::{Context, Options, parse_verbose_with};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_tracing(config.verbose);

    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(&config.input)
        .map_err(|source| phoebe_legacy::ParseError::Io { path: config.input.clone(), source })?;

    let ctx = Context { base_dir: config.input.parent(), ..Context::default() };
    let res = parse_verbose_with(&text, &ctx, &config.options)?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&res.output)?);
    } else {
        report::print_run(&config.input, &res, config.color);
    }
    Ok(())
}

/// Logs go to stderr so `--json` output stays clean.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}

struct CliConfig {
    input: PathBuf,
    options: Options,
    json: bool,
    color: bool,
    verbose: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<PathBuf> = None;
    let mut options = Options::default();
    let mut json = false;
    let mut color = io::stdout().is_terminal();
    let mut verbose = false;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("phoebe-legacy {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--body" => options.create_body = true,
            "--bundle" => options.create_bundle = true,
            "--perpass" => options.epoch = EpochConvention::PeriastronPassage,
            "--json" => json = true,
            "--color" => color = true,
            "--no-color" => color = false,
            "-v" | "--verbose" => verbose = true,
            "--mesh" => {
                let value = args.next().ok_or_else(|| "error: --mesh expects a value".to_string())?;
                options.mesh = parse_mesh(&value)?;
            }
            _ if arg.starts_with("--mesh=") => {
                options.mesh = parse_mesh(arg.trim_start_matches("--mesh="))?;
            }
            "--" => {
                for rest in args.by_ref() {
                    set_input(&mut input, rest)?;
                }
                break;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => set_input(&mut input, arg)?,
        }
    }

    let Some(input) = input else {
        return Err(format!("error: no parameter file provided\n\n{}", help_text()));
    };

    Ok(CliConfig { input, options, json, color, verbose })
}

fn set_input(input: &mut Option<PathBuf>, value: String) -> Result<(), String> {
    if input.is_some() {
        return Err("error: parameter file provided multiple times".to_string());
    }
    *input = Some(Path::new(&value).to_path_buf());
    Ok(())
}

fn parse_mesh(value: &str) -> Result<MeshConvention, String> {
    MeshConvention::parse(value).ok_or_else(|| format!("error: invalid --mesh '{value}' (expected wd or marching)"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "phoebe-legacy {version}

Convert a legacy PHOEBE parameter file into a structured binary-star model.

Usage:
  phoebe-legacy [OPTIONS] [--] <file>

Options:
  --body                     Build a two-body system from the records.
  --bundle                   Wrap the system in a bundle (implies --body).
  --mesh <wd|marching>       Mesh convention for built stars. Default: wd
  --perpass                  Report t0 at periastron passage instead of
                             superior conjunction.
  --json                     Print the result as JSON instead of a report.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -v, --verbose              Log routing decisions (same as RUST_LOG=debug).
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Exit codes:
  0  Success.
  1  The file could not be parsed.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
    )
}
