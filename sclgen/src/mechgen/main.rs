use std::error::Error;
use std::ffi::OsString;
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

use clap::ArgAction::{Set, SetTrue};
use clap::Parser;
use tracing::{event, Level};
use tracing_subscriber::prelude::*;

use sclgen::*;

const AUTHOR: &str = "Elevator Automation Team";

/// Generates the site-specific SCL blocks from the mechanism tables
#[derive(Parser, Debug)]
#[clap(author = AUTHOR, version, about, long_about = None)]
struct Cli {
    /// Directory holding the mechanism tables (redlers.csv, norias.csv,
    /// gates.csv, fans.csv, optionally config.csv).
    #[clap(action=Set)]
    input: OsString,

    /// Directory to which generated files are written.
    #[clap(action = Set, short = 'o', long)]
    output: OsString,

    /// How generated code names physical points: 'fixed' (DB_HAL_*
    /// blocks with AT declarations) or 'symbolic' (an importable PLC
    /// tag table).
    #[clap(action = Set, long, default_value = "fixed")]
    backend: String,

    /// Require each kind's typed indices to be contiguous from zero.
    #[clap(action = SetTrue, long)]
    strict_indexes: bool,

    /// Also write CONFIG_DOCUMENTATION.md and IO_LIST.csv.
    #[clap(action = SetTrue, long)]
    docs: bool,
}

#[derive(Debug)]
enum Fail {
    /// We initialised the generator but then it failed.
    GenFail(GeneratorFailure),
    /// We were not able to correctly initialise the generator.
    InitialisationFailure(String),
}

impl Display for Fail {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Fail::GenFail(generator_failure) => generator_failure.fmt(f),
            Fail::InitialisationFailure(msg) => f.write_str(msg.as_str()),
        }
    }
}

impl Error for Fail {}

fn run_mechgen() -> Result<(), Fail> {
    let cli = Cli::parse();

    // Verbosity is selected through RUST_LOG using the usual
    // tracing-subscriber filter syntax; without it, info and up are
    // shown.
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
    {
        Err(e) => {
            return Err(Fail::InitialisationFailure(format!(
                "cannot build the trace filter (is RUST_LOG malformed?): {e}"
            )));
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let backend = BackendKind::from_str(&cli.backend).map_err(Fail::InitialisationFailure)?;
    let input_dir = PathBuf::from(cli.input);
    let output_dir = PathBuf::from(cli.output);
    let options = OutputOptions { docs: cli.docs };
    let result = run_generator(&input_dir, &output_dir, backend, cli.strict_indexes, options)
        .map_err(Fail::GenFail);
    match &result {
        Err(e) => {
            event!(Level::ERROR, "generation failed: {:?}", e);
        }
        Ok(written) => {
            event!(Level::INFO, "generation succeeded ({} files)", written.len());
        }
    }
    result.map(|_| ())
}

fn main() {
    match run_mechgen() {
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Ok(()) => {
            std::process::exit(0);
        }
    }
}
