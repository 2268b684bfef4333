use std::error::Error;
use std::ffi::OsString;
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use clap::ArgAction::{Set, SetTrue};
use clap::Parser;
use tracing::{event, Level};
use tracing_subscriber::prelude::*;

use sclgen::{run_check, GeneratorFailure};

const AUTHOR: &str = "Elevator Automation Team";

/// Validates the mechanism tables without generating anything
#[derive(Parser, Debug)]
#[clap(author = AUTHOR, version, about, long_about = None)]
struct Cli {
    /// Directory holding the mechanism tables.
    #[clap(action=Set)]
    input: OsString,

    /// Require each kind's typed indices to be contiguous from zero.
    #[clap(action = SetTrue, long)]
    strict_indexes: bool,
}

#[derive(Debug)]
enum Fail {
    CheckFail(GeneratorFailure),
    InitialisationFailure(String),
}

impl Display for Fail {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Fail::CheckFail(generator_failure) => generator_failure.fmt(f),
            Fail::InitialisationFailure(msg) => f.write_str(msg.as_str()),
        }
    }
}

impl Error for Fail {}

fn run_mechcheck() -> Result<(), Fail> {
    let cli = Cli::parse();

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

    let input_dir = PathBuf::from(cli.input);
    let result = run_check(&input_dir, cli.strict_indexes).map_err(Fail::CheckFail);
    if let Err(e) = &result {
        event!(Level::ERROR, "check failed: {:?}", e);
    }
    result
}

fn main() {
    match run_mechcheck() {
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Ok(()) => {
            std::process::exit(0);
        }
    }
}
