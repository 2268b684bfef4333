//! Failure types shared across the generator.
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use crate::validate::ValidationReport;

/// What we were trying to do at the time an I/O operation failed.
#[derive(Debug)]
pub enum IoAction {
    Read,
    Write,
    Create,
}

impl Display for IoAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(match self {
            IoAction::Read => "read",
            IoAction::Write => "write",
            IoAction::Create => "create",
        })
    }
}

/// What we were operating on at the time an I/O operation failed.
#[derive(Debug)]
pub enum IoTarget {
    File(PathBuf),
    Directory(PathBuf),
}

impl Display for IoTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            IoTarget::File(path) => write!(f, "file {}", path.display()),
            IoTarget::Directory(path) => write!(f, "directory {}", path.display()),
        }
    }
}

/// An I/O operation failed.
#[derive(Debug)]
pub struct IoFailed {
    pub action: IoAction,
    pub target: IoTarget,
    pub error: std::io::Error,
}

impl Display for IoFailed {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "failed to {} {}: {}",
            self.action, self.target, self.error
        )
    }
}

/// A source table could not be understood: a required column is
/// absent or a cell does not parse.  The first such problem stops
/// the run; validation only starts once every table loaded cleanly.
#[derive(Debug)]
pub struct TableFailed {
    pub file: PathBuf,
    /// 1-based line in the file, when the problem is tied to one row.
    pub line: Option<u64>,
    /// Column name, when the problem is tied to one column.
    pub column: Option<String>,
    pub problem: String,
}

impl Display for TableFailed {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "table {}", self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ", line {line}")?;
        }
        if let Some(column) = self.column.as_deref() {
            write!(f, ", column {column}")?;
        }
        write!(f, ": {}", self.problem)
    }
}

/// Any reason a generator run can fail.
#[derive(Debug)]
pub enum GeneratorFailure {
    Io(IoFailed),
    Table(TableFailed),
    /// The tables loaded but do not describe a usable installation.
    /// The report carries every finding, not just the first.
    ValidationFailed(ValidationReport),
}

impl Display for GeneratorFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            GeneratorFailure::Io(failed) => failed.fmt(f),
            GeneratorFailure::Table(failed) => failed.fmt(f),
            GeneratorFailure::ValidationFailed(report) => {
                writeln!(f, "the mechanism tables failed validation:")?;
                report.fmt(f)
            }
        }
    }
}

impl Error for GeneratorFailure {}
