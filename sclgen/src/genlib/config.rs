//! Run configuration: project metadata and the switches one
//! generation run is parameterized by.
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Local};

/// Header fields stamped into every generated artifact.  Loaded from
/// `config.csv`; any field the site does not set keeps its default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectMeta {
    pub name: String,
    pub author: String,
    pub version: String,
}

impl Default for ProjectMeta {
    fn default() -> ProjectMeta {
        ProjectMeta {
            name: "Unknown".to_string(),
            author: "AutoGen".to_string(),
            version: "1.0.0".to_string(),
        }
    }
}

/// How generated read/write code refers to a physical point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    /// `AT`-declared members of per-kind `DB_HAL_*` storage blocks,
    /// with the physical address compiled into the block.
    Fixed,
    /// Global PLC tags resolved through an importable tag table; the
    /// generated code never mentions an address.
    Symbolic,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<BackendKind, String> {
        match s {
            "fixed" => Ok(BackendKind::Fixed),
            "symbolic" => Ok(BackendKind::Symbolic),
            _ => Err(format!(
                "unknown addressing backend '{s}' (expected 'fixed' or 'symbolic')"
            )),
        }
    }
}

impl Display for BackendKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(match self {
            BackendKind::Fixed => "fixed",
            BackendKind::Symbolic => "symbolic",
        })
    }
}

/// Everything one generation run is parameterized by.  Built once at
/// startup and passed along explicitly; nothing in the pipeline
/// consults process-wide state.
#[derive(Clone, Debug)]
pub struct RunContext {
    pub project: ProjectMeta,
    pub backend: BackendKind,
    /// Require each kind's typed indices to form a contiguous run
    /// from zero.
    pub strict_indexes: bool,
    /// Captured once so that every artifact of the run carries the
    /// same `Generated:` stamp.
    pub generated_at: DateTime<Local>,
}

impl RunContext {
    pub fn new(project: ProjectMeta, backend: BackendKind, strict_indexes: bool) -> RunContext {
        RunContext {
            project,
            backend,
            strict_indexes,
            generated_at: Local::now(),
        }
    }

    pub(crate) fn timestamp(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
