//! Compiles the CSV mechanism tables of a grain-elevator site into
//! the SCL sources and wiring documents its PLC project imports.
//!
//! The pipeline is normalize (read the tables), validate (check the
//! slot map, typed indices, and I/O bindings), build the slot
//! registry, then emit.  [`run_generator`] drives the whole thing;
//! the stages are public so tools can stop midway.
#![deny(unreachable_pub)]
#![deny(unsafe_code)]
#![warn(clippy::todo)]
#![warn(clippy::dbg_macro)]

mod config;
mod docs;
mod driver;
mod emit;
mod normalize;
mod record;
mod registry;
mod types;
mod validate;

pub use config::{BackendKind, ProjectMeta, RunContext};
pub use docs::render_docs;
pub use driver::*;
pub use emit::{render_artifacts, Artifact};
pub use normalize::{load_project_meta, load_tables};
pub use record::{MechConfig, MechRecord, RecordSet, SignalBinding};
pub use registry::{KindLayout, SlotEntry, SlotRegistry};
pub use types::{GeneratorFailure, IoAction, IoFailed, IoTarget, TableFailed};
pub use validate::{validate_records, ValidationError, ValidationReport, ValidationWarning};
