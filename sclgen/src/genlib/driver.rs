//! The pipeline driver: tables in, files out.
mod output;

#[cfg(test)]
mod tests;

use std::path::Path;

use tracing::{event, span, Level};

use base::prelude::MechKind;

use crate::config::{BackendKind, RunContext};
use crate::docs;
use crate::emit;
use crate::normalize;
use crate::record::RecordSet;
use crate::registry::SlotRegistry;
use crate::types::GeneratorFailure;
use crate::validate;

/// What a generation run writes beyond the code artifacts.
#[derive(Clone, Copy, Debug, Default)]
pub struct OutputOptions {
    /// Also write `CONFIG_DOCUMENTATION.md` and `IO_LIST.csv`.
    pub docs: bool,
}

/// Load and validate the tables under `input_dir`; build the registry
/// once they check out.  Warnings are logged here so that both the
/// generator and the check-only run surface them the same way.
fn compile_tables(
    input_dir: &Path,
    strict_indexes: bool,
) -> Result<(RecordSet, SlotRegistry), GeneratorFailure> {
    let records = normalize::load_tables(input_dir)?;
    let report = validate::validate_records(&records, strict_indexes);
    for warning in report.warnings() {
        event!(Level::WARN, "{warning}");
    }
    if report.is_fatal() {
        return Err(GeneratorFailure::ValidationFailed(report));
    }
    let registry = SlotRegistry::build(&records);
    Ok((records, registry))
}

/// Run the whole pipeline, reading project metadata from the input
/// directory's own `config.csv`.  Returns the names of the files
/// written.
pub fn run_generator(
    input_dir: &Path,
    output_dir: &Path,
    backend: BackendKind,
    strict_indexes: bool,
    options: OutputOptions,
) -> Result<Vec<String>, GeneratorFailure> {
    let project = normalize::load_project_meta(input_dir)?;
    let ctx = RunContext::new(project, backend, strict_indexes);
    generate_with_context(input_dir, output_dir, &ctx, options)
}

/// As [`run_generator`], but with the caller supplying the run
/// context.
pub fn generate_with_context(
    input_dir: &Path,
    output_dir: &Path,
    ctx: &RunContext,
    options: OutputOptions,
) -> Result<Vec<String>, GeneratorFailure> {
    let span = span!(
        Level::ERROR,
        "generate",
        input = %input_dir.display(),
        output = %output_dir.display()
    );
    let _enter = span.enter();
    let (records, registry) = compile_tables(input_dir, ctx.strict_indexes)?;
    let mut artifacts = emit::render_artifacts(ctx, &records, &registry);
    if options.docs {
        artifacts.extend(docs::render_docs(ctx, &records, &registry));
    }
    output::write_artifacts(output_dir, &artifacts)?;
    Ok(artifacts
        .into_iter()
        .map(|artifact| artifact.file_name)
        .collect())
}

/// Validation only; what `mechcheck` runs.  Nothing is written.
pub fn run_check(input_dir: &Path, strict_indexes: bool) -> Result<(), GeneratorFailure> {
    let span = span!(Level::ERROR, "check", input = %input_dir.display());
    let _enter = span.enter();
    let (records, registry) = compile_tables(input_dir, strict_indexes)?;
    for kind in MechKind::ALL {
        event!(
            Level::INFO,
            "{}: {} enabled, typed array capacity {}",
            kind.plural(),
            records.of_kind(kind).len(),
            registry.capacity(kind)
        );
    }
    event!(Level::INFO, "{} mechanisms check out", records.len());
    Ok(())
}
