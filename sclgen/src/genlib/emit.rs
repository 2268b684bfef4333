//! Rendering of the generated SCL artifacts.  Everything here is
//! pure: records and registry in, named strings out.
mod backend;
mod hal;
mod mechs;


use tracing::{event, Level};

use base::prelude::MechKind;

use crate::config::RunContext;
use crate::record::RecordSet;
use crate::registry::SlotRegistry;

/// One generated file: its name under the output directory and its
/// full contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub contents: String,
}

impl Artifact {
    pub(crate) fn new(file_name: impl Into<String>, contents: String) -> Artifact {
        Artifact {
            file_name: file_name.into(),
            contents,
        }
    }
}

/// Render every code artifact of the run: the shared blocks, a
/// read and a write function per non-empty kind, and whatever extra
/// files the addressing backend needs.
pub fn render_artifacts(
    ctx: &RunContext,
    records: &RecordSet,
    registry: &SlotRegistry,
) -> Vec<Artifact> {
    let backend = backend::for_choice(ctx.backend);
    let mut artifacts = vec![
        mechs::db_mechs(ctx, records, registry),
        mechs::fc_init_mechs(ctx, records),
        mechs::fc_device_runner(ctx, registry),
    ];
    for kind in MechKind::ALL {
        if records.of_kind(kind).is_empty() {
            continue;
        }
        artifacts.push(hal::fc_hal_read(ctx, backend.as_ref(), kind, records));
        artifacts.push(hal::fc_hal_write(ctx, backend.as_ref(), kind, records));
    }
    artifacts.extend(backend.extra_artifacts(ctx, records));
    event!(
        Level::INFO,
        "rendered {} artifacts with the {} backend",
        artifacts.len(),
        ctx.backend
    );
    artifacts
}

/// The banner every generated file starts with.
pub(crate) fn header(ctx: &RunContext, title: &str) -> String {
    let rule = format!("// {}", "=".repeat(78));
    format!(
        "{rule}\n\
         // {title}\n\
         {rule}\n\
         // Project  : {}\n\
         // Author   : {}\n\
         // Version  : {}\n\
         // Generated: {}\n\
         {rule}\n",
        ctx.project.name,
        ctx.project.author,
        ctx.project.version,
        ctx.timestamp()
    )
}

/// An indented comment block between rules, the way generated
/// sections are marked off.
pub(crate) fn section<S: AsRef<str>>(lines: &[S]) -> String {
    let rule = format!("    // {}\n", "=".repeat(67));
    let mut text = rule.clone();
    for line in lines {
        text.push_str("    // ");
        text.push_str(line.as_ref());
        text.push('\n');
    }
    text.push_str(&rule);
    text
}
