//! The per-kind read and write functions between the HAL points and
//! the typed arrays.  Reads copy inputs in, writes copy outputs out;
//! which side of an assignment names the physical point is up to the
//! addressing backend.
use base::prelude::{MechKind, SignalDirection};

use crate::config::RunContext;
use crate::record::RecordSet;

use super::backend::AddressingBackend;
use super::{header, Artifact};

pub(crate) fn fc_hal_read(
    ctx: &RunContext,
    backend: &dyn AddressingBackend,
    kind: MechKind,
    records: &RecordSet,
) -> Artifact {
    hal_function(ctx, backend, kind, records, SignalDirection::Input)
}

pub(crate) fn fc_hal_write(
    ctx: &RunContext,
    backend: &dyn AddressingBackend,
    kind: MechKind,
    records: &RecordSet,
) -> Artifact {
    hal_function(ctx, backend, kind, records, SignalDirection::Output)
}

fn hal_function(
    ctx: &RunContext,
    backend: &dyn AddressingBackend,
    kind: MechKind,
    records: &RecordSet,
    direction: SignalDirection,
) -> Artifact {
    let (suffix, activity) = match direction {
        SignalDirection::Input => ("Read", "input read"),
        SignalDirection::Output => ("Write", "output write"),
    };
    let fc = format!("FC_HAL_{}_{}", kind.name(), suffix);
    let mut code = header(ctx, &format!("{fc} - {} HAL {activity}", kind.name()));
    code.push_str(&format!(
        "\nFUNCTION \"{fc}\" : VOID\n\
         {{ S7_Optimized_Access := 'TRUE' }}\n\
         VERSION : 1.0\n\
         \n\
         VAR_IN_OUT\n    \
         {} : ARRAY[*] OF \"{}\";\n\
         END_VAR\n\
         \n\
         BEGIN\n",
        kind.name(),
        kind.udt_name()
    ));

    // Collect first so the := column can be aligned across the file.
    let mut groups: Vec<(&str, Vec<(String, String)>)> = Vec::new();
    let mut width = 0;
    for record in records.of_kind(kind) {
        let mut assignments = Vec::new();
        for binding in record.bindings() {
            if binding.role.direction != direction {
                continue;
            }
            let field_ref = format!(
                "{}[{}].{}",
                kind.name(),
                record.typed_index,
                binding.role.udt_field
            );
            let hal_ref = backend.signal_ref(kind, record.typed_index, binding.role);
            let (lhs, rhs) = match direction {
                SignalDirection::Input => (field_ref, hal_ref),
                SignalDirection::Output => (hal_ref, field_ref),
            };
            width = width.max(lhs.len());
            assignments.push((lhs, rhs));
        }
        if !assignments.is_empty() {
            groups.push((record.name.as_str(), assignments));
        }
    }
    for (name, assignments) in groups {
        code.push_str(&format!("    // {name}\n"));
        for (lhs, rhs) in assignments {
            code.push_str(&format!("    {lhs:<width$} := {rhs};\n"));
        }
        code.push('\n');
    }
    code.push_str("END_FUNCTION\n");
    Artifact::new(format!("{fc}.scl"), code)
}
