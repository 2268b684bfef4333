//! Addressing backends: how generated read/write code names a
//! physical point, and which extra artifacts that choice drags in.
use serde::Serialize;

use base::prelude::{MechKind, SignalRole, TypedIndex};

use crate::config::{BackendKind, RunContext};
use crate::record::RecordSet;

use super::{header, Artifact};

pub(crate) trait AddressingBackend {
    /// The SCL expression the read/write functions use for the signal
    /// bound to (`kind`, `index`, `role`).
    fn signal_ref(&self, kind: MechKind, index: TypedIndex, role: &SignalRole) -> String;

    /// Artifacts the backend needs besides the read/write functions:
    /// storage blocks for fixed addressing, the importable tag table
    /// for symbolic addressing.
    fn extra_artifacts(&self, ctx: &RunContext, records: &RecordSet) -> Vec<Artifact>;
}

pub(crate) fn for_choice(choice: BackendKind) -> Box<dyn AddressingBackend> {
    match choice {
        BackendKind::Fixed => Box::new(FixedBackend),
        BackendKind::Symbolic => Box::new(SymbolicBackend),
    }
}

struct FixedBackend;

struct SymbolicBackend;

/// Member name of a signal inside its kind's `DB_HAL_*` block.
fn hal_member(role: &SignalRole, index: TypedIndex) -> String {
    format!("{}_{}", role.column, index)
}

/// Tag-table name of a signal.  Numbered from 1; the table is read
/// by electricians, not by the dispatcher.
pub(crate) fn symbolic_tag(kind: MechKind, index: TypedIndex, role: &SignalRole) -> String {
    format!(
        "HAL_{}_{}_{}",
        kind.name(),
        index.get() + 1,
        role.export_suffix
    )
}

impl AddressingBackend for FixedBackend {
    fn signal_ref(&self, kind: MechKind, index: TypedIndex, role: &SignalRole) -> String {
        format!("\"DB_HAL_{}\".{}", kind.name(), hal_member(role, index))
    }

    fn extra_artifacts(&self, ctx: &RunContext, records: &RecordSet) -> Vec<Artifact> {
        MechKind::ALL
            .iter()
            .filter_map(|&kind| db_hal_block(ctx, kind, records))
            .collect()
    }
}

/// The `DB_HAL_*` block of one kind: every bound signal as an
/// `AT`-declared BOOL, grouped by mechanism.  `None` when the kind
/// has no enabled mechanisms.
fn db_hal_block(ctx: &RunContext, kind: MechKind, records: &RecordSet) -> Option<Artifact> {
    let of_kind = records.of_kind(kind);
    if of_kind.is_empty() {
        return None;
    }
    let block = format!("DB_HAL_{}", kind.name());
    let mut code = header(ctx, &format!("{block} - {} I/O mapping", kind.name()));
    code.push_str(&format!(
        "\nDATA_BLOCK \"{block}\"\n\
         {{ S7_Optimized_Access := 'FALSE' }}\n\
         VERSION : 1.0\n\
         \n\
         VAR\n"
    ));
    let mut member_width = 0;
    let mut address_width = 0;
    for record in of_kind {
        for binding in record.bindings() {
            member_width = member_width.max(hal_member(binding.role, record.typed_index).len());
            address_width = address_width.max(binding.token.as_str().len());
        }
    }
    for record in of_kind {
        code.push_str(&format!(
            "\n    // {} (Slot {}, {})\n",
            record.name, record.slot, record.location
        ));
        for binding in record.bindings() {
            code.push_str(&format!(
                "    {:<member_width$} AT {:<address_width$} : BOOL;\n",
                hal_member(binding.role, record.typed_index),
                binding.token.as_str()
            ));
        }
    }
    code.push_str(
        "\nEND_VAR\n\
         \n\
         BEGIN\n\
         END_DATA_BLOCK\n",
    );
    Some(Artifact::new(format!("{block}.scl"), code))
}

impl AddressingBackend for SymbolicBackend {
    fn signal_ref(&self, kind: MechKind, index: TypedIndex, role: &SignalRole) -> String {
        format!("\"{}\"", symbolic_tag(kind, index, role))
    }

    fn extra_artifacts(&self, _ctx: &RunContext, records: &RecordSet) -> Vec<Artifact> {
        if records.is_empty() {
            return Vec::new();
        }
        vec![tag_table(records)]
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct TagRow<'r> {
    name: String,
    data_type: &'static str,
    address: &'r str,
    comment: String,
}

/// The importable PLC tag table: one `Bool` tag per bound signal,
/// slot order within each kind.
fn tag_table(records: &RecordSet) -> Artifact {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for kind in MechKind::ALL {
        for record in records.in_slot_order(kind) {
            for binding in record.bindings() {
                let row = TagRow {
                    name: symbolic_tag(kind, record.typed_index, binding.role),
                    data_type: "Bool",
                    address: binding.token.as_str(),
                    comment: format!("{} - {}", record.name, binding.role.description),
                };
                writer
                    .serialize(row)
                    .expect("writing a CSV row to memory cannot fail");
            }
        }
    }
    let bytes = writer
        .into_inner()
        .expect("flushing a CSV writer over a Vec cannot fail");
    let contents = String::from_utf8(bytes).expect("generated CSV is UTF-8");
    Artifact::new("PLC_Tags_HAL.csv", contents)
}
