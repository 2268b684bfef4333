//! The human-facing artifacts: the configuration summary in Markdown
//! and the flat I/O list the electricians work from.
use serde::Serialize;

use base::prelude::{MechKind, SignalDirection, Slot, TypedIndex};

use crate::config::RunContext;
use crate::emit::Artifact;
use crate::record::{MechRecord, RecordSet};
use crate::registry::SlotRegistry;

/// Render both documentation artifacts.
pub fn render_docs(
    ctx: &RunContext,
    records: &RecordSet,
    registry: &SlotRegistry,
) -> Vec<Artifact> {
    vec![
        documentation_md(ctx, records, registry),
        io_list_csv(records),
    ]
}

fn documentation_md(ctx: &RunContext, records: &RecordSet, registry: &SlotRegistry) -> Artifact {
    let mut doc = format!(
        "# Mechanism configuration\n\
         \n\
         **Project:** {}  \n\
         **Version:** {}  \n\
         **Author:** {}  \n\
         **Generated:** {}\n\
         \n\
         ---\n\
         \n\
         ## Summary\n\
         \n\
         - **Total mechanisms:** {}\n",
        ctx.project.name,
        ctx.project.version,
        ctx.project.author,
        ctx.timestamp(),
        records.len()
    );
    for kind in MechKind::ALL {
        doc.push_str(&format!(
            "  - {}: {}\n",
            kind.plural(),
            records.of_kind(kind).len()
        ));
    }
    doc.push_str(
        "\n---\n\
         \n\
         ## Slot ranges\n\
         \n\
         | Mechanism kind | Recommended range | Actual range |\n\
         |----------------|-------------------|--------------|\n",
    );
    for kind in MechKind::ALL {
        let range = match registry.occupied_range(kind) {
            Some(range) => range,
            None => continue,
        };
        doc.push_str(&format!(
            "| {} | {} | {} |\n",
            kind.plural(),
            kind.recommended_slots(),
            range
        ));
    }
    doc.push_str("\n---\n\n");
    for kind in MechKind::ALL {
        let sorted = records.in_slot_order(kind);
        if sorted.is_empty() {
            continue;
        }
        doc.push_str(&format!("## {}\n\n", kind.plural()));
        doc.push_str(
            "| Slot | TypedIdx | Name | Location | I/O |\n\
             |------|----------|------|----------|-----|\n",
        );
        for record in sorted {
            doc.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                record.slot,
                record.typed_index,
                record.name,
                record.location,
                io_summary(record)
            ));
        }
        doc.push('\n');
    }
    doc.push_str(&integration_section(records));
    Artifact::new("CONFIG_DOCUMENTATION.md", doc)
}

/// The bound addresses of one record, inputs then outputs, the way
/// the per-kind tables show them.
fn io_summary(record: &MechRecord) -> String {
    let list = |direction: SignalDirection| -> String {
        let tokens: Vec<&str> = record
            .bindings()
            .filter(|binding| binding.role.direction == direction)
            .map(|binding| binding.token.as_str())
            .collect();
        if tokens.is_empty() {
            "-".to_string()
        } else {
            tokens.join(", ")
        }
    };
    format!(
        "IN: {} / OUT: {}",
        list(SignalDirection::Input),
        list(SignalDirection::Output)
    )
}

/// The OB100/OB1 wiring snippet, covering only the kinds the site
/// actually has.
fn integration_section(records: &RecordSet) -> String {
    let present: Vec<MechKind> = MechKind::ALL
        .into_iter()
        .filter(|kind| !records.of_kind(*kind).is_empty())
        .collect();
    let mut doc = String::from(
        "---\n\
         \n\
         ## PLC integration\n\
         \n\
         ### OB100 (Startup)\n\
         ```scl\n\
         \"FC_InitMechs\"();\n\
         ```\n\
         \n\
         ### OB1 (Cyclic)\n\
         ```scl\n\
         // 1. Read HAL inputs\n",
    );
    for kind in &present {
        doc.push_str(&format!(
            "\"FC_HAL_{}_Read\"({} := \"DB_Mechs\".{});\n",
            kind.name(),
            kind.name(),
            kind.name()
        ));
    }
    doc.push_str(
        "\n// 2. Execute mechanisms\n\
         \"FC_DeviceRunner\"(\n    \
         Mechs  := \"DB_Mechs\".Mechs",
    );
    for kind in &present {
        doc.push_str(&format!(
            ",\n    {:<6} := \"DB_Mechs\".{}",
            kind.name(),
            kind.name()
        ));
    }
    doc.push_str("\n);\n\n// 3. Write HAL outputs\n");
    for kind in &present {
        doc.push_str(&format!(
            "\"FC_HAL_{}_Write\"({} := \"DB_Mechs\".{});\n",
            kind.name(),
            kind.name(),
            kind.name()
        ));
    }
    doc.push_str("```\n");
    doc
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct IoRow<'r> {
    address: &'r str,
    r#type: &'static str,
    mech_type: &'static str,
    slot: Slot,
    typed_idx: TypedIndex,
    name: String,
    description: &'static str,
    location: &'r str,
}

/// One row per bound signal, kinds in canonical order, slot order
/// within a kind.
fn io_list_csv(records: &RecordSet) -> Artifact {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for kind in MechKind::ALL {
        for record in records.in_slot_order(kind) {
            for binding in record.bindings() {
                let row = IoRow {
                    address: binding.token.as_str(),
                    r#type: binding.role.direction.export_tag(),
                    mech_type: kind.export_tag(),
                    slot: record.slot,
                    typed_idx: record.typed_index,
                    name: format!("{}_{}", record.name, binding.role.export_suffix),
                    description: binding.role.description,
                    location: &record.location,
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
    Artifact::new("IO_LIST.csv", contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    use base::prelude::AddressToken;

    use crate::config::{BackendKind, ProjectMeta};
    use crate::record::MechConfig;

    fn pinned_context() -> RunContext {
        RunContext {
            project: ProjectMeta {
                name: "Granary North".to_string(),
                author: "Site Team".to_string(),
                version: "2.1.0".to_string(),
            },
            backend: BackendKind::Fixed,
            strict_indexes: false,
            generated_at: chrono::Local.with_ymd_and_hms(2026, 1, 14, 12, 30, 0).unwrap(),
        }
    }

    fn fan(name: &str, slot: u8, index: u16, breaker: &str, run: &str) -> MechRecord {
        let token = |cell: &str| {
            if cell.is_empty() {
                None
            } else {
                Some(AddressToken::from(cell))
            }
        };
        MechRecord {
            name: name.to_string(),
            location: "Roof".to_string(),
            slot: Slot::new(slot),
            typed_index: TypedIndex::try_from(index).unwrap(),
            config: MechConfig::Fan {
                breaker: token(breaker),
                run: token(run),
                start_delay_ms: 2000,
            },
        }
    }

    fn site() -> RecordSet {
        let mut records = RecordSet::new();
        records.push(fan("FAN_2", 151, 1, "%I4.1", "%Q4.1"));
        records.push(fan("FAN_1", 150, 0, "%I4.0", ""));
        records
    }

    #[test]
    fn test_io_list_rows_are_slot_ordered_and_bound_only() {
        let records = site();
        let artifacts = render_docs(&pinned_context(), &records, &SlotRegistry::build(&records));
        let io_list = &artifacts[1];
        assert_eq!(io_list.file_name, "IO_LIST.csv");
        let lines: Vec<&str> = io_list.contents.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Address,Type,MechType,Slot,TypedIdx,Name,Description,Location",
                "%I4.0,DI,FAN,150,0,FAN_1_Breaker,Circuit breaker,Roof",
                "%I4.1,DI,FAN,151,1,FAN_2_Breaker,Circuit breaker,Roof",
                "%Q4.1,DO,FAN,151,1,FAN_2_Run,Run contactor,Roof",
            ]
        );
    }

    #[test]
    fn test_documentation_covers_present_kinds_only() {
        let records = site();
        let artifacts = render_docs(&pinned_context(), &records, &SlotRegistry::build(&records));
        let doc = &artifacts[0].contents;
        assert!(doc.contains("**Project:** Granary North"));
        assert!(doc.contains("**Generated:** 2026-01-14 12:30:00"));
        assert!(doc.contains("- **Total mechanisms:** 2"));
        assert!(doc.contains("  - Fans: 2"));
        assert!(doc.contains("| Fans | 150-199 | 150-151 |"));
        assert!(doc.contains("## Fans"));
        assert!(!doc.contains("## Redlers"));
        assert!(doc.contains("\"FC_HAL_Fan_Read\"(Fan := \"DB_Mechs\".Fan);"));
        assert!(!doc.contains("FC_HAL_Redler_Read"));
        assert!(doc.contains("    Fan    := \"DB_Mechs\".Fan\n);"));
    }

    #[test]
    fn test_per_kind_table_is_slot_sorted_with_io_summary() {
        let records = site();
        let artifacts = render_docs(&pinned_context(), &records, &SlotRegistry::build(&records));
        let doc = &artifacts[0].contents;
        let fan_1 = doc.find("| 150 | 0 | FAN_1 | Roof | IN: %I4.0 / OUT: - |");
        let fan_2 = doc.find("| 151 | 1 | FAN_2 | Roof | IN: %I4.1 / OUT: %Q4.1 |");
        assert!(fan_1.is_some(), "{doc}");
        assert!(fan_2.is_some(), "{doc}");
        assert!(fan_1 < fan_2);
    }
}
