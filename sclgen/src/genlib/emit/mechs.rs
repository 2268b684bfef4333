//! The three artifacts every run ships: the mechanism arrays block,
//! the startup initializer, and the cyclic dispatcher.
use base::prelude::MechKind;

use crate::config::RunContext;
use crate::record::RecordSet;
use crate::registry::SlotRegistry;

use super::{header, section, Artifact};

pub(crate) fn db_mechs(ctx: &RunContext, records: &RecordSet, registry: &SlotRegistry) -> Artifact {
    let mut code = header(ctx, "DB_Mechs - Mechanism arrays");
    code.push_str(
        "\nDATA_BLOCK \"DB_Mechs\"\n\
         { S7_Optimized_Access := 'TRUE' }\n\
         VERSION : 1.0\n\
         \n\
         VAR\n",
    );
    code.push_str(&section(&[
        "Mechanism base bus (all slots 0..255)",
        "- Commands, status, owner",
        "- Used by arbitration, routing, SCADA",
    ]));
    code.push_str("    Mechs : ARRAY [0..255] OF \"UDT_BaseMechanism\";\n\n");
    for kind in MechKind::ALL {
        let capacity = registry.capacity(kind);
        if capacity == 0 {
            continue;
        }
        code.push_str(&section(&[
            format!("{} (typed, HAL specifics)", kind.plural()),
            format!(
                "Count: {} enabled, array [0..{}]",
                records.of_kind(kind).len(),
                capacity - 1
            ),
        ]));
        code.push_str(&format!(
            "    {} : ARRAY [0..{}] OF \"{}\";\n\n",
            kind.name(),
            capacity - 1,
            kind.udt_name()
        ));
    }
    code.push_str(
        "END_VAR\n\
         \n\
         BEGIN\n    \
         // Initialization runs at startup through FC_InitMechs (OB100)\n\
         END_DATA_BLOCK\n",
    );
    Artifact::new("DB_Mechs.scl", code)
}

pub(crate) fn fc_init_mechs(ctx: &RunContext, records: &RecordSet) -> Artifact {
    let mut code = header(ctx, "FC_InitMechs - Mechanism slot map initialization");
    let rule = format!("// {}\n", "=".repeat(76));
    code.push_str(
        "\nFUNCTION \"FC_InitMechs\" : VOID\n\
         { S7_Optimized_Access := 'TRUE' }\n\
         VERSION : 1.0\n\n",
    );
    code.push_str(&rule);
    code.push_str("// CALL ONCE AT PLC STARTUP (OB100)\n");
    code.push_str(&rule);
    code.push_str(
        "\nVAR_TEMP\n    \
         i : INT;\n\
         END_VAR\n\
         \n\
         BEGIN\n",
    );
    code.push_str(&section(&["Clear ALL slots (default = empty)"]));
    code.push_str(
        "    FOR i := 0 TO 255 DO\n        \
         \"DB_Mechs\".Mechs[i].DeviceType := \"DB_Const\".TYPE_NONE;\n        \
         \"DB_Mechs\".Mechs[i].TypedIndex := UINT#16#FFFF;\n    \
         END_FOR;\n\n",
    );
    for kind in MechKind::ALL {
        let of_kind = records.of_kind(kind);
        if of_kind.is_empty() {
            continue;
        }
        code.push_str(&format!(
            "    // === {} ===\n",
            kind.plural().to_uppercase()
        ));
        for record in of_kind {
            code.push_str(&format!(
                "    \"DB_Mechs\".Mechs[{}].DeviceType := \"DB_Const\".{};  // {} ({})\n",
                record.slot,
                kind.type_constant(),
                record.name,
                record.location
            ));
            code.push_str(&format!(
                "    \"DB_Mechs\".Mechs[{}].TypedIndex := {};\n",
                record.slot, record.typed_index
            ));
            code.push_str(&format!(
                "    \"DB_Mechs\".{}[{}].{} := {};\n\n",
                kind.name(),
                record.typed_index,
                kind.parameter_field(),
                record.config.parameter()
            ));
        }
    }
    code.push_str("END_FUNCTION\n");
    Artifact::new("FC_InitMechs.scl", code)
}

pub(crate) fn fc_device_runner(ctx: &RunContext, registry: &SlotRegistry) -> Artifact {
    let mut code = header(ctx, "FC_DeviceRunner - Mechanism execution");
    code.push_str(
        "\nFUNCTION \"FC_DeviceRunner\" : VOID\n\
         { S7_Optimized_Access := 'TRUE' }\n\
         VERSION : 1.0\n\
         \n\
         VAR_IN_OUT\n    \
         Mechs  : ARRAY[*] OF \"UDT_BaseMechanism\";\n",
    );
    for kind in MechKind::ALL {
        if registry.capacity(kind) == 0 {
            continue;
        }
        code.push_str(&format!(
            "    {:<6} : ARRAY[*] OF \"{}\";\n",
            kind.name(),
            kind.udt_name()
        ));
    }
    code.push_str(
        "END_VAR\n\
         \n\
         VAR_TEMP\n    \
         slot : INT;\n    \
         idx  : INT;\n\
         END_VAR\n\
         \n\
         BEGIN\n",
    );
    for kind in MechKind::ALL {
        let range = match registry.occupied_range(kind) {
            Some(range) => range,
            None => continue,
        };
        code.push_str(&section(&[format!(
            "{} (slot range: {}..{})",
            kind.plural().to_uppercase(),
            range.min(),
            range.max()
        )]));
        code.push_str(&format!(
            "    FOR slot := {} TO {} DO\n        \
             IF Mechs[slot].DeviceType = \"DB_Const\".{} THEN\n            \
             idx := Mechs[slot].TypedIndex;\n            \
             \"{}\"({} := {}[idx], B := Mechs[slot]);\n        \
             END_IF;\n    \
             END_FOR;\n\n",
            range.min(),
            range.max(),
            kind.type_constant(),
            kind.handler_fc(),
            kind.handler_param(),
            kind.name()
        ));
    }
    code.push_str("END_FUNCTION\n");
    Artifact::new("FC_DeviceRunner.scl", code)
}
