//! Mechanism kinds and the fixed facts the generator knows about each
//! of them: slot-range convention, generated-code naming, and the
//! signal-role table.
use std::fmt::{self, Display, Formatter};

#[cfg(test)]
use test_strategy::Arbitrary;

use super::signal::{SignalDirection, SignalRole};
use super::slot::{Slot, SlotRange};

/// The kinds of mechanism the control runtime knows how to drive.
/// The set is closed: the runtime library ships one UDT and one
/// handler FC per kind, so adding a kind means extending this enum
/// and every match over it.
#[cfg_attr(test, derive(Arbitrary))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MechKind {
    /// Drag-chain conveyor.
    Redler,
    /// Bucket elevator.
    Noria,
    /// Two-position slide gate.
    Gate,
    /// Aspiration fan.
    Fan,
}

const REDLER_ROLES: [SignalRole; 4] = [
    SignalRole {
        column: "DI_Speed",
        direction: SignalDirection::Input,
        udt_field: "DI_Speed_OK",
        export_suffix: "Speed",
        description: "Speed sensor",
    },
    SignalRole {
        column: "DI_Breaker",
        direction: SignalDirection::Input,
        udt_field: "DI_Breaker_OK",
        export_suffix: "Breaker",
        description: "Circuit breaker",
    },
    SignalRole {
        column: "DI_Overflow",
        direction: SignalDirection::Input,
        udt_field: "DI_Overflow_OK",
        export_suffix: "Overflow",
        description: "Overflow sensor",
    },
    SignalRole {
        column: "DO_Run",
        direction: SignalDirection::Output,
        udt_field: "DO_Run",
        export_suffix: "Run",
        description: "Run contactor",
    },
];

const NORIA_ROLES: [SignalRole; 5] = [
    SignalRole {
        column: "DI_Speed",
        direction: SignalDirection::Input,
        udt_field: "DI_Speed_OK",
        export_suffix: "Speed",
        description: "Speed sensor",
    },
    SignalRole {
        column: "DI_Breaker",
        direction: SignalDirection::Input,
        udt_field: "DI_Breaker_OK",
        export_suffix: "Breaker",
        description: "Circuit breaker",
    },
    SignalRole {
        column: "DI_UpperLevel",
        direction: SignalDirection::Input,
        udt_field: "DI_UpperLevel_OK",
        export_suffix: "Upper",
        description: "Upper level sensor",
    },
    SignalRole {
        column: "DI_LowerLevel",
        direction: SignalDirection::Input,
        udt_field: "DI_LowerLevel_OK",
        export_suffix: "Lower",
        description: "Lower level sensor",
    },
    SignalRole {
        column: "DO_Run",
        direction: SignalDirection::Output,
        udt_field: "DO_Run",
        export_suffix: "Run",
        description: "Run contactor",
    },
];

const GATE_ROLES: [SignalRole; 4] = [
    SignalRole {
        column: "DI_Opened",
        direction: SignalDirection::Input,
        udt_field: "DI_Opened_OK",
        export_suffix: "Opened",
        description: "Opened limit switch",
    },
    SignalRole {
        column: "DI_Closed",
        direction: SignalDirection::Input,
        udt_field: "DI_Closed_OK",
        export_suffix: "Closed",
        description: "Closed limit switch",
    },
    SignalRole {
        column: "DO_Open",
        direction: SignalDirection::Output,
        udt_field: "DO_Open",
        export_suffix: "Open",
        description: "Open command",
    },
    SignalRole {
        column: "DO_Close",
        direction: SignalDirection::Output,
        udt_field: "DO_Close",
        export_suffix: "Close",
        description: "Close command",
    },
];

const FAN_ROLES: [SignalRole; 2] = [
    SignalRole {
        column: "DI_Breaker",
        direction: SignalDirection::Input,
        udt_field: "DI_Breaker_OK",
        export_suffix: "Breaker",
        description: "Circuit breaker",
    },
    SignalRole {
        column: "DO_Run",
        direction: SignalDirection::Output,
        udt_field: "DO_Run",
        export_suffix: "Run",
        description: "Run contactor",
    },
];

impl MechKind {
    /// All kinds, in the order tables are read and artifacts are
    /// emitted.  Everything that iterates "per kind" uses this order
    /// so that repeated runs produce identical output.
    pub const ALL: [MechKind; 4] = [
        MechKind::Redler,
        MechKind::Noria,
        MechKind::Gate,
        MechKind::Fan,
    ];

    /// Position of this kind within [`MechKind::ALL`], for indexing
    /// per-kind arrays.
    pub const fn ordinal(&self) -> usize {
        match self {
            MechKind::Redler => 0,
            MechKind::Noria => 1,
            MechKind::Gate => 2,
            MechKind::Fan => 3,
        }
    }

    /// The slot sub-range mechanisms of this kind conventionally
    /// occupy.  Slots 200-255 are deliberately unassigned, left free
    /// for site-specific additions.  Placing a mechanism outside its
    /// kind's range is legal but worth flagging.
    pub const fn recommended_slots(&self) -> SlotRange {
        match self {
            MechKind::Redler => SlotRange::new(Slot::new(0), Slot::new(49)),
            MechKind::Noria => SlotRange::new(Slot::new(50), Slot::new(99)),
            MechKind::Gate => SlotRange::new(Slot::new(100), Slot::new(149)),
            MechKind::Fan => SlotRange::new(Slot::new(150), Slot::new(199)),
        }
    }

    /// Human-readable singular name; also the stem of every generated
    /// identifier for the kind (typed array field, HAL block and
    /// function names).
    pub const fn name(&self) -> &'static str {
        match self {
            MechKind::Redler => "Redler",
            MechKind::Noria => "Noria",
            MechKind::Gate => "Gate",
            MechKind::Fan => "Fan",
        }
    }

    pub const fn plural(&self) -> &'static str {
        match self {
            MechKind::Redler => "Redlers",
            MechKind::Noria => "Norias",
            MechKind::Gate => "Gates",
            MechKind::Fan => "Fans",
        }
    }

    /// Device-type constant in the runtime's `DB_Const` block.  The
    /// gate constant says `GATE2P` because the runtime models gates as
    /// two-position drives.
    pub const fn type_constant(&self) -> &'static str {
        match self {
            MechKind::Redler => "TYPE_REDLER",
            MechKind::Noria => "TYPE_NORIA",
            MechKind::Gate => "TYPE_GATE2P",
            MechKind::Fan => "TYPE_FAN",
        }
    }

    /// Name of the kind's UDT in the runtime library.
    pub const fn udt_name(&self) -> &'static str {
        match self {
            MechKind::Redler => "UDT_Redler",
            MechKind::Noria => "UDT_Noria",
            MechKind::Gate => "UDT_Gate2P",
            MechKind::Fan => "UDT_Fan",
        }
    }

    /// The runtime handler FC the generated dispatcher calls for this
    /// kind.
    pub const fn handler_fc(&self) -> &'static str {
        match self {
            MechKind::Redler => "FC_Redler",
            MechKind::Noria => "FC_Noria",
            MechKind::Gate => "FC_Gate2P",
            MechKind::Fan => "FC_Fan",
        }
    }

    /// Formal-parameter name of the handler FC's typed element.
    pub const fn handler_param(&self) -> &'static str {
        match self {
            MechKind::Redler => "R",
            MechKind::Noria => "N",
            MechKind::Gate => "G",
            MechKind::Fan => "F",
        }
    }

    /// Kind tag used in the exported I/O list's MechType column.
    pub const fn export_tag(&self) -> &'static str {
        match self {
            MechKind::Redler => "REDLER",
            MechKind::Noria => "NORIA",
            MechKind::Gate => "GATE2P",
            MechKind::Fan => "FAN",
        }
    }

    /// File stem of the kind's source table, e.g. `redlers` for
    /// `redlers.csv`.
    pub const fn table_stem(&self) -> &'static str {
        match self {
            MechKind::Redler => "redlers",
            MechKind::Noria => "norias",
            MechKind::Gate => "gates",
            MechKind::Fan => "fans",
        }
    }

    /// Column of the source table holding the kind's pass-through
    /// parameter.  The generator does not interpret the value; it
    /// copies it into the matching `Cfg_*` field at initialization.
    pub const fn parameter_column(&self) -> &'static str {
        match self {
            MechKind::Redler | MechKind::Noria => "SpeedTimeoutMs",
            MechKind::Gate => "TravelTimeoutMs",
            MechKind::Fan => "StartDelayMs",
        }
    }

    /// UDT field the pass-through parameter is written to.
    pub const fn parameter_field(&self) -> &'static str {
        match self {
            MechKind::Redler | MechKind::Noria => "Cfg_SpeedTimeout_ms",
            MechKind::Gate => "Cfg_TravelTimeout_ms",
            MechKind::Fan => "Cfg_StartDelay_ms",
        }
    }

    /// The kind's fixed signal-role table, inputs first, in the order
    /// signals appear in the source table and in generated code.
    pub const fn roles(&self) -> &'static [SignalRole] {
        match self {
            MechKind::Redler => &REDLER_ROLES,
            MechKind::Noria => &NORIA_ROLES,
            MechKind::Gate => &GATE_ROLES,
            MechKind::Fan => &FAN_ROLES,
        }
    }
}

impl Display for MechKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(self.name())
    }
}
