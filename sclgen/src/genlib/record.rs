//! In-memory form of the enabled mechanism rows, after
//! normalization.  Everything downstream of table reading works on
//! these types and never sees a CSV cell again.
use base::prelude::{AddressToken, MechKind, SignalRole, Slot, TypedIndex};

/// The kind-specific part of a record: its signal bindings and its
/// pass-through parameter.  A variant can only carry the signals its
/// kind actually has, so a gate with a speed sensor is unrepresentable
/// rather than merely invalid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MechConfig {
    Redler {
        speed: Option<AddressToken>,
        breaker: Option<AddressToken>,
        overflow: Option<AddressToken>,
        run: Option<AddressToken>,
        speed_timeout_ms: u32,
    },
    Noria {
        speed: Option<AddressToken>,
        breaker: Option<AddressToken>,
        upper_level: Option<AddressToken>,
        lower_level: Option<AddressToken>,
        run: Option<AddressToken>,
        speed_timeout_ms: u32,
    },
    Gate {
        opened: Option<AddressToken>,
        closed: Option<AddressToken>,
        open: Option<AddressToken>,
        close: Option<AddressToken>,
        travel_timeout_ms: u32,
    },
    Fan {
        breaker: Option<AddressToken>,
        run: Option<AddressToken>,
        start_delay_ms: u32,
    },
}

impl MechConfig {
    pub const fn kind(&self) -> MechKind {
        match self {
            MechConfig::Redler { .. } => MechKind::Redler,
            MechConfig::Noria { .. } => MechKind::Noria,
            MechConfig::Gate { .. } => MechKind::Gate,
            MechConfig::Fan { .. } => MechKind::Fan,
        }
    }

    /// Assemble a config from address cells given in the kind's
    /// role-table order.
    ///
    /// # Panics
    /// Panics when the number of cells does not match the kind's role
    /// count; the normalizer derives both from the same table.
    pub(crate) fn from_cells(
        kind: MechKind,
        cells: Vec<Option<AddressToken>>,
        parameter: u32,
    ) -> MechConfig {
        assert_eq!(
            cells.len(),
            kind.roles().len(),
            "a {kind} record needs one address cell per role"
        );
        let mut cells = cells.into_iter();
        let mut next = || cells.next().flatten();
        match kind {
            MechKind::Redler => MechConfig::Redler {
                speed: next(),
                breaker: next(),
                overflow: next(),
                run: next(),
                speed_timeout_ms: parameter,
            },
            MechKind::Noria => MechConfig::Noria {
                speed: next(),
                breaker: next(),
                upper_level: next(),
                lower_level: next(),
                run: next(),
                speed_timeout_ms: parameter,
            },
            MechKind::Gate => MechConfig::Gate {
                opened: next(),
                closed: next(),
                open: next(),
                close: next(),
                travel_timeout_ms: parameter,
            },
            MechKind::Fan => MechConfig::Fan {
                breaker: next(),
                run: next(),
                start_delay_ms: parameter,
            },
        }
    }

    /// The address cells in role-table order, one entry per role
    /// whether bound or not.
    pub fn cells(&self) -> Vec<(&'static SignalRole, Option<&AddressToken>)> {
        let cells: Vec<Option<&AddressToken>> = match self {
            MechConfig::Redler {
                speed,
                breaker,
                overflow,
                run,
                ..
            } => vec![
                speed.as_ref(),
                breaker.as_ref(),
                overflow.as_ref(),
                run.as_ref(),
            ],
            MechConfig::Noria {
                speed,
                breaker,
                upper_level,
                lower_level,
                run,
                ..
            } => vec![
                speed.as_ref(),
                breaker.as_ref(),
                upper_level.as_ref(),
                lower_level.as_ref(),
                run.as_ref(),
            ],
            MechConfig::Gate {
                opened,
                closed,
                open,
                close,
                ..
            } => vec![
                opened.as_ref(),
                closed.as_ref(),
                open.as_ref(),
                close.as_ref(),
            ],
            MechConfig::Fan { breaker, run, .. } => vec![breaker.as_ref(), run.as_ref()],
        };
        self.kind().roles().iter().zip(cells).collect()
    }

    /// The pass-through parameter; written verbatim into the kind's
    /// `Cfg_*` field at initialization.
    pub const fn parameter(&self) -> u32 {
        match self {
            MechConfig::Redler {
                speed_timeout_ms, ..
            } => *speed_timeout_ms,
            MechConfig::Noria {
                speed_timeout_ms, ..
            } => *speed_timeout_ms,
            MechConfig::Gate {
                travel_timeout_ms, ..
            } => *travel_timeout_ms,
            MechConfig::Fan { start_delay_ms, .. } => *start_delay_ms,
        }
    }
}

/// One role of a record together with the address bound to it.
#[derive(Clone, Copy, Debug)]
pub struct SignalBinding<'r> {
    pub role: &'static SignalRole,
    pub token: &'r AddressToken,
}

/// One enabled mechanism row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MechRecord {
    pub name: String,
    pub location: String,
    pub slot: Slot,
    pub typed_index: TypedIndex,
    pub config: MechConfig,
}

impl MechRecord {
    pub fn kind(&self) -> MechKind {
        self.config.kind()
    }

    /// The record's bound signals, in role-table order.  Roles whose
    /// address cell was left empty are skipped.
    pub fn bindings(&self) -> impl Iterator<Item = SignalBinding<'_>> {
        self.config
            .cells()
            .into_iter()
            .filter_map(|(role, token)| token.map(|token| SignalBinding { role, token }))
    }
}

/// The enabled records of every kind.  Within a kind, records keep
/// their table order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordSet {
    redlers: Vec<MechRecord>,
    norias: Vec<MechRecord>,
    gates: Vec<MechRecord>,
    fans: Vec<MechRecord>,
}

impl RecordSet {
    pub fn new() -> RecordSet {
        RecordSet::default()
    }

    pub fn push(&mut self, record: MechRecord) {
        match record.kind() {
            MechKind::Redler => self.redlers.push(record),
            MechKind::Noria => self.norias.push(record),
            MechKind::Gate => self.gates.push(record),
            MechKind::Fan => self.fans.push(record),
        }
    }

    pub fn of_kind(&self, kind: MechKind) -> &[MechRecord] {
        match kind {
            MechKind::Redler => &self.redlers,
            MechKind::Noria => &self.norias,
            MechKind::Gate => &self.gates,
            MechKind::Fan => &self.fans,
        }
    }

    /// The kind's records ordered by slot; the order every exported
    /// list and table uses.
    pub fn in_slot_order(&self, kind: MechKind) -> Vec<&MechRecord> {
        let mut sorted: Vec<&MechRecord> = self.of_kind(kind).iter().collect();
        sorted.sort_by_key(|record| record.slot);
        sorted
    }

    /// Every record, kinds in canonical order, table order within a
    /// kind.  Validation and emission both walk this order, which is
    /// what makes repeated runs produce identical output.
    pub fn iter(&self) -> impl Iterator<Item = &MechRecord> {
        MechKind::ALL
            .into_iter()
            .flat_map(|kind| self.of_kind(kind).iter())
    }

    pub fn len(&self) -> usize {
        self.redlers.len() + self.norias.len() + self.gates.len() + self.fans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
