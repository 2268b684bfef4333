//! The slot registry: a fixed 256-entry map of the mechanism bus,
//! plus the per-kind facts the emitters dispatch on.
use tracing::{event, Level};

use base::prelude::{MechKind, Slot, SlotRange, TypedIndex, SLOT_COUNT};

use crate::record::RecordSet;

/// What one bus slot holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotEntry {
    Empty,
    Occupied { kind: MechKind, index: TypedIndex },
}

/// Dispatch-relevant facts about one kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KindLayout {
    /// Length of the kind's typed array: highest typed index plus
    /// one, or 0 when the kind has no enabled mechanisms.  Holes in
    /// the index sequence still count toward the length.
    pub capacity: usize,
    /// Tightest slot range covering every mechanism of the kind;
    /// `None` when the kind is empty, in which case no dispatch loop
    /// is emitted for it at all.
    pub occupied: Option<SlotRange>,
}

/// The full bus picture for one validated record set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotRegistry {
    slot_map: Box<[SlotEntry; SLOT_COUNT]>,
    layouts: [KindLayout; 4],
}

impl SlotRegistry {
    /// Overlay every record onto an empty bus.
    ///
    /// # Panics
    /// Panics when two records claim the same slot.  The validator
    /// rejects such input, so hitting the panic means the caller
    /// skipped validation; silently overwriting would let the later
    /// record win and ship a wrong slot map.
    pub fn build(records: &RecordSet) -> SlotRegistry {
        let mut slot_map = Box::new([SlotEntry::Empty; SLOT_COUNT]);
        for record in records.iter() {
            let entry = &mut slot_map[record.slot.index()];
            match entry {
                SlotEntry::Occupied { kind, index } => {
                    panic!(
                        "slot {} is already occupied by {} {} while placing '{}'; the registry only accepts validated records",
                        record.slot, kind, index, record.name
                    );
                }
                SlotEntry::Empty => {
                    *entry = SlotEntry::Occupied {
                        kind: record.kind(),
                        index: record.typed_index,
                    };
                }
            }
        }
        let layouts = MechKind::ALL.map(|kind| {
            let of_kind = records.of_kind(kind);
            let capacity = of_kind
                .iter()
                .map(|record| record.typed_index.as_usize() + 1)
                .max()
                .unwrap_or(0);
            let occupied = SlotRange::spanning(of_kind.iter().map(|record| record.slot));
            event!(
                Level::DEBUG,
                "{}: capacity {capacity}, occupied {occupied:?}",
                kind.plural()
            );
            KindLayout { capacity, occupied }
        });
        SlotRegistry { slot_map, layouts }
    }

    pub fn entry(&self, slot: Slot) -> SlotEntry {
        self.slot_map[slot.index()]
    }

    pub fn layout(&self, kind: MechKind) -> KindLayout {
        self.layouts[kind.ordinal()]
    }

    /// Typed array length for `kind`; 0 when the kind is empty.
    pub fn capacity(&self, kind: MechKind) -> usize {
        self.layout(kind).capacity
    }

    pub fn occupied_range(&self, kind: MechKind) -> Option<SlotRange> {
        self.layout(kind).occupied
    }
}
