//! Identities a mechanism carries on the controller: its global slot
//! on the device bus and its position in the per-kind typed array.
use std::fmt::{self, Display, Formatter};

use serde::Serialize;

#[cfg(test)]
use test_strategy::Arbitrary;

use super::error::ConversionFailed;

/// Number of entries on the device bus.  The generated base array is
/// always `ARRAY [0..255]`, whatever subset of it a site actually
/// populates.
pub const SLOT_COUNT: usize = 256;

/// The typed-index value the generated initialization routine writes
/// into every bus entry before the per-mechanism assignments run.  A
/// runtime lookup that finds this value knows the slot is empty, which
/// is why no real mechanism may use it (see [`TypedIndex`]).
pub const EMPTY_TYPED_INDEX: u16 = 0xFFFF;

/// A slot is the global identity of a mechanism on the controller's
/// device bus, independent of the mechanism's kind.  The bus is a
/// fixed array of 256 positions and every mechanism occupies exactly
/// one.  Slot numbers appear in operator displays and in the generated
/// initialization code, so the generator never renumbers them.
#[cfg_attr(test, derive(Arbitrary))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Slot(u8);

impl Slot {
    pub const ZERO: Slot = Slot(0);
    pub const MAX: Slot = Slot(u8::MAX);

    pub const fn new(n: u8) -> Slot {
        Slot(n)
    }

    /// Position of this slot in the 256-entry bus array.
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u8> for Slot {
    fn from(n: u8) -> Slot {
        Slot(n)
    }
}

impl From<Slot> for u8 {
    fn from(slot: Slot) -> u8 {
        slot.0
    }
}

impl From<Slot> for usize {
    fn from(slot: Slot) -> usize {
        slot.index()
    }
}

impl TryFrom<u32> for Slot {
    type Error = ConversionFailed;
    fn try_from(n: u32) -> Result<Slot, ConversionFailed> {
        match u8::try_from(n) {
            Ok(byte) => Ok(Slot(byte)),
            Err(_) => Err(ConversionFailed::SlotTooLarge(n)),
        }
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        Display::fmt(&self.0, f)
    }
}

/// The position of a mechanism inside its kind's dense typed array.
/// Unlike [`Slot`] this is only unique within one kind; a redler and a
/// fan may both be index 3 because they live in different arrays.
///
/// The all-ones value is rejected at construction: the generated
/// initialization code stores `UINT#16#FFFF` in a bus entry to mean
/// "no typed mechanism here", and a real index equal to the marker
/// would be indistinguishable from an empty entry at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TypedIndex(u16);

impl TypedIndex {
    pub const ZERO: TypedIndex = TypedIndex(0);

    pub const fn get(&self) -> u16 {
        self.0
    }

    pub const fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u16> for TypedIndex {
    type Error = ConversionFailed;
    fn try_from(n: u16) -> Result<TypedIndex, ConversionFailed> {
        if n == EMPTY_TYPED_INDEX {
            Err(ConversionFailed::IndexReserved)
        } else {
            Ok(TypedIndex(n))
        }
    }
}

impl TryFrom<u32> for TypedIndex {
    type Error = ConversionFailed;
    fn try_from(n: u32) -> Result<TypedIndex, ConversionFailed> {
        match u16::try_from(n) {
            Ok(short) => TypedIndex::try_from(short),
            Err(_) => Err(ConversionFailed::IndexTooLarge(n)),
        }
    }
}

impl From<TypedIndex> for u16 {
    fn from(idx: TypedIndex) -> u16 {
        idx.0
    }
}

impl Display for TypedIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        Display::fmt(&self.0, f)
    }
}

/// An inclusive range of slots.  Used both for the fixed range
/// convention each kind has on the bus and for the actual occupied
/// range the dispatcher iterates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotRange {
    min: Slot,
    max: Slot,
}

impl SlotRange {
    pub const fn new(min: Slot, max: Slot) -> SlotRange {
        assert!(min.0 <= max.0);
        SlotRange { min, max }
    }

    /// The tightest range covering every slot yielded by `slots`, or
    /// `None` if there are none at all.
    pub fn spanning<I>(slots: I) -> Option<SlotRange>
    where
        I: IntoIterator<Item = Slot>,
    {
        let mut result: Option<SlotRange> = None;
        for slot in slots {
            result = Some(match result {
                None => SlotRange { min: slot, max: slot },
                Some(range) => SlotRange {
                    min: range.min.min(slot),
                    max: range.max.max(slot),
                },
            });
        }
        result
    }

    pub const fn min(&self) -> Slot {
        self.min
    }

    pub const fn max(&self) -> Slot {
        self.max
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.min <= slot && slot <= self.max
    }
}

impl Display for SlotRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}-{}", self.min, self.max)
    }
}


#[cfg(test)]
mod slot_proptests {
    use super::{Slot, SlotRange};
    use test_strategy::{proptest, Arbitrary};

    #[derive(Debug, Arbitrary)]
    struct SpanTestInput {
        #[strategy(proptest::collection::vec(proptest::prelude::any::<Slot>(), 1..20))]
        slots: Vec<Slot>,
    }

    #[proptest]
    fn spanning_covers_every_input_slot(input: SpanTestInput) {
        let range = SlotRange::spanning(input.slots.iter().copied()).expect("nonempty input");
        for slot in &input.slots {
            assert!(range.contains(*slot));
        }
        assert!(input.slots.contains(&range.min()));
        assert!(input.slots.contains(&range.max()));
    }

    #[proptest]
    fn range_endpoints_stay_ordered(a: Slot, b: Slot) {
        let range = SlotRange::new(a.min(b), a.max(b));
        assert!(range.min() <= range.max());
        assert_eq!(range.to_string(), format!("{}-{}", range.min(), range.max()));
    }
}
