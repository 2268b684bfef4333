//! The prelude exports the types which are useful in representing a
//! mechanism table.  Providing this prelude is the main purpose of
//! the base crate.
pub use super::addr::{AddressParseFailed, AddressToken, IoAddress};
pub use super::error::ConversionFailed;
pub use super::kind::MechKind;
pub use super::signal::{SignalDirection, SignalRole};
pub use super::slot::{Slot, SlotRange, TypedIndex, EMPTY_TYPED_INDEX, SLOT_COUNT};
