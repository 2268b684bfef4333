//! Failures shared by the conversions in this crate.

use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

/// Represents a failure to convert a raw table value into one of the
/// identity types defined in the base crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConversionFailed {
    /// The slot space is [0,255]; the value does not fit.
    SlotTooLarge(u32),
    /// The typed index does not fit in 16 bits.
    IndexTooLarge(u32),
    /// 0xFFFF is the generated code's "no typed mechanism" marker and
    /// can never be a real typed index.
    IndexReserved,
}

impl Error for ConversionFailed {}

impl Display for ConversionFailed {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            ConversionFailed::SlotTooLarge(n) => {
                write!(f, "slot {n} is outside the bus range 0-255")
            }
            ConversionFailed::IndexTooLarge(n) => {
                write!(f, "typed index {n} does not fit in 16 bits")
            }
            ConversionFailed::IndexReserved => {
                f.write_str("typed index 65535 is reserved to mark an empty bus entry")
            }
        }
    }
}
