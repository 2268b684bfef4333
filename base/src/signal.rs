//! Signal roles: the named inputs and outputs each mechanism kind
//! exposes to the hardware abstraction layer.
use std::fmt::{self, Display, Formatter};

/// Whether a signal travels from the field into the controller or the
/// other way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SignalDirection {
    Input,
    Output,
}

impl SignalDirection {
    /// The operand-area letter a physical address for this direction
    /// must carry: `%I...` for inputs, `%Q...` for outputs.
    pub const fn area_letter(&self) -> char {
        match self {
            SignalDirection::Input => 'I',
            SignalDirection::Output => 'Q',
        }
    }

    /// Tag used in the exported I/O list's Type column.
    pub const fn export_tag(&self) -> &'static str {
        match self {
            SignalDirection::Input => "DI",
            SignalDirection::Output => "DO",
        }
    }
}

impl Display for SignalDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(match self {
            SignalDirection::Input => "input",
            SignalDirection::Output => "output",
        })
    }
}

/// One named signal of a mechanism kind.  The role set is fixed per
/// kind; a site leaves a role unused by leaving its address cell
/// empty in the source table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignalRole {
    /// Column heading in the source table, e.g. `DI_Speed`.
    pub column: &'static str,
    pub direction: SignalDirection,
    /// Field of the kind's UDT this signal is copied to or from.
    /// Inputs land in a normalized `_OK` field; outputs are read back
    /// from the command field of the same name as the role.
    pub udt_field: &'static str,
    /// Short form appended to the mechanism name in the exported I/O
    /// list, e.g. `Upper` for `DI_UpperLevel`.
    pub export_suffix: &'static str,
    /// Description column of the exported I/O list.
    pub description: &'static str,
}

impl Display for SignalRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(self.column)
    }
}
