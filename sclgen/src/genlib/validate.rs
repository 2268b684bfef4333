//! Table validation.  All checks run over the full record set and
//! every finding is collected; nothing here touches the filesystem
//! or stops at the first problem.
use std::collections::{btree_map::Entry, BTreeMap, BTreeSet};
use std::fmt::{self, Display, Formatter};

use tracing::{event, Level};

use base::prelude::{AddressToken, MechKind, SignalRole, Slot, SlotRange, TypedIndex};

use crate::record::RecordSet;

/// A finding which makes the tables unusable.  Code generation will
/// not run while any of these stand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// At least two records claim the same slot.  One error covers
    /// the whole run and names every slot claimed more than once.
    DuplicateSlot { slots: BTreeSet<Slot> },
    /// Two records of the same kind share a typed index, so they
    /// would alias the same typed array element.
    DuplicateTypedIndex {
        kind: MechKind,
        values: BTreeSet<TypedIndex>,
    },
    /// Under strict indexing, a kind's typed indices do not count up
    /// from zero without holes.  Only the first hole per kind is
    /// reported; later ones are usually the same editing mistake.
    TypedIndexGap {
        kind: MechKind,
        expected: u16,
        found: TypedIndex,
    },
    /// One physical address is bound by two signals.  Reported once
    /// per address, at the moment of the first collision.
    AddressConflict {
        token: AddressToken,
        first_owner: String,
        second_owner: String,
    },
    /// An address cell does not parse as a bit address of the role's
    /// direction.
    BadAddressToken {
        name: String,
        role: &'static SignalRole,
        token: AddressToken,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            ValidationError::DuplicateSlot { slots } => {
                f.write_str("these slots are assigned to more than one mechanism: ")?;
                write_joined(f, slots.iter())
            }
            ValidationError::DuplicateTypedIndex { kind, values } => {
                write!(f, "duplicate typed indices among {}: ", kind.plural())?;
                write_joined(f, values.iter())
            }
            ValidationError::TypedIndexGap {
                kind,
                expected,
                found,
            } => {
                write!(
                    f,
                    "gap in {kind} typed indices: expected {expected}, found {found}"
                )
            }
            ValidationError::AddressConflict {
                token,
                first_owner,
                second_owner,
            } => {
                write!(
                    f,
                    "I/O conflict: {token} is used by both '{first_owner}' and '{second_owner}'"
                )
            }
            ValidationError::BadAddressToken { name, role, token } => {
                write!(
                    f,
                    "'{token}' is not a usable {} address for {} of '{name}' (expected %{}<byte>.<bit>)",
                    role.direction,
                    role.column,
                    role.direction.area_letter()
                )
            }
        }
    }
}

fn write_joined<T: Display>(
    f: &mut Formatter<'_>,
    items: impl Iterator<Item = T>,
) -> Result<(), fmt::Error> {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// A finding worth telling the user about which does not stop
/// generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationWarning {
    /// The slot is legal but outside the kind's conventional
    /// sub-range.
    SlotOutsideRecommendedRange {
        kind: MechKind,
        name: String,
        slot: Slot,
        recommended: SlotRange,
    },
}

impl Display for ValidationWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            ValidationWarning::SlotOutsideRecommendedRange {
                kind,
                name,
                slot,
                recommended,
            } => {
                write!(
                    f,
                    "{kind} '{name}' slot={slot} is outside the recommended range {recommended}"
                )
            }
        }
    }
}

/// Everything validation found, errors and warnings together.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    pub fn is_fatal(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        for error in &self.errors {
            writeln!(f, "error: {error}")?;
        }
        for warning in &self.warnings {
            writeln!(f, "warning: {warning}")?;
        }
        Ok(())
    }
}

/// Run every check over `records` and report all findings.  The
/// checks and the records are walked in a fixed order, so two runs
/// over the same input produce identical reports.
pub fn validate_records(records: &RecordSet, strict_indexes: bool) -> ValidationReport {
    event!(
        Level::DEBUG,
        "validating {} enabled mechanisms",
        records.len()
    );
    let mut report = ValidationReport::default();
    check_slot_uniqueness(records, &mut report);
    check_typed_index_uniqueness(records, &mut report);
    if strict_indexes {
        check_typed_index_contiguity(records, &mut report);
    }
    check_address_conflicts(records, &mut report);
    check_address_syntax(records, &mut report);
    check_slot_ranges(records, &mut report);
    event!(
        Level::DEBUG,
        "validation finished with {} errors, {} warnings",
        report.errors.len(),
        report.warnings.len()
    );
    report
}

fn check_slot_uniqueness(records: &RecordSet, report: &mut ValidationReport) {
    let mut seen: BTreeMap<Slot, usize> = BTreeMap::new();
    for record in records.iter() {
        *seen.entry(record.slot).or_insert(0) += 1;
    }
    let slots: BTreeSet<Slot> = seen
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(slot, _)| slot)
        .collect();
    if !slots.is_empty() {
        report.errors.push(ValidationError::DuplicateSlot { slots });
    }
}

fn check_typed_index_uniqueness(records: &RecordSet, report: &mut ValidationReport) {
    for kind in MechKind::ALL {
        let mut seen: BTreeMap<TypedIndex, usize> = BTreeMap::new();
        for record in records.of_kind(kind) {
            *seen.entry(record.typed_index).or_insert(0) += 1;
        }
        let values: BTreeSet<TypedIndex> = seen
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(value, _)| value)
            .collect();
        if !values.is_empty() {
            report
                .errors
                .push(ValidationError::DuplicateTypedIndex { kind, values });
        }
    }
}

fn check_typed_index_contiguity(records: &RecordSet, report: &mut ValidationReport) {
    for kind in MechKind::ALL {
        let mut indices: Vec<TypedIndex> = records
            .of_kind(kind)
            .iter()
            .map(|record| record.typed_index)
            .collect();
        indices.sort_unstable();
        for (position, found) in indices.into_iter().enumerate() {
            // A kind holds at most 256 records, so this cannot wrap.
            let expected = position as u16;
            if found.get() != expected {
                report.errors.push(ValidationError::TypedIndexGap {
                    kind,
                    expected,
                    found,
                });
                break;
            }
        }
    }
}

enum Claim<'r> {
    Sole(&'r str),
    Reported,
}

fn check_address_conflicts(records: &RecordSet, report: &mut ValidationReport) {
    let mut claims: BTreeMap<&AddressToken, Claim<'_>> = BTreeMap::new();
    for record in records.iter() {
        for binding in record.bindings() {
            match claims.entry(binding.token) {
                Entry::Vacant(vacant) => {
                    vacant.insert(Claim::Sole(&record.name));
                }
                Entry::Occupied(mut occupied) => {
                    if let Claim::Sole(first_owner) = occupied.get() {
                        report.errors.push(ValidationError::AddressConflict {
                            token: binding.token.clone(),
                            first_owner: first_owner.to_string(),
                            second_owner: record.name.clone(),
                        });
                        occupied.insert(Claim::Reported);
                    }
                }
            }
        }
    }
}

fn check_address_syntax(records: &RecordSet, report: &mut ValidationReport) {
    for record in records.iter() {
        for binding in record.bindings() {
            let usable = match binding.token.parse_physical() {
                Ok(address) => address.area() == binding.role.direction,
                Err(_) => false,
            };
            if !usable {
                report.errors.push(ValidationError::BadAddressToken {
                    name: record.name.clone(),
                    role: binding.role,
                    token: binding.token.clone(),
                });
            }
        }
    }
}

fn check_slot_ranges(records: &RecordSet, report: &mut ValidationReport) {
    for record in records.iter() {
        let kind = record.kind();
        let recommended = kind.recommended_slots();
        if !recommended.contains(record.slot) {
            report
                .warnings
                .push(ValidationWarning::SlotOutsideRecommendedRange {
                    kind,
                    name: record.name.clone(),
                    slot: record.slot,
                    recommended,
                });
        }
    }
}
