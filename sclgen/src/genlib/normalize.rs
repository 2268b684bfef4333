//! Reading the source tables: one CSV per mechanism kind, plus the
//! optional project table.  This is the only module that looks at
//! CSV cells; everything after it works on [`MechRecord`]s.
use std::path::Path;

use csv::StringRecord;
use tracing::{event, Level};

use base::prelude::{AddressToken, MechKind, Slot, TypedIndex};

use crate::config::ProjectMeta;
use crate::record::{MechConfig, MechRecord, RecordSet};
use crate::types::{GeneratorFailure, IoAction, IoFailed, IoTarget, TableFailed};

/// Spellings of the `Enabled` cell which include a row in the build.
/// Anything else, the empty cell included, disables the row.
const ENABLED_SPELLINGS: [&str; 3] = ["TRUE", "1", "YES"];

fn is_enabled(cell: &str) -> bool {
    ENABLED_SPELLINGS.contains(&cell.to_uppercase().as_str())
}

/// Read every kind's table under `input_dir`.  A missing table file
/// means the site simply has no mechanisms of that kind.
pub fn load_tables(input_dir: &Path) -> Result<RecordSet, GeneratorFailure> {
    let mut records = RecordSet::new();
    for kind in MechKind::ALL {
        for record in load_kind_table(input_dir, kind)? {
            records.push(record);
        }
    }
    event!(
        Level::INFO,
        "loaded {} enabled mechanisms from {}",
        records.len(),
        input_dir.display()
    );
    Ok(records)
}

/// Read `config.csv` under `input_dir`.  The file is optional and so
/// is every row in it; absent values keep their defaults.
pub fn load_project_meta(input_dir: &Path) -> Result<ProjectMeta, GeneratorFailure> {
    let path = input_dir.join("config.csv");
    let mut reader = match open_table(&path) {
        Ok(Some(reader)) => reader,
        Ok(None) => {
            event!(
                Level::INFO,
                "no config.csv in {}, using default project metadata",
                input_dir.display()
            );
            return Ok(ProjectMeta::default());
        }
        Err(failure) => return Err(failure),
    };
    let headers = read_headers(&mut reader, &path)?;
    let parameter_column = require_column(&headers, "Parameter", &path)?;
    let value_column = require_column(&headers, "Value", &path)?;
    let mut meta = ProjectMeta::default();
    for row in reader.records() {
        let row = row.map_err(|error| read_failure(&path, error))?;
        let cell = |index: usize| row.get(index).unwrap_or("");
        let value = cell(value_column);
        if value.is_empty() {
            continue;
        }
        match cell(parameter_column) {
            "ProjectName" => meta.name = value.to_string(),
            "Author" => meta.author = value.to_string(),
            "Version" => meta.version = value.to_string(),
            other => {
                event!(Level::DEBUG, "ignoring unknown config parameter '{other}'");
            }
        }
    }
    Ok(meta)
}

/// Positions of the columns a kind's table must have.
struct ColumnMap {
    name: usize,
    location: usize,
    slot: usize,
    typed_index: usize,
    enabled: usize,
    parameter: usize,
    roles: Vec<usize>,
}

fn load_kind_table(input_dir: &Path, kind: MechKind) -> Result<Vec<MechRecord>, GeneratorFailure> {
    let path = input_dir.join(format!("{}.csv", kind.table_stem()));
    let mut reader = match open_table(&path) {
        Ok(Some(reader)) => reader,
        Ok(None) => {
            event!(
                Level::INFO,
                "no {} ({} are not installed here)",
                path.display(),
                kind.plural()
            );
            return Ok(Vec::new());
        }
        Err(failure) => return Err(failure),
    };
    let headers = read_headers(&mut reader, &path)?;
    let columns = map_columns(&headers, kind, &path)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|error| read_failure(&path, error))?;
        let line = row.position().map(|position| position.line());
        let cell = |index: usize| row.get(index).unwrap_or("");

        if !is_enabled(cell(columns.enabled)) {
            continue;
        }
        let name = cell(columns.name);
        if name.is_empty() {
            return Err(cell_failure(&path, line, "Name", "the cell is empty"));
        }
        let slot = parse_slot(cell(columns.slot))
            .map_err(|problem| cell_failure(&path, line, "Slot", &problem))?;
        let typed_index = parse_typed_index(cell(columns.typed_index))
            .map_err(|problem| cell_failure(&path, line, "TypedIdx", &problem))?;
        let parameter = parse_parameter(cell(columns.parameter))
            .map_err(|problem| cell_failure(&path, line, kind.parameter_column(), &problem))?;
        let cells = columns
            .roles
            .iter()
            .map(|&index| {
                let token = cell(index);
                if token.is_empty() {
                    None
                } else {
                    Some(AddressToken::from(token))
                }
            })
            .collect();

        records.push(MechRecord {
            name: name.to_string(),
            location: cell(columns.location).to_string(),
            slot,
            typed_index,
            config: MechConfig::from_cells(kind, cells, parameter),
        });
    }
    event!(
        Level::INFO,
        "{}: {} enabled rows",
        path.display(),
        records.len()
    );
    Ok(records)
}

/// Open a CSV table for reading.  `Ok(None)` means the file does not
/// exist, which callers treat as an empty table.
fn open_table(path: &Path) -> Result<Option<csv::Reader<std::fs::File>>, GeneratorFailure> {
    match csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
    {
        Ok(reader) => Ok(Some(reader)),
        Err(error) => {
            if let csv::ErrorKind::Io(io_error) = error.kind() {
                if io_error.kind() == std::io::ErrorKind::NotFound {
                    return Ok(None);
                }
            }
            Err(read_failure(path, error))
        }
    }
}

fn read_headers(
    reader: &mut csv::Reader<std::fs::File>,
    path: &Path,
) -> Result<StringRecord, GeneratorFailure> {
    reader
        .headers()
        .map(Clone::clone)
        .map_err(|error| read_failure(path, error))
}

fn require_column(
    headers: &StringRecord,
    column: &str,
    path: &Path,
) -> Result<usize, GeneratorFailure> {
    headers
        .iter()
        .position(|header| header == column)
        .ok_or_else(|| {
            GeneratorFailure::Table(TableFailed {
                file: path.to_path_buf(),
                line: None,
                column: Some(column.to_string()),
                problem: "required column is missing".to_string(),
            })
        })
}

fn map_columns(
    headers: &StringRecord,
    kind: MechKind,
    path: &Path,
) -> Result<ColumnMap, GeneratorFailure> {
    let mut missing: Vec<&'static str> = Vec::new();
    let mut find = |column: &'static str| -> usize {
        match headers.iter().position(|header| header == column) {
            Some(index) => index,
            None => {
                missing.push(column);
                0
            }
        }
    };
    let columns = ColumnMap {
        name: find("Name"),
        location: find("Location"),
        slot: find("Slot"),
        typed_index: find("TypedIdx"),
        enabled: find("Enabled"),
        parameter: find(kind.parameter_column()),
        roles: kind.roles().iter().map(|role| find(role.column)).collect(),
    };
    if missing.is_empty() {
        Ok(columns)
    } else {
        Err(GeneratorFailure::Table(TableFailed {
            file: path.to_path_buf(),
            line: None,
            column: None,
            problem: format!("missing required columns: {}", missing.join(", ")),
        }))
    }
}

fn parse_slot(cell: &str) -> Result<Slot, String> {
    let number: u32 = cell
        .parse()
        .map_err(|_| format!("'{cell}' is not a slot number"))?;
    Slot::try_from(number).map_err(|failed| failed.to_string())
}

fn parse_typed_index(cell: &str) -> Result<TypedIndex, String> {
    let number: u32 = cell
        .parse()
        .map_err(|_| format!("'{cell}' is not a typed index"))?;
    TypedIndex::try_from(number).map_err(|failed| failed.to_string())
}

/// An empty parameter cell means "let the handler use its default",
/// which the runtime spells as zero.
fn parse_parameter(cell: &str) -> Result<u32, String> {
    if cell.is_empty() {
        return Ok(0);
    }
    cell.parse()
        .map_err(|_| format!("'{cell}' is not a number of milliseconds"))
}

fn cell_failure(path: &Path, line: Option<u64>, column: &str, problem: &str) -> GeneratorFailure {
    GeneratorFailure::Table(TableFailed {
        file: path.to_path_buf(),
        line,
        column: Some(column.to_string()),
        problem: problem.to_string(),
    })
}

/// Fold a csv-level error into ours, keeping the line number when the
/// error is tied to one row.
fn read_failure(path: &Path, error: csv::Error) -> GeneratorFailure {
    let line = error.position().map(|position| position.line());
    let problem = error.to_string();
    match error.into_kind() {
        csv::ErrorKind::Io(io_error) => GeneratorFailure::Io(IoFailed {
            action: IoAction::Read,
            target: IoTarget::File(path.to_path_buf()),
            error: io_error,
        }),
        _ => GeneratorFailure::Table(TableFailed {
            file: path.to_path_buf(),
            line,
            column: None,
            problem,
        }),
    }
}

#[cfg(test)]
mod tests;
