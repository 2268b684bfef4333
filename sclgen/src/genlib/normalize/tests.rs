use super::*;

use std::fs;

use tempfile::TempDir;

fn table_dir() -> TempDir {
    TempDir::new().expect("should be able to create a temporary directory")
}

fn write_table(dir: &TempDir, file_name: &str, contents: &str) {
    fs::write(dir.path().join(file_name), contents).expect("test table should be writable");
}

const FAN_HEADER: &str = "Name,Location,Slot,TypedIdx,Enabled,DI_Breaker,DO_Run,StartDelayMs\n";

#[test]
fn test_enabled_spellings() {
    let dir = table_dir();
    write_table(
        &dir,
        "fans.csv",
        &format!(
            "{FAN_HEADER}\
             FAN_1,Roof,150,0,TRUE,,,\n\
             FAN_2,Roof,151,1,true,,,\n\
             FAN_3,Roof,152,2,1,,,\n\
             FAN_4,Roof,153,3,YES,,,\n\
             FAN_5,Roof,154,4,yes,,,\n\
             FAN_6,Roof,155,5,FALSE,,,\n\
             FAN_7,Roof,156,6,0,,,\n\
             FAN_8,Roof,157,7,,,,\n"
        ),
    );
    let records = load_tables(dir.path()).expect("tables should load");
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["FAN_1", "FAN_2", "FAN_3", "FAN_4", "FAN_5"]);
}

#[test]
fn test_missing_table_means_no_mechanisms_of_that_kind() {
    let dir = table_dir();
    write_table(&dir, "fans.csv", &format!("{FAN_HEADER}FAN_1,Roof,150,0,TRUE,%I3.0,%Q3.0,2000\n"));
    let records = load_tables(dir.path()).expect("tables should load");
    assert_eq!(records.len(), 1);
    assert!(records.of_kind(MechKind::Redler).is_empty());
    assert!(records.of_kind(MechKind::Noria).is_empty());
    assert!(records.of_kind(MechKind::Gate).is_empty());
}

#[test]
fn test_columns_are_found_by_name_not_position() {
    let dir = table_dir();
    write_table(
        &dir,
        "fans.csv",
        "StartDelayMs,Enabled,DO_Run,DI_Breaker,TypedIdx,Slot,Location,Name\n\
         2000,TRUE,%Q3.0,%I3.0,0,150,Roof,FAN_1\n",
    );
    let records = load_tables(dir.path()).expect("tables should load");
    let record = &records.of_kind(MechKind::Fan)[0];
    assert_eq!(record.name, "FAN_1");
    assert_eq!(record.slot, Slot::new(150));
    assert_eq!(record.config.parameter(), 2000);
}

#[test]
fn test_missing_columns_are_reported_together() {
    let dir = table_dir();
    write_table(&dir, "fans.csv", "Name,Location,Slot\nFAN_1,Roof,150\n");
    let failure = load_tables(dir.path()).expect_err("the table lacks required columns");
    let message = failure.to_string();
    assert!(message.contains("missing required columns"), "{message}");
    assert!(message.contains("TypedIdx"), "{message}");
    assert!(message.contains("Enabled"), "{message}");
    assert!(message.contains("DI_Breaker"), "{message}");
    assert!(message.contains("StartDelayMs"), "{message}");
}

#[test]
fn test_bad_slot_cell_names_file_line_and_column() {
    let dir = table_dir();
    write_table(
        &dir,
        "fans.csv",
        &format!("{FAN_HEADER}FAN_1,Roof,abc,0,TRUE,,,\n"),
    );
    let failure = load_tables(dir.path()).expect_err("the slot cell is not a number");
    let message = failure.to_string();
    assert!(message.contains("fans.csv"), "{message}");
    assert!(message.contains("line 2"), "{message}");
    assert!(message.contains("column Slot"), "{message}");
}

#[test]
fn test_slot_out_of_bus_range_is_rejected() {
    let dir = table_dir();
    write_table(
        &dir,
        "fans.csv",
        &format!("{FAN_HEADER}FAN_1,Roof,256,0,TRUE,,,\n"),
    );
    let failure = load_tables(dir.path()).expect_err("slot 256 is outside the bus");
    assert!(failure.to_string().contains("256"), "{failure}");
}

#[test]
fn test_reserved_typed_index_is_rejected() {
    let dir = table_dir();
    write_table(
        &dir,
        "fans.csv",
        &format!("{FAN_HEADER}FAN_1,Roof,150,65535,TRUE,,,\n"),
    );
    let failure = load_tables(dir.path()).expect_err("65535 marks an empty bus entry");
    assert!(failure.to_string().contains("65535"), "{failure}");
}

#[test]
fn test_garbage_in_disabled_rows_is_ignored() {
    let dir = table_dir();
    write_table(
        &dir,
        "fans.csv",
        &format!(
            "{FAN_HEADER}\
             FAN_1,Roof,not a slot,bad,FALSE,junk,junk,junk\n\
             FAN_2,Roof,150,0,TRUE,,,\n"
        ),
    );
    let records = load_tables(dir.path()).expect("disabled rows should not be parsed");
    assert_eq!(records.len(), 1);
}

#[test]
fn test_cells_are_trimmed() {
    let dir = table_dir();
    write_table(
        &dir,
        "fans.csv",
        &format!("{FAN_HEADER} FAN_1 , Roof , 150 , 0 , TRUE , %I3.0 , %Q3.0 , 2000 \n"),
    );
    let records = load_tables(dir.path()).expect("tables should load");
    let record = &records.of_kind(MechKind::Fan)[0];
    assert_eq!(record.name, "FAN_1");
    assert_eq!(record.location, "Roof");
    let bound: Vec<&str> = record.bindings().map(|b| b.token.as_str()).collect();
    assert_eq!(bound, vec!["%I3.0", "%Q3.0"]);
}

#[test]
fn test_empty_and_omitted_address_cells_are_unbound() {
    let dir = table_dir();
    // The second row stops after Enabled; flexible reading treats the
    // rest as empty.
    write_table(
        &dir,
        "fans.csv",
        &format!(
            "{FAN_HEADER}\
             FAN_1,Roof,150,0,TRUE,,%Q3.0,\n\
             FAN_2,Roof,151,1,TRUE\n"
        ),
    );
    let records = load_tables(dir.path()).expect("tables should load");
    let fans = records.of_kind(MechKind::Fan);
    let first: Vec<&str> = fans[0].bindings().map(|b| b.role.column).collect();
    assert_eq!(first, vec!["DO_Run"]);
    assert_eq!(fans[1].bindings().count(), 0);
    assert_eq!(fans[1].config.parameter(), 0);
}

#[test]
fn test_unparseable_parameter_names_its_column() {
    let dir = table_dir();
    write_table(
        &dir,
        "fans.csv",
        &format!("{FAN_HEADER}FAN_1,Roof,150,0,TRUE,,,soon\n"),
    );
    let failure = load_tables(dir.path()).expect_err("'soon' is not a delay");
    assert!(failure.to_string().contains("StartDelayMs"), "{failure}");
}

#[test]
fn test_project_meta_defaults_without_config_table() {
    let dir = table_dir();
    let meta = load_project_meta(dir.path()).expect("missing config.csv is fine");
    assert_eq!(meta, ProjectMeta::default());
}

#[test]
fn test_project_meta_partial_override() {
    let dir = table_dir();
    write_table(
        &dir,
        "config.csv",
        "Parameter,Value\n\
         ProjectName,Granary North\n\
         ScanTimeMs,100\n\
         Version,\n",
    );
    let meta = load_project_meta(dir.path()).expect("config.csv should load");
    assert_eq!(meta.name, "Granary North");
    assert_eq!(meta.author, "AutoGen");
    assert_eq!(meta.version, "1.0.0");
}

#[test]
fn test_empty_directory_loads_an_empty_set() {
    let dir = table_dir();
    let records = load_tables(dir.path()).expect("an empty site is not an error");
    assert!(records.is_empty());
}
