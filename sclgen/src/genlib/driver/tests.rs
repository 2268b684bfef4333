use super::*;

use std::fs;

use tempfile::TempDir;

fn site_dir(tables: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("should be able to create a temporary directory");
    for (file_name, contents) in tables {
        fs::write(dir.path().join(file_name), contents).expect("test table should be writable");
    }
    dir
}

const FAN_TABLE: &str = "\
Name,Location,Slot,TypedIdx,Enabled,DI_Breaker,DO_Run,StartDelayMs
FAN_1,Roof,150,0,TRUE,%I4.0,%Q4.0,2000
FAN_2,Roof,151,1,TRUE,%I4.1,%Q4.1,2000
";

#[test]
fn test_generator_writes_every_returned_file() {
    let input = site_dir(&[
        ("fans.csv", FAN_TABLE),
        ("config.csv", "Parameter,Value\nProjectName,Granary North\n"),
    ]);
    let output = TempDir::new().expect("should be able to create a temporary directory");
    let written = run_generator(
        input.path(),
        output.path(),
        BackendKind::Fixed,
        true,
        OutputOptions { docs: true },
    )
    .expect("generation should succeed");

    for file_name in &written {
        assert!(
            output.path().join(file_name).is_file(),
            "{file_name} was reported but not written"
        );
    }
    assert!(written.contains(&"DB_Mechs.scl".to_string()));
    assert!(written.contains(&"DB_HAL_Fan.scl".to_string()));
    assert!(written.contains(&"CONFIG_DOCUMENTATION.md".to_string()));
    assert!(written.contains(&"IO_LIST.csv".to_string()));

    let db_mechs = fs::read_to_string(output.path().join("DB_Mechs.scl"))
        .expect("DB_Mechs.scl should be readable");
    assert!(db_mechs.contains("// Project  : Granary North"));
    assert!(db_mechs.contains("Fan : ARRAY [0..1] OF \"UDT_Fan\";"));
}

#[test]
fn test_docs_are_written_only_on_request() {
    let input = site_dir(&[("fans.csv", FAN_TABLE)]);
    let output = TempDir::new().expect("should be able to create a temporary directory");
    let written = run_generator(
        input.path(),
        output.path(),
        BackendKind::Fixed,
        false,
        OutputOptions::default(),
    )
    .expect("generation should succeed");
    assert!(!written.contains(&"CONFIG_DOCUMENTATION.md".to_string()));
    assert!(!output.path().join("IO_LIST.csv").exists());
}

#[test]
fn test_validation_failure_writes_nothing() {
    let broken = "\
Name,Location,Slot,TypedIdx,Enabled,DI_Breaker,DO_Run,StartDelayMs
FAN_1,Roof,150,0,TRUE,%I4.0,%Q4.0,2000
FAN_2,Roof,150,0,TRUE,%I4.0,%Q4.0,2000
";
    let input = site_dir(&[("fans.csv", broken)]);
    let output = TempDir::new().expect("should be able to create a temporary directory");
    let target = output.path().join("generated");
    let failure = run_generator(
        input.path(),
        &target,
        BackendKind::Fixed,
        false,
        OutputOptions::default(),
    )
    .expect_err("two fans share a slot, an index, and both addresses");

    match &failure {
        GeneratorFailure::ValidationFailed(report) => {
            assert_eq!(report.errors().len(), 4, "{report}");
        }
        other => panic!("expected a validation failure, got {other}"),
    }
    let message = failure.to_string();
    assert!(message.contains("more than one mechanism"), "{message}");
    assert!(message.contains("I/O conflict"), "{message}");
    assert!(!target.exists(), "no output may appear on failure");
}

#[test]
fn test_check_accepts_what_the_generator_accepts() {
    let input = site_dir(&[("fans.csv", FAN_TABLE)]);
    run_check(input.path(), true).expect("the table is clean");
}

#[test]
fn test_check_rejects_an_index_hole_only_in_strict_mode() {
    let holey = "\
Name,Location,Slot,TypedIdx,Enabled,DI_Breaker,DO_Run,StartDelayMs
FAN_1,Roof,150,0,TRUE,%I4.0,%Q4.0,2000
FAN_2,Roof,151,2,TRUE,%I4.1,%Q4.1,2000
";
    let input = site_dir(&[("fans.csv", holey)]);
    run_check(input.path(), false).expect("holes are allowed by default");
    let failure = run_check(input.path(), true).expect_err("strict mode rejects the hole");
    assert!(failure.to_string().contains("gap"), "{failure}");
}

#[test]
fn test_table_errors_name_the_broken_cell() {
    let input = site_dir(&[(
        "fans.csv",
        "Name,Location,Slot,TypedIdx,Enabled,DI_Breaker,DO_Run,StartDelayMs\n\
         FAN_1,Roof,950,0,TRUE,,,\n",
    )]);
    let failure = run_check(input.path(), false).expect_err("slot 950 is off the bus");
    let message = failure.to_string();
    assert!(message.contains("fans.csv"), "{message}");
    assert!(message.contains("column Slot"), "{message}");
}
